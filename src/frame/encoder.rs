//! # Control Frame Encoder
//!
//! Builds the 7-byte serial frame the pilot input device emits on its
//! uplink. The counterpart of [`crate::frame::decoder::FrameDecoder`];
//! mainly used by tests and by tooling that simulates a pilot device,
//! since the ground binary only consumes frames.

use crate::frame::checksum::checksum8;
use crate::frame::protocol::{ControlPacket, FRAME_LEN, FRAME_SENTINEL};

/// Encode a control packet as a complete serial frame
///
/// Frame layout:
///
/// | Offset | Content |
/// |--------|--------------------------|
/// | 0 | Sentinel (0xAA) |
/// | 1-2 | Axis X, little-endian |
/// | 3-4 | Axis Y, little-endian |
/// | 5 | Button flag |
/// | 6 | Checksum over bytes 1-5 |
///
/// # Examples
///
/// ```
/// use wing_link::frame::encoder::encode_frame;
/// use wing_link::frame::protocol::ControlPacket;
///
/// let frame = encode_frame(&ControlPacket::default());
/// assert_eq!(frame, [0xAA, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
/// ```
#[must_use]
pub fn encode_frame(packet: &ControlPacket) -> [u8; FRAME_LEN] {
    let payload = packet.encode_payload();

    let mut frame = [0u8; FRAME_LEN];
    frame[0] = FRAME_SENTINEL;
    frame[1..FRAME_LEN - 1].copy_from_slice(&payload);
    frame[FRAME_LEN - 1] = checksum8(&payload);

    frame
}
