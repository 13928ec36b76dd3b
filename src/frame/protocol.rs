//! # Control Link Protocol Constants and Types
//!
//! Core definitions shared by both sides of the link: the 7-byte serial
//! frame from the pilot uplink and the 5-byte payload carried over the
//! radio.

/// Frame sentinel byte marking the start of a control frame (always 0xAA)
pub const FRAME_SENTINEL: u8 = 0xAA;

/// Total control frame length in bytes
/// Frame structure: sentinel(1) + axisX(2) + axisY(2) + button(1) + checksum(1)
pub const FRAME_LEN: usize = 7;

/// Radio payload length in bytes
/// Payload structure: axisX(2) + axisY(2) + button(1), no checksum
pub const RADIO_PAYLOAD_LEN: usize = 5;

/// Nominal maximum magnitude of a raw axis value
pub const AXIS_RAW_MAX: i16 = i16::MAX;

/// One control sample from the pilot input device
///
/// Produced by the frame decoder on the ground side and by the radio decoder
/// on the wing side. Axis values cover the full signed 16-bit range; the
/// button byte carries 0 or 1 in normal operation and is passed through
/// unchanged either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlPacket {
    /// Horizontal axis, little-endian on the wire
    pub axis_x: i16,

    /// Vertical axis, little-endian on the wire
    pub axis_y: i16,

    /// Button flag (0 = released, 1 = pressed)
    pub button: u8,
}

impl ControlPacket {
    /// Creates a packet from explicit field values.
    #[must_use]
    pub const fn new(axis_x: i16, axis_y: i16, button: u8) -> Self {
        Self {
            axis_x,
            axis_y,
            button,
        }
    }

    /// Encode into the 5-byte positional radio payload
    ///
    /// Layout: `[axisX low][axisX high][axisY low][axisY high][button]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wing_link::frame::protocol::ControlPacket;
    ///
    /// let payload = ControlPacket::new(0x1234, -1, 1).encode_payload();
    /// assert_eq!(payload, [0x34, 0x12, 0xFF, 0xFF, 0x01]);
    /// ```
    #[must_use]
    pub fn encode_payload(&self) -> [u8; RADIO_PAYLOAD_LEN] {
        let x = self.axis_x.to_le_bytes();
        let y = self.axis_y.to_le_bytes();

        [x[0], x[1], y[0], y[1], self.button]
    }

    /// Decode a 5-byte positional radio payload
    ///
    /// Returns `None` when `payload` is not exactly 5 bytes; callers treat
    /// that as "drain and discard", not as an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use wing_link::frame::protocol::ControlPacket;
    ///
    /// let packet = ControlPacket::new(-22102, 512, 1);
    /// let payload = packet.encode_payload();
    /// assert_eq!(ControlPacket::decode_payload(&payload), Some(packet));
    /// assert_eq!(ControlPacket::decode_payload(&payload[..4]), None);
    /// ```
    #[must_use]
    pub fn decode_payload(payload: &[u8]) -> Option<Self> {
        if payload.len() != RADIO_PAYLOAD_LEN {
            return None;
        }

        Some(Self {
            axis_x: i16::from_le_bytes([payload[0], payload[1]]),
            axis_y: i16::from_le_bytes([payload[2], payload[3]]),
            button: payload[4],
        })
    }
}
