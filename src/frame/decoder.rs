//! # Control Frame Decoder
//!
//! Byte-at-a-time state machine that recovers 7-byte control frames from
//! the raw pilot uplink stream. Handles:
//!
//! - Resynchronization after garbage or a partial frame (bytes outside a
//!   frame are skipped until the next sentinel)
//! - Checksum validation over the 5 payload bytes
//! - Accept/reject counters for the status log
//!
//! Once a sentinel opens a frame, the next 6 bytes are taken verbatim; a
//! 0xAA inside the frame body is payload, not a new frame start. A corrupt
//! frame therefore costs at most one frame time before the decoder hunts
//! for the next sentinel.

use tracing::trace;

use crate::frame::checksum::checksum8;
use crate::frame::protocol::{ControlPacket, FRAME_LEN, FRAME_SENTINEL};

/// Streaming decoder for pilot control frames
///
/// # Examples
///
/// ```
/// use wing_link::frame::decoder::FrameDecoder;
///
/// let mut decoder = FrameDecoder::new();
///
/// // Noise before the frame is skipped, then a neutral frame decodes.
/// let packets = decoder.feed(&[0x13, 0x37, 0xAA, 0, 0, 0, 0, 0, 0]);
/// assert_eq!(packets.len(), 1);
/// assert_eq!(packets[0].axis_x, 0);
/// ```
#[derive(Debug)]
pub struct FrameDecoder {
    /// Frame assembly buffer, buf[0] always holds the sentinel
    buf: [u8; FRAME_LEN],

    /// Bytes currently assembled in `buf`
    filled: usize,

    /// Whether a sentinel has been seen and the frame body is being collected
    in_frame: bool,

    /// Frames that passed checksum validation
    accepted: u64,

    /// Frames dropped for a checksum mismatch
    rejected: u64,
}

impl FrameDecoder {
    /// Creates a decoder hunting for its first sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: [0u8; FRAME_LEN],
            filled: 0,
            in_frame: false,
            accepted: 0,
            rejected: 0,
        }
    }

    /// Consume one byte from the uplink stream
    ///
    /// # Returns
    ///
    /// `Some(packet)` when this byte completes a frame with a valid
    /// checksum, `None` otherwise (mid-frame, skipped noise, or a frame
    /// dropped for checksum mismatch).
    pub fn push(&mut self, byte: u8) -> Option<ControlPacket> {
        if !self.in_frame {
            if byte != FRAME_SENTINEL {
                return None;
            }
            self.buf[0] = byte;
            self.filled = 1;
            self.in_frame = true;
            return None;
        }

        self.buf[self.filled] = byte;
        self.filled += 1;

        if self.filled < FRAME_LEN {
            return None;
        }

        // Frame complete; hunt for the next sentinel either way.
        self.in_frame = false;
        self.filled = 0;

        let payload = &self.buf[1..FRAME_LEN - 1];
        let expected = checksum8(payload);
        let received = self.buf[FRAME_LEN - 1];

        if received != expected {
            self.rejected += 1;
            trace!(
                "Frame rejected: checksum {:#04X} != expected {:#04X}",
                received,
                expected
            );
            return None;
        }

        self.accepted += 1;
        ControlPacket::decode_payload(payload)
    }

    /// Consume a chunk of uplink bytes, returning every packet it completes
    ///
    /// Equivalent to calling [`push`](Self::push) per byte; partial frame
    /// state carries over to the next call.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<ControlPacket> {
        bytes.iter().filter_map(|&byte| self.push(byte)).collect()
    }

    /// Returns the number of frames accepted so far.
    #[must_use]
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Returns the number of frames rejected for checksum mismatch so far.
    #[must_use]
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}
