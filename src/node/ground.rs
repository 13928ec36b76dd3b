//! # Ground Node
//!
//! Owns everything the ground station does with pilot bytes: frame
//! decoding and radio relay, composed into one object so the serial read
//! loop only has to hand over chunks.

use crate::frame::decoder::FrameDecoder;
use crate::frame::protocol::ControlPacket;
use crate::radio::relay::RadioRelay;
use crate::radio::transport::RadioTx;

/// Ground-station state: uplink decoder plus radio relay
#[derive(Debug)]
pub struct GroundNode<T: RadioTx> {
    decoder: FrameDecoder,
    relay: RadioRelay<T>,
}

impl<T: RadioTx> GroundNode<T> {
    /// Creates a node transmitting over the given radio.
    pub fn new(transport: T) -> Self {
        Self {
            decoder: FrameDecoder::new(),
            relay: RadioRelay::new(transport),
        }
    }

    /// Feed a chunk of pilot uplink bytes
    ///
    /// Every frame completed by this chunk is relayed immediately and in
    /// order, so radio payloads preserve the uplink sequence.
    ///
    /// # Returns
    ///
    /// The number of packets relayed successfully from this chunk.
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        let mut relayed = 0;

        for &byte in bytes {
            if let Some(packet) = self.decoder.push(byte) {
                if self.relay.relay(&packet) {
                    relayed += 1;
                }
            }
        }

        relayed
    }

    /// Decode and relay a single uplink byte.
    pub fn push(&mut self, byte: u8) -> Option<ControlPacket> {
        let packet = self.decoder.push(byte)?;
        self.relay.relay(&packet);
        Some(packet)
    }

    /// Returns the number of uplink frames accepted.
    #[must_use]
    pub fn frames_accepted(&self) -> u64 {
        self.decoder.accepted()
    }

    /// Returns the number of uplink frames rejected for bad checksums.
    #[must_use]
    pub fn frames_rejected(&self) -> u64 {
        self.decoder.rejected()
    }

    /// Returns the number of radio payloads sent.
    #[must_use]
    pub fn payloads_sent(&self) -> u64 {
        self.relay.sent()
    }

    /// Returns the number of radio payloads that failed to send.
    #[must_use]
    pub fn payloads_failed(&self) -> u64 {
        self.relay.failed()
    }
}
