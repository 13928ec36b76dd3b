//! # Wing-Side Radio Decoder
//!
//! Drains the radio receive queue each control cycle and interprets what
//! arrived. Only exact 5-byte payloads decode into control packets; any
//! other length is stale queue residue or noise and is discarded after
//! being popped. When several packets piled up since the last poll, the
//! newest wins: the servos should chase the freshest pilot input, not
//! replay history.

use tracing::trace;

use crate::frame::protocol::ControlPacket;
use crate::radio::transport::{RadioRx, RADIO_MAX_PAYLOAD};

/// Polls a radio receiver and yields the freshest control packet
#[derive(Debug)]
pub struct RadioDecoder<R: RadioRx> {
    transport: R,

    /// Payloads that decoded into control packets
    accepted: u64,

    /// Payloads discarded for having the wrong length
    discarded: u64,
}

impl<R: RadioRx> RadioDecoder<R> {
    /// Creates a decoder over the given receiver.
    pub fn new(transport: R) -> Self {
        Self {
            transport,
            accepted: 0,
            discarded: 0,
        }
    }

    /// Drain the receive queue, returning the newest valid packet
    ///
    /// Every queued payload is consumed. Returns `None` when the queue was
    /// empty or held only undecodable payloads; the caller's failsafe
    /// timer, not this decoder, decides what that silence means.
    pub fn poll(&mut self) -> Option<ControlPacket> {
        let mut latest = None;
        let mut scratch = [0u8; RADIO_MAX_PAYLOAD];

        while self.transport.payload_available() {
            let len = self.transport.payload_len();
            let read = self.transport.read_payload(&mut scratch);

            match ControlPacket::decode_payload(&scratch[..read]) {
                Some(packet) => {
                    self.accepted += 1;
                    latest = Some(packet);
                }
                None => {
                    self.discarded += 1;
                    trace!("Discarded radio payload of {} bytes", len);
                }
            }
        }

        latest
    }

    /// Returns the number of payloads decoded into packets.
    #[must_use]
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Returns the number of payloads discarded for length mismatch.
    #[must_use]
    pub fn discarded(&self) -> u64 {
        self.discarded
    }
}
