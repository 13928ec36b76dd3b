//! # Ground-Side Radio Relay
//!
//! Takes decoded control packets and re-emits them over the radio as bare
//! 5-byte payloads. The serial frame's sentinel and checksum stop at the
//! ground station; the radio module's own CRC protects the payload from
//! here on.

use tracing::debug;

use crate::frame::protocol::ControlPacket;
use crate::radio::transport::RadioTx;

/// Forwards control packets over a radio transmitter
///
/// One payload per packet, sent synchronously in arrival order. Transmit
/// failures are counted and logged, never retried; the next control sample
/// supersedes the lost one within milliseconds anyway.
#[derive(Debug)]
pub struct RadioRelay<T: RadioTx> {
    transport: T,

    /// Payloads handed to the transport successfully
    sent: u64,

    /// Payloads the transport rejected
    failed: u64,
}

impl<T: RadioTx> RadioRelay<T> {
    /// Creates a relay over the given transmitter.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            sent: 0,
            failed: 0,
        }
    }

    /// Encode and transmit one control packet
    ///
    /// # Returns
    ///
    /// `true` when the transport accepted the payload, `false` when it
    /// reported an error.
    pub fn relay(&mut self, packet: &ControlPacket) -> bool {
        let payload = packet.encode_payload();

        match self.transport.transmit(&payload) {
            Ok(()) => {
                self.sent += 1;
                true
            }
            Err(e) => {
                self.failed += 1;
                debug!("Radio transmit failed: {}", e);
                false
            }
        }
    }

    /// Returns the number of payloads transmitted successfully.
    #[must_use]
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Returns the number of payloads that failed to transmit.
    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed
    }
}
