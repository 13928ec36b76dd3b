//! # Radio Transport Traits
//!
//! Hardware seam for the packet radio. Real deployments back these traits
//! with an nRF24L01 driver (or a serial modem bridging to one); tests use
//! [`mocks::MockRadio`], whose clones share one payload queue and so form
//! an in-memory loopback link.

use std::io;

/// Largest payload an nRF24-class module delivers in one packet
pub const RADIO_MAX_PAYLOAD: usize = 32;

/// Transmit side of the radio link
pub trait RadioTx {
    /// Transmit one payload
    ///
    /// Fire-and-forget at the protocol level: a lost packet is recovered by
    /// the next control sample, so callers never retry.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport rejects the payload (hardware
    /// fault, detached module). The caller counts and continues.
    fn transmit(&mut self, payload: &[u8]) -> io::Result<()>;
}

/// Receive side of the radio link
///
/// Models a hardware receive queue: payloads arrive with an explicit length
/// and reading a payload always removes it from the queue, whether or not
/// the caller's buffer could hold it.
pub trait RadioRx {
    /// Returns true while at least one received payload is queued.
    fn payload_available(&mut self) -> bool;

    /// Returns the length in bytes of the next queued payload.
    fn payload_len(&mut self) -> usize;

    /// Pop the next payload into `buf`
    ///
    /// Copies at most `buf.len()` bytes; any excess is dropped with the
    /// payload. Returns the number of bytes copied, 0 when the queue is
    /// empty.
    fn read_payload(&mut self, buf: &mut [u8]) -> usize;
}


#[cfg(test)]
mod tests {
    use super::mocks::MockRadio;
    use super::*;

    // ==================== Mock Behavior Tests ====================

    #[test]
    fn test_clones_share_queue() {
        let tx = MockRadio::new();
        let mut rx = tx.clone();

        tx.queue_payload(&[1, 2, 3]);

        assert!(rx.payload_available());
        assert_eq!(rx.payload_len(), 3);
    }

    #[test]
    fn test_read_payload_pops_in_order() {
        let mut radio = MockRadio::new();
        radio.queue_payload(&[1]);
        radio.queue_payload(&[2, 2]);

        let mut buf = [0u8; RADIO_MAX_PAYLOAD];
        assert_eq!(radio.read_payload(&mut buf), 1);
        assert_eq!(buf[0], 1);
        assert_eq!(radio.read_payload(&mut buf), 2);
        assert_eq!(&buf[..2], &[2, 2]);
        assert_eq!(radio.read_payload(&mut buf), 0);
    }

    #[test]
    fn test_read_payload_truncates_to_buffer() {
        let mut radio = MockRadio::new();
        radio.queue_payload(&[9u8; 8]);

        let mut buf = [0u8; 4];
        assert_eq!(radio.read_payload(&mut buf), 4);
        // The payload is gone even though half of it was dropped.
        assert!(!radio.payload_available());
    }

    #[test]
    fn test_transmit_error_toggles() {
        let mut radio = MockRadio::new();
        radio.set_transmit_error(io::ErrorKind::BrokenPipe);

        assert!(radio.transmit(&[0u8; 5]).is_err());
        assert!(!radio.payload_available());

        radio.clear_transmit_error();
        assert!(radio.transmit(&[0u8; 5]).is_ok());
        assert!(radio.payload_available());
    }
}
