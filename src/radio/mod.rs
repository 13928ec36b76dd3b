//! # Radio Link Layer
//!
//! Transport abstraction over an nRF24-class packet radio plus the two
//! protocol roles built on it:
//!
//! - [`relay::RadioRelay`] - ground side, re-emits decoded control packets
//!   as 5-byte radio payloads
//! - [`decoder::RadioDecoder`] - wing side, drains the receive queue and
//!   keeps the freshest valid packet
//!
//! The transport traits are deliberately synchronous; an SPI-attached
//! module is polled, not awaited.

pub mod decoder;
pub mod relay;
pub mod transport;
