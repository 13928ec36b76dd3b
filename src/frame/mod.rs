//! # Control Frame Module
//!
//! Implementation of the 7-byte control frame carried over the pilot uplink.
//!
//! This module handles:
//! - Frame construction (sentinel + positional payload + additive checksum)
//! - Streaming decode with sentinel resynchronization
//! - Checksum calculation shared by the encode and validate paths
//! - The control packet type and its 5-byte radio payload codec

pub mod checksum;
pub mod decoder;
pub mod encoder;
pub mod protocol;
