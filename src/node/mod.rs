//! # Link Endpoints
//!
//! One owned state object per side of the link:
//!
//! - [`ground::GroundNode`] - pilot uplink in, radio payloads out
//! - [`wing::WingNode`] - radio payloads in, servo commands out
//!
//! Each node bundles its side's decoders, counters, and (on the wing) the
//! failsafe, so a binary or test drives a whole endpoint through one type.

pub mod ground;
pub mod wing;
