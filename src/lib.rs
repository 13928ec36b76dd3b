//! # Wing Link Library
//!
//! Relay joystick control frames to wing servos over an nRF24-class radio
//! link.
//!
//! This library provides the two halves of the control link: the ground node
//! that validates 7-byte control frames from the pilot uplink and republishes
//! them as 5-byte radio payloads, and the wing node that maps received
//! payloads to servo angles with differential mixing and failsafe
//! supervision.

pub mod config;
pub mod error;
pub mod frame;
pub mod radio;
pub mod servo;
pub mod failsafe;
pub mod node;
pub mod serial;
