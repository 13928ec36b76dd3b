//! # Servo Output Layer
//!
//! Turns decoded control packets into servo deflections:
//!
//! - [`mixer::ServoMixer`] - maps raw axis values to angles and fans them
//!   out across the configured channels
//! - [`bus::ServoBus`] - hardware seam for whatever drives the PWM outputs

pub mod bus;
pub mod mixer;
