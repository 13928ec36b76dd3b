//! # Servo Bus Trait
//!
//! Hardware seam for the PWM outputs. Real deployments back this with a
//! PCA9685-style driver board or direct MCU timer channels; tests use
//! [`mocks::MockServoBus`] to capture what was commanded.

/// Drives servo outputs by channel number
///
/// Setting an angle is infallible from the protocol's point of view: a
/// servo that did not move is indistinguishable from one that did, so
/// implementations absorb hardware errors (log and continue) rather than
/// surface them into the control loop.
pub trait ServoBus {
    /// Command one channel to the given angle in degrees (0 to 180)
    ///
    /// Implementations clamp or ignore out-of-range input; callers produce
    /// angles through the mixer, which already bounds them.
    fn set_angle(&mut self, channel: u8, angle_deg: u8);
}
