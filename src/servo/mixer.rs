//! # Servo Mixer
//!
//! Maps raw joystick axes to servo angles and distributes them over the
//! output channels. With the default 45 degree travel:
//!
//! | Raw axis | Normalized | Direct angle | Mirrored angle |
//! |----------|------------|--------------|----------------|
//! | -32768 | -1.0 | 45 | 135 |
//! | 0 | 0.0 | 90 | 90 |
//! | 32767 | 1.0 | 135 | 45 |
//!
//! Mirroring reflects the *mapped* angle around center, so a pair of
//! opposed channels always sums to 180 regardless of travel. Several
//! channels may follow the same axis; elevator halves on a V-tail or
//! dual aileron servos are just two assignments.

use serde::Deserialize;

use crate::frame::protocol::{ControlPacket, AXIS_RAW_MAX};

/// Lowest commandable servo angle in degrees
pub const SERVO_MIN_DEG: u8 = 0;

/// Highest commandable servo angle in degrees
pub const SERVO_MAX_DEG: u8 = 180;

/// Neutral servo angle in degrees, commanded on boot and in failsafe
pub const SERVO_NEUTRAL_DEG: u8 = 90;

/// Default half-range of servo motion around neutral, in degrees
pub const DEFAULT_TRAVEL_DEG: f32 = 45.0;

/// Well-known channel numbers for the default wing layout
pub mod channels {
    /// Left aileron servo
    pub const AILERON_LEFT: u8 = 0;

    /// Right aileron servo, mirrored against the left
    pub const AILERON_RIGHT: u8 = 1;

    /// Elevator servo
    pub const ELEVATOR: u8 = 2;
}

/// Which joystick axis a channel follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// One servo channel's source axis and orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ChannelAssignment {
    /// Output channel number on the servo bus
    pub channel: u8,

    /// Axis this channel follows
    pub axis: Axis,

    /// Reflect the mapped angle around center (180 - angle)
    #[serde(default)]
    pub mirrored: bool,
}

/// One angle command for one servo channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoCommand {
    /// Output channel number
    pub channel: u8,

    /// Commanded angle in degrees, 0 to 180
    pub angle: u8,
}

/// Maps control packets to per-channel servo commands
///
/// # Examples
///
/// ```
/// use wing_link::frame::protocol::ControlPacket;
/// use wing_link::servo::mixer::ServoMixer;
///
/// let mixer = ServoMixer::new();
/// let commands = mixer.mix(&ControlPacket::new(i16::MAX, 0, 0));
///
/// // Full right stick: left aileron 135, right aileron mirrors to 45.
/// assert_eq!(commands[0].angle, 135);
/// assert_eq!(commands[1].angle, 45);
/// assert_eq!(commands[2].angle, 90);
/// ```
#[derive(Debug, Clone)]
pub struct ServoMixer {
    /// Half-range of motion around neutral, in degrees
    travel_deg: f32,

    /// Channel table, applied in order
    assignments: Vec<ChannelAssignment>,
}

/// Returns the standard flying-wing channel table.
///
/// Channel 0 follows X directly, channel 1 mirrors it, channel 2 follows Y.
#[must_use]
pub fn default_assignments() -> Vec<ChannelAssignment> {
    vec![
        ChannelAssignment {
            channel: channels::AILERON_LEFT,
            axis: Axis::X,
            mirrored: false,
        },
        ChannelAssignment {
            channel: channels::AILERON_RIGHT,
            axis: Axis::X,
            mirrored: true,
        },
        ChannelAssignment {
            channel: channels::ELEVATOR,
            axis: Axis::Y,
            mirrored: false,
        },
    ]
}

impl ServoMixer {
    /// Creates a mixer with default travel and the standard channel table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_assignments(DEFAULT_TRAVEL_DEG, default_assignments())
    }

    /// Creates a mixer with explicit travel and channel assignments.
    #[must_use]
    pub fn with_assignments(travel_deg: f32, assignments: Vec<ChannelAssignment>) -> Self {
        Self {
            travel_deg,
            assignments,
        }
    }

    /// Map one raw axis value to a servo angle
    ///
    /// The raw value normalizes against 32767 and clamps to [-1, 1] (so
    /// -32768 behaves as full deflection, not slightly past it), scales by
    /// the configured travel around the 90 degree center, and rounds to the
    /// nearest whole degree within [0, 180].
    #[must_use]
    #[inline]
    pub fn map_axis(&self, raw: i16) -> u8 {
        let normalized = (f32::from(raw) / f32::from(AXIS_RAW_MAX)).clamp(-1.0, 1.0);
        let angle = f32::from(SERVO_NEUTRAL_DEG) + normalized * self.travel_deg;

        angle
            .round()
            .clamp(f32::from(SERVO_MIN_DEG), f32::from(SERVO_MAX_DEG)) as u8
    }

    /// Produce one command per configured channel for a control packet
    ///
    /// Commands come out in channel-table order. Mirrored channels reflect
    /// the already-mapped primary angle, so they stay consistent with their
    /// direct partner under any travel setting.
    #[must_use]
    pub fn mix(&self, packet: &ControlPacket) -> Vec<ServoCommand> {
        self.assignments
            .iter()
            .map(|assignment| {
                let raw = match assignment.axis {
                    Axis::X => packet.axis_x,
                    Axis::Y => packet.axis_y,
                };
                let primary = self.map_axis(raw);
                let angle = if assignment.mirrored {
                    SERVO_MAX_DEG - primary
                } else {
                    primary
                };

                ServoCommand {
                    channel: assignment.channel,
                    angle,
                }
            })
            .collect()
    }

    /// Produce a neutral command for every configured channel
    ///
    /// Used on boot and whenever the failsafe engages.
    #[must_use]
    pub fn neutral(&self) -> Vec<ServoCommand> {
        self.assignments
            .iter()
            .map(|assignment| ServoCommand {
                channel: assignment.channel,
                angle: SERVO_NEUTRAL_DEG,
            })
            .collect()
    }

    /// Returns the configured channel table.
    #[must_use]
    pub fn assignments(&self) -> &[ChannelAssignment] {
        &self.assignments
    }
}

impl Default for ServoMixer {
    fn default() -> Self {
        Self::new()
    }
}
