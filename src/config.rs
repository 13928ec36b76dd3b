//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files. Every
//! field carries a sensible default, so a partial file (or none at all)
//! still yields a flyable setup.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::servo::mixer::{default_assignments, ChannelAssignment, DEFAULT_TRAVEL_DEG};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Pilot uplink serial endpoint
    #[serde(default)]
    pub serial: SerialConfig,

    /// Radio modem serial endpoint
    #[serde(default)]
    pub radio: SerialConfig,

    /// Servo mixing
    #[serde(default)]
    pub mixer: MixerConfig,

    /// Link loss handling
    #[serde(default)]
    pub failsafe: FailsafeConfig,
}

/// Serial endpoint configuration
///
/// Used twice: once for the pilot uplink and once for the radio modem.
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    /// Device path; empty means probe the default path list
    #[serde(default)]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

/// Servo mixer configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MixerConfig {
    /// Half-range of servo motion around neutral, in degrees
    #[serde(default = "default_travel_deg")]
    pub travel_deg: f32,

    /// Channel table, applied in order
    #[serde(default = "default_channels")]
    pub channels: Vec<ChannelAssignment>,
}

/// Failsafe configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FailsafeConfig {
    /// Time without packets before the wing holds neutral
    #[serde(default = "default_failsafe_timeout_ms")]
    pub timeout_ms: u64,
}

// Default value functions
fn default_baud_rate() -> u32 { 115200 }
fn default_travel_deg() -> f32 { DEFAULT_TRAVEL_DEG }
fn default_channels() -> Vec<ChannelAssignment> { default_assignments() }
fn default_failsafe_timeout_ms() -> u64 { 800 }

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: default_baud_rate(),
        }
    }
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            travel_deg: default_travel_deg(),
            channels: default_channels(),
        }
    }
}

impl Default for FailsafeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_failsafe_timeout_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wing_link::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    ///
    /// A present but unreadable or invalid file is still an error; only a
    /// missing file falls back (with a log line).
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be parsed or validated.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    ///
    /// # Returns
    ///
    /// * `Result<()>` - Ok if valid, Err if invalid
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        // Validate baud rates (port paths may be empty: that means probe)
        for (name, baud) in [
            ("serial.baud_rate", self.serial.baud_rate),
            ("radio.baud_rate", self.radio.baud_rate),
        ] {
            if ![9600, 19200, 38400, 57600, 115200, 230400].contains(&baud) {
                return Err(crate::error::WingLinkError::Config(
                    toml::de::Error::custom(format!(
                        "{} must be one of: 9600, 19200, 38400, 57600, 115200, 230400",
                        name
                    ))
                ));
            }
        }

        // Validate travel
        if self.mixer.travel_deg <= 0.0 || self.mixer.travel_deg > 90.0 {
            return Err(crate::error::WingLinkError::Config(
                toml::de::Error::custom("travel_deg must be greater than 0 and at most 90")
            ));
        }

        // Validate channel table
        if self.mixer.channels.is_empty() {
            return Err(crate::error::WingLinkError::Config(
                toml::de::Error::custom("mixer must define at least one channel")
            ));
        }

        for assignment in &self.mixer.channels {
            if assignment.channel > 15 {
                return Err(crate::error::WingLinkError::Config(
                    toml::de::Error::custom(format!(
                        "channel {} is out of bounds (must be 0-15)",
                        assignment.channel
                    ))
                ));
            }
        }

        let mut ids: Vec<u8> = self.mixer.channels.iter().map(|c| c.channel).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(crate::error::WingLinkError::Config(
                toml::de::Error::custom(format!("channel {} is assigned twice", pair[0]))
            ));
        }

        // Validate failsafe timing
        if self.failsafe.timeout_ms < 50 || self.failsafe.timeout_ms > 60000 {
            return Err(crate::error::WingLinkError::Config(
                toml::de::Error::custom("timeout_ms must be between 50 and 60000")
            ));
        }

        Ok(())
    }
}
