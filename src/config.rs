//! # Face configuration
//! Settings of the alarm face that come from the host rather than from the user: the clock mode and the
//! tick frequencies used while browsing and while editing.
//!
//! The firmware embeds `config/face_config.json`, formatted as follows:
//! ```json
//! {
//!     "clock_mode_24h": false,
//!     "browse_tick_hz": 1,
//!     "edit_tick_hz": 4
//! }
//! ```
//! `build.rs` makes sure the file exists and is sane.
use core::fmt;

use serde::Deserialize;

/// The configuration file as embedded into the firmware
pub const EMBEDDED_FACE_CONFIG: &[u8] = include_bytes!("../config/face_config.json");

/// Configuration of the alarm face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct FaceConfig {
    /// Show hours 0-23 instead of 1-12 with a PM indicator
    pub clock_mode_24h: bool,
    /// Tick frequency while browsing, in Hz
    pub browse_tick_hz: u8,
    /// Tick frequency while editing, in Hz. The edited field blinks at half this rate.
    pub edit_tick_hz: u8,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            clock_mode_24h: false,
            browse_tick_hz: 1,
            edit_tick_hz: 4,
        }
    }
}

/// Why a configuration could not be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The JSON could not be parsed
    Parse,
    /// A tick frequency is not a power of two between 1 and 128 Hz
    InvalidTickFrequency(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "face configuration is not valid JSON"),
            Self::InvalidTickFrequency(hz) => {
                write!(f, "tick frequency {hz} Hz is not a power of two between 1 and 128")
            }
        }
    }
}

impl FaceConfig {
    /// Parse and validate a configuration. Missing keys take their default values.
    pub fn from_json(json: &[u8]) -> Result<Self, ConfigError> {
        let (config, _) =
            serde_json_core::from_slice::<Self>(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// The embedded configuration, or the defaults if it cannot be used.
    pub fn embedded_or_default() -> Self {
        match Self::from_json(EMBEDDED_FACE_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                warn!("Falling back to default face configuration: {:?}", e);
                Self::default()
            }
        }
    }

    /// Check the tick frequencies
    fn validate(&self) -> Result<(), ConfigError> {
        for hz in [self.browse_tick_hz, self.edit_tick_hz] {
            if !(1..=128).contains(&hz) || !hz.is_power_of_two() {
                return Err(ConfigError::InvalidTickFrequency(hz));
            }
        }
        Ok(())
    }
}
