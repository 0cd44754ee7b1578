//! # Virtual Input Pin Configuration
//!
//! Configuration for the virtual MCU and the host sections that reference its pins.
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [input_pins]
//! prefix = "ams"
//!
//! [sensors.lane1]
//! pin = "^ams:pin1"
//! kind = "filament_switch"
//!
//! [sensors.lane1_endstop]
//! pin = "!ams:pin2"
//! kind = "endstop"
//!
//! [outputs.status_led]
//! pin = "ams:pin8"
//! value = 1
//! ```
//!
//! - `[input_pins]` creates the virtual MCU; without it no virtual pins exist.
//! - `prefix` defaults to `ams`, giving pins `ams:pin1` .. `ams:pin8`.
//!
//! ## Example: Rust Usage
//!
//! ```rust
//! use vmcu_shared::config::Config;
//! let config: Config = toml::from_str("[input_pins]\nprefix = \"lane\"\n").unwrap();
//! assert_eq!(config.input_pins.as_ref().unwrap().prefix, "lane");
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub input_pins: Option<InputPinsConfig>,
    #[serde(default)]
    pub sensors: BTreeMap<String, SensorConfig>,
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputConfig>,
}

/// The `[input_pins]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputPinsConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for InputPinsConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    #[default]
    FilamentSwitch,
    Endstop,
}

/// A host section that uses a pin as an input (filament switch, endstop).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SensorConfig {
    pub pin: String,
    #[serde(default)]
    pub kind: SensorKind,
}

/// A host section that drives a pin as an output.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub pin: String,
    #[serde(default)]
    pub value: i32,
}

impl Config {
    /// Configuration with only an `[input_pins]` section.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            input_pins: Some(InputPinsConfig {
                prefix: prefix.to_string(),
            }),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(input_pins) = &self.input_pins {
            let prefix = &input_pins.prefix;
            if prefix.is_empty() {
                return Err(ConfigError::Invalid("input_pins.prefix must not be empty".into()));
            }
            // Pin descriptors treat ':' as the separator and '^'/'!' as modifiers.
            if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(ConfigError::Invalid(format!(
                    "input_pins.prefix '{}' may only contain letters, digits and '_'",
                    prefix
                )));
            }
        }
        Ok(())
    }
}

pub fn default_prefix() -> String {
    "ams".to_string()
}

/// Load configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                Err(ConfigError::Toml(e))
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path.display(), e);
            Err(ConfigError::Io(e))
        }
    }
}
