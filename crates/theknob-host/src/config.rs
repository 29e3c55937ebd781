//! Engine configuration file.
//!
//! # TOML Format
//!
//! ```toml
//! sample_rate = 44100
//! block_size = 256
//! knob = 35.0
//! mode = "crimson"
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use theknob_core::{Controls, KNOB_DEFAULT, KNOB_MAX, KNOB_MIN, Mode, ProcessSpec};

use crate::error::HostError;

/// Sample rate, block size and initial controls for an engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sample rate in Hz (default 48000).
    pub sample_rate: f32,
    /// Largest block the host delivers (default 512).
    pub block_size: usize,
    /// Initial knob position (default 1).
    pub knob: f32,
    /// Initial mode (default violet).
    #[serde(with = "crate::mode_name")]
    pub mode: Mode,
}

impl EngineConfig {
    /// Load and validate a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| HostError::read_file(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, HostError> {
        let config: EngineConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HostError> {
        let path = path.as_ref();
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| HostError::write_file(path, e))
    }

    /// Convert the config to a TOML string.
    pub fn to_toml(&self) -> Result<String, HostError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value is usable.
    pub fn validate(&self) -> Result<(), HostError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(HostError::InvalidConfig(format!(
                "sample_rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if self.block_size == 0 {
            return Err(HostError::InvalidConfig("block_size must be non-zero".into()));
        }
        if !(KNOB_MIN..=KNOB_MAX).contains(&self.knob) {
            return Err(HostError::InvalidConfig(format!(
                "knob must be in [{KNOB_MIN}, {KNOB_MAX}], got {}",
                self.knob
            )));
        }
        Ok(())
    }

    /// Spec to prepare the graph with.
    pub fn process_spec(&self) -> ProcessSpec {
        ProcessSpec::new(self.sample_rate, self.block_size)
    }

    /// Initial controls.
    pub fn controls(&self) -> Controls {
        Controls::new(self.knob, self.mode)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let spec = ProcessSpec::default();
        Self {
            sample_rate: spec.sample_rate,
            block_size: spec.max_block_size,
            knob: KNOB_DEFAULT,
            mode: Mode::default(),
        }
    }
}
