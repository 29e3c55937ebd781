//! Persisted plugin state.
//!
//! The host stores an opaque blob with the session; ours is a small JSON
//! object:
//!
//! ```json
//! {"knob":42.0,"mode":"teal"}
//! ```
//!
//! Restoring never fails from the host's point of view: a corrupt, foreign
//! or out-of-range blob is logged and the defaults are used instead.

use serde::{Deserialize, Serialize};
use theknob_core::{KNOB_DEFAULT, KNOB_MAX, KNOB_MIN, Mode};

use crate::error::HostError;

/// Knob and mode as saved with a host session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginState {
    /// Knob position, `[1, 100]`.
    pub knob: f32,
    /// Selected mode.
    #[serde(with = "crate::mode_name")]
    pub mode: Mode,
}

impl PluginState {
    /// Encode as JSON.
    pub fn save(&self) -> Result<Vec<u8>, HostError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode and validate a blob.
    pub fn try_restore(bytes: &[u8]) -> Result<Self, HostError> {
        let state: PluginState = serde_json::from_slice(bytes)?;
        if !(KNOB_MIN..=KNOB_MAX).contains(&state.knob) {
            return Err(HostError::InvalidConfig(format!(
                "knob {} outside [{KNOB_MIN}, {KNOB_MAX}]",
                state.knob
            )));
        }
        Ok(state)
    }

    /// Decode a blob, falling back to [`PluginState::default`] on any error.
    pub fn restore(bytes: &[u8]) -> Self {
        match Self::try_restore(bytes) {
            Ok(state) => {
                tracing::info!(knob = state.knob, mode = state.mode.name(), "state restored");
                state
            }
            Err(e) => {
                tracing::warn!(error = %e, len = bytes.len(), "rejected state blob, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for PluginState {
    fn default() -> Self {
        Self {
            knob: KNOB_DEFAULT,
            mode: Mode::default(),
        }
    }
}
