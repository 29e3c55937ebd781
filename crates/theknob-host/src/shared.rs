//! Lock-free knob and mode shared between the control and audio threads.
//!
//! The control thread (host automation, UI) writes; the audio thread reads
//! one [`Controls`] snapshot per block. The knob is stored as an `f32`
//! bit-cast into an `AtomicU32`, the mode as its index in an `AtomicU8`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use theknob_core::{Controls, InvalidMode, KNOB_DEFAULT, KNOB_MAX, KNOB_MIN, Mode};

use crate::state::PluginState;

struct ControlsData {
    /// Knob position as f32 bits.
    knob: AtomicU32,
    /// `Mode::index()`.
    mode: AtomicU8,
}

/// Shared knob and mode.
///
/// Cheap to clone; every clone refers to the same values.
///
/// # Example
///
/// ```rust
/// use theknob_core::Mode;
/// use theknob_host::SharedControls;
///
/// let controls = SharedControls::default();
/// let ui = controls.clone();
///
/// ui.set_knob(250.0);
/// ui.set_mode(Mode::Teal);
///
/// let snapshot = controls.snapshot();
/// assert_eq!(snapshot.knob, 100.0);
/// assert_eq!(snapshot.mode, Mode::Teal);
/// ```
#[derive(Clone)]
pub struct SharedControls {
    inner: Arc<ControlsData>,
}

impl SharedControls {
    /// Create shared controls holding `knob` (clamped) and `mode`.
    pub fn new(knob: f32, mode: Mode) -> Self {
        let controls = Self {
            inner: Arc::new(ControlsData {
                knob: AtomicU32::new(KNOB_DEFAULT.to_bits()),
                mode: AtomicU8::new(mode_to_u8(mode)),
            }),
        };
        controls.set_knob(knob);
        controls
    }

    /// Current knob position (lock-free).
    pub fn knob(&self) -> f32 {
        f32::from_bits(self.inner.knob.load(Ordering::Acquire))
    }

    /// Write the knob (lock-free). Clamps to `[KNOB_MIN, KNOB_MAX]`;
    /// non-finite values are ignored.
    pub fn set_knob(&self, knob: f32) {
        if !knob.is_finite() {
            return;
        }
        let clamped = knob.clamp(KNOB_MIN, KNOB_MAX);
        self.inner.knob.store(clamped.to_bits(), Ordering::Release);
    }

    /// Current mode (lock-free).
    pub fn mode(&self) -> Mode {
        let index = self.inner.mode.load(Ordering::Acquire);
        // Only valid indices are ever stored.
        Mode::try_from(u32::from(index)).unwrap_or_default()
    }

    /// Write the mode (lock-free).
    pub fn set_mode(&self, mode: Mode) {
        self.inner.mode.store(mode_to_u8(mode), Ordering::Release);
    }

    /// Write the mode from a raw index, rejecting anything but 0, 1, 2.
    pub fn set_mode_index(&self, index: u32) -> Result<(), InvalidMode> {
        self.set_mode(Mode::try_from(index)?);
        Ok(())
    }

    /// Write the mode from a host parameter value (rounded and clamped).
    pub fn set_mode_host_value(&self, value: f32) {
        self.set_mode(Mode::from_host_value(value));
    }

    /// Both values, as the graph consumes them.
    pub fn snapshot(&self) -> Controls {
        Controls::new(self.knob(), self.mode())
    }

    /// Persistable copy of the current values.
    pub fn state(&self) -> PluginState {
        PluginState {
            knob: self.knob(),
            mode: self.mode(),
        }
    }

    /// Overwrite both values from a restored state.
    pub fn apply_state(&self, state: &PluginState) {
        self.set_knob(state.knob);
        self.set_mode(state.mode);
    }
}

impl Default for SharedControls {
    fn default() -> Self {
        Self::new(KNOB_DEFAULT, Mode::default())
    }
}

impl std::fmt::Debug for SharedControls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedControls")
            .field("knob", &self.knob())
            .field("mode", &self.mode())
            .finish()
    }
}

fn mode_to_u8(mode: Mode) -> u8 {
    mode.index() as u8
}
