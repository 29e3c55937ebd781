//! Linear parameter ramps.
//!
//! Values derived from the knob are recomputed once per block. Where an
//! abrupt change would click (reverb gains and feedback), the stage feeds
//! the new value in as a target and reads a ramped value per sample.

use libm::roundf;

/// A value that moves toward its target at a constant rate.
///
/// The ramp length is fixed in milliseconds; a new target restarts the ramp
/// from wherever the value currently is.
///
/// ```rust
/// use theknob_core::LinearSmoothedParam;
///
/// let mut wet = LinearSmoothedParam::new(0.0);
/// wet.prepare(48000.0, 10.0);
/// wet.set_target(1.0);
/// for _ in 0..480 {
///     wet.advance();
/// }
/// assert_eq!(wet.get(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinearSmoothedParam {
    current: f32,
    target: f32,
    increment: f32,
    samples_remaining: u32,
    ramp_samples: u32,
}

impl LinearSmoothedParam {
    /// Create a settled param. Ramping is off until [`prepare`](Self::prepare).
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            ramp_samples: 0,
        }
    }

    /// Set the ramp length and snap to the current target.
    pub fn prepare(&mut self, sample_rate: f32, ramp_ms: f32) {
        self.ramp_samples = roundf((ramp_ms * sample_rate / 1000.0).max(0.0)) as u32;
        self.snap_to_target();
    }

    /// Start ramping toward `target`. A repeated target is a no-op.
    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        self.target = target;

        if self.ramp_samples == 0 {
            self.snap_to_target();
        } else {
            self.increment = (target - self.current) / self.ramp_samples as f32;
            self.samples_remaining = self.ramp_samples;
        }
    }

    /// Step one sample and return the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.samples_remaining -= 1;
            self.current = if self.samples_remaining == 0 {
                self.target
            } else {
                self.current + self.increment
            };
        }
        self.current
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// `true` once the ramp has finished.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.samples_remaining == 0
    }

    /// Jump to the target.
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }
}

impl Default for LinearSmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
