//! Damped feedback comb for Freeverb-style reverbs.
//!
//! The feedback path runs through a one-pole low-pass whose coefficient is
//! the damping amount, modelling high-frequency absorption in a room.

use crate::delay::DelayLine;
use crate::math::flush_denormal;

/// Feedback comb with a one-pole damping filter in the loop.
///
/// ```text
/// out  = line[oldest]
/// last = out * (1 - damp) + last * damp
/// line <- in + last * feedback
/// ```
///
/// Feedback and damping are passed per sample so the owner can ramp them.
///
/// # Example
///
/// ```rust
/// use theknob_core::CombFilter;
///
/// let mut comb = CombFilter::new(1116);
/// let out = comb.process(1.0, 0.2, 0.84);
/// assert_eq!(out, 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CombFilter {
    line: DelayLine,
    last: f32,
}

impl CombFilter {
    /// Create a comb with a loop length of `size` samples.
    pub fn new(size: usize) -> Self {
        Self {
            line: DelayLine::new(size),
            last: 0.0,
        }
    }

    /// Change the loop length, clearing the state.
    pub fn resize(&mut self, size: usize) {
        self.line.resize(size);
        self.last = 0.0;
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32, damp: f32, feedback: f32) -> f32 {
        let output = self.line.back();
        self.last = flush_denormal(output * (1.0 - damp) + self.last * damp);
        self.line.push(input + self.last * feedback);
        output
    }

    /// Clear the loop and the damping memory.
    pub fn clear(&mut self) {
        self.line.clear();
        self.last = 0.0;
    }

    /// Loop length in samples.
    pub fn size(&self) -> usize {
        self.line.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_after_loop_length() {
        let mut comb = CombFilter::new(100);
        assert_eq!(comb.process(1.0, 0.0, 0.5), 0.0);
        for _ in 0..99 {
            assert_eq!(comb.process(0.0, 0.0, 0.5), 0.0);
        }
        let echo = comb.process(0.0, 0.0, 0.5);
        assert!((echo - 1.0).abs() < 1e-6, "got {echo}");

        // Second pass carries the feedback gain.
        for _ in 0..99 {
            comb.process(0.0, 0.0, 0.5);
        }
        let second = comb.process(0.0, 0.0, 0.5);
        assert!((second - 0.5).abs() < 1e-6, "got {second}");
    }

    #[test]
    fn test_decays_below_unity_feedback() {
        let mut comb = CombFilter::new(50);
        comb.process(1.0, 0.2, 0.84);
        let mut peak = 0.0_f32;
        for _ in 0..20_000 {
            peak = peak.max(comb.process(0.0, 0.2, 0.84).abs());
        }
        let mut tail = 0.0_f32;
        for _ in 0..50 {
            tail = tail.max(comb.process(0.0, 0.2, 0.84).abs());
        }
        assert!(peak <= 1.0);
        assert!(tail < 1e-3, "tail {tail}");
    }

    #[test]
    fn test_clear() {
        let mut comb = CombFilter::new(10);
        for _ in 0..25 {
            comb.process(1.0, 0.5, 0.9);
        }
        comb.clear();
        for _ in 0..20 {
            assert_eq!(comb.process(0.0, 0.5, 0.9), 0.0);
        }
    }

    #[test]
    fn test_silence_stays_silent() {
        let mut comb = CombFilter::new(1116);
        for _ in 0..5000 {
            assert_eq!(comb.process(0.0, 0.4, 0.98), 0.0);
        }
    }
}
