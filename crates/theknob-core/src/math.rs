//! Small numeric helpers shared by every stage.
//!
//! - [`db_to_linear`] - Decibel to linear gain
//! - [`flush_denormal`] - Zero out subnormal feedback values
//! - [`clamp_frequency`] - Keep filter frequencies below Nyquist
//! - [`seconds_to_samples`] - Round a duration to whole samples

use libm::{powf, roundf};

/// Highest usable filter frequency as a fraction of the sample rate.
pub const MAX_FREQUENCY_RATIO: f32 = 0.49;

/// Convert decibels to linear gain: `10^(dB/20)`.
///
/// # Example
/// ```rust
/// use theknob_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
/// assert!((db_to_linear(20.0) - 10.0).abs() < 1e-4);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    powf(10.0, db / 20.0)
}

/// Flush values that would otherwise decay into the subnormal range.
///
/// Applied to the state of recursive structures (combs, feedback delays).
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Clamp a filter frequency into `(0, 0.49 * sample_rate]`.
#[inline]
pub fn clamp_frequency(frequency: f32, sample_rate: f32) -> f32 {
    frequency.min(sample_rate * MAX_FREQUENCY_RATIO)
}

/// Round a duration in seconds to a whole number of samples.
#[inline]
pub fn seconds_to_samples(seconds: f32, sample_rate: f32) -> usize {
    roundf((seconds * sample_rate).max(0.0)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_known_values() {
        assert!((db_to_linear(-6.0206) - 0.5).abs() < 1e-4);
        assert!((db_to_linear(6.0206) - 2.0).abs() < 1e-4);
        assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1e-30), 0.0);
        assert_eq!(flush_denormal(-1e-25), 0.0);
        assert_eq!(flush_denormal(0.25), 0.25);
    }

    #[test]
    fn test_clamp_frequency() {
        assert_eq!(clamp_frequency(16000.0, 48000.0), 16000.0);
        assert!((clamp_frequency(16000.0, 22050.0) - 10804.5).abs() < 1e-2);
    }

    #[test]
    fn test_seconds_to_samples() {
        assert_eq!(seconds_to_samples(0.7, 48000.0), 33600);
        assert_eq!(seconds_to_samples(0.2, 44100.0), 8820);
        assert_eq!(seconds_to_samples(-1.0, 44100.0), 0);
    }
}
