//! Knob → parameter mapping.
//!
//! A single knob in `[KNOB_MIN, KNOB_MAX]` drives every coefficient in the
//! chain. Each stage looks up a `(min, max)` pair for the active [`Mode`]
//! and interpolates:
//!
//! ```text
//! result = min + (knob - KNOB_MIN) * (max - min) / (KNOB_MAX - KNOB_MIN)
//! ```
//!
//! Both functions are total. Knob values outside the documented range are
//! extrapolated rather than clamped; the host boundary is responsible for
//! clamping.
//!
//! [`Mode`]: crate::Mode

/// Lowest knob position.
pub const KNOB_MIN: f32 = 1.0;

/// Highest knob position.
pub const KNOB_MAX: f32 = 100.0;

/// Knob position a fresh instance starts at.
pub const KNOB_DEFAULT: f32 = 1.0;

const _: () = assert!(KNOB_MAX > KNOB_MIN);

/// Map a knob value onto `[range_start, range_end]` by affine interpolation.
///
/// `range_end` may be smaller than `range_start`, in which case the result
/// falls as the knob rises (e.g. the EQ Q and the delay low-pass cutoff).
///
/// # Example
///
/// ```rust
/// use theknob_core::{KNOB_MAX, KNOB_MIN, map_range};
///
/// assert_eq!(map_range(KNOB_MIN, 50.0, 150.0), 50.0);
/// assert_eq!(map_range(KNOB_MAX, 50.0, 150.0), 150.0);
/// ```
#[inline]
pub fn map_range(knob: f32, range_start: f32, range_end: f32) -> f32 {
    // Weighted form of the affine map: lands exactly on both endpoints in f32.
    let t = (knob - KNOB_MIN) / (KNOB_MAX - KNOB_MIN);
    range_start * (1.0 - t) + range_end * t
}

/// Map a knob value onto `[0, 1]`.
#[inline]
pub fn normalize(knob: f32) -> f32 {
    map_range(knob, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(map_range(KNOB_MIN, 0.0, 0.6), 0.0);
        assert_eq!(map_range(KNOB_MAX, 0.0, 0.6), 0.6);
        assert_eq!(normalize(KNOB_MIN), 0.0);
        assert_eq!(normalize(KNOB_MAX), 1.0);
    }

    #[test]
    fn inverted_range_falls() {
        let low = map_range(10.0, 2.0, 1.0);
        let high = map_range(90.0, 2.0, 1.0);
        assert!(low > high, "Q should fall as the knob rises: {low} vs {high}");
    }

    #[test]
    fn midpoint() {
        let mid = map_range(50.5, 0.0, 1.0);
        assert!((mid - 0.5).abs() < 1e-6, "got {mid}");
    }

    #[test]
    fn below_range_extrapolates() {
        // No clamping inside the core.
        assert!(map_range(0.0, 50.0, 150.0) < 50.0);
        assert!(normalize(101.0) > 1.0);
    }
}
