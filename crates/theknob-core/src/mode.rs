//! The three effect modes and per-mode constant tables.
//!
//! A [`Mode`] selects both the coefficient tables every stage reads and the
//! stage order the [`SignalGraph`](crate::SignalGraph) runs. The enum is
//! closed: raw host values are converted once, at the host boundary, with
//! [`Mode::try_from`] (reject) or [`Mode::from_host_value`] (round + clamp).
//!
//! [`ModeTable`] replaces raw `[T; 3]` arrays indexed by an integer: it can
//! only be indexed by a `Mode`, so an out-of-range index cannot be written.

use core::ops::Index;

/// Discrete effect preset.
///
/// | Variant | Index | Character |
/// |---------|-------|-----------|
/// | `Violet` | 0 | `tanh(sin x)` drive, reverb before delay |
/// | `Teal` | 1 | Drive before the delay, longest feedback |
/// | `Crimson` | 2 | Drive last, band-limited special EQ, inverted reverb damping |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Mode A.
    #[default]
    Violet,
    /// Mode B.
    Teal,
    /// Mode C.
    Crimson,
}

impl Mode {
    /// All modes in index order.
    pub const ALL: [Mode; 3] = [Mode::Violet, Mode::Teal, Mode::Crimson];

    /// Zero-based index of this mode.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Mode::Violet => 0,
            Mode::Teal => 1,
            Mode::Crimson => 2,
        }
    }

    /// Lower-case display name, also used by config files.
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Violet => "violet",
            Mode::Teal => "teal",
            Mode::Crimson => "crimson",
        }
    }

    /// Parse a mode name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Mode> {
        Mode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// Convert a host parameter value (an integer carried in a float).
    ///
    /// Rounds to the nearest integer and clamps into `0..=2`. Non-finite
    /// values map to the default mode.
    pub fn from_host_value(value: f32) -> Mode {
        if !value.is_finite() {
            return Mode::default();
        }
        let rounded = libm::roundf(value).clamp(0.0, 2.0) as u32;
        // In range after the clamp.
        Mode::try_from(rounded).unwrap_or_default()
    }
}

/// Error returned when a raw value does not name a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMode(pub u32);

impl core::fmt::Display for InvalidMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "mode index {} is not one of 0, 1, 2", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidMode {}

impl TryFrom<u32> for Mode {
    type Error = InvalidMode;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::Violet),
            1 => Ok(Mode::Teal),
            2 => Ok(Mode::Crimson),
            other => Err(InvalidMode(other)),
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable per-mode data: exactly one entry per [`Mode`].
///
/// # Example
///
/// ```rust
/// use theknob_core::{Mode, ModeTable};
///
/// const DELAY_TIME: ModeTable<f32> = ModeTable::new([0.7, 0.2, 1.0]);
/// assert_eq!(DELAY_TIME[Mode::Teal], 0.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeTable<T>([T; 3]);

impl<T> ModeTable<T> {
    /// Build a table from values in [`Mode::ALL`] order.
    pub const fn new(values: [T; 3]) -> Self {
        Self(values)
    }

    /// Value for `mode`.
    #[inline]
    pub const fn get(&self, mode: Mode) -> &T {
        &self.0[mode.index()]
    }

    /// Iterate `(mode, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Mode, &T)> {
        Mode::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Mode> for ModeTable<T> {
    type Output = T;

    #[inline]
    fn index(&self, mode: Mode) -> &T {
        self.get(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::try_from(mode.index() as u32), Ok(mode));
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert_eq!(Mode::try_from(3), Err(InvalidMode(3)));
    }

    #[test]
    fn host_value_rounds_and_clamps() {
        assert_eq!(Mode::from_host_value(0.0), Mode::Violet);
        assert_eq!(Mode::from_host_value(0.6), Mode::Teal);
        assert_eq!(Mode::from_host_value(2.0), Mode::Crimson);
        assert_eq!(Mode::from_host_value(7.0), Mode::Crimson);
        assert_eq!(Mode::from_host_value(-3.0), Mode::Violet);
        assert_eq!(Mode::from_host_value(f32::NAN), Mode::Violet);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(Mode::from_name("TEAL"), Some(Mode::Teal));
        assert_eq!(Mode::from_name("crimson"), Some(Mode::Crimson));
        assert_eq!(Mode::from_name("magenta"), None);
    }

    #[test]
    fn table_indexing() {
        let table = ModeTable::new([1, 2, 3]);
        assert_eq!(table[Mode::Violet], 1);
        assert_eq!(table[Mode::Crimson], 3);
        assert_eq!(table.iter().count(), 3);
    }
}
