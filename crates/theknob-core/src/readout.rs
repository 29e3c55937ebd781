//! Read-only views of the coefficients a stage last computed.
//!
//! Stages expose their derived values (cutoff, gains, feedback, ...) by
//! index so diagnostics and tests can see exactly what the knob mapped to,
//! without reaching into stage internals.

use core::fmt;

/// Unit of a [`Readout`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamUnit {
    /// Decibels.
    Decibels,
    /// Hertz.
    Hertz,
    /// Seconds.
    Seconds,
    /// Linear gain factor.
    Linear,
    /// Normalized amount in `[0, 1]`.
    Amount,
    /// Dimensionless (Q, counts).
    #[default]
    None,
}

impl ParamUnit {
    /// Display suffix.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Seconds => " s",
            ParamUnit::Linear => "x",
            ParamUnit::Amount | ParamUnit::None => "",
        }
    }
}

/// One named value a stage computed for the current block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    /// Stable snake_case identifier (e.g. `"cutoff"`).
    pub name: &'static str,
    /// Unit of `value`.
    pub unit: ParamUnit,
    /// The value.
    pub value: f32,
}

impl Readout {
    /// Construct a readout.
    pub const fn new(name: &'static str, unit: ParamUnit, value: f32) -> Self {
        Self { name, unit, value }
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:.3}{}", self.name, self.value, self.unit.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::format;

    #[test]
    fn display_includes_unit() {
        let r = Readout::new("cutoff", ParamUnit::Hertz, 50.0);
        assert_eq!(format!("{r}"), "cutoff = 50.000 Hz");
    }

    #[test]
    fn dimensionless_has_no_suffix() {
        assert_eq!(ParamUnit::None.suffix(), "");
        assert_eq!(ParamUnit::Amount.suffix(), "");
    }
}
