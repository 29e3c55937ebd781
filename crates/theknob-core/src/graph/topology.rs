//! Stage identifiers and the three fixed stage orders.

use core::fmt;

use crate::mode::{Mode, ModeTable};

/// One of the six stage slots in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Input high-pass filter.
    Filter,
    /// Knob-driven three-band parametric EQ.
    Eq,
    /// Mode-specific fixed EQ voicing.
    SpecialEq,
    /// Algorithmic reverb with bracketing filters.
    Reverb,
    /// Stereo feedback delay.
    Delay,
    /// Pre-gain, waveshaper, post-gain.
    Distortion,
}

impl StageId {
    /// Number of stages in every topology.
    pub const COUNT: usize = 6;

    /// All identifiers in storage order.
    pub const ALL: [StageId; Self::COUNT] = [
        StageId::Filter,
        StageId::Eq,
        StageId::SpecialEq,
        StageId::Reverb,
        StageId::Delay,
        StageId::Distortion,
    ];

    /// Storage slot of this stage inside a [`SignalGraph`](super::SignalGraph).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            StageId::Filter => 0,
            StageId::Eq => 1,
            StageId::SpecialEq => 2,
            StageId::Reverb => 3,
            StageId::Delay => 4,
            StageId::Distortion => 5,
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            StageId::Filter => "Filter",
            StageId::Eq => "EQ",
            StageId::SpecialEq => "Special EQ",
            StageId::Reverb => "Reverb",
            StageId::Delay => "Delay",
            StageId::Distortion => "Distortion",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A serial order over all six stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    mode: Mode,
    order: [StageId; StageId::COUNT],
}

const TOPOLOGY_TABLE: ModeTable<Topology> = {
    use StageId::{Delay, Distortion, Eq, Filter, Reverb, SpecialEq};
    ModeTable::new([
        Topology {
            mode: Mode::Violet,
            order: [Filter, Distortion, Reverb, Delay, Eq, SpecialEq],
        },
        Topology {
            mode: Mode::Teal,
            order: [Filter, Eq, Distortion, Delay, Reverb, SpecialEq],
        },
        Topology {
            mode: Mode::Crimson,
            order: [Filter, Eq, Delay, Reverb, Distortion, SpecialEq],
        },
    ])
};

static TOPOLOGIES: ModeTable<Topology> = TOPOLOGY_TABLE;

const fn is_permutation(order: &[StageId; StageId::COUNT]) -> bool {
    let mut seen = [false; StageId::COUNT];
    let mut i = 0;
    while i < StageId::COUNT {
        let slot = order[i].index();
        if seen[slot] {
            return false;
        }
        seen[slot] = true;
        i += 1;
    }
    true
}

const _: () = {
    assert!(is_permutation(&TOPOLOGY_TABLE.get(Mode::Violet).order));
    assert!(is_permutation(&TOPOLOGY_TABLE.get(Mode::Teal).order));
    assert!(is_permutation(&TOPOLOGY_TABLE.get(Mode::Crimson).order));
};

impl Topology {
    /// The fixed order for `mode`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use theknob_core::{Mode, StageId, Topology};
    ///
    /// let order = Topology::for_mode(Mode::Crimson).stages();
    /// assert_eq!(order[0], StageId::Filter);
    /// assert_eq!(order[5], StageId::SpecialEq);
    /// ```
    pub fn for_mode(mode: Mode) -> &'static Topology {
        TOPOLOGIES.get(mode)
    }

    /// Mode this order belongs to.
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Stages from input to output.
    pub const fn stages(&self) -> &[StageId; StageId::COUNT] {
        &self.order
    }

    /// Iterate stages from input to output.
    pub fn iter(&self) -> impl Iterator<Item = StageId> + '_ {
        self.order.iter().copied()
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.order.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StageId::{Delay, Distortion, Filter, Reverb, SpecialEq};

    #[cfg(not(feature = "std"))]
    use alloc::format;

    #[test]
    fn every_mode_covers_all_six_once() {
        for mode in Mode::ALL {
            let topo = Topology::for_mode(mode);
            for id in StageId::ALL {
                assert_eq!(topo.iter().filter(|&s| s == id).count(), 1, "{mode}: {id}");
            }
        }
    }

    #[test]
    fn literal_orders() {
        assert_eq!(
            Topology::for_mode(Mode::Violet).stages(),
            &[Filter, Distortion, Reverb, Delay, StageId::Eq, SpecialEq]
        );
        assert_eq!(
            Topology::for_mode(Mode::Teal).stages(),
            &[Filter, StageId::Eq, Distortion, Delay, Reverb, SpecialEq]
        );
        assert_eq!(
            Topology::for_mode(Mode::Crimson).stages(),
            &[Filter, StageId::Eq, Delay, Reverb, Distortion, SpecialEq]
        );
    }

    #[test]
    fn topology_knows_its_mode() {
        for mode in Mode::ALL {
            assert_eq!(Topology::for_mode(mode).mode(), mode);
        }
    }

    #[test]
    fn display() {
        let s = format!("{}", Topology::for_mode(Mode::Teal));
        assert_eq!(s, "Filter -> EQ -> Distortion -> Delay -> Reverb -> Special EQ");
    }

    #[test]
    fn indices_are_dense() {
        for (i, id) in StageId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn rejects_duplicates() {
        assert!(!is_permutation(&[Filter, Filter, Reverb, Delay, StageId::Eq, SpecialEq]));
    }
}
