//! The [`Stage`] capability trait.
//!
//! A stage is one DSP unit in the chain. It owns all of its state, sizes
//! its buffers in [`Stage::prepare`], and on every block first recomputes
//! its coefficients from the [`Controls`] and then filters the block in
//! place. The [`SignalGraph`](crate::SignalGraph) calls stages through
//! `dyn Stage` once per block; per-sample loops stay inside each stage and
//! are statically dispatched.
//!
//! ## Lifecycle
//!
//! ```text
//! new() ──prepare()──▶ prepared ──process_block()*──▶ ...
//!                          ▲            │
//!                          └──reset()───┘
//! ```

use crate::graph::StereoBlock;
use crate::mapping::KNOB_DEFAULT;
use crate::mode::Mode;
use crate::readout::Readout;

/// Sample rate and maximum block size a stage is prepared for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Largest block the host will deliver.
    pub max_block_size: usize,
}

impl ProcessSpec {
    /// Create a spec.
    pub const fn new(sample_rate: f32, max_block_size: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
        }
    }
}

impl Default for ProcessSpec {
    fn default() -> Self {
        Self::new(48000.0, 512)
    }
}

/// The knob and mode as seen by one block.
///
/// Read once per block by the graph and handed to every stage, so all six
/// stages of a block agree on the same values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Knob position, nominally in `[KNOB_MIN, KNOB_MAX]`.
    pub knob: f32,
    /// Active mode.
    pub mode: Mode,
}

impl Controls {
    /// Bundle a knob value and mode.
    pub const fn new(knob: f32, mode: Mode) -> Self {
        Self { knob, mode }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(KNOB_DEFAULT, Mode::default())
    }
}

/// One processing unit of the chain.
///
/// Object safe: the graph stores stages as `Box<dyn Stage + Send>`.
///
/// # Example
///
/// ```rust
/// use theknob_core::{Controls, ProcessSpec, Stage, StereoBlock};
///
/// struct Trim(f32);
///
/// impl Stage for Trim {
///     fn prepare(&mut self, _spec: &ProcessSpec) {}
///
///     fn process_block(&mut self, block: &mut StereoBlock<'_>, _controls: Controls) {
///         let (left, right) = block.channels_mut();
///         for s in left.iter_mut().chain(right.iter_mut()) {
///             *s *= self.0;
///         }
///     }
///
///     fn reset(&mut self) {}
///
///     fn name(&self) -> &'static str {
///         "Trim"
///     }
/// }
///
/// let mut left = [1.0_f32; 4];
/// let mut right = [1.0_f32; 4];
/// let mut trim = Trim(0.5);
/// trim.process_block(&mut StereoBlock::new(&mut left, &mut right), Controls::default());
/// assert_eq!(left, [0.5; 4]);
/// ```
pub trait Stage {
    /// Bind to a sample rate and size internal buffers. May allocate.
    fn prepare(&mut self, spec: &ProcessSpec);

    /// Recompute coefficients from `controls`, then filter `block` in place.
    ///
    /// Must not allocate, block or perform I/O.
    fn process_block(&mut self, block: &mut StereoBlock<'_>, controls: Controls);

    /// Clear internal state (delay contents, filter memory, reverb tail).
    fn reset(&mut self);

    /// Display name for diagnostics.
    fn name(&self) -> &'static str;

    /// Number of readouts this stage exposes.
    fn readout_count(&self) -> usize {
        0
    }

    /// Readout by index, reflecting the most recently computed coefficients.
    fn readout(&self, index: usize) -> Option<Readout> {
        let _ = index;
        None
    }

    /// Readout by name.
    fn readout_by_name(&self, name: &str) -> Option<Readout> {
        (0..self.readout_count())
            .filter_map(|i| self.readout(i))
            .find(|r| r.name == name)
    }
}
