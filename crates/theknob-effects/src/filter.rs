//! Input high-pass filter stage.

use core::f32::consts::FRAC_1_SQRT_2;

use theknob_core::{
    Controls, ParamUnit, ProcessSpec, Readout, Stage, StereoBiquad, StereoBlock,
    highpass_coefficients, map_range, ranges,
};

/// Butterworth high-pass whose cutoff follows the knob.
///
/// The same in every mode.
///
/// ## Readouts
///
/// | Index | Name | Range |
/// |-------|------|-------|
/// | 0 | `cutoff` | 50–150 Hz |
///
/// # Example
///
/// ```rust
/// use theknob_core::{Controls, Mode, ProcessSpec, Stage, StereoBuffer};
/// use theknob_effects::HighPassFilter;
///
/// let mut filter = HighPassFilter::new();
/// filter.prepare(&ProcessSpec::new(48000.0, 256));
///
/// let mut buffer = StereoBuffer::new(256);
/// filter.process_block(&mut buffer.as_block(), Controls::new(100.0, Mode::Teal));
/// assert_eq!(filter.cutoff(), 150.0);
/// ```
#[derive(Debug, Clone)]
pub struct HighPassFilter {
    filter: StereoBiquad,
    sample_rate: f32,
    cutoff: f32,
}

impl HighPassFilter {
    /// Create an unprepared filter.
    pub fn new() -> Self {
        Self {
            filter: StereoBiquad::new(),
            sample_rate: ProcessSpec::default().sample_rate,
            cutoff: ranges::HPF_FREQ_MIN,
        }
    }

    /// Cutoff computed for the most recent block (Hz).
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    fn update(&mut self, controls: Controls) {
        self.cutoff = map_range(controls.knob, ranges::HPF_FREQ_MIN, ranges::HPF_FREQ_MAX);
        self.filter
            .set_coefficients(highpass_coefficients(self.cutoff, FRAC_1_SQRT_2, self.sample_rate));
    }
}

impl Default for HighPassFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for HighPassFilter {
    fn prepare(&mut self, spec: &ProcessSpec) {
        self.sample_rate = spec.sample_rate;
        self.filter.clear();
        self.update(Controls::default());
    }

    fn process_block(&mut self, block: &mut StereoBlock<'_>, controls: Controls) {
        self.update(controls);
        let (left, right) = block.channels_mut();
        self.filter.process_block(left, right);
    }

    fn reset(&mut self) {
        self.filter.clear();
    }

    fn name(&self) -> &'static str {
        "Filter"
    }

    fn readout_count(&self) -> usize {
        1
    }

    fn readout(&self, index: usize) -> Option<Readout> {
        match index {
            0 => Some(Readout::new("cutoff", ParamUnit::Hertz, self.cutoff)),
            _ => None,
        }
    }
}
