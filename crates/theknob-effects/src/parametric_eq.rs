//! Knob-driven three-band parametric EQ.

use theknob_core::{
    Controls, ParamUnit, ProcessSpec, Readout, Stage, StereoBiquad, StereoBlock, map_range,
    peak_coefficients, ranges,
};

/// Low-mid boost centre (Hz).
pub const LOW_BOOST_FREQ: f32 = 250.0;
/// Air boost centre (Hz).
pub const HIGH_BOOST_FREQ: f32 = 16000.0;
/// Box-tone cut centre (Hz).
pub const MID_CUT_FREQ: f32 = 400.0;

/// Three peaking bands sharing one gain and one Q.
///
/// As the knob rises the 250 Hz and 16 kHz bands boost by `gain` while the
/// 400 Hz band cuts by `1 / gain`, and all three widen together.
///
/// ## Readouts
///
/// | Index | Name | Range |
/// |-------|------|-------|
/// | 0 | `gain` | 1.0–3.0 (linear) |
/// | 1 | `q` | 2.0–1.0 |
#[derive(Debug, Clone)]
pub struct ParametricEq {
    low_boost: StereoBiquad,
    high_boost: StereoBiquad,
    mid_cut: StereoBiquad,
    sample_rate: f32,
    gain: f32,
    q: f32,
}

impl ParametricEq {
    /// Create an unprepared EQ.
    pub fn new() -> Self {
        Self {
            low_boost: StereoBiquad::new(),
            high_boost: StereoBiquad::new(),
            mid_cut: StereoBiquad::new(),
            sample_rate: ProcessSpec::default().sample_rate,
            gain: ranges::EQ_GAIN_MIN,
            q: ranges::EQ_Q_MIN,
        }
    }

    /// Linear boost factor of the 250 Hz and 16 kHz bands.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Shared Q of all three bands.
    pub fn q(&self) -> f32 {
        self.q
    }

    fn update(&mut self, controls: Controls) {
        self.gain = map_range(controls.knob, ranges::EQ_GAIN_MIN, ranges::EQ_GAIN_MAX);
        self.q = map_range(controls.knob, ranges::EQ_Q_MIN, ranges::EQ_Q_MAX);

        let sr = self.sample_rate;
        self.low_boost
            .set_coefficients(peak_coefficients(LOW_BOOST_FREQ, self.q, self.gain, sr));
        self.high_boost
            .set_coefficients(peak_coefficients(HIGH_BOOST_FREQ, self.q, self.gain, sr));
        self.mid_cut
            .set_coefficients(peak_coefficients(MID_CUT_FREQ, self.q, 1.0 / self.gain, sr));
    }
}

impl Default for ParametricEq {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for ParametricEq {
    fn prepare(&mut self, spec: &ProcessSpec) {
        self.sample_rate = spec.sample_rate;
        self.reset();
        self.update(Controls::default());
    }

    fn process_block(&mut self, block: &mut StereoBlock<'_>, controls: Controls) {
        self.update(controls);
        let (left, right) = block.channels_mut();
        self.low_boost.process_block(left, right);
        self.high_boost.process_block(left, right);
        self.mid_cut.process_block(left, right);
    }

    fn reset(&mut self) {
        self.low_boost.clear();
        self.high_boost.clear();
        self.mid_cut.clear();
    }

    fn name(&self) -> &'static str {
        "EQ"
    }

    fn readout_count(&self) -> usize {
        2
    }

    fn readout(&self, index: usize) -> Option<Readout> {
        match index {
            0 => Some(Readout::new("gain", ParamUnit::Linear, self.gain)),
            1 => Some(Readout::new("q", ParamUnit::None, self.q)),
            _ => None,
        }
    }
}
