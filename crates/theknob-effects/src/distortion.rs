//! Gain-compensated waveshaping distortion.

use libm::{sinf, tanhf};
use theknob_core::{
    Controls, Mode, ParamUnit, ProcessSpec, Readout, Stage, StereoBlock, db_to_linear, map_range,
    ranges,
};

/// Waveshaping curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveShape {
    /// `tanh(x)`: plain soft clip.
    #[default]
    Tanh,
    /// `tanh(sin(x))`: folds back past ±π/2, brighter and buzzier.
    TanhSine,
}

impl WaveShape {
    /// Curve used by `mode`.
    pub const fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Violet => WaveShape::TanhSine,
            Mode::Teal | Mode::Crimson => WaveShape::Tanh,
        }
    }

    /// Shape one sample.
    #[inline]
    pub fn apply(self, x: f32) -> f32 {
        match self {
            WaveShape::Tanh => tanhf(x),
            WaveShape::TanhSine => tanhf(sinf(x)),
        }
    }
}

/// Output gain in dB that compensates a given input gain.
#[inline]
pub fn post_gain_db(pre_gain_db: f32) -> f32 {
    ranges::DIST_OUTPUT_GAIN_RATIO * pre_gain_db
}

/// Pre-gain, memoryless waveshaper, post-gain.
///
/// Pre-gain sweeps the mode's dB range with the knob; post-gain is
/// `-0.75 ×` pre-gain so louder drive is only partly compensated.
///
/// ## Readouts
///
/// | Index | Name | Range |
/// |-------|------|-------|
/// | 0 | `pre_gain` | 0–10 / 0–15 / 5–10 dB |
/// | 1 | `post_gain` | −0.75 × pre_gain dB |
#[derive(Debug, Clone, Default)]
pub struct Distortion {
    shape: WaveShape,
    pre_gain_db: f32,
    post_gain_db: f32,
}

impl Distortion {
    /// Create a distortion stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Curve applied on the last block.
    pub fn shape(&self) -> WaveShape {
        self.shape
    }

    fn update(&mut self, controls: Controls) {
        let Controls { knob, mode } = controls;
        self.shape = WaveShape::for_mode(mode);
        self.pre_gain_db = map_range(
            knob,
            ranges::DIST_INPUT_GAIN_MIN[mode],
            ranges::DIST_INPUT_GAIN_MAX[mode],
        );
        self.post_gain_db = post_gain_db(self.pre_gain_db);
    }
}

impl Stage for Distortion {
    fn prepare(&mut self, _spec: &ProcessSpec) {
        self.update(Controls::default());
    }

    fn process_block(&mut self, block: &mut StereoBlock<'_>, controls: Controls) {
        self.update(controls);
        let pre = db_to_linear(self.pre_gain_db);
        let post = db_to_linear(self.post_gain_db);
        let shape = self.shape;
        block.map_samples(|x| post * shape.apply(pre * x));
    }

    fn reset(&mut self) {}

    fn name(&self) -> &'static str {
        "Distortion"
    }

    fn readout_count(&self) -> usize {
        2
    }

    fn readout(&self, index: usize) -> Option<Readout> {
        match index {
            0 => Some(Readout::new("pre_gain", ParamUnit::Decibels, self.pre_gain_db)),
            1 => Some(Readout::new("post_gain", ParamUnit::Decibels, self.post_gain_db)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use theknob_core::StereoBuffer;

    fn run(dist: &mut Distortion, controls: Controls, input: f32) -> f32 {
        let mut buffer = StereoBuffer::new(1);
        buffer.left[0] = input;
        buffer.right[0] = input;
        dist.process_block(&mut buffer.as_block(), controls);
        buffer.left[0]
    }

    #[test]
    fn unity_gains_at_minimum() {
        let mut dist = Distortion::new();
        dist.prepare(&ProcessSpec::default());
        let out = run(&mut dist, Controls::new(1.0, Mode::Teal), 0.3);
        assert!((out - tanhf(0.3)).abs() < 1e-6);
        assert_eq!(dist.readout(0).map(|r| r.value), Some(0.0));
        assert_eq!(dist.readout(1).map(|r| r.value), Some(0.0));
    }

    #[test]
    fn crimson_starts_driven() {
        let mut dist = Distortion::new();
        run(&mut dist, Controls::new(1.0, Mode::Crimson), 0.0);
        assert_eq!(dist.readout_by_name("pre_gain").map(|r| r.value), Some(5.0));
        assert_eq!(dist.readout_by_name("post_gain").map(|r| r.value), Some(-3.75));
    }

    #[test]
    fn violet_folds() {
        let mut dist = Distortion::new();
        run(&mut dist, Controls::new(100.0, Mode::Violet), 0.0);
        assert_eq!(dist.shape(), WaveShape::TanhSine);

        // sin folds a large drive back toward zero; tanh alone would saturate.
        let x = core::f32::consts::PI;
        assert!(WaveShape::TanhSine.apply(x).abs() < 1e-3);
        assert!(WaveShape::Tanh.apply(x) > 0.99);
    }

    #[test]
    fn output_is_bounded_by_post_gain() {
        let mut dist = Distortion::new();
        for mode in Mode::ALL {
            for input in [-100.0, -1.0, 0.5, 100.0] {
                let out = run(&mut dist, Controls::new(100.0, mode), input);
                let post = db_to_linear(dist.readout(1).map_or(0.0, |r| r.value));
                assert!(out.abs() <= post + 1e-6, "{mode}: {out}");
            }
        }
    }

    #[test]
    fn odd_symmetry() {
        let mut dist = Distortion::new();
        let c = Controls::new(60.0, Mode::Teal);
        let pos = run(&mut dist, c, 0.4);
        let neg = run(&mut dist, c, -0.4);
        assert!((pos + neg).abs() < 1e-6);
    }
}
