//! Stereo Freeverb tank.
//!
//! Eight parallel damped combs feeding four series allpasses per channel,
//! with the right channel's delays offset by a fixed stereo spread. Gains
//! are ramped over 10 ms so parameter changes between blocks do not click.

use theknob_core::{AllpassFilter, CombFilter, LinearSmoothedParam};

const COMB_TUNINGS_44K: [usize; 8] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];
const ALLPASS_TUNINGS_44K: [usize; 4] = [556, 441, 341, 225];
const STEREO_SPREAD: usize = 23;
const REFERENCE_RATE: f32 = 44100.0;

const INPUT_GAIN: f32 = 0.015;
const WET_SCALE: f32 = 3.0;
const DRY_SCALE: f32 = 2.0;
const DAMP_SCALE: f32 = 0.4;
const ROOM_SCALE: f32 = 0.28;
const ROOM_OFFSET: f32 = 0.7;
const FREEZE_THRESHOLD: f32 = 0.5;
const SMOOTHING_MS: f32 = 10.0;

fn scale_to_rate(samples: usize, target_rate: f32) -> usize {
    ((samples as f32 * target_rate / REFERENCE_RATE) as usize).max(1)
}

/// User-facing tank settings, each nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeverbParams {
    /// Comb feedback amount.
    pub room_size: f32,
    /// High-frequency loss inside the combs.
    pub damping: f32,
    /// Reverberated level.
    pub wet_level: f32,
    /// Direct level.
    pub dry_level: f32,
    /// Stereo cross-mix: 0 is mono, 1 fully wide.
    pub width: f32,
    /// At 0.5 or above the tank holds its contents indefinitely.
    pub freeze: f32,
}

impl FreeverbParams {
    /// Whether these settings freeze the tank.
    pub fn is_frozen(&self) -> bool {
        self.freeze >= FREEZE_THRESHOLD
    }
}

impl Default for FreeverbParams {
    fn default() -> Self {
        Self {
            room_size: 0.5,
            damping: 0.5,
            wet_level: 0.33,
            dry_level: 0.4,
            width: 1.0,
            freeze: 0.0,
        }
    }
}

/// Freeverb stereo reverberator.
#[derive(Debug, Clone)]
pub struct Freeverb {
    combs: [[CombFilter; 8]; 2],
    allpasses: [[AllpassFilter; 4]; 2],
    params: FreeverbParams,
    input_gain: f32,
    damping: LinearSmoothedParam,
    feedback: LinearSmoothedParam,
    dry_gain: LinearSmoothedParam,
    wet_gain_1: LinearSmoothedParam,
    wet_gain_2: LinearSmoothedParam,
}

impl Freeverb {
    /// Create a tank sized for `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        let mut reverb = Self {
            combs: core::array::from_fn(|_| core::array::from_fn(|_| CombFilter::new(1))),
            allpasses: core::array::from_fn(|_| core::array::from_fn(|_| AllpassFilter::new(1))),
            params: FreeverbParams::default(),
            input_gain: INPUT_GAIN,
            damping: LinearSmoothedParam::default(),
            feedback: LinearSmoothedParam::default(),
            dry_gain: LinearSmoothedParam::default(),
            wet_gain_1: LinearSmoothedParam::default(),
            wet_gain_2: LinearSmoothedParam::default(),
        };
        reverb.set_params(FreeverbParams::default());
        reverb.set_sample_rate(sample_rate);
        reverb
    }

    /// Re-size every delay for `sample_rate` and snap the gains to target.
    ///
    /// Clears the tank.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        for (channel, spread) in [0, STEREO_SPREAD].into_iter().enumerate() {
            for (comb, tuning) in self.combs[channel].iter_mut().zip(COMB_TUNINGS_44K) {
                comb.resize(scale_to_rate(tuning + spread, sample_rate));
            }
            for (allpass, tuning) in self.allpasses[channel].iter_mut().zip(ALLPASS_TUNINGS_44K) {
                allpass.resize(scale_to_rate(tuning + spread, sample_rate));
            }
        }

        for param in self.smoothed_mut() {
            param.prepare(sample_rate, SMOOTHING_MS);
        }
    }

    /// Current settings.
    pub fn params(&self) -> FreeverbParams {
        self.params
    }

    /// Apply new settings. Gains ramp toward them over the next 10 ms.
    pub fn set_params(&mut self, params: FreeverbParams) {
        let wet = params.wet_level * WET_SCALE;
        self.dry_gain.set_target(params.dry_level * DRY_SCALE);
        self.wet_gain_1.set_target(0.5 * wet * (1.0 + params.width));
        self.wet_gain_2.set_target(0.5 * wet * (1.0 - params.width));

        if params.is_frozen() {
            self.input_gain = 0.0;
            self.damping.set_target(0.0);
            self.feedback.set_target(1.0);
        } else {
            self.input_gain = INPUT_GAIN;
            self.damping.set_target(params.damping * DAMP_SCALE);
            self.feedback
                .set_target(params.room_size * ROOM_SCALE + ROOM_OFFSET);
        }
        self.params = params;
    }

    /// Zero the tank. Gains are untouched.
    pub fn clear(&mut self) {
        for comb in self.combs.iter_mut().flatten() {
            comb.clear();
        }
        for allpass in self.allpasses.iter_mut().flatten() {
            allpass.clear();
        }
    }

    /// Reverberate both channels in place. Extra samples on the longer
    /// channel are left untouched.
    pub fn process(&mut self, left: &mut [f32], right: &mut [f32]) {
        let [combs_l, combs_r] = &mut self.combs;
        let [allpasses_l, allpasses_r] = &mut self.allpasses;

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let input = (*l + *r) * self.input_gain;
            let damp = self.damping.advance();
            let feedback = self.feedback.advance();

            let mut out_l = 0.0;
            let mut out_r = 0.0;
            for (comb_l, comb_r) in combs_l.iter_mut().zip(combs_r.iter_mut()) {
                out_l += comb_l.process(input, damp, feedback);
                out_r += comb_r.process(input, damp, feedback);
            }
            for (ap_l, ap_r) in allpasses_l.iter_mut().zip(allpasses_r.iter_mut()) {
                out_l = ap_l.process(out_l);
                out_r = ap_r.process(out_r);
            }

            let dry = self.dry_gain.advance();
            let wet_1 = self.wet_gain_1.advance();
            let wet_2 = self.wet_gain_2.advance();
            *l = out_l * wet_1 + out_r * wet_2 + *l * dry;
            *r = out_r * wet_1 + out_l * wet_2 + *r * dry;
        }
    }

    fn smoothed_mut(&mut self) -> [&mut LinearSmoothedParam; 5] {
        [
            &mut self.damping,
            &mut self.feedback,
            &mut self.dry_gain,
            &mut self.wet_gain_1,
            &mut self.wet_gain_2,
        ]
    }
}
