//! Stereo feedback delay with a band-limited input and a saturating loop.

use libm::{ceilf, tanhf};
use theknob_core::{
    Biquad, Controls, DelayLine, ParamUnit, ProcessSpec, Readout, Stage, StereoBiquad,
    StereoBlock, first_order_highpass_coefficients, first_order_lowpass_coefficients,
    flush_denormal, map_range, ranges, seconds_to_samples,
};

/// Two independent feedback delay lines, one per channel.
///
/// Per sample and channel:
///
/// ```text
/// delayed = damping_lpf(line[d])
/// line   <- tanh(input + feedback * delayed)
/// output  = input + wet * delayed
/// ```
///
/// The `tanh` in the write path bounds the loop even at `feedback == 1`.
/// Values written back into the line are flushed to zero once they fall
/// below the normal range, so a decayed tail ends in exact silence.
///
/// # Example
///
/// ```rust
/// use theknob_effects::FeedbackDelay;
///
/// let mut delay = FeedbackDelay::new();
/// delay.prepare(48000.0, 2.0);
/// delay.set_delay_times(0.2, 0.2);
/// delay.set_feedback(0.5);
/// delay.set_wet_level(0.5);
///
/// let mut left = [1.0, 0.0, 0.0, 0.0];
/// let mut right = [1.0, 0.0, 0.0, 0.0];
/// delay.process(&mut left, &mut right);
/// assert_eq!(left[0], 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct FeedbackDelay {
    lines: [DelayLine; 2],
    dampers: [Biquad; 2],
    delay_samples: [usize; 2],
    feedback: f32,
    wet_level: f32,
    sample_rate: f32,
}

impl FeedbackDelay {
    /// Create an unsized delay. Call [`prepare`](Self::prepare) before use.
    pub fn new() -> Self {
        Self {
            lines: [DelayLine::default(), DelayLine::default()],
            dampers: [Biquad::new(), Biquad::new()],
            delay_samples: [0; 2],
            feedback: 0.0,
            wet_level: 0.0,
            sample_rate: ProcessSpec::default().sample_rate,
        }
    }

    /// Size both lines for `max_seconds` at `sample_rate` and clear them.
    pub fn prepare(&mut self, sample_rate: f32, max_seconds: f32) {
        self.sample_rate = sample_rate;
        let capacity = ceilf(max_seconds * sample_rate).max(1.0) as usize;
        let damping =
            first_order_lowpass_coefficients(ranges::DELAY_DAMPING_FREQ, sample_rate);
        for (line, damper) in self.lines.iter_mut().zip(&mut self.dampers) {
            line.resize(capacity);
            damper.set_coefficients(damping);
        }
        self.clear();

        let [d_left, d_right] = self.delay_samples;
        self.delay_samples = [d_left.min(capacity - 1), d_right.min(capacity - 1)];
    }

    /// Set the per-channel delay times. Clamped to the prepared capacity.
    pub fn set_delay_times(&mut self, left_seconds: f32, right_seconds: f32) {
        let max = self.lines[0].capacity().saturating_sub(1);
        self.delay_samples = [
            seconds_to_samples(left_seconds, self.sample_rate).min(max),
            seconds_to_samples(right_seconds, self.sample_rate).min(max),
        ];
    }

    /// Delay per channel in samples.
    pub fn delay_samples(&self) -> [usize; 2] {
        self.delay_samples
    }

    /// Set the loop gain. Expected in `[0, 1]`.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback;
    }

    /// Loop gain.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Set the echo level added to the input. Expected in `[0, 1]`.
    pub fn set_wet_level(&mut self, wet_level: f32) {
        self.wet_level = wet_level;
    }

    /// Echo level.
    pub fn wet_level(&self) -> f32 {
        self.wet_level
    }

    /// Zero both lines and the damping filters.
    pub fn clear(&mut self) {
        for (line, damper) in self.lines.iter_mut().zip(&mut self.dampers) {
            line.clear();
            damper.clear();
        }
    }

    /// Delay both channels in place.
    pub fn process(&mut self, left: &mut [f32], right: &mut [f32]) {
        let [line_l, line_r] = &mut self.lines;
        let [damper_l, damper_r] = &mut self.dampers;
        let [delay_l, delay_r] = self.delay_samples;

        process_channel(line_l, damper_l, delay_l, self.feedback, self.wet_level, left);
        process_channel(line_r, damper_r, delay_r, self.feedback, self.wet_level, right);
    }
}

impl Default for FeedbackDelay {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn process_channel(
    line: &mut DelayLine,
    damper: &mut Biquad,
    delay: usize,
    feedback: f32,
    wet_level: f32,
    samples: &mut [f32],
) {
    if delay >= line.capacity() {
        return;
    }
    for sample in samples {
        let input = *sample;
        let delayed = damper.process(line.get(delay));
        line.push(flush_denormal(tanhf(input + feedback * delayed)));
        *sample = input + wet_level * delayed;
    }
}

/// Delay stage: knob-swept band-pass, then [`FeedbackDelay`].
///
/// Delay times are fixed per mode; the knob raises feedback and wet level
/// and narrows the band fed into the lines (high-pass 200 → 400 Hz,
/// low-pass 10 kHz → 3.5 kHz). The band-pass also shapes the dry signal.
///
/// ## Readouts
///
/// | Index | Name | Range |
/// |-------|------|-------|
/// | 0 | `time_left` | 0.2–1.0 s per mode |
/// | 1 | `time_right` | 0.2–1.0 s per mode |
/// | 2 | `feedback` | 0 – mode max |
/// | 3 | `wet_level` | 0 – mode max |
/// | 4 | `hpf_cutoff` | 200–400 Hz |
/// | 5 | `lpf_cutoff` | 10000–3500 Hz |
#[derive(Debug, Clone)]
pub struct Delay {
    high_pass: StereoBiquad,
    low_pass: StereoBiquad,
    delay: FeedbackDelay,
    sample_rate: f32,
    times: [f32; 2],
    hpf_cutoff: f32,
    lpf_cutoff: f32,
}

impl Delay {
    /// Create an unprepared delay stage.
    pub fn new() -> Self {
        Self {
            high_pass: StereoBiquad::new(),
            low_pass: StereoBiquad::new(),
            delay: FeedbackDelay::new(),
            sample_rate: ProcessSpec::default().sample_rate,
            times: [0.0; 2],
            hpf_cutoff: ranges::DELAY_HPF_FREQ_MIN,
            lpf_cutoff: ranges::DELAY_LPF_FREQ_MIN,
        }
    }

    /// The inner feedback delay.
    pub fn feedback_delay(&self) -> &FeedbackDelay {
        &self.delay
    }

    fn update(&mut self, controls: Controls) {
        let Controls { knob, mode } = controls;
        let sr = self.sample_rate;

        self.hpf_cutoff = map_range(knob, ranges::DELAY_HPF_FREQ_MIN, ranges::DELAY_HPF_FREQ_MAX);
        self.lpf_cutoff = map_range(knob, ranges::DELAY_LPF_FREQ_MIN, ranges::DELAY_LPF_FREQ_MAX);
        self.high_pass
            .set_coefficients(first_order_highpass_coefficients(self.hpf_cutoff, sr));
        self.low_pass
            .set_coefficients(first_order_lowpass_coefficients(self.lpf_cutoff, sr));

        self.times = [ranges::DELAY_TIME_L[mode], ranges::DELAY_TIME_R[mode]];
        self.delay.set_delay_times(self.times[0], self.times[1]);
        self.delay.set_feedback(map_range(
            knob,
            ranges::DELAY_FEEDBACK_MIN,
            ranges::DELAY_FEEDBACK_MAX[mode],
        ));
        self.delay.set_wet_level(map_range(
            knob,
            ranges::DELAY_WET_LEVEL_MIN,
            ranges::DELAY_WET_LEVEL_MAX[mode],
        ));
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for Delay {
    fn prepare(&mut self, spec: &ProcessSpec) {
        self.sample_rate = spec.sample_rate;
        self.delay.prepare(spec.sample_rate, ranges::DELAY_MAX_TIME);
        self.high_pass.clear();
        self.low_pass.clear();
        self.update(Controls::default());
    }

    fn process_block(&mut self, block: &mut StereoBlock<'_>, controls: Controls) {
        self.update(controls);
        let (left, right) = block.channels_mut();
        self.high_pass.process_block(left, right);
        self.low_pass.process_block(left, right);
        self.delay.process(left, right);
    }

    fn reset(&mut self) {
        self.high_pass.clear();
        self.low_pass.clear();
        self.delay.clear();
    }

    fn name(&self) -> &'static str {
        "Delay"
    }

    fn readout_count(&self) -> usize {
        6
    }

    fn readout(&self, index: usize) -> Option<Readout> {
        Some(match index {
            0 => Readout::new("time_left", ParamUnit::Seconds, self.times[0]),
            1 => Readout::new("time_right", ParamUnit::Seconds, self.times[1]),
            2 => Readout::new("feedback", ParamUnit::Amount, self.delay.feedback()),
            3 => Readout::new("wet_level", ParamUnit::Amount, self.delay.wet_level()),
            4 => Readout::new("hpf_cutoff", ParamUnit::Hertz, self.hpf_cutoff),
            5 => Readout::new("lpf_cutoff", ParamUnit::Hertz, self.lpf_cutoff),
            _ => return None,
        })
    }
}
