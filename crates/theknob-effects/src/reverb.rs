//! Band-limited reverb stage.
//!
//! A first-order high-pass at 300 Hz keeps low end out of the tank and a
//! first-order low-pass at 3.5 kHz darkens what comes out:
//!
//! ```text
//! in ──▶ HPF 300 Hz ──▶ Freeverb ──▶ LPF 3.5 kHz ──▶ out
//! ```
//!
//! The dry path runs through both filters too.

use theknob_core::{
    Controls, ParamUnit, ProcessSpec, Readout, Stage, StereoBiquad, StereoBlock,
    first_order_highpass_coefficients, first_order_lowpass_coefficients, map_range, normalize,
    ranges,
};

use crate::freeverb::{Freeverb, FreeverbParams};

/// Maps knob and mode to tank settings.
///
/// Room size, wet level, width and freeze rise from zero to the mode's
/// maximum. Damping falls with the knob except in Crimson, where it rises.
/// Dry level is always `1 - wet`.
pub fn reverb_params(controls: Controls) -> FreeverbParams {
    let Controls { knob, mode } = controls;
    let norm = normalize(knob);
    let wet_level = map_range(knob, 0.0, ranges::REVERB_WET_LEVEL_MAX[mode]);

    FreeverbParams {
        room_size: map_range(knob, 0.0, ranges::REVERB_ROOM_SIZE_MAX[mode]),
        damping: if ranges::REVERB_DAMPING_RISES[mode] {
            norm
        } else {
            1.0 - norm
        },
        wet_level,
        dry_level: 1.0 - wet_level,
        width: map_range(knob, 0.0, ranges::REVERB_WIDTH_MAX[mode]),
        freeze: map_range(
            knob,
            ranges::REVERB_FREEZE_MIN,
            ranges::REVERB_FREEZE_MAX[mode],
        ),
    }
}

/// Freeverb between a fixed high-pass and a fixed low-pass.
///
/// ## Readouts
///
/// | Index | Name | Range |
/// |-------|------|-------|
/// | 0 | `room_size` | 0 – mode max |
/// | 1 | `damping` | 0–1 |
/// | 2 | `wet_level` | 0 – mode max |
/// | 3 | `dry_level` | 1 – wet |
/// | 4 | `width` | 0 – mode max |
/// | 5 | `freeze` | 0 – mode max (never freezes) |
#[derive(Debug, Clone)]
pub struct Reverb {
    pre_filter: StereoBiquad,
    post_filter: StereoBiquad,
    tank: Freeverb,
}

impl Reverb {
    /// Create an unprepared reverb.
    pub fn new() -> Self {
        Self {
            pre_filter: StereoBiquad::new(),
            post_filter: StereoBiquad::new(),
            tank: Freeverb::new(ProcessSpec::default().sample_rate),
        }
    }

    /// Settings applied on the last block.
    pub fn params(&self) -> FreeverbParams {
        self.tank.params()
    }
}

impl Default for Reverb {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for Reverb {
    fn prepare(&mut self, spec: &ProcessSpec) {
        self.pre_filter.set_coefficients(first_order_highpass_coefficients(
            ranges::REVERB_HPF_FREQ,
            spec.sample_rate,
        ));
        self.post_filter.set_coefficients(first_order_lowpass_coefficients(
            ranges::REVERB_LPF_FREQ,
            spec.sample_rate,
        ));
        self.tank.set_params(reverb_params(Controls::default()));
        self.tank.set_sample_rate(spec.sample_rate);
        self.reset();
    }

    fn process_block(&mut self, block: &mut StereoBlock<'_>, controls: Controls) {
        self.tank.set_params(reverb_params(controls));

        let (left, right) = block.channels_mut();
        self.pre_filter.process_block(left, right);
        self.tank.process(left, right);
        self.post_filter.process_block(left, right);
    }

    fn reset(&mut self) {
        self.pre_filter.clear();
        self.post_filter.clear();
        self.tank.clear();
    }

    fn name(&self) -> &'static str {
        "Reverb"
    }

    fn readout_count(&self) -> usize {
        6
    }

    fn readout(&self, index: usize) -> Option<Readout> {
        let p = self.tank.params();
        let (name, value) = match index {
            0 => ("room_size", p.room_size),
            1 => ("damping", p.damping),
            2 => ("wet_level", p.wet_level),
            3 => ("dry_level", p.dry_level),
            4 => ("width", p.width),
            5 => ("freeze", p.freeze),
            _ => return None,
        };
        Some(Readout::new(name, ParamUnit::Amount, value))
    }
}
