//! Fixed per-mode EQ voicing at the end of the chain.

use theknob_core::{
    Coefficients, Controls, Mode, ModeTable, ParamUnit, ProcessSpec, Readout, Stage, StereoBiquad,
    StereoBlock, highpass_coefficients, lowpass_coefficients, peak_coefficients,
};

/// Most bands any voicing uses.
pub const MAX_BANDS: usize = 4;

/// Shape of one voicing band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandShape {
    /// Peaking bell with a linear gain factor.
    Peak {
        /// Linear gain at the centre frequency.
        gain: f32,
    },
    /// Second-order high-pass.
    HighPass,
    /// Second-order low-pass.
    LowPass,
}

/// One band of a voicing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Filter shape.
    pub shape: BandShape,
    /// Centre or corner frequency (Hz).
    pub frequency: f32,
    /// Quality factor.
    pub q: f32,
}

impl Band {
    const fn peak(frequency: f32, q: f32, gain: f32) -> Self {
        Self {
            shape: BandShape::Peak { gain },
            frequency,
            q,
        }
    }

    const fn high_pass(frequency: f32, q: f32) -> Self {
        Self {
            shape: BandShape::HighPass,
            frequency,
            q,
        }
    }

    const fn low_pass(frequency: f32, q: f32) -> Self {
        Self {
            shape: BandShape::LowPass,
            frequency,
            q,
        }
    }

    /// Biquad coefficients for this band at `sample_rate`.
    pub fn coefficients(&self, sample_rate: f32) -> Coefficients {
        match self.shape {
            BandShape::Peak { gain } => peak_coefficients(self.frequency, self.q, gain, sample_rate),
            BandShape::HighPass => highpass_coefficients(self.frequency, self.q, sample_rate),
            BandShape::LowPass => lowpass_coefficients(self.frequency, self.q, sample_rate),
        }
    }
}

const VIOLET_BANDS: &[Band] = &[
    Band::peak(400.0, 1.0, 0.5),
    Band::peak(10000.0, 0.71, 1.5),
];

const TEAL_BANDS: &[Band] = &[
    Band::peak(1000.0, 2.11, 1.5),
    Band::peak(10000.0, 0.71, 1.5),
];

const CRIMSON_BANDS: &[Band] = &[
    Band::high_pass(111.0, 0.71),
    Band::low_pass(2500.0, 0.66),
    Band::peak(177.0, 0.71, 1.67),
    Band::peak(1777.0, 0.71, 1.83),
];

/// Band lists per mode. Independent of the knob.
pub const VOICINGS: ModeTable<&[Band]> = ModeTable::new([VIOLET_BANDS, TEAL_BANDS, CRIMSON_BANDS]);

/// Mode-selected fixed EQ.
///
/// Violet scoops 400 Hz and lifts the top, Teal adds a narrow 1 kHz
/// presence bump, Crimson band-limits to 111 Hz–2.5 kHz with two resonant
/// lifts. Coefficients are recomputed only when the mode or sample rate
/// changes.
///
/// ## Readouts
///
/// | Index | Name | Range |
/// |-------|------|-------|
/// | 0 | `bands` | 2 or 4 |
#[derive(Debug, Clone)]
pub struct SpecialEq {
    filters: [StereoBiquad; MAX_BANDS],
    active: usize,
    mode: Option<Mode>,
    sample_rate: f32,
}

impl SpecialEq {
    /// Create an unprepared voicing EQ.
    pub fn new() -> Self {
        Self {
            filters: core::array::from_fn(|_| StereoBiquad::new()),
            active: 0,
            mode: None,
            sample_rate: ProcessSpec::default().sample_rate,
        }
    }

    /// Number of bands applied on the last block.
    pub fn active_bands(&self) -> usize {
        self.active
    }

    fn update(&mut self, mode: Mode) {
        if self.mode == Some(mode) {
            return;
        }
        let bands = VOICINGS[mode];
        for (filter, band) in self.filters.iter_mut().zip(bands) {
            filter.set_coefficients(band.coefficients(self.sample_rate));
        }
        self.active = bands.len();
        self.mode = Some(mode);
    }
}

impl Default for SpecialEq {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for SpecialEq {
    fn prepare(&mut self, spec: &ProcessSpec) {
        self.sample_rate = spec.sample_rate;
        self.mode = None;
        self.reset();
        self.update(Controls::default().mode);
    }

    fn process_block(&mut self, block: &mut StereoBlock<'_>, controls: Controls) {
        self.update(controls.mode);
        let (left, right) = block.channels_mut();
        for filter in &mut self.filters[..self.active] {
            filter.process_block(left, right);
        }
    }

    fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.clear();
        }
    }

    fn name(&self) -> &'static str {
        "Special EQ"
    }

    fn readout_count(&self) -> usize {
        1
    }

    fn readout(&self, index: usize) -> Option<Readout> {
        match index {
            0 => Some(Readout::new("bands", ParamUnit::None, self.active as f32)),
            _ => None,
        }
    }
}
