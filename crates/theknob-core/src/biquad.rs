//! Second-order IIR sections and their coefficient designs.
//!
//! Second-order designs follow the RBJ Audio EQ Cookbook. The first-order
//! low/high-pass designs use the bilinear transform with prewarping and are
//! stored in the same five-coefficient form (`b2 = a2 = 0`), so every filter
//! in the chain runs through one [`Biquad`] type.
//!
//! All design functions clamp the frequency to `0.49 * sample_rate`.

use core::f32::consts::PI;
use libm::{cosf, sinf, sqrtf, tanf};

use crate::math::{clamp_frequency, flush_denormal};

/// Normalized biquad coefficients (`a0 == 1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Feedforward coefficients.
    pub b0: f32,
    /// Feedforward coefficients.
    pub b1: f32,
    /// Feedforward coefficients.
    pub b2: f32,
    /// Feedback coefficients (sign convention: `y -= a1*y1 + a2*y2`).
    pub a1: f32,
    /// Feedback coefficients.
    pub a2: f32,
}

impl Coefficients {
    /// Passthrough: `y[n] = x[n]`.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Build from raw cookbook values, normalizing by `a0`.
    pub fn from_raw(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Magnitude response at `frequency` (linear).
    pub fn magnitude_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        let w = 2.0 * PI * frequency / sample_rate;
        let (c1, s1) = (cosf(w), sinf(w));
        let (c2, s2) = (cosf(2.0 * w), sinf(2.0 * w));

        let num_re = self.b0 + self.b1 * c1 + self.b2 * c2;
        let num_im = -(self.b1 * s1 + self.b2 * s2);
        let den_re = 1.0 + self.a1 * c1 + self.a2 * c2;
        let den_im = -(self.a1 * s1 + self.a2 * s2);

        sqrtf((num_re * num_re + num_im * num_im) / (den_re * den_re + den_im * den_im))
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Direct Form I biquad section.
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
/// ```
///
/// Outputs are flushed to zero before entering the feedback state.
#[derive(Debug, Clone, Default)]
pub struct Biquad {
    coeffs: Coefficients,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a passthrough section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the coefficients, keeping the filter memory.
    #[inline]
    pub fn set_coefficients(&mut self, coeffs: Coefficients) {
        self.coeffs = coeffs;
    }

    /// Current coefficients.
    pub fn coefficients(&self) -> Coefficients {
        self.coeffs
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coeffs;
        let output = flush_denormal(
            c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2,
        );

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Process a buffer in place.
    pub fn process_slice(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear the filter memory.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

/// One coefficient set applied to two channels with independent memory.
#[derive(Debug, Clone, Default)]
pub struct StereoBiquad {
    left: Biquad,
    right: Biquad,
}

impl StereoBiquad {
    /// Creates a passthrough stereo section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the coefficients on both channels.
    #[inline]
    pub fn set_coefficients(&mut self, coeffs: Coefficients) {
        self.left.set_coefficients(coeffs);
        self.right.set_coefficients(coeffs);
    }

    /// Shared coefficients.
    pub fn coefficients(&self) -> Coefficients {
        self.left.coefficients()
    }

    /// Filter both channels in place.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        self.left.process_slice(left);
        self.right.process_slice(right);
    }

    /// Clear both channels' memory.
    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}

fn omega(frequency: f32, sample_rate: f32) -> (f32, f32) {
    let w = 2.0 * PI * clamp_frequency(frequency, sample_rate) / sample_rate;
    (cosf(w), sinf(w))
}

/// RBJ low-pass.
pub fn lowpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> Coefficients {
    let (cos_w, sin_w) = omega(frequency, sample_rate);
    let alpha = sin_w / (2.0 * q);

    Coefficients::from_raw(
        (1.0 - cos_w) / 2.0,
        1.0 - cos_w,
        (1.0 - cos_w) / 2.0,
        1.0 + alpha,
        -2.0 * cos_w,
        1.0 - alpha,
    )
}

/// RBJ high-pass.
pub fn highpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> Coefficients {
    let (cos_w, sin_w) = omega(frequency, sample_rate);
    let alpha = sin_w / (2.0 * q);

    Coefficients::from_raw(
        (1.0 + cos_w) / 2.0,
        -(1.0 + cos_w),
        (1.0 + cos_w) / 2.0,
        1.0 + alpha,
        -2.0 * cos_w,
        1.0 - alpha,
    )
}

/// RBJ peaking EQ with a linear gain factor.
///
/// `gain_factor` is the linear magnitude at the centre frequency: `2.0`
/// boosts by ~6 dB, `0.5` cuts by ~6 dB, `1.0` is flat. Internally
/// `A = sqrt(gain_factor)`.
pub fn peak_coefficients(frequency: f32, q: f32, gain_factor: f32, sample_rate: f32) -> Coefficients {
    let (cos_w, sin_w) = omega(frequency, sample_rate);
    let alpha = sin_w / (2.0 * q);
    let a = sqrtf(gain_factor.max(1e-6));

    Coefficients::from_raw(
        1.0 + alpha * a,
        -2.0 * cos_w,
        1.0 - alpha * a,
        1.0 + alpha / a,
        -2.0 * cos_w,
        1.0 - alpha / a,
    )
}

/// First-order low-pass, bilinear with `n = tan(pi * f / fs)`.
pub fn first_order_lowpass_coefficients(frequency: f32, sample_rate: f32) -> Coefficients {
    let n = tanf(PI * clamp_frequency(frequency, sample_rate) / sample_rate);
    Coefficients::from_raw(n, n, 0.0, n + 1.0, n - 1.0, 0.0)
}

/// First-order high-pass, bilinear with `n = tan(pi * f / fs)`.
pub fn first_order_highpass_coefficients(frequency: f32, sample_rate: f32) -> Coefficients {
    let n = tanf(PI * clamp_frequency(frequency, sample_rate) / sample_rate);
    Coefficients::from_raw(1.0, -1.0, 0.0, n + 1.0, n - 1.0, 0.0)
}
