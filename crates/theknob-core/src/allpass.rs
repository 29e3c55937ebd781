//! Schroeder allpass for reverb diffusion.

use crate::delay::DelayLine;
use crate::math::flush_denormal;

/// Freeverb allpass with a fixed feedback of 0.5.
///
/// ```text
/// b    = line[oldest]
/// line <- in + b * 0.5
/// out  = b - in
/// ```
#[derive(Debug, Clone, Default)]
pub struct AllpassFilter {
    line: DelayLine,
}

impl AllpassFilter {
    /// Loop feedback.
    pub const FEEDBACK: f32 = 0.5;

    /// Create an allpass with a loop length of `size` samples.
    pub fn new(size: usize) -> Self {
        Self {
            line: DelayLine::new(size),
        }
    }

    /// Change the loop length, clearing the state.
    pub fn resize(&mut self, size: usize) {
        self.line.resize(size);
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let buffered = self.line.back();
        self.line.push(flush_denormal(input + buffered * Self::FEEDBACK));
        buffered - input
    }

    /// Clear the loop.
    pub fn clear(&mut self) {
        self.line.clear();
    }

    /// Loop length in samples.
    pub fn size(&self) -> usize {
        self.line.capacity()
    }
}
