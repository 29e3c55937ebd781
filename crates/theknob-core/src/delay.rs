//! Fixed-capacity circular delay line.
//!
//! Storage is written *backwards*: a single cursor points at the oldest slot,
//! [`DelayLine::push`] overwrites that slot and steps the cursor down by one.
//! Reads are relative to the cursor, so `get(0)` is the newest sample and
//! [`DelayLine::back`] is the oldest.
//!
//! ```text
//!   index:   0    1    2    3    4
//!          [ e ][ d ][ c ][ b ][ a ]     a pushed first, e last
//!            ^ newest = get(0)   ^
//!   cursor ──┘ (one below)       └ back() after wrap
//! ```
//!
//! Capacity is fixed by [`DelayLine::resize`] during `prepare` and never
//! changes on the audio thread. No interpolation: delay lengths are whole
//! samples.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Circular sample buffer with an oldest-slot cursor.
///
/// # Example
///
/// ```rust
/// use theknob_core::DelayLine;
///
/// let mut line = DelayLine::new(4);
/// line.push(1.0);
/// line.push(2.0);
/// line.push(3.0);
/// assert_eq!(line.get(0), 3.0);
/// assert_eq!(line.get(2), 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DelayLine {
    data: Vec<f32>,
    least_recent: usize,
}

impl DelayLine {
    /// Creates a zeroed line holding `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        let mut line = Self::default();
        line.resize(capacity);
        line
    }

    /// Reallocate to `capacity` samples and clear. Call from `prepare` only.
    pub fn resize(&mut self, capacity: usize) {
        self.data = vec![0.0; capacity];
        self.least_recent = capacity.saturating_sub(1);
    }

    /// Number of samples the line holds.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Zero the contents without changing the capacity.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
        self.least_recent = self.data.len().saturating_sub(1);
    }

    /// Sample `delay` steps older than the newest one. `get(0)` is the newest.
    ///
    /// Valid for `delay < capacity()`.
    #[inline]
    pub fn get(&self, delay: usize) -> f32 {
        debug_assert!(delay < self.data.len(), "delay {delay} out of range");
        self.data[self.index(delay)]
    }

    /// The oldest sample, i.e. the one the next [`push`](Self::push) overwrites.
    #[inline]
    pub fn back(&self) -> f32 {
        self.data[self.least_recent]
    }

    /// Overwrite the oldest slot with `value` and step the cursor.
    #[inline]
    pub fn push(&mut self, value: f32) {
        let len = self.data.len();
        self.data[self.least_recent] = value;
        self.least_recent = if self.least_recent == 0 { len - 1 } else { self.least_recent - 1 };
    }

    #[inline]
    fn index(&self, delay: usize) -> usize {
        (self.least_recent + 1 + delay) % self.data.len()
    }
}
