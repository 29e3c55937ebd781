//! Two-channel audio buffers.
//!
//! [`StereoBlock`] borrows the host's channel slices for one callback and is
//! what stages see. [`StereoBuffer`] owns its storage and is used for
//! scratch channels, tests and offline rendering.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Borrowed left/right slices of equal length, processed in place.
#[derive(Debug)]
pub struct StereoBlock<'a> {
    left: &'a mut [f32],
    right: &'a mut [f32],
}

impl<'a> StereoBlock<'a> {
    /// Wrap two channel slices.
    ///
    /// If the lengths differ, both are truncated to the shorter one.
    pub fn new(left: &'a mut [f32], right: &'a mut [f32]) -> Self {
        debug_assert_eq!(left.len(), right.len(), "channel lengths differ");
        let len = left.len().min(right.len());
        let (left, _) = left.split_at_mut(len);
        let (right, _) = right.split_at_mut(len);
        Self { left, right }
    }

    /// Samples per channel.
    #[inline]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// `true` for a zero-length block.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Left channel.
    #[inline]
    pub fn left(&self) -> &[f32] {
        &*self.left
    }

    /// Right channel.
    #[inline]
    pub fn right(&self) -> &[f32] {
        &*self.right
    }

    /// Both channels, mutably.
    #[inline]
    pub fn channels_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut *self.left, &mut *self.right)
    }

    /// Apply `f` to every sample of both channels.
    #[inline]
    pub fn map_samples(&mut self, mut f: impl FnMut(f32) -> f32) {
        for s in self.left.iter_mut().chain(self.right.iter_mut()) {
            *s = f(*s);
        }
    }
}

/// Owned stereo buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoBuffer {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoBuffer {
    /// Zeroed buffer of `len` samples per channel.
    pub fn new(len: usize) -> Self {
        Self {
            left: vec![0.0; len],
            right: vec![0.0; len],
        }
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// `true` if empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Zero both channels.
    pub fn clear(&mut self) {
        self.left.fill(0.0);
        self.right.fill(0.0);
    }

    /// Borrow the whole buffer as a block.
    pub fn as_block(&mut self) -> StereoBlock<'_> {
        StereoBlock::new(&mut self.left, &mut self.right)
    }

    /// Peak absolute sample across both channels.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(self.right.iter())
            .fold(0.0_f32, |acc, s| acc.max(s.abs()))
    }
}
