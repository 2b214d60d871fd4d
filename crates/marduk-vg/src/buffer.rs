//! Pooled append-only storage.
//!
//! Every per-frame array in the pipeline (flattened points, scratch vertices,
//! batched vertices, draw calls) lives in a [`GrowBuffer`]. Clearing resets the
//! logical length but keeps the slots, so a warmed-up context allocates
//! nothing per frame.

use core::ops::{Index, IndexMut, Range};

/// Smallest non-zero capacity a buffer grows to.
const MIN_CAPACITY: usize = 16;

/// Growable array with explicit capacity doubling and reuse across clears.
///
/// Invariant: `len <= slots.len()`. Slots past `len` hold stale data from a
/// previous frame and are never exposed.
#[derive(Debug, Clone)]
pub struct GrowBuffer<T> {
    slots: Vec<T>,
    len: usize,
}

impl<T> Default for GrowBuffer<T> {
    fn default() -> Self {
        Self { slots: Vec::new(), len: 0 }
    }
}

impl<T: Copy + Default> GrowBuffer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = Self::default();
        buf.ensure_capacity(capacity);
        buf
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots currently allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Forgets the contents; storage is kept for the next frame.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Grows the slot count by doubling until `required` fits.
    pub fn ensure_capacity(&mut self, required: usize) {
        if required <= self.slots.len() {
            return;
        }
        let mut cap = self.slots.len().max(MIN_CAPACITY);
        while cap < required {
            cap *= 2;
        }
        self.slots.resize(cap, T::default());
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        self.ensure_capacity(self.len + 1);
        self.slots[self.len] = value;
        self.len += 1;
    }

    /// Appends a copy of `values` and returns the range they occupy.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Range<usize> {
        let start = self.len;
        self.ensure_capacity(start + values.len());
        self.slots[start..start + values.len()].copy_from_slice(values);
        self.len += values.len();
        start..self.len
    }

    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    #[inline]
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.slots[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.slots[..self.len]
    }
}

impl<T: Copy + Default> Index<usize> for GrowBuffer<T> {
    type Output = T;
    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Copy + Default> IndexMut<usize> for GrowBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: Copy + Default> Index<Range<usize>> for GrowBuffer<T> {
    type Output = [T];
    #[inline]
    fn index(&self, range: Range<usize>) -> &[T] {
        &self.as_slice()[range]
    }
}

impl<T: Copy + Default> IndexMut<Range<usize>> for GrowBuffer<T> {
    #[inline]
    fn index_mut(&mut self, range: Range<usize>) -> &mut [T] {
        &mut self.as_mut_slice()[range]
    }
}
