//! Rolling windows over a reading stream
//!
//! Detectors never see the full history. They are handed a [`Window`], an
//! ordered view of the most recent readings (oldest first), and the caller
//! decides how those readings are stored. [`RollingWindow`] is the bounded
//! ring buffer used by the stream monitor; plain slices, `Vec` and `VecDeque`
//! work as windows too.

use crate::error::{Error, Result};
use crate::numeric::Numeric;
use std::collections::VecDeque;

/// Ordered, read-only view of the trailing readings of a stream
pub trait Window<T: Numeric> {
    /// Number of readings in the view
    fn len(&self) -> usize;

    /// Readings from oldest to newest
    fn values(&self) -> impl Iterator<Item = T> + Clone + '_;

    /// The most recent reading, if any
    fn latest(&self) -> Option<T>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Numeric> Window<T> for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn values(&self) -> impl Iterator<Item = T> + Clone + '_ {
        self.iter().copied()
    }

    fn latest(&self) -> Option<T> {
        self.last().copied()
    }
}

impl<T: Numeric, const N: usize> Window<T> for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn values(&self) -> impl Iterator<Item = T> + Clone + '_ {
        self.iter().copied()
    }

    fn latest(&self) -> Option<T> {
        self.last().copied()
    }
}

impl<T: Numeric> Window<T> for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn values(&self) -> impl Iterator<Item = T> + Clone + '_ {
        self.iter().copied()
    }

    fn latest(&self) -> Option<T> {
        self.last().copied()
    }
}

impl<T: Numeric> Window<T> for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn values(&self) -> impl Iterator<Item = T> + Clone + '_ {
        self.iter().copied()
    }

    fn latest(&self) -> Option<T> {
        self.back().copied()
    }
}

/// Fixed-capacity ring buffer holding the N most recent readings
///
/// Pushing into a full window evicts the oldest reading, so the contents are
/// always the trailing `capacity` readings in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T: Copy> RollingWindow<T> {
    /// Create an empty window holding at most `capacity` readings
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidParameter(
                "rolling window capacity must be positive".to_string(),
            ));
        }
        Ok(Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append a reading, returning the evicted oldest reading when full
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.buffer.len() == self.capacity {
            self.buffer.pop_front()
        } else {
            None
        };
        self.buffer.push_back(value);
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Whether the window holds `capacity` readings
    pub fn is_full(&self) -> bool {
        self.buffer.len() == self.capacity
    }

    /// Oldest reading still in the window
    pub fn oldest(&self) -> Option<T> {
        self.buffer.front().copied()
    }

    /// Readings from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buffer.iter()
    }

    /// Copy the window into a contiguous vector, oldest first
    pub fn to_vec(&self) -> Vec<T> {
        self.buffer.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl<T: Copy> Extend<T> for RollingWindow<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Numeric> Window<T> for RollingWindow<T> {
    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn values(&self) -> impl Iterator<Item = T> + Clone + '_ {
        self.buffer.iter().copied()
    }

    fn latest(&self) -> Option<T> {
        self.buffer.back().copied()
    }
}
