//! Iterator adapters for driving a [`Progress`] from the producer side.
//!
//! This module provides the [`ProgressIteratorExt`] trait, which adds helper methods
//! to any Rust [`Iterator`]. The wrapped iterator advances the counter by one per item,
//! so a worker loop can feed a [`Gauge`](crate::Gauge) running on another thread:
//!
//! ```
//! use std::thread;
//!
//! use atomic_gauge::ProgressIteratorExt;
//!
//! let iter = (0..100u32).progress();
//! let progress = iter.handle().clone();
//! let worker = thread::spawn(move || iter.map(u64::from).sum::<u64>());
//! assert_eq!(worker.join().unwrap(), 4950);
//! assert!(progress.is_finished());
//! ```

use crate::progress::Progress;

/// An iterator adapter that wraps an underlying iterator and tracks progress.
///
/// Increments the progress position on every item yielded by `next()`.
pub struct ProgressIter<I> {
    iter: I,
    progress: Progress,
}

impl<I> ProgressIter<I> {
    /// Creates a new `ProgressIter`.
    ///
    /// Note: This is usually constructed via [`ProgressIteratorExt`] methods.
    pub const fn new(iter: I, progress: Progress) -> Self {
        Self { iter, progress }
    }

    /// The progress handle being advanced.
    pub const fn handle(&self) -> &Progress {
        &self.progress
    }
}

impl<I: Iterator> Iterator for ProgressIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next();
        if item.is_some() {
            self.progress.inc(1u64);
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Extension trait to attach progress tracking to any Iterator.
pub trait ProgressIteratorExt: Sized {
    /// Wraps the iterator in a new [`Progress`] whose target is the iterator's length.
    ///
    /// Uses the exact length when `size_hint` knows it, and the lower bound otherwise.
    fn progress(self) -> ProgressIter<Self>;

    /// Wraps the iterator using an existing [`Progress`] instance.
    fn progress_with(self, progress: Progress) -> ProgressIter<Self>;
}

impl<I: Iterator> ProgressIteratorExt for I {
    fn progress(self) -> ProgressIter<Self> {
        let (lower, upper) = self.size_hint();
        let total = upper.filter(|&u| u == lower).unwrap_or(lower);
        let progress = Progress::new(total as u64);
        ProgressIter::new(self, progress)
    }

    fn progress_with(self, progress: Progress) -> ProgressIter<Self> {
        ProgressIter::new(self, progress)
    }
}
