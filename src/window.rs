//! Fixed-capacity sliding window of timestamped progress samples.
//!
//! The [`SlidingWindow`] is the input to rate estimation: it keeps the `N` most recent
//! [`Sample`]s and hands out the oldest and newest in O(1). Storage is reserved once at
//! construction; pushing never reallocates, it overwrites the oldest slot once the window
//! has warmed up.
//!
//! The capacity trades smoothing against responsiveness: a large window reacts slowly to
//! rate changes, a small one produces a noisy estimate.

use web_time::Instant;

/// One `(timestamp, progress)` observation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sample {
    /// When the progress value was read.
    pub at: Instant,
    /// The progress value observed at `at`.
    pub position: u64,
}

impl Sample {
    /// Creates a new sample.
    #[must_use]
    pub const fn new(at: Instant, position: u64) -> Self {
        Self { at, position }
    }
}

/// A ring buffer holding the most recent `capacity` items.
#[derive(Clone, Debug)]
pub struct SlidingWindow<T> {
    slots: Vec<T>,
    capacity: usize,
    /// Index of the oldest item once the window is full.
    head: usize,
}

impl<T: Copy> SlidingWindow<T> {
    /// Creates an empty window able to hold `capacity` items.
    ///
    /// A capacity of zero is bumped to one so that `newest()` is always meaningful after
    /// a push.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    /// Inserts `item` as the newest entry, evicting the oldest one when full.
    pub fn push(&mut self, item: T) {
        if self.slots.len() < self.capacity {
            self.slots.push(item);
        } else {
            self.slots[self.head] = item;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Returns the oldest retained item, or `None` if the window is empty.
    #[must_use]
    pub fn oldest(&self) -> Option<T> {
        self.slots.get(self.head).copied()
    }

    /// Returns the most recently pushed item, or `None` if the window is empty.
    #[must_use]
    pub fn newest(&self) -> Option<T> {
        if self.slots.is_empty() {
            return None;
        }
        let idx = (self.head + self.slots.len() - 1) % self.slots.len();
        self.slots.get(idx).copied()
    }

    /// Number of valid items (never more than the capacity).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if nothing has been pushed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The fixed capacity chosen at construction.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let (wrapped, front) = self.slots.split_at(self.head);
        front.iter().chain(wrapped).copied()
    }
}
