//! Shared progress counters and the read-only view the gauge samples.
//!
//! A run has exactly two shared values: the *current* position, advanced by a producer
//! thread, and the *target*, fixed for the run. Both live in `Arc<AtomicU64>`s:
//!
//! * [`Progress`] is the producer's handle. It is the only type that can write.
//! * [`ProgressView`] is the renderer's handle. It can only load.
//!
//! # Memory ordering
//!
//! Writes use [`Ordering::Release`] and loads use [`Ordering::Acquire`]. `AtomicU64` rules
//! out torn reads, so the renderer always observes a value the producer actually stored,
//! and never an older one than it has seen before. Nothing else is synchronized: the
//! renderer never blocks the producer.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use serde::{Deserialize, Serialize};

/// The producer's cloneable handle to a pair of progress counters.
///
/// Cloning is cheap (Arc bump) and points to the same underlying counters.
#[derive(Clone)]
pub struct Progress {
    position: Arc<AtomicU64>,
    total: Arc<AtomicU64>,
}

impl fmt::Debug for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progress")
            .field("position", &self.get_pos())
            .field("total", &self.get_total())
            .finish()
    }
}

impl Progress {
    /// Creates counters starting at zero with the given target.
    #[must_use]
    pub fn new(total: impl Into<u64>) -> Self {
        Self::from_atomics(Arc::new(AtomicU64::new(0)), Arc::new(AtomicU64::new(total.into())))
    }

    /// Wraps pre-existing atomics, e.g. counters owned by another component.
    #[must_use]
    pub const fn from_atomics(position: Arc<AtomicU64>, total: Arc<AtomicU64>) -> Self {
        Self { position, total }
    }

    /// Advances the position by `n`.
    pub fn inc(&self, n: impl Into<u64>) {
        self.position.fetch_add(n.into(), Ordering::Release);
    }

    /// Sets the position. Callers are expected to keep it non-decreasing.
    pub fn set_pos(&self, pos: impl Into<u64>) {
        self.position.store(pos.into(), Ordering::Release);
    }

    /// Current position.
    #[must_use]
    pub fn get_pos(&self) -> u64 {
        self.position.load(Ordering::Acquire)
    }

    /// Target position.
    #[must_use]
    pub fn get_total(&self) -> u64 {
        self.total.load(Ordering::Acquire)
    }

    /// Completion in percent; 0 for a zero target.
    #[must_use]
    pub fn get_percent(&self) -> f64 {
        self.snapshot().percent()
    }

    /// Returns `true` once the position has reached the target.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.snapshot().is_complete()
    }

    /// A read-only handle to the same counters.
    #[must_use]
    pub fn view(&self) -> ProgressView {
        ProgressView {
            position: Arc::clone(&self.position),
            total: Arc::clone(&self.total),
        }
    }

    /// Reads both counters.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::new(self.get_pos(), self.get_total())
    }
}

/// Read-only access to a [`Progress`]'s counters.
#[derive(Clone)]
pub struct ProgressView {
    position: Arc<AtomicU64>,
    total: Arc<AtomicU64>,
}

impl fmt::Debug for ProgressView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.snapshot(), f)
    }
}

impl ProgressView {
    /// Current position.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.position.load(Ordering::Acquire)
    }

    /// Target position.
    #[must_use]
    pub fn target(&self) -> u64 {
        self.total.load(Ordering::Acquire)
    }

    /// Reads both counters once; every field of a frame renders from the same snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::new(self.current(), self.target())
    }
}

impl From<&Progress> for ProgressView {
    fn from(progress: &Progress) -> Self {
        progress.view()
    }
}

/// The counters at one instant.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    current: u64,
    target: u64,
}

impl ProgressSnapshot {
    /// Creates a snapshot from raw values.
    #[must_use]
    pub const fn new(current: u64, target: u64) -> Self {
        Self { current, target }
    }

    /// Position at the time of the snapshot.
    #[must_use]
    pub const fn current(&self) -> u64 {
        self.current
    }

    /// Target of the run.
    #[must_use]
    pub const fn target(&self) -> u64 {
        self.target
    }

    /// Units still missing; zero once the target is reached or overshot.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.target.saturating_sub(self.current)
    }

    /// Reaching or overshooting the target both count as completion.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.current >= self.target
    }

    /// Completion in percent; 0 for a zero target.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.target == 0 {
            return 0.0;
        }
        (self.current as f64 * 100.0) / self.target as f64
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, atomic::AtomicU64},
        thread,
    };

    use super::{Progress, ProgressSnapshot};

    /// Basic Lifecycle
    /// New -> Inc -> Finished.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_basic_lifecycle() {
        let p = Progress::new(100u64);

        assert_eq!(p.get_pos(), 0);
        assert!(!p.is_finished());
        assert_eq!(p.get_percent(), 0.0);

        p.inc(50u64);
        assert_eq!(p.get_pos(), 50);
        assert_eq!(p.get_percent(), 50.0);

        p.set_pos(100u64);
        assert!(p.is_finished());
    }

    /// Concurrency & Atomics
    /// High-contention updates from multiple threads are lossless and visible to a view.
    #[test]
    fn test_concurrency_atomics() {
        let p = Progress::new(1000u64);
        let view = p.view();

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let p = p.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        p.inc(1u64);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(view.current(), 1000, "Atomic updates should be lossless");
        assert!(view.snapshot().is_complete());
    }

    /// Shared State Injection
    /// Foreign atomics are observed directly.
    #[test]
    fn test_from_atomics() {
        let pos = Arc::new(AtomicU64::new(7));
        let total = Arc::new(AtomicU64::new(9));
        let view = Progress::from_atomics(pos, Arc::clone(&total)).view();

        assert_eq!(view.snapshot(), ProgressSnapshot::new(7, 9));
        assert_eq!(view.snapshot().remaining(), 2);
    }

    /// Snapshot Edge Cases
    /// Zero targets and overshoot are handled without panics.
    #[allow(clippy::float_cmp)]
    #[test]
    fn test_snapshot_edges() {
        let zero = ProgressSnapshot::new(0, 0);
        assert!(zero.is_complete());
        assert_eq!(zero.percent(), 0.0);

        let over = ProgressSnapshot::new(12, 10);
        assert!(over.is_complete());
        assert_eq!(over.remaining(), 0);
    }
}
