//! Per-bucket throughput history and the post-run sparkline.
//!
//! The run is split into equally sized progress buckets. Every frame overwrites the bucket
//! its progress falls into with the current rate, so each bucket ends up holding the rate
//! seen the last time progress was inside it. Once the run completes the buckets are
//! plotted as a column chart:
//!
//! ```text
//! │ ·  ⏺  ·  ·
//! │ ⏺  ·  ⏺  ·
//! │ ·  ·  ·  ⏺
//! └─────────────
//!  25 50 75100
//! ```

use std::fmt::{self, Write as _};

/// Glyph for a cell with no plotted value.
pub const EMPTY_CELL: &str = "·";

/// Glyph marking a column's value.
pub const MARKER: &str = "⏺";

/// Fixed number of rate samples indexed by progress bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeedHistory {
    buckets: Vec<Option<f64>>,
}

impl SpeedHistory {
    /// Creates a history with `buckets` slots (at least one).
    #[must_use]
    pub fn new(buckets: usize) -> Self {
        Self {
            buckets: vec![None; buckets.max(1)],
        }
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Always `false`; a history has at least one bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Bucket index for `current` out of `target`: `floor(current / target * len)`.
    ///
    /// Clamped to the last bucket, so reaching (or overshooting) the target never indexes
    /// out of range. A zero target maps to the first bucket.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn bucket_for(&self, current: u64, target: u64) -> usize {
        let last = self.buckets.len() - 1;
        if target == 0 {
            return 0;
        }
        let idx = u128::from(current) * self.buckets.len() as u128 / u128::from(target);
        idx.min(last as u128) as usize
    }

    /// Stores `rate` in the bucket for `current`/`target`, replacing any earlier value.
    pub fn record(&mut self, current: u64, target: u64, rate: f64) {
        let idx = self.bucket_for(current, target);
        self.buckets[idx] = Some(rate);
    }

    /// The last rate recorded in `bucket`, if any.
    #[must_use]
    pub fn get(&self, bucket: usize) -> Option<f64> {
        self.buckets.get(bucket).copied().flatten()
    }

    /// Largest finite recorded rate, if any.
    #[must_use]
    pub fn max_finite(&self) -> Option<f64> {
        self.buckets
            .iter()
            .flatten()
            .copied()
            .filter(|rate| rate.is_finite())
            .reduce(f64::max)
    }

    /// Row (0 = bottom) a bucket is plotted in, or `None` if it is not plotted.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn plotted_row(&self, bucket: usize, height: usize, max: f64) -> Option<usize> {
        let rate = self.get(bucket).filter(|rate| rate.is_finite())?;
        let top = height.checked_sub(1)?;
        if max <= 0.0 {
            return Some(0);
        }
        let row = (rate / max * top as f64) as usize;
        Some(row.min(top))
    }

    /// Appends a `height`-row chart of the history followed by a percentage axis.
    ///
    /// Rows are scaled against [`max_finite`](Self::max_finite). Non-finite and unvisited
    /// buckets are left empty; without any finite rate every row is empty.
    ///
    /// # Errors
    ///
    /// Only propagates errors of the underlying [`fmt::Write`] sink.
    pub fn render_sparkline<W: fmt::Write>(&self, height: usize, out: &mut W) -> fmt::Result {
        let max = self.max_finite();
        for row in (0..height).rev() {
            out.write_str("│ ")?;
            for bucket in 0..self.len() {
                let plotted = max.and_then(|max| self.plotted_row(bucket, height, max));
                out.write_str(if plotted == Some(row) { MARKER } else { EMPTY_CELL })?;
                out.write_str("  ")?;
            }
            out.write_char('\n')?;
        }

        out.write_str("└─")?;
        for _ in 0..self.len() {
            out.write_str("───")?;
        }
        out.write_char('\n')?;

        for i in 1..=self.len() {
            write!(out, "{:>3}", i * 100 / self.len())?;
        }
        out.write_char('\n')
    }
}
