//! Windowed throughput and time-to-completion estimates.
//!
//! The rate is the progress difference between the newest and the oldest sample of the
//! [`SlidingWindow`], divided by the time between them. Degenerate inputs never raise an
//! error; they collapse to sentinel values instead:
//!
//! | condition                            | rate        | ETA         |
//! |--------------------------------------|-------------|-------------|
//! | fewer than two samples               | `0.0`       | `+inf`      |
//! | two samples, zero elapsed time       | `+inf`      | `0.0`       |
//! | rate is zero                         | `0.0`       | `+inf`      |
//! | target already reached               | any         | `0.0`       |
//!
//! Formatting layers are responsible for turning non-finite values into a bounded
//! placeholder.

use crate::window::{Sample, SlidingWindow};

/// The rate and remaining-time estimate for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Estimate {
    /// Progress units per second.
    pub rate: f64,
    /// Seconds until the target is reached at the current rate.
    pub eta_secs: f64,
}

impl Estimate {
    /// The estimate before any rate could be computed.
    pub const UNKNOWN: Self = Self {
        rate: 0.0,
        eta_secs: f64::INFINITY,
    };

    /// Computes the estimate for a window and the units still missing to reach the target.
    #[must_use]
    pub fn from_window(window: &SlidingWindow<Sample>, remaining: u64) -> Self {
        let rate = rate(window);
        Self {
            rate,
            eta_secs: eta_seconds(remaining, rate),
        }
    }
}

impl Default for Estimate {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

/// Throughput between the oldest and newest sample of the window.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn rate(window: &SlidingWindow<Sample>) -> f64 {
    if window.len() < 2 {
        return 0.0;
    }
    let (Some(oldest), Some(newest)) = (window.oldest(), window.newest()) else {
        return 0.0;
    };

    let secs = newest.at.saturating_duration_since(oldest.at).as_secs_f64();
    if secs <= 0.0 {
        return f64::INFINITY;
    }

    newest.position.saturating_sub(oldest.position) as f64 / secs
}

/// Seconds needed to cover `remaining` units at `rate` units per second.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn eta_seconds(remaining: u64, rate: f64) -> f64 {
    if remaining == 0 || rate == f64::INFINITY {
        return 0.0;
    }
    if rate.is_nan() || rate <= 0.0 {
        return f64::INFINITY;
    }
    remaining as f64 / rate
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use web_time::Instant;

    use super::{Estimate, eta_seconds, rate};
    use crate::window::{Sample, SlidingWindow};

    fn window_of(points: &[(u64, u64)]) -> SlidingWindow<Sample> {
        let t0 = Instant::now();
        let mut w = SlidingWindow::new(points.len().max(2));
        for &(ms, pos) in points {
            w.push(Sample::new(t0 + Duration::from_millis(ms), pos));
        }
        w
    }

    /// Two-Point Rate
    /// The rate equals Δprogress / Δtime for two samples.
    #[test]
    fn test_rate_two_samples() {
        let w = window_of(&[(0, 10), (2500, 35)]);
        assert!((rate(&w) - 10.0).abs() < 1e-9);
    }

    /// Window Boundaries
    /// Only the oldest retained and newest samples contribute.
    #[test]
    fn test_rate_uses_window_boundaries() {
        let t0 = Instant::now();
        let mut w = SlidingWindow::new(3);
        // The first sample is evicted; its huge jump must not matter.
        for (ms, pos) in [(0, 0), (1000, 1000), (2000, 1010), (3000, 1020)] {
            w.push(Sample::new(t0 + Duration::from_millis(ms), pos));
        }
        assert!((rate(&w) - 10.0).abs() < 1e-9);
    }

    /// Degenerate Windows
    /// Empty or single-sample windows have no rate; zero elapsed time is infinite.
    #[allow(clippy::float_cmp)]
    #[test]
    fn test_rate_degenerate() {
        assert_eq!(rate(&SlidingWindow::new(4)), 0.0);
        assert_eq!(rate(&window_of(&[(0, 5)])), 0.0);
        assert_eq!(rate(&window_of(&[(0, 5), (0, 9)])), f64::INFINITY);
    }

    /// ETA Sentinels
    /// Zero rate is infinite, infinite rate is zero, reaching the target is zero.
    #[allow(clippy::float_cmp)]
    #[test]
    fn test_eta_sentinels() {
        assert_eq!(eta_seconds(10, 0.0), f64::INFINITY);
        assert_eq!(eta_seconds(10, f64::NAN), f64::INFINITY);
        assert_eq!(eta_seconds(10, f64::INFINITY), 0.0);
        assert_eq!(eta_seconds(0, 0.0), 0.0);
        assert!((eta_seconds(30, 4.0) - 7.5).abs() < 1e-9);
    }

    /// Monotonic ETA
    /// At a constant rate the ETA never grows as progress approaches the target.
    #[test]
    fn test_eta_non_increasing_at_constant_rate() {
        let target = 100u64;
        let t0 = Instant::now();
        let mut w = SlidingWindow::new(5);
        let mut last = f64::INFINITY;
        for step in 0..=10u64 {
            let pos = step * 10;
            w.push(Sample::new(t0 + Duration::from_secs(step), pos));
            let est = Estimate::from_window(&w, target - pos);
            assert!(est.eta_secs <= last, "step {step}: {} > {last}", est.eta_secs);
            last = est.eta_secs;
        }
        assert!(last.abs() < 1e-9);
    }
}
