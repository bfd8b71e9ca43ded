//! The render loop: sample, estimate, record, draw, sleep, repeat.
//!
//! A [`Gauge`] moves through three states:
//!
//! ```text
//! Idle --start--> Running --finish--> Terminated
//!                  |   ^
//!                  frame
//! ```
//!
//! Each frame reads the counters once, pushes a [`Sample`] into the window, recomputes the
//! [`Estimate`], records the rate in the [`SpeedHistory`] and rewrites the terminal line in
//! place (`ESC[2K` + carriage return). Finishing draws one last frame with the exact final
//! value and then the speed sparkline.
//!
//! [`Gauge::run`] drives the whole cycle with the wall clock. It only returns once the
//! counter reaches (or overshoots) its target; making sure that happens is the producer's
//! responsibility.

use std::{
    fmt,
    io::{self, Write},
    thread,
    time::Duration,
};

use web_time::Instant;

use crate::{
    config::GaugeConfig,
    error::GaugeError,
    estimate::Estimate,
    field::{BarStyle, Frame},
    history::SpeedHistory,
    progress::{ProgressSnapshot, ProgressView},
    recipe::Recipe,
    window::{Sample, SlidingWindow},
};

/// Erases the current terminal line and returns the cursor to column 0.
const CLEAR_LINE: &str = "\x1b[2K\r";

/// Lifecycle of a [`Gauge`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GaugeState {
    /// Built, not started.
    #[default]
    Idle,
    /// Sampling and drawing frames.
    Running,
    /// Final frame and sparkline drawn.
    Terminated,
}

impl fmt::Display for GaugeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Terminated => "terminated",
        })
    }
}

/// A single-line progress display bound to a pair of shared counters.
///
/// All state besides the counters is owned by the gauge and only touched by the thread
/// driving it.
pub struct Gauge<W = io::Stdout> {
    source: ProgressView,
    recipe: Recipe,
    style: BarStyle,
    interval: Duration,
    sparkline_height: usize,

    state: GaugeState,
    start: Option<Instant>,
    window: SlidingWindow<Sample>,
    history: SpeedHistory,
    frame: Option<Frame>,

    /// Reused for every line so frames do not allocate once warmed up.
    line: String,
    out: W,
}

impl<W> fmt::Debug for Gauge<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gauge")
            .field("state", &self.state)
            .field("recipe", &self.recipe)
            .field("samples", &self.window.len())
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl<W: Write> Gauge<W> {
    /// Creates an idle gauge from a validated configuration.
    pub(crate) fn from_parts(
        source: ProgressView,
        config: GaugeConfig,
        start: Option<Instant>,
        out: W,
    ) -> Self {
        let style = config.bar_style();
        Self {
            source,
            interval: config.sample_interval(),
            sparkline_height: config.sparkline_height,
            window: SlidingWindow::new(config.window_capacity),
            history: SpeedHistory::new(config.speed_buckets),
            recipe: config.recipe,
            line: String::with_capacity(256 + style.width * (style.fill.len().max(style.empty.len()))),
            style,
            state: GaugeState::Idle,
            start,
            frame: None,
            out,
        }
    }

    /// Runs the full loop on the calling thread and returns the total elapsed time.
    ///
    /// Blocks until the counter reaches its target, sleeping the configured interval
    /// between frames.
    ///
    /// # Errors
    ///
    /// Fails if the gauge was already started or the output sink fails.
    pub fn run(&mut self) -> Result<Duration, GaugeError> {
        self.start_at(Instant::now())?;
        loop {
            self.frame_at(Instant::now())?;
            thread::sleep(self.interval);
            if self.source.snapshot().is_complete() {
                return self.finish_at(Instant::now());
            }
        }
    }

    /// Idle -> Running: records the start time and the initial sample.
    ///
    /// A start time given to the builder takes precedence over `now`.
    ///
    /// # Errors
    ///
    /// [`GaugeError::AlreadyStarted`] unless the gauge is idle.
    pub fn start_at(&mut self, now: Instant) -> Result<(), GaugeError> {
        if self.state != GaugeState::Idle {
            return Err(GaugeError::AlreadyStarted);
        }
        let start = *self.start.get_or_insert(now);
        let snapshot = self.source.snapshot();
        self.window.push(Sample::new(start, snapshot.current()));
        self.state = GaugeState::Running;
        tracing::debug!(
            current = snapshot.current(),
            target = snapshot.target(),
            recipe = %self.recipe,
            interval_ms = self.interval.as_millis(),
            "gauge started"
        );
        Ok(())
    }

    /// Samples the counters at `now` and redraws the line.
    ///
    /// # Errors
    ///
    /// [`GaugeError::NotRunning`] outside the running state, or an output error.
    pub fn frame_at(&mut self, now: Instant) -> Result<(), GaugeError> {
        if self.state != GaugeState::Running {
            return Err(GaugeError::NotRunning { state: self.state });
        }
        let frame = self.sample(now);
        tracing::trace!(
            current = frame.progress.current(),
            rate = frame.estimate.rate,
            eta_secs = frame.estimate.eta_secs,
            "frame"
        );
        self.draw()
    }

    /// Running -> Terminated: draws the final frame, then the speed sparkline.
    ///
    /// Returns the time between start and `now`.
    ///
    /// # Errors
    ///
    /// [`GaugeError::NotRunning`] outside the running state, or an output error.
    pub fn finish_at(&mut self, now: Instant) -> Result<Duration, GaugeError> {
        self.frame_at(now)?;

        let mut chart = String::new();
        chart.push('\n');
        self.history
            .render_sparkline(self.sparkline_height, &mut chart)?;
        self.out.write_all(chart.as_bytes())?;
        self.out.flush()?;

        self.state = GaugeState::Terminated;
        let elapsed = self.elapsed_at(now);
        tracing::info!(
            elapsed = %crate::duration::format_duration(elapsed.as_secs_f64()),
            max_rate = self.history.max_finite(),
            "gauge finished"
        );
        Ok(elapsed)
    }

    /// Composes the line for the latest frame without writing it.
    ///
    /// Returns an empty string before the first frame.
    ///
    /// # Errors
    ///
    /// Only if a field fails to format.
    pub fn render_line(&mut self) -> Result<&str, GaugeError> {
        self.line.clear();
        if let Some(frame) = &self.frame {
            self.recipe.render(frame, &self.style, &mut self.line)?;
        }
        Ok(&self.line)
    }

    /// Pushes a sample for `now` and updates the estimate and history.
    fn sample(&mut self, now: Instant) -> Frame {
        let snapshot: ProgressSnapshot = self.source.snapshot();
        self.window.push(Sample::new(now, snapshot.current()));

        let estimate = Estimate::from_window(&self.window, snapshot.remaining());
        self.history
            .record(snapshot.current(), snapshot.target(), estimate.rate);

        let frame = Frame {
            progress: snapshot,
            elapsed: self.elapsed_at(now),
            estimate,
        };
        self.frame = Some(frame);
        frame
    }

    fn draw(&mut self) -> Result<(), GaugeError> {
        self.render_line()?;
        self.out.write_all(CLEAR_LINE.as_bytes())?;
        self.out.write_all(self.line.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn elapsed_at(&self, now: Instant) -> Duration {
        self.start
            .map_or(Duration::ZERO, |start| now.saturating_duration_since(start))
    }
}

impl<W> Gauge<W> {
    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> GaugeState {
        self.state
    }

    /// The latest frame, if one was drawn.
    #[must_use]
    pub const fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Rate and ETA of the latest frame.
    #[must_use]
    pub fn estimate(&self) -> Estimate {
        self.frame.map_or(Estimate::UNKNOWN, |frame| frame.estimate)
    }

    /// The sample window.
    #[must_use]
    pub const fn window(&self) -> &SlidingWindow<Sample> {
        &self.window
    }

    /// The per-bucket rate history.
    #[must_use]
    pub const fn history(&self) -> &SpeedHistory {
        &self.history
    }

    /// The field recipe.
    #[must_use]
    pub const fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Consumes the gauge, returning the output sink.
    pub fn into_writer(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use web_time::Instant;

    use super::{CLEAR_LINE, GaugeState};
    use crate::{
        GaugeBuilder, Progress,
        error::GaugeError,
        field::Field,
        history::MARKER,
        recipe::Recipe,
    };

    fn gauge(progress: &Progress, recipe: Recipe) -> super::Gauge<Vec<u8>> {
        GaugeBuilder::new(progress.view())
            .with_recipe(recipe)
            .with_bar_width(10)
            .with_speed_buckets(10)
            .with_sparkline_height(4)
            .build_with_writer(Vec::new())
            .unwrap()
    }

    /// State Machine
    /// Frames are rejected before start and after finish; start is one-shot.
    #[test]
    fn test_state_transitions() {
        let p = Progress::new(10u64);
        let mut g = gauge(&p, Recipe::ALL);
        let t0 = Instant::now();

        assert_eq!(g.state(), GaugeState::Idle);
        assert!(matches!(
            g.frame_at(t0),
            Err(GaugeError::NotRunning {
                state: GaugeState::Idle
            })
        ));

        g.start_at(t0).unwrap();
        assert_eq!(g.state(), GaugeState::Running);
        assert!(matches!(g.start_at(t0), Err(GaugeError::AlreadyStarted)));

        p.set_pos(10u64);
        g.finish_at(t0 + Duration::from_secs(1)).unwrap();
        assert_eq!(g.state(), GaugeState::Terminated);
        assert!(g.frame_at(t0).is_err());
    }

    /// Windowed Estimate
    /// Rate and ETA follow the samples pushed by each frame.
    #[test]
    fn test_frames_update_estimate() {
        let p = Progress::new(100u64);
        let mut g = gauge(&p, Recipe::from_static(&[Field::Speed, Field::EstimatedTime]));
        let t0 = Instant::now();
        g.start_at(t0).unwrap();

        p.set_pos(20u64);
        g.frame_at(t0 + Duration::from_secs(2)).unwrap();
        let est = g.estimate();
        assert!((est.rate - 10.0).abs() < 1e-9);
        assert!((est.eta_secs - 8.0).abs() < 1e-9);
        assert_eq!(g.window().len(), 2);
        assert_eq!(
            g.render_line().unwrap(),
            "[Speed: 10.00 Tick/s][Est.Remaining: 8.00s]"
        );
    }

    /// Zero Elapsed Frame
    /// A frame at the start instant has an infinite rate and renders placeholders.
    #[allow(clippy::float_cmp)]
    #[test]
    fn test_zero_elapsed_frame() {
        let p = Progress::new(5u64);
        let mut g = gauge(&p, Recipe::from_static(&[Field::Speed, Field::EstimatedTime]));
        let t0 = Instant::now();
        g.start_at(t0).unwrap();
        g.frame_at(t0).unwrap();
        assert_eq!(g.estimate().rate, f64::INFINITY);
        assert_eq!(
            g.render_line().unwrap(),
            "[Speed: - Tick/s][Est.Remaining: 0.00s]"
        );
    }

    /// Terminal Output
    /// Each frame clears the line; finishing appends the sparkline block.
    #[test]
    fn test_output_stream() {
        let p = Progress::new(4u64);
        let mut g = gauge(&p, Recipe::from_static(&[Field::RawProgress]));
        let t0 = Instant::now();
        g.start_at(t0).unwrap();
        for step in 1..=4u64 {
            p.set_pos(step);
            g.frame_at(t0 + Duration::from_millis(step * 100)).unwrap();
        }
        let elapsed = g.finish_at(t0 + Duration::from_millis(500)).unwrap();
        assert_eq!(elapsed, Duration::from_millis(500));

        let out = String::from_utf8(g.into_writer()).unwrap();
        assert_eq!(out.matches(CLEAR_LINE).count(), 5);
        assert!(out.contains(&format!("{CLEAR_LINE}[Progress: 4/4 Ticks]\n")));
        assert!(out.contains(MARKER));
        assert!(out.trim_end().ends_with(" 10 20 30 40 50 60 70 80 90100"));
    }

    /// Builder Start Time
    /// An explicit start time drives the elapsed field.
    #[test]
    fn test_explicit_start_time() {
        let p = Progress::new(3u64);
        let t0 = Instant::now();
        let mut g = GaugeBuilder::new(p.view())
            .with_recipe(Recipe::from_static(&[Field::ElapsedTime]))
            .with_start_time(t0)
            .build_with_writer(Vec::new())
            .unwrap();
        g.start_at(t0 + Duration::from_secs(30)).unwrap();
        g.frame_at(t0 + Duration::from_secs(65)).unwrap();
        assert_eq!(g.render_line().unwrap(), "[Elapsed: 1m05.00s]");
    }
}
