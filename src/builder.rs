//! Fluent interface for constructing [`Gauge`] instances.
//!
//! The builder starts from [`GaugeConfig::default`]. Individual settings can be overridden
//! one by one, or a whole configuration (e.g. loaded from TOML) can be injected with
//! [`GaugeBuilder::with_config`]. Validation happens once, in `build`.
//!
//! ```
//! use atomic_gauge::{Field, GaugeBuilder, Progress, Recipe};
//!
//! let progress = Progress::new(10u64);
//! let gauge = GaugeBuilder::new(&progress)
//!     .with_recipe(Recipe::from_static(&[Field::ProgressBar, Field::Percentage]))
//!     .with_bar_width(20)
//!     .build_with_writer(Vec::new())
//!     .unwrap();
//! assert_eq!(gauge.recipe().fields().len(), 2);
//! ```

use std::{
    io::{self, Write},
    time::Duration,
};

use compact_str::CompactString;
use web_time::Instant;

use crate::{
    config::GaugeConfig, error::GaugeError, gauge::Gauge, progress::ProgressView, recipe::Recipe,
};

/// A builder for [`Gauge`].
#[derive(Debug, Clone)]
pub struct GaugeBuilder {
    source: ProgressView,
    config: GaugeConfig,
    start: Option<Instant>,
}

impl GaugeBuilder {
    /// Starts building a gauge that observes `source`.
    #[must_use]
    pub fn new(source: impl Into<ProgressView>) -> Self {
        Self {
            source: source.into(),
            config: GaugeConfig::default(),
            start: None,
        }
    }

    /// Replaces every setting with `config`.
    #[must_use]
    pub fn with_config(mut self, config: GaugeConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the fields rendered on each line.
    #[must_use]
    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.config.recipe = recipe;
        self
    }

    /// Sets how many samples the rate estimate spans.
    #[must_use]
    pub const fn with_window_capacity(mut self, capacity: usize) -> Self {
        self.config.window_capacity = capacity;
        self
    }

    /// Sets the number of speed history buckets.
    #[must_use]
    pub const fn with_speed_buckets(mut self, buckets: usize) -> Self {
        self.config.speed_buckets = buckets;
        self
    }

    /// Sets the delay between frames (millisecond resolution).
    #[must_use]
    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.config.sample_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the glyph bar width in cells.
    #[must_use]
    pub const fn with_bar_width(mut self, width: usize) -> Self {
        self.config.bar_width = width;
        self
    }

    /// Sets the glyphs for completed and remaining bar cells.
    #[must_use]
    pub fn with_glyphs(
        mut self,
        fill: impl Into<CompactString>,
        empty: impl Into<CompactString>,
    ) -> Self {
        self.config.fill_glyph = fill.into();
        self.config.empty_glyph = empty.into();
        self
    }

    /// Sets the number of sparkline rows.
    #[must_use]
    pub const fn with_sparkline_height(mut self, height: usize) -> Self {
        self.config.sparkline_height = height;
        self
    }

    /// Sets the start time explicitly instead of taking it when the gauge starts.
    #[must_use]
    pub const fn with_start_time(mut self, start: Instant) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the start time to `Instant::now()`.
    #[must_use]
    pub fn with_start_time_now(self) -> Self {
        self.with_start_time(Instant::now())
    }

    /// Builds a gauge that draws to standard output.
    ///
    /// # Errors
    ///
    /// [`GaugeError::Config`] if the configuration is invalid.
    pub fn build(self) -> Result<Gauge<io::Stdout>, GaugeError> {
        self.build_with_writer(io::stdout())
    }

    /// Builds a gauge that draws to `out`.
    ///
    /// # Errors
    ///
    /// [`GaugeError::Config`] if the configuration is invalid.
    pub fn build_with_writer<W: Write>(self, out: W) -> Result<Gauge<W>, GaugeError> {
        self.config.validate()?;
        tracing::debug!(config = ?self.config, "building gauge");
        Ok(Gauge::from_parts(self.source, self.config, self.start, out))
    }
}
