//! Gauge configuration, loadable from TOML.
//!
//! Every key is optional; missing keys fall back to [`GaugeConfig::default`]:
//!
//! ```toml
//! window_capacity = 20
//! speed_buckets = 20
//! sample_interval_ms = 100
//! bar_width = 50
//! fill_glyph = "█"
//! empty_glyph = "―"
//! sparkline_height = 15
//! recipe = ["all"]
//! ```

use std::{fs, path::Path, time::Duration};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, field::BarStyle, recipe::Recipe};

/// Construction-time settings of a [`Gauge`](crate::Gauge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GaugeConfig {
    /// Samples kept for the rate estimate. Larger is smoother but slower to react.
    pub window_capacity: usize,
    /// Progress buckets of the post-run speed history.
    pub speed_buckets: usize,
    /// Delay between two frames, in milliseconds.
    pub sample_interval_ms: u64,
    /// Cells in the glyph bar.
    pub bar_width: usize,
    /// Glyph for completed bar cells.
    pub fill_glyph: CompactString,
    /// Glyph for remaining bar cells.
    pub empty_glyph: CompactString,
    /// Rows of the post-run sparkline.
    pub sparkline_height: usize,
    /// Fields rendered on each line, in order.
    pub recipe: Recipe,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        let style = BarStyle::default();
        Self {
            window_capacity: 20,
            speed_buckets: 20,
            sample_interval_ms: 100,
            bar_width: style.width,
            fill_glyph: style.fill,
            empty_glyph: style.empty,
            sparkline_height: 15,
            recipe: Recipe::ALL,
        }
    }
}

impl GaugeConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys, [`ConfigError::Invalid`]
    /// for out-of-range values.
    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&data)?;
        tracing::debug!(path = %path.display(), recipe = %cfg.recipe, "loaded gauge config");
        Ok(cfg)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_capacity < 2 {
            return Err(ConfigError::Invalid {
                field: "window_capacity",
                reason: "must hold at least 2 samples",
            });
        }
        if self.speed_buckets == 0 {
            return Err(ConfigError::Invalid {
                field: "speed_buckets",
                reason: "must be at least 1",
            });
        }
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "sample_interval_ms",
                reason: "must be at least 1",
            });
        }
        if self.sparkline_height == 0 {
            return Err(ConfigError::Invalid {
                field: "sparkline_height",
                reason: "must be at least 1",
            });
        }
        if self.fill_glyph.is_empty() {
            return Err(ConfigError::Invalid {
                field: "fill_glyph",
                reason: "must not be empty",
            });
        }
        if self.empty_glyph.is_empty() {
            return Err(ConfigError::Invalid {
                field: "empty_glyph",
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    /// The sampling interval as a [`Duration`].
    #[must_use]
    pub const fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    /// The glyph bar settings.
    #[must_use]
    pub fn bar_style(&self) -> BarStyle {
        BarStyle {
            width: self.bar_width,
            fill: self.fill_glyph.clone(),
            empty: self.empty_glyph.clone(),
        }
    }
}
