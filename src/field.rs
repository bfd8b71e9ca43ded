//! The closed set of display fields a progress line is built from.
//!
//! Every [`Field`] renders itself from the same read-only [`Frame`] by appending to a
//! shared line buffer. Fields never look at each other and have no side effects besides
//! formatting, so any order (or repetition) of them produces a well-formed line.
//!
//! | field             | output                                  |
//! |-------------------|-----------------------------------------|
//! | `ElapsedTime`     | `[Elapsed: 1m05.00s]`                   |
//! | `RawProgress`     | `[Progress: 30/120 Ticks]`              |
//! | `ProgressBar`     | `|████――――|`                            |
//! | `Percentage`      | `25.00%`                                |
//! | `EstimatedTime`   | `[Est.Remaining: 3.00s]`                |
//! | `Speed`           | `[Speed: 30.00 Tick/s]`                 |
//! | `All`             | all of the above, in that order         |

use std::{
    fmt::{self, Write as _},
    str::FromStr,
    time::Duration,
};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::{
    duration::{PLACEHOLDER, format_duration},
    error::UnknownField,
    estimate::Estimate,
    progress::ProgressSnapshot,
};

/// Everything a field may read while rendering one line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Counters sampled for this frame.
    pub progress: ProgressSnapshot,
    /// Time since the gauge started.
    pub elapsed: Duration,
    /// Windowed rate and ETA.
    pub estimate: Estimate,
}

impl Frame {
    /// Number of filled cells in a bar `width` cells wide, clamped to `[0, width]`.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn filled_cells(&self, width: usize) -> usize {
        let (current, target) = (self.progress.current(), self.progress.target());
        if target == 0 {
            return 0;
        }
        let filled = u128::from(current) * width as u128 / u128::from(target);
        filled.min(width as u128) as usize
    }
}

/// Glyph bar appearance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarStyle {
    /// Number of cells between the two `|` delimiters.
    pub width: usize,
    /// Glyph for completed cells.
    pub fill: CompactString,
    /// Glyph for remaining cells.
    pub empty: CompactString,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            width: 50,
            fill: CompactString::const_new("█"),
            empty: CompactString::const_new("―"),
        }
    }
}

/// One kind of display field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Time since start.
    ElapsedTime,
    /// `current/target` counts.
    RawProgress,
    /// Fixed-width glyph bar.
    ProgressBar,
    /// Completion percentage with two decimals.
    Percentage,
    /// Estimated remaining time.
    EstimatedTime,
    /// Windowed rate.
    Speed,
    /// Every other field in canonical order.
    All,
}

impl Field {
    /// The order in which [`Field::All`] renders the individual fields.
    pub const CANONICAL: [Self; 6] = [
        Self::ElapsedTime,
        Self::RawProgress,
        Self::ProgressBar,
        Self::Percentage,
        Self::EstimatedTime,
        Self::Speed,
    ];

    /// The configuration name of this field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ElapsedTime => "elapsed_time",
            Self::RawProgress => "raw_progress",
            Self::ProgressBar => "progress_bar",
            Self::Percentage => "percentage",
            Self::EstimatedTime => "estimated_time",
            Self::Speed => "speed",
            Self::All => "all",
        }
    }

    /// Appends this field's rendering of `frame` to `out`.
    ///
    /// # Errors
    ///
    /// Only propagates errors of the underlying [`fmt::Write`] sink.
    pub fn render<W: fmt::Write>(self, frame: &Frame, style: &BarStyle, out: &mut W) -> fmt::Result {
        match self {
            Self::ElapsedTime => write!(
                out,
                "[Elapsed: {}]",
                format_duration(frame.elapsed.as_secs_f64())
            ),
            Self::RawProgress => write!(
                out,
                "[Progress: {}/{} Ticks]",
                frame.progress.current(),
                frame.progress.target()
            ),
            Self::ProgressBar => {
                let filled = frame.filled_cells(style.width);
                out.write_char('|')?;
                for _ in 0..filled {
                    out.write_str(&style.fill)?;
                }
                for _ in filled..style.width {
                    out.write_str(&style.empty)?;
                }
                out.write_char('|')
            }
            Self::Percentage => write!(out, "{:.2}%", frame.progress.percent()),
            Self::EstimatedTime => write!(
                out,
                "[Est.Remaining: {}]",
                format_duration(frame.estimate.eta_secs)
            ),
            Self::Speed => {
                let rate = frame.estimate.rate;
                if rate.is_finite() {
                    write!(out, "[Speed: {rate:.2} Tick/s]")
                } else {
                    write!(out, "[Speed: {PLACEHOLDER} Tick/s]")
                }
            }
            Self::All => {
                for field in Self::CANONICAL {
                    field.render(frame, style, out)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts the snake_case configuration names as well as kebab-case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::CANONICAL
            .into_iter()
            .chain([Self::All])
            .find(|field| field.name() == normalized)
            .ok_or_else(|| UnknownField(s.into()))
    }
}
