//! Error types.
//!
//! Degenerate arithmetic (zero elapsed time, zero rate, zero target) is not an error: it is
//! resolved to sentinel values and rendered as a placeholder. The variants here cover the
//! remaining failure modes: unusable configuration, misuse of the gauge state machine, and
//! a failing output sink.

use std::{fmt, io, path::PathBuf};

use compact_str::CompactString;
use thiserror::Error;

use crate::gauge::GaugeState;

/// Errors raised while loading or validating a [`GaugeConfig`](crate::GaugeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The configuration is not valid TOML or has mistyped keys.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its accepted range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// What the key must satisfy.
        reason: &'static str,
    },
}

/// A display field name that does not match any known [`Field`](crate::Field).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown display field `{0}`")]
pub struct UnknownField(pub CompactString);

/// Errors raised by the [`Gauge`](crate::Gauge) render loop.
#[derive(Debug, Error)]
pub enum GaugeError {
    /// Writing to the output sink failed.
    #[error("failed to write progress output: {0}")]
    Io(#[from] io::Error),

    /// A field failed to format into the line buffer.
    #[error("failed to format progress line")]
    Format(#[from] fmt::Error),

    /// `start` was called on a gauge that already left the idle state.
    #[error("gauge was already started")]
    AlreadyStarted,

    /// A frame was requested while the gauge was not running.
    #[error("gauge is {state}, expected running")]
    NotRunning {
        /// State the gauge was in.
        state: GaugeState,
    },

    /// The builder received an invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
