//! # `atomic_gauge`
//!
//! A single-line terminal progress gauge for work happening on another thread.
//!
//! A producer advances a shared atomic counter towards a known target; the gauge samples it
//! on a fixed interval and redraws one line in place. It is designed to be:
//!
//! * **Windowed**: throughput and ETA come from a fixed-capacity ring of recent samples, not
//!   from the average since start, so they follow rate changes.
//! * **Composable**: the line is an ordered [`Recipe`] of [`Field`]s chosen once at build
//!   time, dispatched through a closed enum without allocation per frame.
//! * **Total**: zero elapsed time, zero rate or a zero target never panic; they render as a
//!   bounded placeholder.
//!
//! When the target is reached the gauge prints a sparkline of the rate observed across the
//! run.
//!
//! ```no_run
//! use std::{thread, time::Duration};
//!
//! use atomic_gauge::{GaugeBuilder, Progress};
//!
//! let progress = Progress::new(100u64);
//! let worker = {
//!     let progress = progress.clone();
//!     thread::spawn(move || {
//!         for _ in 0..100 {
//!             thread::sleep(Duration::from_millis(20));
//!             progress.inc(1u64);
//!         }
//!     })
//! };
//!
//! GaugeBuilder::new(&progress).build()?.run()?;
//! worker.join().unwrap();
//! # Ok::<(), atomic_gauge::GaugeError>(())
//! ```
//!
//! ## Modules
//!
//! * [`progress`]: The shared counters ([`Progress`]) and their read-only [`ProgressView`].
//! * [`window`]: The fixed-capacity sample ring.
//! * [`estimate`]: Windowed rate and ETA.
//! * [`duration`]: Compact duration strings.
//! * [`field`]: The display fields.
//! * [`recipe`]: Ordered field selection.
//! * [`history`]: Per-bucket speed history and sparkline.
//! * [`gauge`]: The render loop state machine.
//! * [`builder`]: Fluent interface for constructing a [`Gauge`].
//! * [`config`]: TOML-loadable settings.
//! * [`iter`]: Iterator adapters for producers.
//! * [`logging`]: Subscriber setup for binaries.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod builder;
pub mod config;
pub mod duration;
pub mod error;
pub mod estimate;
pub mod field;
pub mod gauge;
pub mod history;
pub mod iter;
pub mod logging;
pub mod progress;
pub mod recipe;
pub mod window;

pub use builder::GaugeBuilder;
pub use config::GaugeConfig;
pub use error::{ConfigError, GaugeError, UnknownField};
pub use estimate::Estimate;
pub use field::{BarStyle, Field, Frame};
pub use gauge::{Gauge, GaugeState};
pub use history::SpeedHistory;
pub use iter::{ProgressIter, ProgressIteratorExt};
pub use progress::{Progress, ProgressSnapshot, ProgressView};
pub use recipe::Recipe;
pub use window::{Sample, SlidingWindow};
