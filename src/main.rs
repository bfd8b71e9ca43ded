//! Demo: a worker thread ticks towards a target while the gauge renders it.

use std::{path::PathBuf, process::ExitCode, thread, time::Duration};

use atomic_gauge::{
    Field, GaugeBuilder, GaugeConfig, GaugeError, Progress, ProgressIteratorExt as _, Recipe,
    logging,
};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "atomic-gauge-demo", version, about = "Render a progress gauge for a simulated workload")]
struct Args {
    /// Number of ticks the worker performs.
    #[arg(long, default_value_t = 200)]
    work: u64,

    /// Delay between two ticks, in milliseconds.
    #[arg(long, default_value_t = 25)]
    step_ms: u64,

    /// TOML file with gauge settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display field to render (repeatable, in order). Overrides the config recipe.
    #[arg(long = "field", value_name = "NAME")]
    fields: Vec<Field>,
}

fn main() -> ExitCode {
    logging::init_logging();
    let args = Args::parse();

    match run(&args) {
        Ok(elapsed) => {
            tracing::info!(?elapsed, "demo finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("atomic-gauge-demo: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Duration, GaugeError> {
    let mut config = match &args.config {
        Some(path) => GaugeConfig::load(path)?,
        None => GaugeConfig::default(),
    };
    if !args.fields.is_empty() {
        config.recipe = args.fields.iter().copied().collect::<Recipe>();
    }

    let progress = Progress::new(args.work);
    let mut gauge = GaugeBuilder::new(&progress).with_config(config).build()?;

    // Front-loaded workload: each step is a bit slower than the one before, so the
    // sparkline shows the rate decaying over the run.
    let step = Duration::from_millis(args.step_ms);
    let work = args.work;
    let worker = thread::spawn(move || {
        for i in (0..work).progress_with(progress) {
            let slowdown = 1.0 + i as f64 / work.max(1) as f64;
            thread::sleep(step.mul_f64(slowdown));
        }
    });

    let elapsed = gauge.run()?;
    if worker.join().is_err() {
        tracing::warn!("worker thread panicked");
    }
    Ok(elapsed)
}
