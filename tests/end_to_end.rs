//! Full runs: a producer thread advances the counter while the gauge loop renders it.

use std::{thread, time::Duration};

use atomic_gauge::{
    Field, GaugeBuilder, GaugeState, Progress, ProgressIteratorExt as _, Recipe,
    history::{EMPTY_CELL, MARKER},
};

const CLEAR_LINE: &str = "\x1b[2K\r";

#[test]
fn run_terminates_with_final_frame_and_sparkline() {
    let progress = Progress::new(10u64);
    let mut gauge = GaugeBuilder::new(&progress)
        .with_sample_interval(Duration::from_millis(5))
        .with_recipe(Recipe::from_static(&[
            Field::All,
            Field::ProgressBar,
            Field::ElapsedTime,
        ]))
        .build_with_writer(Vec::new())
        .unwrap();

    let producer = {
        let progress = progress.clone();
        thread::spawn(move || {
            for _ in 0..10 {
                thread::sleep(Duration::from_millis(15));
                progress.inc(1u64);
            }
        })
    };

    let elapsed = gauge.run().unwrap();
    producer.join().unwrap();

    assert_eq!(gauge.state(), GaugeState::Terminated);
    assert!(elapsed >= Duration::from_millis(100));
    assert_eq!(gauge.frame().unwrap().progress.current(), 10);

    let out = String::from_utf8(gauge.into_writer()).unwrap();
    let (frames, chart) = out.rsplit_once(CLEAR_LINE).unwrap();
    assert!(!frames.is_empty());

    // The last line drawn reflects the exact final value.
    let (last_line, chart) = chart.split_once('\n').unwrap();
    assert!(last_line.contains("[Progress: 10/10 Ticks]"));
    assert!(last_line.contains("100.00%"));
    assert!(last_line.contains("[Est.Remaining: 0.00s]"));

    // 15 rows, the baseline and the percentage axis.
    let lines: Vec<&str> = chart.lines().collect();
    assert_eq!(lines.len(), 17);
    assert!(lines[..15].iter().all(|row| row.starts_with("│ ")));
    assert!(lines[15].starts_with("└─"));
    assert!(lines[16].starts_with("  5 10"));
    assert!(lines[16].ends_with("100"));
    assert!(chart.contains(MARKER));
    assert!(chart.contains(EMPTY_CELL));
}

#[test]
fn empty_recipe_renders_empty_lines() {
    let progress = Progress::new(3u64);
    progress.set_pos(3u64);
    let mut gauge = GaugeBuilder::new(&progress)
        .with_recipe(Recipe::EMPTY)
        .with_sample_interval(Duration::from_millis(1))
        .with_sparkline_height(2)
        .with_speed_buckets(3)
        .build_with_writer(Vec::new())
        .unwrap();

    gauge.run().unwrap();

    let out = String::from_utf8(gauge.into_writer()).unwrap();
    assert!(out.starts_with(&format!("{CLEAR_LINE}{CLEAR_LINE}\n")));
    assert!(out.ends_with(" 33 66100\n"));
}

#[test]
fn iterator_producer_drives_gauge_to_completion() {
    let progress = Progress::new(20u64);
    let mut gauge = GaugeBuilder::new(&progress)
        .with_sample_interval(Duration::from_millis(2))
        .with_recipe(Recipe::from_static(&[Field::RawProgress]))
        .build_with_writer(Vec::new())
        .unwrap();

    let producer = {
        let progress = progress.clone();
        thread::spawn(move || {
            for _ in (0..20).progress_with(progress) {
                thread::sleep(Duration::from_millis(3));
            }
        })
    };

    gauge.run().unwrap();
    producer.join().unwrap();

    assert!(progress.is_finished());
    let history = gauge.history();
    assert_eq!(history.len(), 20);
    assert!(history.get(19).is_some(), "completion lands in the last bucket");
}
