//! Compact rendering of second counts such as `1h01m01.00s`.

use std::fmt::Write as _;

use compact_str::CompactString;

/// Rendered in place of a duration that is non-finite, negative, or too wide.
pub const PLACEHOLDER: &str = "-";

/// Widest duration string that is still rendered verbatim.
pub const MAX_WIDTH: usize = 15;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;

/// Formats `total_secs` from the largest non-zero unit down to seconds.
///
/// Days, hours and minutes appear only once a unit at least as large is non-zero, and are
/// zero-padded after the first one (`1h00m05.00s`). Seconds are always present with two
/// decimals. Anything wider than [`MAX_WIDTH`] characters, including infinite or NaN
/// input, collapses to [`PLACEHOLDER`].
///
/// ```
/// use atomic_gauge::duration::format_duration;
///
/// assert_eq!(format_duration(65.0), "1m05.00s");
/// assert_eq!(format_duration(f64::INFINITY), "-");
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn format_duration(total_secs: f64) -> CompactString {
    // 100 days no longer fits in MAX_WIDTH; bail out before the casts below.
    if !total_secs.is_finite() || total_secs < 0.0 || total_secs >= 100.0 * DAY {
        return CompactString::const_new(PLACEHOLDER);
    }

    let days = (total_secs / DAY) as u64;
    let hours = ((total_secs % DAY) / HOUR) as u64;
    let minutes = ((total_secs % HOUR) / MINUTE) as u64;
    let seconds = total_secs % MINUTE;

    let mut out = CompactString::default();
    let mut started = false;
    // Writing into a CompactString cannot fail.
    let _ = write_unit(&mut out, days, 'd', &mut started);
    let _ = write_unit(&mut out, hours, 'h', &mut started);
    let _ = write_unit(&mut out, minutes, 'm', &mut started);
    let _ = if started {
        write!(out, "{seconds:05.2}s")
    } else {
        write!(out, "{seconds:.2}s")
    };

    if out.len() > MAX_WIDTH {
        return CompactString::const_new(PLACEHOLDER);
    }
    out
}

fn write_unit(out: &mut CompactString, value: u64, unit: char, started: &mut bool) -> std::fmt::Result {
    if *started {
        write!(out, "{value:02}{unit}")
    } else if value > 0 {
        *started = true;
        write!(out, "{value}{unit}")
    } else {
        Ok(())
    }
}
