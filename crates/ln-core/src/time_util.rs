//! Time rendering for log lines.
//!
//! Provides the elapsed-time bucket printed between two consecutive file
//! records and the human-readable wall-clock stamp that leads each line.

use chrono::{DateTime, Local};

const MS_PER_SEC: u64 = 1_000;
const SECS_PER_MIN: u64 = 60;
const MINS_PER_HOUR: u64 = 60;
const HOURS_PER_DAY: u64 = 24;

/// US medium date-time style, e.g. `Aug 21, 2012 2:16:05 PM`.
pub const DATE_TIME_FORMAT: &str = "%b %-d, %Y %-I:%M:%S %p";

// ---------------------------------------------------------------------------
// Elapsed buckets
// ---------------------------------------------------------------------------

/// Render a millisecond delta as a fixed-width bracketed bucket.
///
/// Only the coarsest non-zero unit is printed; the first match wins in the
/// order days, hours, minutes, seconds, milliseconds:
///
/// | input        | output      |
/// |--------------|-------------|
/// | `3`          | `(  3ms)`   |
/// | `2_500`      | `( 2sec)`   |
/// | `65_000`     | `( 1min)`   |
/// | `3_661_000`  | `( 1hrs)`   |
/// | `90_000_000` | `(   1d)`   |
///
/// All buckets are seven characters wide for deltas below 1000 days.
pub fn format_elapsed(ms: u64) -> String {
    let total_secs = ms / MS_PER_SEC;
    let millis = ms % MS_PER_SEC;
    let total_mins = total_secs / SECS_PER_MIN;
    let secs = total_secs % SECS_PER_MIN;
    let total_hours = total_mins / MINS_PER_HOUR;
    let mins = total_mins % MINS_PER_HOUR;
    let days = total_hours / HOURS_PER_DAY;
    let hours = total_hours % HOURS_PER_DAY;

    if days > 0 {
        format!("( {days:>3}d)")
    } else if hours > 0 {
        format!("({hours:>2}hrs)")
    } else if mins > 0 {
        format!("({mins:>2}min)")
    } else if secs > 0 {
        format!("({secs:>2}sec)")
    } else {
        format!("({millis:>3}ms)")
    }
}

/// Milliseconds from `prev` to `now`, clamped at zero if the wall clock
/// stepped backwards in between.
#[inline]
pub fn elapsed_ms(prev: DateTime<Local>, now: DateTime<Local>) -> u64 {
    u64::try_from((now - prev).num_milliseconds()).unwrap_or(0)
}

/// Wall-clock stamp leading every file sink line.
#[inline]
pub fn format_date_time(ts: DateTime<Local>) -> String {
    ts.format(DATE_TIME_FORMAT).to_string()
}
