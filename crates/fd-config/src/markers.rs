//! Timeline markers.
//!
//! Markers are display-only data for the scrub bar: one `(timestamp, label)`
//! pair per granularity step across the selected range, ending at the live
//! edge.  They are regenerated wholesale whenever the range or the city's
//! UTC offset changes — there is nothing to patch incrementally.

use fd_core::TimestampMs;

use crate::TimeRangeConfig;

/// One tick mark on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeMarker {
    pub timestamp: TimestampMs,
    /// City-local "Mon 08:30"-style label.
    pub label: String,
}

/// Generate markers for `range`, ending at `live_edge`, labelled in the
/// city-local clock given by `utc_offset_minutes`.
///
/// Markers are ordered oldest → newest and include both endpoints.  An
/// invalid range yields an empty vector.
pub fn time_markers(
    range: &TimeRangeConfig,
    live_edge: TimestampMs,
    utc_offset_minutes: i32,
) -> Vec<TimeMarker> {
    if !range.is_valid() {
        return vec![];
    }

    let step_ms = range.granularity_minutes as i64 * 60_000;
    let start = live_edge.offset_ms(-range.span_ms());

    let mut markers = Vec::with_capacity((range.span_ms() / step_ms + 1) as usize);
    let mut ts = start;
    while ts <= live_edge {
        let local = ts.local(utc_offset_minutes);
        markers.push(TimeMarker {
            timestamp: ts,
            label:     local.to_string(),
        });
        ts = ts.offset_ms(step_ms);
    }
    markers
}
