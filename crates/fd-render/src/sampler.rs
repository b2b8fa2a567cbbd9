//! Zoom-driven level-of-detail sampling.
//!
//! Zoomed-out views cannot usefully show thousands of markers, so the
//! overlay renders a zoom-dependent subset.  Sampling is stratified by
//! movement kind: even at the lowest zoom every kind present in the batch
//! stays visible.

use fd_gen::FlowPoint;

/// Minimum markers kept per movement kind (when that many exist).
pub const KIND_FLOOR: usize = 10;

/// Marker budget for a zoom level.  Monotone non-decreasing in zoom.
pub fn lod_limit(zoom: u8) -> usize {
    match zoom {
        0..=7   => 100,
        8..=9   => 250,
        10..=11 => 500,
        12..=13 => 1_000,
        14..=15 => 2_000,
        16..=17 => 3_000,
        18..=19 => 4_000,
        _       => 5_000,
    }
}

/// Select the subset of `points` to render at `zoom`.
///
/// Under the budget, everything renders.  Over it, [`KIND_FLOOR`] slots per
/// present kind come off the top of the budget and only the remainder is
/// split proportionally by population, so the output never exceeds
/// `lod_limit(zoom)` and never drops a kind that was present.  Members are
/// taken at a fixed stride so the selection spreads across the batch (and
/// thus across routes) instead of clustering at its head.
pub fn sample_for_zoom(points: &[FlowPoint], zoom: u8) -> Vec<FlowPoint> {
    let limit = lod_limit(zoom);
    if points.len() <= limit {
        return points.to_vec();
    }

    let mut buckets: [Vec<usize>; 4] = Default::default();
    for (i, p) in points.iter().enumerate() {
        buckets[p.kind.index()].push(i);
    }

    let total = points.len();
    let reserved: usize = buckets.iter().map(|b| KIND_FLOOR.min(b.len())).sum();
    let spare = limit.saturating_sub(reserved);

    let mut selected: Vec<usize> = Vec::with_capacity(limit);

    for bucket in &buckets {
        if bucket.is_empty() {
            continue;
        }
        let floor = KIND_FLOOR.min(bucket.len());
        let quota = (floor + spare * bucket.len() / total).min(bucket.len());

        let stride = bucket.len() as f64 / quota as f64;
        for j in 0..quota {
            selected.push(bucket[(j as f64 * stride) as usize]);
        }
    }

    // Restore batch order so route grouping survives sampling.
    selected.sort_unstable();
    selected.into_iter().map(|i| points[i].clone()).collect()
}
