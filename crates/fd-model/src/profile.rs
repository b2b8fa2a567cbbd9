//! Per-kind speed and intensity as a function of local time.
//!
//! Speeds are normalized animation units, not metres per second: they only
//! ever scale how fast `progress` advances along a segment, so the absolute
//! magnitude is a pacing choice.  Relative order is what matters
//! (pedestrian < bicycle < transit ≈ vehicle).

use fd_core::{DayPhase, EngineRng, LocalTime, MovementKind};

// ── Base speeds (normalized units) ────────────────────────────────────────────

const PEDESTRIAN_SPEED: f64 = 1.4;
const BICYCLE_SPEED: f64 = 4.0;
const TRANSIT_SPEED: f64 = 8.0;

/// Relative jitter applied to vehicle speeds (±20%).
const VEHICLE_JITTER: f64 = 0.2;

/// A flow point's modelled speed and visualization weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementProfile {
    /// Normalized speed scalar; scales progress advancement per tick.
    pub speed: f64,
    /// Visualization weight, ≥ 0; feeds the density surface.
    pub intensity: f64,
}

/// Compute the profile for one point.
///
/// `route_stats` is `(distance_m, duration_s)` of the route the point rides
/// on, when the external source provided one — vehicles derive their speed
/// from it.  All other kinds use the fixed base speeds.
pub fn movement_profile(
    kind:        MovementKind,
    local:       LocalTime,
    route_stats: Option<(f64, f64)>,
    rng:         &mut EngineRng,
) -> MovementProfile {
    let speed = match kind {
        MovementKind::Pedestrian => PEDESTRIAN_SPEED,
        MovementKind::Bicycle    => BICYCLE_SPEED,
        MovementKind::Transit    => TRANSIT_SPEED,
        MovementKind::Vehicle => {
            let base = route_stats
                .and_then(|(d, t)| vehicle_speed_from_route(d, t))
                .unwrap_or_else(|| vehicle_baseline(local));
            jitter(base, VEHICLE_JITTER, rng)
        }
    };

    MovementProfile {
        speed,
        intensity: intensity(kind, local),
    }
}

/// Normalized vehicle speed from a route's distance/duration.
///
/// Returns `None` for degenerate routes (non-positive duration or distance)
/// so the caller falls back to the time-adjusted baseline.
pub fn vehicle_speed_from_route(distance_m: f64, duration_s: f64) -> Option<f64> {
    if distance_m <= 0.0 || duration_s <= 0.0 {
        return None;
    }
    // m/s on real urban routes lands in the same 1–15 range as the
    // normalized base speeds, so no extra scaling is applied.
    Some(distance_m / duration_s)
}

/// Time-adjusted vehicle baseline: congestion slows the rush hours.
fn vehicle_baseline(local: LocalTime) -> f64 {
    match local.day_phase() {
        DayPhase::Rush    => 6.5,
        DayPhase::Midday  => 8.5,
        DayPhase::Evening => 9.0,
        DayPhase::Night   => 11.0,
    }
}

fn jitter(base: f64, relative: f64, rng: &mut EngineRng) -> f64 {
    base * rng.gen_range(1.0 - relative..=1.0 + relative)
}

// ── Intensity ─────────────────────────────────────────────────────────────────

/// Visualization intensity for one kind at one local time.
///
/// intensity = phase base × per-kind multiplier:
///
/// | Phase   | Weekday | Weekend |
/// |---------|---------|---------|
/// | Rush    | 0.9     | 0.7     |
/// | Midday  | 0.6     | 0.6     |
/// | Evening | 0.5     | 0.5     |
/// | Night   | 0.3     | 0.3     |
///
/// Multipliers: pedestrian ×1.3 on weekends or in daylight else ×0.7;
/// bicycle ×1.2 in daylight else ×0.4; transit ×1.0 while running
/// (06:00–21:59) else ×0.2; vehicle unmodified.
pub fn intensity(kind: MovementKind, local: LocalTime) -> f64 {
    let base = match local.day_phase() {
        DayPhase::Rush if local.is_weekend() => 0.7,
        DayPhase::Rush                       => 0.9,
        DayPhase::Midday                     => 0.6,
        DayPhase::Evening                    => 0.5,
        DayPhase::Night                      => 0.3,
    };

    let multiplier = match kind {
        MovementKind::Pedestrian => {
            if local.is_weekend() || local.is_daylight() { 1.3 } else { 0.7 }
        }
        MovementKind::Bicycle => {
            if local.is_daylight() { 1.2 } else { 0.4 }
        }
        MovementKind::Transit => {
            if (6..22).contains(&local.hour) { 1.0 } else { 0.2 }
        }
        MovementKind::Vehicle => 1.0,
    };

    base * multiplier
}

// ── Procedural factors ────────────────────────────────────────────────────────

/// Bulk intensity factor for procedurally synthesized batches.
///
/// Scales the whole batch rather than one point: rush hour on a weekday
/// produces visibly denser traffic (×1.8) than the same hour on a weekend
/// (×1.2), and the night map goes quiet (×0.6).
pub fn procedural_intensity_factor(local: LocalTime) -> f64 {
    match local.day_phase() {
        DayPhase::Rush if local.is_weekend() => 1.2,
        DayPhase::Rush                       => 1.8,
        DayPhase::Midday                     => 1.3,
        DayPhase::Evening                    => 1.4,
        DayPhase::Night                      => 0.6,
    }
}

/// Synthetic congestion: the denser the traffic, the slower it moves.
///
/// Inverse of [`procedural_intensity_factor`], clamped so night batches
/// don't race across the map.
pub fn congestion_speed_scale(local: LocalTime) -> f64 {
    (1.0 / procedural_intensity_factor(local)).clamp(0.5, 1.4)
}
