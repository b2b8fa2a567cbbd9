//! The animated flow point.

use fd_core::{GeoPoint, MovementKind, PointId, RouteId};

/// One animated point travelling along a straight geographic segment.
///
/// `progress` is the normalized position on the segment, always in `[0, 1)`.
/// Crossing the end wraps back to exactly `0.0` so the point restarts its
/// segment rather than drifting past it.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowPoint {
    pub id: PointId,

    /// Segment start.
    pub position: GeoPoint,
    /// Segment end.
    pub next_position: GeoPoint,

    /// Travel direction in degrees, `[0, 360)`; drives marker rotation.
    pub bearing_deg: f64,

    /// Normalized position on the segment, `[0, 1)`.
    pub progress: f64,

    /// Route the segment came from; `RouteId::INVALID` for procedurally
    /// synthesized points.
    pub route: RouteId,

    /// Normalized speed scalar (see `fd-model`); always ≥ 0.
    pub speed: f64,

    /// Visualization weight feeding the density surface.
    pub intensity: f64,

    pub kind: MovementKind,
}

impl FlowPoint {
    /// Advance `progress` by `delta` (already scaled by speed, pace and
    /// elapsed time).  Negative deltas are clamped out: points never move
    /// backwards.
    pub fn advance(&mut self, delta: f64) {
        if delta <= 0.0 {
            return;
        }
        self.progress += delta;
        if self.progress >= 1.0 {
            // Wrap to exactly zero; carrying the fractional overshoot would
            // let a long frame gap teleport the point mid-segment.
            self.progress = 0.0;
        }
    }

    /// Current geographic position, interpolated along the segment.
    #[inline]
    pub fn interpolated_position(&self) -> GeoPoint {
        self.position.lerp(self.next_position, self.progress)
    }

    /// Segment length in metres.
    #[inline]
    pub fn segment_length_m(&self) -> f64 {
        self.position.distance_m(self.next_position)
    }
}
