//! Intensity aggregation for the heat layer.

use fd_core::GeoPoint;
use fd_gen::FlowPoint;

/// One heat-layer sample: where, and how hot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPoint {
    pub position: GeoPoint,
    pub weight: f64,
}

/// The full heat-layer input for one frame.
///
/// Replaced wholesale on every aggregation — the surface never accumulates
/// across frames, so a shrinking batch shrinks the heat map with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DensitySurface {
    pub samples: Vec<WeightedPoint>,
}

impl DensitySurface {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Largest sample weight, or 0 for an empty surface.  Providers use it
    /// to normalize the gradient.
    pub fn max_weight(&self) -> f64 {
        self.samples.iter().map(|s| s.weight).fold(0.0, f64::max)
    }
}

/// Aggregate the current point batch into a fresh density surface.
///
/// Positions are the points' interpolated positions, so the heat map moves
/// with the animation.  An empty batch yields an empty surface.
pub fn aggregate(points: &[FlowPoint]) -> DensitySurface {
    DensitySurface {
        samples: points
            .iter()
            .map(|p| WeightedPoint {
                position: p.interpolated_position(),
                weight: p.intensity.max(0.0),
            })
            .collect(),
    }
}
