//! Nearest-point hover lookup.
//!
//! Pointer queries arrive per mouse move, so a linear scan over thousands
//! of points is the wrong shape.  The overlay rebuilds a small R-tree on
//! every redraw and answers hovers from it.

use fd_core::{GeoPoint, MovementKind, PointId};
use fd_gen::FlowPoint;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// What the tooltip shows for a hovered point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverInfo {
    pub id: PointId,
    pub kind: MovementKind,
    pub intensity: f64,
    pub speed: f64,
    pub position: GeoPoint,
}

#[derive(Debug, Clone)]
struct HoverEntry {
    // [lon, lat] to match the tree's x/y convention.
    loc: [f64; 2],
    info: HoverInfo,
}

impl RTreeObject for HoverEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.loc)
    }
}

impl PointDistance for HoverEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.loc[0] - point[0];
        let dy = self.loc[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over the currently rendered points.
#[derive(Default)]
pub struct HoverIndex {
    tree: RTree<HoverEntry>,
}

impl HoverIndex {
    /// Replace the index contents with the given points (at their current
    /// interpolated positions).
    pub fn rebuild(&mut self, points: &[FlowPoint]) {
        let entries = points
            .iter()
            .map(|p| {
                let position = p.interpolated_position();
                HoverEntry {
                    loc: [position.lon, position.lat],
                    info: HoverInfo {
                        id: p.id,
                        kind: p.kind,
                        intensity: p.intensity,
                        speed: p.speed,
                        position,
                    },
                }
            })
            .collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// The nearest point within `max_distance_m` of `cursor`, if any.
    ///
    /// The tree search is planar in degrees (fine at hover scale); the
    /// radius check uses real metres so the threshold means the same thing
    /// at every latitude the dashboard ships.
    pub fn query(&self, cursor: GeoPoint, max_distance_m: f64) -> Option<HoverInfo> {
        let nearest = self.tree.nearest_neighbor(&[cursor.lon, cursor.lat])?;
        if nearest.info.position.distance_m(cursor) <= max_distance_m {
            Some(nearest.info)
        } else {
            None
        }
    }
}
