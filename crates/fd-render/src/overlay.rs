//! The flow overlay: owns what is currently drawn on the map.
//!
//! Redraws are throttled and coalesced: point updates mark the overlay
//! dirty, and [`FlowOverlay::flush`] repaints at most once per
//! `min_redraw_gap` no matter how many updates landed in between.  A frame
//! skipped by the throttle is not lost — the dirty flag survives until a
//! later flush succeeds.

use std::time::{Duration, Instant};

use fd_core::GeoPoint;
use fd_gen::FlowPoint;

use crate::density::aggregate;
use crate::hover::{HoverIndex, HoverInfo};
use crate::map::{HeatLayerOptions, MapProvider, MarkerHandle, marker_style};
use crate::sampler::sample_for_zoom;

/// Hover hit radius in metres.
const HOVER_RADIUS_M: f64 = 50.0;

/// Overlay tuning.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Minimum spacing between repaints (~10 Hz by default).
    pub min_redraw_gap: Duration,
    pub heat: HeatLayerOptions,
    pub heat_enabled: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            min_redraw_gap: Duration::from_millis(100),
            heat:           HeatLayerOptions::default(),
            heat_enabled:   true,
        }
    }
}

/// Owns the rendered state: current points, drawn marker handles, the heat
/// layer, and the hover index.
pub struct FlowOverlay {
    config: OverlayConfig,
    points: Vec<FlowPoint>,
    zoom: u8,
    markers: Vec<MarkerHandle>,
    heat_drawn: bool,
    hover: HoverIndex,
    last_draw: Option<Instant>,
    dirty: bool,
}

impl FlowOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            points:     vec![],
            zoom:       12,
            markers:    vec![],
            heat_drawn: false,
            hover:      HoverIndex::default(),
            last_draw:  None,
            dirty:      false,
        }
    }

    /// Replace the point batch and mark the overlay dirty.  Nothing is
    /// drawn until the next [`flush`](Self::flush).
    pub fn update_points(&mut self, points: Vec<FlowPoint>) {
        self.points = points;
        self.dirty = true;
    }

    /// Change the zoom the LOD sampler works against.
    pub fn set_zoom(&mut self, zoom: u8) {
        if self.zoom != zoom {
            self.zoom = zoom;
            self.dirty = true;
        }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Number of points currently held (pre-sampling).
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Repaint if dirty and the redraw gap has elapsed.  Returns whether a
    /// repaint happened.
    ///
    /// When the gap has not elapsed the overlay stays dirty, so back-to-back
    /// updates coalesce into the next allowed repaint.
    pub fn flush(&mut self, now: Instant, map: &mut dyn MapProvider) -> bool {
        if !self.dirty {
            return false;
        }
        if let Some(last) = self.last_draw {
            if now.duration_since(last) < self.config.min_redraw_gap {
                return false;
            }
        }

        self.redraw(map);
        self.last_draw = Some(now);
        self.dirty = false;
        true
    }

    /// Remove everything the overlay has drawn and forget its points.
    pub fn clear(&mut self, map: &mut dyn MapProvider) {
        for handle in self.markers.drain(..) {
            map.remove_marker(handle);
        }
        if self.heat_drawn {
            map.remove_heat_layer();
            self.heat_drawn = false;
        }
        self.points.clear();
        self.hover.clear();
        self.dirty = false;
    }

    /// Answer a pointer-move with the nearest rendered point, if one is
    /// within hover range.
    pub fn on_pointer_move(&self, cursor: GeoPoint) -> Option<HoverInfo> {
        self.hover.query(cursor, HOVER_RADIUS_M)
    }

    fn redraw(&mut self, map: &mut dyn MapProvider) {
        for handle in self.markers.drain(..) {
            map.remove_marker(handle);
        }

        let sampled = sample_for_zoom(&self.points, self.zoom);

        for point in &sampled {
            let position = point.interpolated_position();
            // A point the map cannot project (off-viewport, mid-relayout)
            // is skipped for this frame, not drawn stale.
            if map.project_to_pixel(position).is_none() {
                continue;
            }
            let style = marker_style(point.kind, point.intensity, point.bearing_deg);
            self.markers.push(map.draw_marker(position, &style));
        }

        if self.config.heat_enabled {
            let surface = aggregate(&sampled);
            if surface.is_empty() {
                if self.heat_drawn {
                    map.remove_heat_layer();
                    self.heat_drawn = false;
                }
            } else if self.heat_drawn {
                map.update_heat_layer(&surface);
            } else {
                map.draw_heat_layer(&surface, &self.config.heat);
                self.heat_drawn = true;
            }
        }

        self.hover.rebuild(&sampled);
        log::trace!("overlay redraw: {} markers at zoom {}", self.markers.len(), self.zoom);
    }
}

impl Default for FlowOverlay {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}
