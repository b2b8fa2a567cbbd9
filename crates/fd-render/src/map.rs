//! The pluggable map surface.
//!
//! The engine never talks to a concrete map widget.  Everything it needs —
//! panning, projection, markers, polylines, one heat layer — goes through
//! [`MapProvider`], so a deployment binds whatever map stack it ships with
//! and tests bind a recording double.

use fd_core::{GeoPoint, MovementKind};

use crate::DensitySurface;

// ── Primitives ────────────────────────────────────────────────────────────────

/// A screen-space position in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Opaque handle to a drawn marker; only meaningful to the provider that
/// issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Opaque handle to a drawn polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolylineHandle(pub u64);

// ── Marker styling ────────────────────────────────────────────────────────────

/// Marker silhouette, one per movement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
    Triangle,
    Diamond,
}

/// Everything a provider needs to draw one flow marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub color: Color,
    /// Diameter in logical pixels.
    pub size_px: f64,
    /// Clockwise from north; matches the point's travel bearing.
    pub rotation_deg: f64,
}

const MARKER_BASE_PX: f64 = 6.0;
const MARKER_SCALE_PX: f64 = 6.0;

/// Per-kind marker palette.
pub fn kind_color(kind: MovementKind) -> Color {
    match kind {
        MovementKind::Pedestrian => Color::rgb(0x2e, 0xa0, 0x43),
        MovementKind::Vehicle    => Color::rgb(0x2a, 0x6f, 0xdb),
        MovementKind::Transit    => Color::rgb(0xe8, 0x8a, 0x1a),
        MovementKind::Bicycle    => Color::rgb(0x8e, 0x44, 0xad),
    }
}

/// Per-kind marker silhouette.
pub fn kind_shape(kind: MovementKind) -> MarkerShape {
    match kind {
        MovementKind::Pedestrian => MarkerShape::Circle,
        MovementKind::Vehicle    => MarkerShape::Triangle,
        MovementKind::Transit    => MarkerShape::Square,
        MovementKind::Bicycle    => MarkerShape::Diamond,
    }
}

/// Style for one point: shape and color follow the kind, size follows
/// intensity, rotation follows the travel bearing.
pub fn marker_style(kind: MovementKind, intensity: f64, bearing_deg: f64) -> MarkerStyle {
    MarkerStyle {
        shape:        kind_shape(kind),
        color:        kind_color(kind),
        size_px:      MARKER_BASE_PX + MARKER_SCALE_PX * intensity.clamp(0.0, 1.5),
        rotation_deg: bearing_deg.rem_euclid(360.0),
    }
}

// ── Heat layer options ────────────────────────────────────────────────────────

/// Heat-layer rendering parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatLayerOptions {
    /// Blur radius in logical pixels.
    pub radius_px: f64,
    pub opacity: f64,
    /// Gradient stops: `(normalized weight, color)`, ascending.
    pub gradient: Vec<(f64, Color)>,
}

impl Default for HeatLayerOptions {
    fn default() -> Self {
        Self {
            radius_px: 25.0,
            opacity:   0.6,
            gradient:  vec![
                (0.2, Color::rgb(0x2a, 0x6f, 0xdb)),
                (0.5, Color::rgb(0x2e, 0xa0, 0x43)),
                (0.8, Color::rgb(0xe8, 0x8a, 0x1a)),
                (1.0, Color::rgb(0xd6, 0x2c, 0x2c)),
            ],
        }
    }
}

// ── MapProvider trait ─────────────────────────────────────────────────────────

/// The map surface the overlay draws onto.
///
/// `project_to_pixel` returns `None` for positions outside the current
/// viewport or while the map is mid-relayout; the overlay skips those
/// markers for the frame rather than drawing them at a stale position.
pub trait MapProvider {
    fn pan_to(&mut self, center: GeoPoint);

    fn set_zoom(&mut self, zoom: u8);

    fn project_to_pixel(&self, position: GeoPoint) -> Option<PixelPoint>;

    fn draw_heat_layer(&mut self, surface: &DensitySurface, options: &HeatLayerOptions);

    /// Update the heat layer in place; a no-op if none is drawn.
    fn update_heat_layer(&mut self, surface: &DensitySurface);

    fn remove_heat_layer(&mut self);

    fn draw_marker(&mut self, position: GeoPoint, style: &MarkerStyle) -> MarkerHandle;

    fn remove_marker(&mut self, handle: MarkerHandle);

    fn draw_polyline(&mut self, path: &[GeoPoint], color: Color, width_px: f64)
    -> PolylineHandle;

    fn remove_polyline(&mut self, handle: PolylineHandle);
}
