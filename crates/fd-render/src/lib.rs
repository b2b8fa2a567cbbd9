//! `fd-render` — the map-facing rendering layer.
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`map`]     | `MapProvider` trait, marker styling, heat options     |
//! | [`sampler`] | Zoom-driven LOD budget and stratified sampling        |
//! | [`density`] | `DensitySurface` aggregation for the heat layer       |
//! | [`hover`]   | R-tree hover index                                    |
//! | [`overlay`] | `FlowOverlay` — throttled, coalesced repainting       |
//!
//! Nothing here owns a real map widget.  The overlay drives any
//! [`MapProvider`] implementation; tests use a recording double.

pub mod density;
pub mod hover;
pub mod map;
pub mod overlay;
pub mod sampler;


pub use density::{DensitySurface, WeightedPoint, aggregate};
pub use hover::{HoverIndex, HoverInfo};
pub use map::{
    Color, HeatLayerOptions, MapProvider, MarkerHandle, MarkerShape, MarkerStyle, PixelPoint,
    PolylineHandle, kind_color, kind_shape, marker_style,
};
pub use overlay::{FlowOverlay, OverlayConfig};
pub use sampler::{KIND_FLOOR, lod_limit, sample_for_zoom};
