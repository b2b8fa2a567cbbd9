//! `fd-model` — the movement-type classifier and speed/intensity model.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`profile`]    | `MovementProfile`, speed/intensity tables               |
//! | [`classifier`] | `spawn_kinds` — which kinds appear on a route segment   |
//!
//! # Determinism
//!
//! Everything here is a pure function of `(MovementKind, LocalTime)` except
//! the explicitly-randomized sites (±20% vehicle jitter, spawn rolls), which
//! take `&mut EngineRng` so tests pin a seed and get exact outputs.
//!
//! The numbers are hand-tuned for visual plausibility, not measured from the
//! real world; treat them as defaults and override per instance where the
//! generator exposes a knob.

pub mod classifier;
pub mod profile;


pub use classifier::spawn_kinds;
pub use profile::{
    MovementProfile, congestion_speed_scale, intensity, movement_profile,
    procedural_intensity_factor, vehicle_speed_from_route,
};
