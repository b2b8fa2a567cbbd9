//! `fd-gen` — flow point model and batch generation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                         |
//! |---------------|--------------------------------------------------|
//! | [`point`]     | `FlowPoint` — the animated unit                  |
//! | [`generator`] | `FlowGenerator`, `GeneratorConfig`               |
//!
//! # Failure policy
//!
//! Generation never returns an error.  Route trouble degrades to the
//! procedural fallback; malformed input degrades to an empty batch.  The
//! engine layer decides whether either degradation deserves a user-facing
//! notice.

pub mod generator;
pub mod point;


pub use generator::{FlowGenerator, GeneratorConfig};
pub use point::FlowPoint;
