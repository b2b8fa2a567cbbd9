//! `fd-engine` — the dashboard engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`engine`]    | `FlowEngine`, `EngineConfig`                        |
//! | [`scheduler`] | `AnimationScheduler` — frame pacing and playback    |
//! | [`observer`]  | `FlowObserver` trait, `Notice`, `NoopObserver`      |
//! | [`error`]     | `EngineError`, `EngineResult<T>`                    |
//!
//! # Control flow
//!
//! The host owns the loop: it forwards UI events to the engine's control
//! surface and calls [`FlowEngine::frame`] on every platform frame callback.
//! The engine decides which frames advance the animation, which repaint the
//! map, and when a new point batch is needed.

pub mod engine;
pub mod error;
pub mod observer;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use engine::{EngineConfig, FlowEngine};
pub use error::{EngineError, EngineResult};
pub use observer::{FlowObserver, NoopObserver, Notice};
pub use scheduler::{
    AnimationScheduler, FrameOutcome, PlaybackState, SPEED_MULTIPLIERS, SchedulerConfig,
};
