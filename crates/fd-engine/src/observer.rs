//! Engine observer trait for data streaming and user-facing notices.

use fd_core::TimestampMs;
use fd_gen::FlowPoint;

use crate::PlaybackState;

/// A non-fatal condition worth telling the user about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Routing was unavailable; the batch on screen is synthesized.
    SimulatedData,
    /// The request produced no points (malformed city or time range).
    NoData,
}

/// Callbacks invoked by [`FlowEngine`][crate::FlowEngine] as data and
/// playback state change.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — batch size printer
///
/// ```rust,ignore
/// struct BatchPrinter;
///
/// impl FlowObserver for BatchPrinter {
///     fn on_batch(&mut self, points: &[FlowPoint], at: TimestampMs) {
///         println!("{at}: {} points", points.len());
///     }
/// }
/// ```
pub trait FlowObserver {
    /// A new point batch was generated (city, timestamp or range changed).
    fn on_batch(&mut self, _points: &[FlowPoint], _at: TimestampMs) {}

    /// The animation advanced one frame.  Points carry updated progress.
    fn on_frame(&mut self, _points: &[FlowPoint], _at: TimestampMs) {}

    /// A degradation notice the UI should surface.
    fn on_notice(&mut self, _notice: Notice) {}

    /// Playback state changed.
    fn on_playback(&mut self, _state: PlaybackState) {}
}

/// A [`FlowObserver`] that does nothing.  Use when driving the engine
/// without callbacks.
pub struct NoopObserver;

impl FlowObserver for NoopObserver {}
