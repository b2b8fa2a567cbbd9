//! Playback state and animation frame pacing.
//!
//! The host hands the scheduler a stream of frame callbacks (at whatever
//! rate the platform delivers); the scheduler decides which of them become
//! animation advances.  Frames arriving faster than the minimum gap are
//! dropped, not queued — a stall is followed by one catch-up advance, never
//! a burst.

use std::time::{Duration, Instant};

/// The playback speeds the UI offers.  Anything else is rejected.
pub const SPEED_MULTIPLIERS: [f64; 5] = [0.5, 1.0, 2.0, 4.0, 5.0];

/// Where playback currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not animating; points hold their positions.
    Idle,
    /// Advancing on each accepted frame.
    Running,
    /// Just stopped; further stops are ignored until the re-arm delay
    /// elapses, after which the scheduler settles into [`Idle`](Self::Idle).
    Restarting,
}

/// What one frame callback should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Nothing this frame (idle, throttled, or inside the stop window).
    Skip,
    /// Advance the animation by this much already-speed-scaled time.
    Advance(Duration),
    /// The stop re-arm window closed; playback is now idle until an
    /// explicit start.
    Stopped,
}

/// Scheduler tuning.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// Minimum spacing between accepted animation frames.
    pub min_frame_gap: Duration,
    /// Window after a stop during which further stops are no-ops.
    pub restart_delay: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_frame_gap: Duration::from_millis(50),
            restart_delay: Duration::from_millis(300),
        }
    }
}

/// Frame pacing and playback state machine.
///
/// Time is injected: every transition takes `now`, so tests fabricate
/// instants instead of sleeping.
#[derive(Debug)]
pub struct AnimationScheduler {
    config: SchedulerConfig,
    state: PlaybackState,
    last_frame: Option<Instant>,
    resume_at: Option<Instant>,
    speed_multiplier: f64,
}

impl AnimationScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            state: PlaybackState::Idle,
            last_frame: None,
            resume_at: None,
            speed_multiplier: 1.0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Begin (or resume) playback.  The elapsed-time baseline resets to
    /// `now` so a long pause does not turn into a giant first advance.
    pub fn start(&mut self, now: Instant) {
        self.state = PlaybackState::Running;
        self.last_frame = Some(now);
        self.resume_at = None;
    }

    /// Halt playback, keeping point positions where they are.
    pub fn pause(&mut self) {
        self.state = PlaybackState::Idle;
        self.resume_at = None;
    }

    /// Stop playback.  Returns whether the stop took effect: a second stop
    /// inside the re-arm window is a no-op (it neither extends nor resets
    /// the window) and returns `false`.  Resuming takes an explicit
    /// [`start`](Self::start).
    pub fn stop(&mut self, now: Instant) -> bool {
        if self.state == PlaybackState::Restarting
            && self.resume_at.is_some_and(|at| now < at)
        {
            return false;
        }
        self.state = PlaybackState::Restarting;
        self.resume_at = Some(now + self.config.restart_delay);
        true
    }

    /// Set the playback speed.  Only values in [`SPEED_MULTIPLIERS`] are
    /// accepted; the speed applies from the next accepted frame.
    pub fn set_speed_multiplier(&mut self, multiplier: f64) -> bool {
        if SPEED_MULTIPLIERS.contains(&multiplier) {
            self.speed_multiplier = multiplier;
            true
        } else {
            false
        }
    }

    /// Process one frame callback at `now`.
    pub fn frame(&mut self, now: Instant) -> FrameOutcome {
        match self.state {
            PlaybackState::Idle => FrameOutcome::Skip,

            PlaybackState::Restarting => {
                match self.resume_at {
                    Some(at) if now >= at => {
                        self.state = PlaybackState::Idle;
                        self.resume_at = None;
                        FrameOutcome::Stopped
                    }
                    _ => FrameOutcome::Skip,
                }
            }

            PlaybackState::Running => {
                let last = match self.last_frame {
                    Some(last) => last,
                    None => {
                        self.last_frame = Some(now);
                        return FrameOutcome::Skip;
                    }
                };

                let elapsed = now.saturating_duration_since(last);
                if elapsed < self.config.min_frame_gap {
                    // Dropped, not queued: the next accepted frame measures
                    // from the last accepted one, so no backlog builds up.
                    return FrameOutcome::Skip;
                }

                self.last_frame = Some(now);
                FrameOutcome::Advance(elapsed.mul_f64(self.speed_multiplier))
            }
        }
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}
