//! The `FlowEngine`: control surface and frame loop.

use std::time::Instant;

use fd_cache::{CacheLookup, FlowCache};
use fd_config::{Catalog, CityConfig, TimeRangeConfig};
use fd_core::{CityId, EngineRng, GeoPoint, TimeBucket, TimestampMs};
use fd_gen::{FlowGenerator, FlowPoint, GeneratorConfig};
use fd_render::{FlowOverlay, HoverInfo, MapProvider, OverlayConfig};
use fd_route::RouteProvider;

use crate::scheduler::{AnimationScheduler, FrameOutcome, PlaybackState, SchedulerConfig};
use crate::{EngineError, EngineResult, FlowObserver, Notice};

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Root RNG seed; the same seed replays the same batches.
    pub seed: u64,

    pub generator: GeneratorConfig,
    pub scheduler: SchedulerConfig,
    pub overlay: OverlayConfig,

    /// Cache entry lifetime.
    pub cache_ttl_ms: i64,

    /// Width of the timestamp buckets cache keys use.
    pub bucket_minutes: u32,

    /// Progress advanced per normalized speed unit per second of (already
    /// speed-scaled) animation time.  At the default, a speed-1.0 point
    /// crosses its segment in 100 seconds at 1× playback.
    pub progress_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed:           0,
            generator:      GeneratorConfig::default(),
            scheduler:      SchedulerConfig::default(),
            overlay:        OverlayConfig::default(),
            cache_ttl_ms:   5 * 60_000,
            bucket_minutes: fd_core::TimeBucket::DEFAULT_WINDOW_MINUTES,
            progress_rate:  0.01,
        }
    }
}

// ── FlowEngine ────────────────────────────────────────────────────────────────

/// The dashboard engine.
///
/// Owns the point batch, the cache, the playback scheduler and the map
/// overlay.  The host drives it with control calls (`set_city`,
/// `set_timestamp`, `play`, …) and a stream of [`frame`](Self::frame)
/// callbacks; data flows out through a [`FlowObserver`] and onto a
/// [`MapProvider`].
///
/// Control changes supersede each other: every one bumps an internal
/// request sequence, and a generation result is only adopted if its request
/// is still the latest.  Switching city twice in quick succession therefore
/// never leaves the first city's points on screen.
pub struct FlowEngine {
    catalog: Catalog,
    config: EngineConfig,

    rng: EngineRng,
    /// Monotone request sequence; the newest request wins.
    request_seq: u64,

    city: CityId,
    range_index: usize,
    timestamp: TimestampMs,

    points: Vec<FlowPoint>,
    generator: FlowGenerator,
    cache: FlowCache<Vec<FlowPoint>>,
    scheduler: AnimationScheduler,
    overlay: FlowOverlay,
    provider: Option<Box<dyn RouteProvider>>,
}

impl FlowEngine {
    /// Build an engine over `catalog`.  The catalog must offer at least one
    /// city and one time range; selection starts at the first of each.
    pub fn new(catalog: Catalog, config: EngineConfig) -> EngineResult<Self> {
        if catalog.cities.is_empty() || catalog.time_ranges.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }

        Ok(Self {
            rng:         EngineRng::new(config.seed),
            request_seq: 0,
            city:        CityId(0),
            range_index: 0,
            timestamp:   TimestampMs::ZERO,
            points:      vec![],
            generator:   FlowGenerator::new(config.generator),
            cache:       FlowCache::new(),
            scheduler:   AnimationScheduler::new(config.scheduler),
            overlay:     FlowOverlay::new(config.overlay.clone()),
            provider:    None,
            catalog,
            config,
        })
    }

    /// Attach an external route provider.  Without one, every batch is
    /// procedural.
    pub fn with_route_provider(mut self, provider: Box<dyn RouteProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn city(&self) -> CityId {
        self.city
    }

    pub fn timestamp(&self) -> TimestampMs {
        self.timestamp
    }

    pub fn time_range(&self) -> &TimeRangeConfig {
        &self.catalog.time_ranges[self.range_index]
    }

    pub fn points(&self) -> &[FlowPoint] {
        &self.points
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.scheduler.state()
    }

    // ── Control surface ───────────────────────────────────────────────────

    /// Select a city: pans the map, applies its default zoom, pauses
    /// playback and generates a fresh batch.  Any in-flight generation for
    /// the previous selection is superseded.
    pub fn set_city(
        &mut self,
        id: CityId,
        map: &mut dyn MapProvider,
        observer: &mut dyn FlowObserver,
    ) -> EngineResult<()> {
        let city = self.catalog.city(id).ok_or(EngineError::CityNotFound(id))?.clone();
        self.city = id;

        // The old city's animation must not keep running over the new
        // city's batch; the host presses play again.
        self.scheduler.pause();
        observer.on_playback(PlaybackState::Idle);

        map.pan_to(city.center);
        map.set_zoom(city.zoom_default);
        self.overlay.set_zoom(city.zoom_default);

        self.regenerate(observer);
        Ok(())
    }

    /// Scrub the timeline to `timestamp` and regenerate.
    pub fn set_timestamp(&mut self, timestamp: TimestampMs, observer: &mut dyn FlowObserver) {
        self.timestamp = timestamp;
        self.regenerate(observer);
    }

    /// Select a time range by its stable id and regenerate.
    pub fn set_time_range(
        &mut self,
        id: &str,
        observer: &mut dyn FlowObserver,
    ) -> EngineResult<()> {
        let index = self
            .catalog
            .time_ranges
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| EngineError::UnknownTimeRange(id.to_owned()))?;
        self.range_index = index;
        self.regenerate(observer);
        Ok(())
    }

    /// Change the zoom the overlay samples against (map zoom is the host's
    /// business; this keeps the LOD in step).
    pub fn set_zoom(&mut self, zoom: u8) {
        self.overlay.set_zoom(zoom);
    }

    pub fn play(&mut self, now: Instant, observer: &mut dyn FlowObserver) {
        self.scheduler.start(now);
        observer.on_playback(PlaybackState::Running);
    }

    pub fn pause(&mut self, observer: &mut dyn FlowObserver) {
        self.scheduler.pause();
        observer.on_playback(PlaybackState::Idle);
    }

    /// Stop playback: the timeline snaps to `live_edge`, the fresh batch
    /// starts from its segment origins, and the engine stays idle until an
    /// explicit [`play`](Self::play).  A second stop inside the scheduler's
    /// re-arm window is a no-op.
    pub fn stop(
        &mut self,
        now: Instant,
        live_edge: TimestampMs,
        observer: &mut dyn FlowObserver,
    ) {
        if !self.scheduler.stop(now) {
            return;
        }
        observer.on_playback(PlaybackState::Restarting);

        self.timestamp = live_edge;
        self.regenerate(observer);
        for p in &mut self.points {
            p.progress = 0.0;
        }
        self.overlay.update_points(self.points.clone());
    }

    /// Set the playback speed; rejects values outside the supported set.
    pub fn set_speed(&mut self, multiplier: f64) -> EngineResult<()> {
        if self.scheduler.set_speed_multiplier(multiplier) {
            Ok(())
        } else {
            Err(EngineError::UnsupportedSpeed(multiplier))
        }
    }

    /// Answer a pointer-move against the rendered points.
    pub fn on_pointer_move(&self, cursor: GeoPoint) -> Option<HoverInfo> {
        self.overlay.on_pointer_move(cursor)
    }

    // ── Frame loop ────────────────────────────────────────────────────────

    /// Process one frame callback: maybe advance the animation, then give
    /// the overlay a chance to repaint.
    pub fn frame(
        &mut self,
        now: Instant,
        map: &mut dyn MapProvider,
        observer: &mut dyn FlowObserver,
    ) {
        match self.scheduler.frame(now) {
            FrameOutcome::Skip => {}

            FrameOutcome::Advance(dt) => {
                let secs = dt.as_secs_f64();
                for p in &mut self.points {
                    let delta = p.speed * p.kind.pace_factor() * self.config.progress_rate * secs;
                    p.advance(delta);
                }
                self.overlay.update_points(self.points.clone());
                observer.on_frame(&self.points, self.timestamp);
            }

            FrameOutcome::Stopped => {
                observer.on_playback(PlaybackState::Idle);
            }
        }

        self.overlay.flush(now, map);
    }

    // ── Generation ────────────────────────────────────────────────────────

    fn regenerate(&mut self, observer: &mut dyn FlowObserver) {
        self.request_seq += 1;
        let request = self.request_seq;

        let key = (self.city, TimeBucket::containing(self.timestamp, self.config.bucket_minutes));

        match self.cache.lookup(key, self.timestamp) {
            CacheLookup::Hit(batch) => {
                log::debug!("cache hit for {:?}", key);
                self.points = batch.clone();
            }
            CacheLookup::Pending => {
                // Another request for this key is mid-generation; its result
                // will be adopted when it lands.
                return;
            }
            CacheLookup::Miss => {
                let batch = self.generate_batch(request);
                if request != self.request_seq {
                    // Superseded while generating; drop the result and let
                    // the newest request repopulate.
                    self.cache.abandon(key);
                    return;
                }
                self.cache.complete(key, batch.clone(), self.timestamp, self.config.cache_ttl_ms);
                self.points = batch;
            }
        }

        if self.points.is_empty() {
            observer.on_notice(Notice::NoData);
        } else if self.provider.is_some()
            && self.points.iter().all(|p| p.route == fd_core::RouteId::INVALID)
        {
            observer.on_notice(Notice::SimulatedData);
        }

        self.overlay.update_points(self.points.clone());
        observer.on_batch(&self.points, self.timestamp);
    }

    fn generate_batch(&mut self, request: u64) -> Vec<FlowPoint> {
        let city: CityConfig = match self.catalog.city(self.city) {
            Some(c) => c.clone(),
            None => return vec![],
        };
        let range = self.catalog.time_ranges[self.range_index].clone();

        let mut rng = self.rng.child(request);
        self.generator.generate(
            &city,
            self.timestamp,
            &range,
            self.provider.as_deref_mut().map(|p| p as &mut dyn RouteProvider),
            &mut rng,
        )
    }
}
