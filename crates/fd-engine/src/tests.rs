//! Unit tests for fd-engine.

use std::time::{Duration, Instant};

use fd_config::{Catalog, CityConfig, TimeRangeConfig};
use fd_core::{CityId, GeoPoint, TimestampMs};
use fd_gen::FlowPoint;
use fd_render::{
    Color, DensitySurface, HeatLayerOptions, MapProvider, MarkerHandle, MarkerStyle, PixelPoint,
    PolylineHandle,
};
use fd_route::{Route, RouteError, RoutePair, RouteProvider, RouteResult};

use crate::scheduler::{AnimationScheduler, FrameOutcome, PlaybackState, SchedulerConfig};
use crate::{EngineConfig, EngineError, FlowEngine, FlowObserver, Notice};

/// 2024-01-01 00:00 UTC, a Monday.
const MONDAY_MIDNIGHT: i64 = 1_704_067_200;

fn monday_at(hour: i64) -> TimestampMs {
    TimestampMs::from_secs(MONDAY_MIDNIGHT + hour * 3600)
}

fn catalog() -> Catalog {
    Catalog {
        cities: vec![
            CityConfig {
                name:               "Testville".into(),
                center:             GeoPoint::new(10.0, 20.0),
                zoom_default:       12,
                utc_offset_minutes: 0,
                pois:               vec![],
            },
            CityConfig {
                name:               "Harborview".into(),
                center:             GeoPoint::new(48.0, 11.0),
                zoom_default:       13,
                utc_offset_minutes: 60,
                pois:               vec![],
            },
        ],
        time_ranges: vec![
            TimeRangeConfig {
                id:                  "24h".into(),
                label:               "Last 24 hours".into(),
                days:                1,
                granularity_minutes: 60,
            },
            TimeRangeConfig {
                id:                  "7d".into(),
                label:               "Last 7 days".into(),
                days:                7,
                granularity_minutes: 360,
            },
        ],
    }
}

fn engine() -> FlowEngine {
    FlowEngine::new(catalog(), EngineConfig { seed: 42, ..EngineConfig::default() })
        .expect("catalog is well-formed")
}

/// Map double recording pans and marker churn.
#[derive(Default)]
struct TestMap {
    pans: Vec<GeoPoint>,
    zooms: Vec<u8>,
    next_handle: u64,
    live_markers: usize,
}

impl MapProvider for TestMap {
    fn pan_to(&mut self, center: GeoPoint) {
        self.pans.push(center);
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.zooms.push(zoom);
    }

    fn project_to_pixel(&self, position: GeoPoint) -> Option<PixelPoint> {
        Some(PixelPoint { x: position.lon, y: position.lat })
    }

    fn draw_heat_layer(&mut self, _: &DensitySurface, _: &HeatLayerOptions) {}

    fn update_heat_layer(&mut self, _: &DensitySurface) {}

    fn remove_heat_layer(&mut self) {}

    fn draw_marker(&mut self, _: GeoPoint, _: &MarkerStyle) -> MarkerHandle {
        self.next_handle += 1;
        self.live_markers += 1;
        MarkerHandle(self.next_handle)
    }

    fn remove_marker(&mut self, _: MarkerHandle) {
        self.live_markers -= 1;
    }

    fn draw_polyline(&mut self, _: &[GeoPoint], _: Color, _: f64) -> PolylineHandle {
        self.next_handle += 1;
        PolylineHandle(self.next_handle)
    }

    fn remove_polyline(&mut self, _: PolylineHandle) {}
}

/// Observer double recording everything.
#[derive(Default)]
struct Recorder {
    batches: usize,
    frames: usize,
    notices: Vec<Notice>,
    states: Vec<PlaybackState>,
    last_batch_len: usize,
}

impl FlowObserver for Recorder {
    fn on_batch(&mut self, points: &[FlowPoint], _at: TimestampMs) {
        self.batches += 1;
        self.last_batch_len = points.len();
    }

    fn on_frame(&mut self, _points: &[FlowPoint], _at: TimestampMs) {
        self.frames += 1;
    }

    fn on_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn on_playback(&mut self, state: PlaybackState) {
        self.states.push(state);
    }
}

/// Provider whose every call fails — forces the procedural fallback.
struct DeadProvider;

impl RouteProvider for DeadProvider {
    fn fetch_route(&mut self, _pair: &RoutePair) -> RouteResult<Route> {
        Err(RouteError::Unavailable("down".into()))
    }
}

mod scheduler {
    use super::*;

    fn running_at(t0: Instant) -> AnimationScheduler {
        let mut s = AnimationScheduler::new(SchedulerConfig::default());
        s.start(t0);
        s
    }

    #[test]
    fn idle_frames_do_nothing() {
        let mut s = AnimationScheduler::default();
        assert_eq!(s.frame(Instant::now()), FrameOutcome::Skip);
        assert_eq!(s.state(), PlaybackState::Idle);
    }

    #[test]
    fn elapsed_time_reaches_the_advance() {
        let t0 = Instant::now();
        let mut s = running_at(t0);
        assert_eq!(
            s.frame(t0 + Duration::from_millis(60)),
            FrameOutcome::Advance(Duration::from_millis(60))
        );
    }

    #[test]
    fn fast_frames_are_dropped_not_queued() {
        let t0 = Instant::now();
        let mut s = running_at(t0);

        for ms in [10u64, 20, 30, 40] {
            assert_eq!(s.frame(t0 + Duration::from_millis(ms)), FrameOutcome::Skip);
        }

        // The accepted frame measures from t0, not from the dropped ones.
        assert_eq!(
            s.frame(t0 + Duration::from_millis(60)),
            FrameOutcome::Advance(Duration::from_millis(60))
        );
    }

    #[test]
    fn speed_multiplier_scales_the_advance() {
        let t0 = Instant::now();
        let mut s = running_at(t0);
        assert!(s.set_speed_multiplier(2.0));

        assert_eq!(
            s.frame(t0 + Duration::from_millis(60)),
            FrameOutcome::Advance(Duration::from_millis(120))
        );
    }

    #[test]
    fn unsupported_speeds_are_rejected() {
        let mut s = AnimationScheduler::default();
        assert!(!s.set_speed_multiplier(3.0));
        assert!(!s.set_speed_multiplier(0.0));
        assert_eq!(s.speed_multiplier(), 1.0);
        assert!(s.set_speed_multiplier(0.5));
    }

    #[test]
    fn stop_settles_into_idle_after_the_window() {
        let t0 = Instant::now();
        let mut s = running_at(t0);
        assert!(s.stop(t0));
        assert_eq!(s.state(), PlaybackState::Restarting);

        assert_eq!(s.frame(t0 + Duration::from_millis(200)), FrameOutcome::Skip);
        assert_eq!(s.frame(t0 + Duration::from_millis(300)), FrameOutcome::Stopped);
        assert_eq!(s.state(), PlaybackState::Idle);

        // No automatic resumption: later frames stay skipped.
        assert_eq!(s.frame(t0 + Duration::from_millis(400)), FrameOutcome::Skip);
    }

    #[test]
    fn stop_is_idempotent_inside_the_window() {
        let t0 = Instant::now();
        let mut s = running_at(t0);
        assert!(s.stop(t0));
        // A second stop inside the window is swallowed and must not push
        // the window out.
        assert!(!s.stop(t0 + Duration::from_millis(200)));
        assert_eq!(s.frame(t0 + Duration::from_millis(310)), FrameOutcome::Stopped);

        // Once the window has closed a fresh stop re-arms.
        assert!(s.stop(t0 + Duration::from_millis(400)));
        assert_eq!(s.state(), PlaybackState::Restarting);
    }

    #[test]
    fn pause_goes_idle_without_restart() {
        let t0 = Instant::now();
        let mut s = running_at(t0);
        s.pause();
        assert_eq!(s.state(), PlaybackState::Idle);
        assert_eq!(s.frame(t0 + Duration::from_secs(5)), FrameOutcome::Skip);
    }
}

mod control {
    use super::*;

    #[test]
    fn empty_catalog_is_rejected() {
        let result = FlowEngine::new(Catalog::default(), EngineConfig::default());
        assert!(matches!(result, Err(EngineError::EmptyCatalog)));
    }

    #[test]
    fn set_city_pans_zooms_and_generates() {
        let mut eng = engine();
        let mut map = TestMap::default();
        let mut obs = Recorder::default();

        eng.set_timestamp(monday_at(8), &mut obs);
        eng.set_city(CityId(0), &mut map, &mut obs).unwrap();

        assert_eq!(map.pans, vec![GeoPoint::new(10.0, 20.0)]);
        assert_eq!(map.zooms, vec![12]);
        assert_eq!(obs.batches, 2);
        assert_eq!(eng.points().len(), 100);
    }

    #[test]
    fn unknown_city_is_an_error() {
        let mut eng = engine();
        let mut map = TestMap::default();
        let mut obs = Recorder::default();

        let result = eng.set_city(CityId(9), &mut map, &mut obs);
        assert!(matches!(result, Err(EngineError::CityNotFound(CityId(9)))));
        assert!(map.pans.is_empty());
    }

    #[test]
    fn switching_cities_supersedes_the_old_selection() {
        let mut eng = engine();
        let mut map = TestMap::default();
        let mut obs = Recorder::default();

        eng.set_city(CityId(0), &mut map, &mut obs).unwrap();
        eng.set_city(CityId(1), &mut map, &mut obs).unwrap();

        assert_eq!(eng.city(), CityId(1));
        assert_eq!(map.pans.last(), Some(&GeoPoint::new(48.0, 11.0)));
        assert_eq!(obs.batches, 2);
        // The on-screen batch is the second city's.
        assert!(
            eng.points()
                .iter()
                .all(|p| p.position.distance_m(GeoPoint::new(48.0, 11.0)) < 10_000.0)
        );
    }

    #[test]
    fn timestamps_in_the_same_bucket_hit_the_cache() {
        let mut eng = engine();
        let mut obs = Recorder::default();

        eng.set_timestamp(monday_at(8), &mut obs);
        let first = eng.points().to_vec();

        // One minute later, same five-minute bucket: identical batch.
        eng.set_timestamp(monday_at(8).offset_ms(60_000), &mut obs);
        assert_eq!(eng.points(), &first[..]);
    }

    #[test]
    fn unknown_time_range_is_an_error() {
        let mut eng = engine();
        let mut obs = Recorder::default();
        assert!(matches!(
            eng.set_time_range("30d", &mut obs),
            Err(EngineError::UnknownTimeRange(_))
        ));
        assert!(eng.set_time_range("7d", &mut obs).is_ok());
    }

    #[test]
    fn unsupported_speed_is_an_error() {
        let mut eng = engine();
        assert!(matches!(eng.set_speed(3.0), Err(EngineError::UnsupportedSpeed(_))));
        assert!(eng.set_speed(2.0).is_ok());
    }

    #[test]
    fn dead_provider_degrades_with_a_notice() {
        let mut eng = FlowEngine::new(catalog(), EngineConfig::default())
            .unwrap()
            .with_route_provider(Box::new(DeadProvider));
        let mut obs = Recorder::default();

        eng.set_timestamp(monday_at(8), &mut obs);

        assert_eq!(eng.points().len(), 100);
        assert_eq!(obs.last_batch_len, 100);
        assert!(obs.notices.contains(&Notice::SimulatedData));
    }
}

mod playback {
    use super::*;

    fn primed() -> (FlowEngine, TestMap, Recorder) {
        let mut eng = engine();
        let mut map = TestMap::default();
        let mut obs = Recorder::default();
        eng.set_timestamp(monday_at(8), &mut obs);
        eng.set_city(CityId(0), &mut map, &mut obs).unwrap();
        (eng, map, obs)
    }

    #[test]
    fn frames_advance_progress_while_playing() {
        let (mut eng, mut map, mut obs) = primed();
        let t0 = Instant::now();

        let before: Vec<f64> = eng.points().iter().map(|p| p.progress).collect();
        eng.play(t0, &mut obs);
        eng.frame(t0 + Duration::from_millis(60), &mut map, &mut obs);

        let after: Vec<f64> = eng.points().iter().map(|p| p.progress).collect();
        assert_ne!(before, after);
        assert_eq!(obs.frames, 1);
    }

    #[test]
    fn throttled_frames_do_not_advance() {
        let (mut eng, mut map, mut obs) = primed();
        let t0 = Instant::now();

        eng.play(t0, &mut obs);
        eng.frame(t0 + Duration::from_millis(60), &mut map, &mut obs);
        let snapshot: Vec<f64> = eng.points().iter().map(|p| p.progress).collect();

        // 10ms later: under the frame gap, nothing moves.
        eng.frame(t0 + Duration::from_millis(70), &mut map, &mut obs);
        let still: Vec<f64> = eng.points().iter().map(|p| p.progress).collect();
        assert_eq!(snapshot, still);
        assert_eq!(obs.frames, 1);
    }

    #[test]
    fn stop_resets_points_and_snaps_to_the_live_edge() {
        let (mut eng, mut map, mut obs) = primed();
        let t0 = Instant::now();

        eng.play(t0, &mut obs);
        eng.frame(t0 + Duration::from_millis(60), &mut map, &mut obs);

        let live = monday_at(9);
        eng.stop(t0 + Duration::from_millis(100), live, &mut obs);

        assert_eq!(eng.timestamp(), live);
        assert!(eng.points().iter().all(|p| p.progress == 0.0));
        assert_eq!(eng.playback_state(), PlaybackState::Restarting);

        // The window closes without resuming; playback waits for an
        // explicit play.
        eng.frame(t0 + Duration::from_millis(450), &mut map, &mut obs);
        assert_eq!(eng.playback_state(), PlaybackState::Idle);
        assert_eq!(obs.states.last(), Some(&PlaybackState::Idle));

        let snapshot: Vec<f64> = eng.points().iter().map(|p| p.progress).collect();
        eng.frame(t0 + Duration::from_millis(600), &mut map, &mut obs);
        let still: Vec<f64> = eng.points().iter().map(|p| p.progress).collect();
        assert_eq!(snapshot, still);
    }

    #[test]
    fn second_stop_inside_the_window_is_a_no_op() {
        let (mut eng, _map, mut obs) = primed();
        let t0 = Instant::now();

        eng.play(t0, &mut obs);
        let live = monday_at(9);
        eng.stop(t0, live, &mut obs);
        let batches = obs.batches;

        eng.stop(t0 + Duration::from_millis(200), monday_at(10), &mut obs);
        assert_eq!(obs.batches, batches);
        assert_eq!(eng.timestamp(), live);
    }

    #[test]
    fn city_switch_pauses_playback() {
        let (mut eng, mut map, mut obs) = primed();
        let t0 = Instant::now();

        eng.play(t0, &mut obs);
        eng.set_city(CityId(1), &mut map, &mut obs).unwrap();

        assert_eq!(eng.playback_state(), PlaybackState::Idle);
        let snapshot: Vec<f64> = eng.points().iter().map(|p| p.progress).collect();
        eng.frame(t0 + Duration::from_millis(60), &mut map, &mut obs);
        let still: Vec<f64> = eng.points().iter().map(|p| p.progress).collect();
        assert_eq!(snapshot, still);
    }

    #[test]
    fn paused_engine_holds_positions() {
        let (mut eng, mut map, mut obs) = primed();
        let t0 = Instant::now();

        eng.play(t0, &mut obs);
        eng.frame(t0 + Duration::from_millis(60), &mut map, &mut obs);
        eng.pause(&mut obs);

        let snapshot: Vec<f64> = eng.points().iter().map(|p| p.progress).collect();
        eng.frame(t0 + Duration::from_secs(3), &mut map, &mut obs);
        let still: Vec<f64> = eng.points().iter().map(|p| p.progress).collect();
        assert_eq!(snapshot, still);
    }

    #[test]
    fn hover_answers_after_a_repaint() {
        let (mut eng, mut map, mut obs) = primed();
        let t0 = Instant::now();

        // Flush the overlay once so the hover index is built.
        eng.frame(t0, &mut map, &mut obs);

        let near = eng.points()[0].interpolated_position();
        let hit = eng.on_pointer_move(near);
        assert!(hit.is_some());
        assert!(eng.on_pointer_move(GeoPoint::new(-60.0, 100.0)).is_none());
    }
}
