//! Headless demo: drives the engine with a counting map double and prints
//! what a dashboard would render.
//!
//! Run with `RUST_LOG=debug` to watch the generation and overlay decisions.

use std::error::Error;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use fd_config::{Catalog, CityConfig, Poi, TimeRangeConfig};
use fd_core::{CityId, GeoPoint, TimestampMs};
use fd_engine::{EngineConfig, FlowEngine, FlowObserver, Notice, PlaybackState};
use fd_export::{CsvWriter, ExportWriter, FlowExportObserver};
use fd_gen::FlowPoint;
use fd_render::{
    Color, DensitySurface, HeatLayerOptions, MapProvider, MarkerHandle, MarkerStyle, PixelPoint,
    PolylineHandle,
};
use fd_route::{RouteFetcher, UnavailableRouteSource};

/// Map double: no pixels, just counters.
#[derive(Default)]
struct CountingMap {
    next_handle: u64,
    live_markers: usize,
    repaints: usize,
    heat_live: bool,
}

impl MapProvider for CountingMap {
    fn pan_to(&mut self, center: GeoPoint) {
        println!("map: pan to {center}");
    }

    fn set_zoom(&mut self, zoom: u8) {
        println!("map: zoom {zoom}");
    }

    fn project_to_pixel(&self, position: GeoPoint) -> Option<PixelPoint> {
        Some(PixelPoint { x: position.lon, y: position.lat })
    }

    fn draw_heat_layer(&mut self, surface: &DensitySurface, _options: &HeatLayerOptions) {
        self.heat_live = true;
        println!("map: heat layer with {} samples", surface.len());
    }

    fn update_heat_layer(&mut self, _surface: &DensitySurface) {}

    fn remove_heat_layer(&mut self) {
        self.heat_live = false;
    }

    fn draw_marker(&mut self, _position: GeoPoint, _style: &MarkerStyle) -> MarkerHandle {
        self.next_handle += 1;
        self.live_markers += 1;
        if self.live_markers == 1 {
            self.repaints += 1;
        }
        MarkerHandle(self.next_handle)
    }

    fn remove_marker(&mut self, _handle: MarkerHandle) {
        self.live_markers -= 1;
    }

    fn draw_polyline(&mut self, _path: &[GeoPoint], _color: Color, _w: f64) -> PolylineHandle {
        self.next_handle += 1;
        PolylineHandle(self.next_handle)
    }

    fn remove_polyline(&mut self, _handle: PolylineHandle) {}
}

/// Observer printing batches and notices, forwarding everything to a CSV
/// exporter.
struct ConsoleObserver<W: ExportWriter> {
    export: FlowExportObserver<W>,
}

impl<W: ExportWriter> FlowObserver for ConsoleObserver<W> {
    fn on_batch(&mut self, points: &[FlowPoint], at: TimestampMs) {
        println!("batch: {} points at {at}", points.len());
        self.export.on_batch(points, at);
    }

    fn on_frame(&mut self, points: &[FlowPoint], at: TimestampMs) {
        self.export.on_frame(points, at);
    }

    fn on_notice(&mut self, notice: Notice) {
        match notice {
            Notice::SimulatedData => println!("notice: routing unavailable, showing simulated data"),
            Notice::NoData        => println!("notice: no data for this selection"),
        }
    }

    fn on_playback(&mut self, state: PlaybackState) {
        println!("playback: {state:?}");
    }
}

fn demo_catalog() -> Catalog {
    Catalog {
        cities: vec![
            CityConfig {
                name:               "Riverton".into(),
                center:             GeoPoint::new(47.608, -122.335),
                zoom_default:       13,
                utc_offset_minutes: -480,
                pois:               vec![
                    Poi { name: "Harbor Market".into(), location: GeoPoint::new(47.609, -122.342) },
                    Poi { name: "Union Square".into(),  location: GeoPoint::new(47.611, -122.331) },
                    Poi { name: "Stadium".into(),       location: GeoPoint::new(47.591, -122.333) },
                ],
            },
            CityConfig {
                name:               "Eastfield".into(),
                center:             GeoPoint::new(40.713, -74.006),
                zoom_default:       12,
                utc_offset_minutes: -300,
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

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let export_dir = Path::new("demo-out");
    std::fs::create_dir_all(export_dir)?;
    let mut writer = CsvWriter::new(export_dir)?;

    let mut observer = ConsoleObserver { export: FlowExportObserver::new(&mut writer) };
    let mut map = CountingMap::default();

    // Routing is disabled in the demo, so every batch is procedural and the
    // simulated-data notice fires once per generation.
    let fetcher = RouteFetcher::with_default_policy(UnavailableRouteSource);
    let mut engine =
        FlowEngine::new(demo_catalog(), EngineConfig { seed: 7, ..EngineConfig::default() })?
            .with_route_provider(Box::new(fetcher));

    let now_ms = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as i64;
    engine.set_timestamp(TimestampMs(now_ms), &mut observer);
    engine.set_city(CityId(0), &mut map, &mut observer)?;

    engine.play(Instant::now(), &mut observer);
    engine.set_speed(2.0)?;

    for _ in 0..40 {
        std::thread::sleep(Duration::from_millis(25));
        engine.frame(Instant::now(), &mut map, &mut observer);
    }

    // Scrub six hours back; same city, different bucket, fresh batch.
    engine.set_timestamp(TimestampMs(now_ms - 6 * 3_600_000), &mut observer);
    for _ in 0..10 {
        std::thread::sleep(Duration::from_millis(25));
        engine.frame(Instant::now(), &mut map, &mut observer);
    }

    if let Some(point) = engine.points().first() {
        if let Some(hover) = engine.on_pointer_move(point.interpolated_position()) {
            println!(
                "hover: {} {} speed {:.1} intensity {:.2}",
                hover.id, hover.kind, hover.speed, hover.intensity
            );
        }
    }

    engine.pause(&mut observer);

    if let Some(err) = observer.export.take_error() {
        log::error!("export failed: {err}");
    }
    writer.finish()?;

    println!(
        "done: {} markers live, heat {}, {} repaints, export in {}",
        map.live_markers,
        if map.heat_live { "on" } else { "off" },
        map.repaints,
        export_dir.display()
    );
    Ok(())
}
