//! Unit tests for fd-export.

use std::fs;

use fd_core::{GeoPoint, MovementKind, PointId, RouteId, TimestampMs};
use fd_engine::FlowObserver;
use fd_gen::FlowPoint;
use tempfile::tempdir;

use crate::writer::ExportWriter;
use crate::{CsvWriter, ExportResult, FlowExportObserver, FlowSnapshotRow, FrameSummaryRow};

fn sample_points(n: u32) -> Vec<FlowPoint> {
    (0..n)
        .map(|i| FlowPoint {
            id:            PointId(i),
            position:      GeoPoint::new(10.0, 20.0 + i as f64 * 1e-3),
            next_position: GeoPoint::new(10.0, 20.001 + i as f64 * 1e-3),
            bearing_deg:   90.0,
            progress:      0.5,
            route:         RouteId(0),
            speed:         1.4,
            intensity:     0.6,
            kind:          MovementKind::Pedestrian,
        })
        .collect()
}

mod csv_backend {
    use super::*;

    #[test]
    fn writes_headers_and_rows() {
        let dir = tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();

        let mut obs = FlowExportObserver::new(&mut writer);
        let points = sample_points(3);
        obs.on_batch(&points, TimestampMs(1_000));
        obs.on_frame(&points, TimestampMs(1_000));
        obs.on_frame(&points, TimestampMs(1_000));
        assert!(obs.take_error().is_none());

        writer.finish().unwrap();

        let snapshots = fs::read_to_string(dir.path().join("flow_snapshots.csv")).unwrap();
        let lines: Vec<&str> = snapshots.lines().collect();
        assert_eq!(lines.len(), 4, "header + 3 rows");
        assert!(lines[0].starts_with("point_id,timestamp_ms,kind"));
        assert!(lines[1].contains("pedestrian"));

        let summaries = fs::read_to_string(dir.path().join("frame_summaries.csv")).unwrap();
        let lines: Vec<&str> = summaries.lines().collect();
        assert_eq!(lines.len(), 3, "header + 2 frames");
        // Frame ordinals count up from 1.
        assert!(lines[1].starts_with("1,1000,3,"));
        assert!(lines[2].starts_with("2,1000,3,"));
    }

    #[test]
    fn empty_batches_write_nothing() {
        let dir = tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();

        let mut obs = FlowExportObserver::new(&mut writer);
        obs.on_batch(&[], TimestampMs(0));
        writer.finish().unwrap();

        let snapshots = fs::read_to_string(dir.path().join("flow_snapshots.csv")).unwrap();
        assert_eq!(snapshots.lines().count(), 1, "header only");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();
    }
}

mod observer {
    use super::*;

    /// Writer that fails every call, for error-latching tests.
    struct FailingWriter;

    impl ExportWriter for FailingWriter {
        fn write_snapshots(&mut self, _rows: &[FlowSnapshotRow]) -> ExportResult<()> {
            Err(std::io::Error::other("disk full").into())
        }

        fn write_frame_summary(&mut self, _row: &FrameSummaryRow) -> ExportResult<()> {
            Err(std::io::Error::other("disk full").into())
        }

        fn finish(&mut self) -> ExportResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_latched_and_taken_once() {
        let mut obs = FlowExportObserver::new(FailingWriter);
        let points = sample_points(1);

        obs.on_batch(&points, TimestampMs(0));
        obs.on_frame(&points, TimestampMs(0));

        assert!(obs.take_error().is_some());
        assert!(obs.take_error().is_none(), "error is taken, not repeated");
    }

    #[test]
    fn frame_summaries_aggregate_intensity() {
        struct Capture {
            rows: Vec<FrameSummaryRow>,
        }

        impl ExportWriter for Capture {
            fn write_snapshots(&mut self, _rows: &[FlowSnapshotRow]) -> ExportResult<()> {
                Ok(())
            }

            fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> ExportResult<()> {
                self.rows.push(*row);
                Ok(())
            }

            fn finish(&mut self) -> ExportResult<()> {
                Ok(())
            }
        }

        let mut obs = FlowExportObserver::new(Capture { rows: vec![] });
        obs.on_frame(&sample_points(4), TimestampMs(2_000));

        let capture = obs.into_writer();
        assert_eq!(capture.rows.len(), 1);
        assert_eq!(capture.rows[0].point_count, 4);
        assert!((capture.rows[0].total_intensity - 2.4).abs() < 1e-9);
    }
}
