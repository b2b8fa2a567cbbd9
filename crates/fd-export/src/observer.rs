//! `FlowExportObserver<W>` — bridges `FlowObserver` to an `ExportWriter`.

use fd_core::TimestampMs;
use fd_engine::FlowObserver;
use fd_gen::FlowPoint;

use crate::row::{FlowSnapshotRow, FrameSummaryRow};
use crate::writer::ExportWriter;
use crate::{ExportError, ExportResult};

/// A [`FlowObserver`] that records generated batches and frame summaries to
/// any [`ExportWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the session, check for errors with
/// [`take_error`][Self::take_error].
pub struct FlowExportObserver<W: ExportWriter> {
    writer: W,
    frame: u64,
    last_error: Option<ExportError>,
}

impl<W: ExportWriter> FlowExportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frame: 0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any).  Returns `None` if all writes
    /// succeeded so far.
    pub fn take_error(&mut self) -> Option<ExportError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to finish and inspect files).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: ExportResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ExportWriter> FlowObserver for FlowExportObserver<W> {
    fn on_batch(&mut self, points: &[FlowPoint], at: TimestampMs) {
        let rows: Vec<FlowSnapshotRow> = points
            .iter()
            .map(|p| {
                let position = p.interpolated_position();
                FlowSnapshotRow {
                    point_id:     p.id.0,
                    timestamp_ms: at.0,
                    kind:         p.kind.as_str(),
                    lat:          position.lat,
                    lon:          position.lon,
                    progress:     p.progress,
                    speed:        p.speed,
                    intensity:    p.intensity,
                    route:        p.route.0,
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_frame(&mut self, points: &[FlowPoint], at: TimestampMs) {
        self.frame += 1;
        let row = FrameSummaryRow {
            frame:           self.frame,
            timestamp_ms:    at.0,
            point_count:     points.len() as u64,
            total_intensity: points.iter().map(|p| p.intensity).sum(),
        };
        let result = self.writer.write_frame_summary(&row);
        self.store_err(result);
    }
}
