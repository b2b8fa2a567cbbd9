//! The `ExportWriter` trait implemented by all backend writers.

use crate::{ExportResult, FlowSnapshotRow, FrameSummaryRow};

/// Trait implemented by export backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`FlowExportObserver::take_error`][crate::FlowExportObserver::take_error].
pub trait ExportWriter {
    /// Write a batch of point snapshots.
    fn write_snapshots(&mut self, rows: &[FlowSnapshotRow]) -> ExportResult<()>;

    /// Write one frame summary row.
    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> ExportResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> ExportResult<()>;
}

impl<W: ExportWriter + ?Sized> ExportWriter for &mut W {
    fn write_snapshots(&mut self, rows: &[FlowSnapshotRow]) -> ExportResult<()> {
        (**self).write_snapshots(rows)
    }

    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> ExportResult<()> {
        (**self).write_frame_summary(row)
    }

    fn finish(&mut self) -> ExportResult<()> {
        (**self).finish()
    }
}
