//! CSV export backend.
//!
//! Creates two files in the configured output directory:
//! - `flow_snapshots.csv`
//! - `frame_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::ExportWriter;
use crate::{ExportResult, FlowSnapshotRow, FrameSummaryRow};

/// Writes flow data to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> ExportResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("flow_snapshots.csv"))?;
        snapshots.write_record([
            "point_id",
            "timestamp_ms",
            "kind",
            "lat",
            "lon",
            "progress",
            "speed",
            "intensity",
            "route",
        ])?;

        let mut summaries = Writer::from_path(dir.join("frame_summaries.csv"))?;
        summaries.write_record(["frame", "timestamp_ms", "point_count", "total_intensity"])?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl ExportWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[FlowSnapshotRow]) -> ExportResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.point_id.to_string(),
                row.timestamp_ms.to_string(),
                row.kind.to_string(),
                row.lat.to_string(),
                row.lon.to_string(),
                row.progress.to_string(),
                row.speed.to_string(),
                row.intensity.to_string(),
                row.route.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> ExportResult<()> {
        self.summaries.write_record(&[
            row.frame.to_string(),
            row.timestamp_ms.to_string(),
            row.point_count.to_string(),
            row.total_intensity.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> ExportResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
