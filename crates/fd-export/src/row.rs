//! Plain data row types written by export backends.

/// One flow point at the moment a batch was generated.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSnapshotRow {
    pub point_id: u32,
    /// Batch timestamp, Unix milliseconds.
    pub timestamp_ms: i64,
    /// Movement kind as its wire name ("pedestrian", "vehicle", …).
    pub kind: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub progress: f64,
    pub speed: f64,
    pub intensity: f64,
    /// Route index within the batch; `u16::MAX` for procedural points.
    pub route: u16,
}

/// Summary statistics for one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummaryRow {
    /// Frame ordinal since the observer was created.
    pub frame: u64,
    /// Batch timestamp the frame rendered, Unix milliseconds.
    pub timestamp_ms: i64,
    pub point_count: u64,
    pub total_intensity: f64,
}
