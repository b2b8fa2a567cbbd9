//! `fd-export` — file export for flow data.
//!
//! # Crate layout
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`row`]      | `FlowSnapshotRow`, `FrameSummaryRow`              |
//! | [`writer`]   | `ExportWriter` trait                              |
//! | [`csv`]      | CSV backend                                       |
//! | [`observer`] | `FlowExportObserver<W>` — engine bridge           |
//! | [`error`]    | `ExportError`, `ExportResult<T>`                  |

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvWriter;
pub use error::{ExportError, ExportResult};
pub use observer::FlowExportObserver;
pub use row::{FlowSnapshotRow, FrameSummaryRow};
pub use writer::ExportWriter;
