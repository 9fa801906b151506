//! The `EventWriter` trait implemented by backend writers.

use crate::{EventRow, OutputResult, StatusRow};

/// A destination for flattened store events.
///
/// Called from [`OutputSink`](crate::OutputSink), which serializes access
/// and keeps the first error for [`take_error`](crate::OutputSink::take_error).
pub trait EventWriter: Send {
    /// Write one actor event.
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Write one tick's per-category status rows.
    fn write_status(&mut self, rows: &[StatusRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
