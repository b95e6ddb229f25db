//! The `OutputWriter` trait implemented by backend writers.

use crate::{HistoryRow, IoResult, TickSummaryRow};

/// Sink for run results.
///
/// All methods are infallible from the observer's perspective.  Errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> IoResult<()>;

    /// Write the final per-agent histories.
    fn write_histories(&mut self, rows: &[HistoryRow]) -> IoResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> IoResult<()>;
}
