//! The `TraceSink` trait implemented by all backend writers.

use crate::{PositionRow, TickSummaryRow, TraceResult};

/// Trait implemented by trace backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`TraceObserver::take_error`][crate::TraceObserver::take_error].
pub trait TraceSink {
    /// Write a batch of position rows for one snapshot.
    fn write_positions(&mut self, rows: &[PositionRow]) -> TraceResult<()>;

    /// Write one snapshot summary row.
    fn write_summary(&mut self, row: &TickSummaryRow) -> TraceResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> TraceResult<()>;
}
