//! The `SnapshotWriter` trait implemented by output backends.

use crate::{OutputResult, RobotSnapshotRow, TickSummaryRow};

/// Trait implemented by snapshot writers (CSV today; the observer is
/// generic so other backends slot in without touching the tick loop).
///
/// Callers that cannot propagate errors, such as observer callbacks, store
/// the first failure and surface it later through
/// [`LogObserver::take_error`][crate::LogObserver::take_error].
pub trait SnapshotWriter {
    /// Write one tick's batch of robot snapshot rows.
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
