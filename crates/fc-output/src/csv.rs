//! CSV output backend.
//!
//! Writes two files under a run directory:
//!
//!   robot_snapshots.csv   one row per robot per snapshot tick
//!   tick_summaries.csv    one row per snapshot tick
//!
//! Both files get a header row on creation.  Rows are serialized field by
//! field so the column order is explicit and stable.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{OutputResult, RobotSnapshotRow, SnapshotWriter, TickSummaryRow};

const SNAPSHOT_HEADER: [&str; 11] = [
    "robot_id",
    "tick",
    "state",
    "x",
    "y",
    "vertex",
    "lane",
    "progress",
    "destination",
    "queued_tasks",
    "color",
];

const SUMMARY_HEADER: [&str; 9] = [
    "tick",
    "unix_secs",
    "robots",
    "idle",
    "moving",
    "waiting",
    "charging",
    "unknown",
    "conflicts",
];

/// [`SnapshotWriter`] backed by two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `robot_snapshots.csv` and `tick_summaries.csv` under `dir`
    /// and write their header rows.  `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("robot_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl SnapshotWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record([
                row.robot_id.to_string(),
                row.tick.to_string(),
                row.state.clone(),
                row.x.to_string(),
                row.y.to_string(),
                row.vertex.to_string(),
                row.lane.to_string(),
                row.progress.to_string(),
                row.destination.to_string(),
                row.queued_tasks.to_string(),
                row.color.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record([
            row.tick.to_string(),
            row.unix_secs.to_string(),
            row.robots.to_string(),
            row.idle.to_string(),
            row.moving.to_string(),
            row.waiting.to_string(),
            row.charging.to_string(),
            row.unknown.to_string(),
            row.conflicts.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.finished = true;
        Ok(())
    }
}
