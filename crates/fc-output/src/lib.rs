//! Output writers for fleet coordination runs.
//!
//! Two sinks, both fed through one [`LogObserver`] attached to the fleet's
//! tick loop:
//!
//! * CSV snapshot files ([`CsvWriter`]): `robot_snapshots.csv` with one row
//!   per robot per snapshot tick, and `tick_summaries.csv` with per-state
//!   robot counts per tick.
//! * A plain-text event log ([`EventLog`]) rendering every [`FleetEvent`]
//!   as `[unix_secs] [LEVEL] [component] message`.
//!
//! # Example
//!
//! ```rust,ignore
//! let writer = CsvWriter::new(run_dir)?;
//! let log = File::create(run_dir.join("events.log"))?;
//! let mut observer = LogObserver::new(writer, log, &config);
//!
//! fleet.run(1_000, &mut observer);
//!
//! if let Some(err) = observer.take_error() {
//!     eprintln!("output incomplete: {err}");
//! }
//! ```
//!
//! [`FleetEvent`]: fc_sim::FleetEvent

pub mod csv;
pub mod error;
pub mod log;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvWriter;
pub use crate::error::{OutputError, OutputResult};
pub use crate::log::EventLog;
pub use crate::observer::LogObserver;
pub use crate::row::{RobotSnapshotRow, TickSummaryRow};
pub use crate::writer::SnapshotWriter;
