//! Observer bridging the coordination loop to the output writers.

use std::io::Write;

use fc_core::{FleetClock, FleetConfig, Tick};
use fc_sim::{FleetEvent, FleetObserver, FleetSnapshot};

use crate::{
    EventLog, OutputError, OutputResult, RobotSnapshotRow, SnapshotWriter, TickSummaryRow,
};

/// [`FleetObserver`] that streams events to an [`EventLog`] and snapshots
/// to a [`SnapshotWriter`] as the fleet runs.
///
/// Observer callbacks cannot return errors, so the first writer failure is
/// stored and surfaced through [`take_error`][LogObserver::take_error];
/// later failures on an already-failing run are dropped.
pub struct LogObserver<W: SnapshotWriter, L: Write> {
    writer: W,
    log: EventLog<L>,
    clock: FleetClock,
    last_error: Option<OutputError>,
}

impl<W: SnapshotWriter, L: Write> LogObserver<W, L> {
    /// `config` supplies the tick-to-wall-clock mapping for event
    /// timestamps; it must match the one the fleet runs with.
    pub fn new(writer: W, log_sink: L, config: &FleetConfig) -> Self {
        Self {
            writer,
            log: EventLog::new(log_sink),
            clock: config.make_clock(),
            last_error: None,
        }
    }

    /// Take the first error that occurred during observation, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Consume the observer and return the snapshot writer and log sink.
    pub fn into_parts(self) -> (W, L) {
        (self.writer, self.log.into_inner())
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: SnapshotWriter, L: Write> FleetObserver for LogObserver<W, L> {
    fn on_event(&mut self, tick: Tick, event: &FleetEvent) {
        let secs = self.clock.unix_secs_at(tick);
        let result = self.log.log(secs, event);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, snapshot: &FleetSnapshot) {
        let rows: Vec<RobotSnapshotRow> = snapshot
            .robots
            .iter()
            .map(|r| RobotSnapshotRow::from_snapshot(snapshot.tick.0, r))
            .collect();
        let result = self.writer.write_snapshots(&rows);
        self.store_err(result);

        let result = self.writer.write_tick_summary(&TickSummaryRow::from_snapshot(snapshot));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
        let result = self.log.flush();
        self.store_err(result);
    }
}
