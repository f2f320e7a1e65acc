//! Plain-text event log rendering.

use std::io::Write;

use fc_sim::FleetEvent;

use crate::OutputResult;

/// Renders coordination events as one line each:
///
/// ```text
/// [1714000060] [WARN] [traffic] R3 blocked on V7 held by R1
/// ```
///
/// The sink is any [`Write`]; production runs hand it a file, tests a
/// `Vec<u8>`.
pub struct EventLog<W: Write> {
    out: W,
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Append one rendered event line.
    pub fn log(&mut self, unix_secs: i64, event: &FleetEvent) -> OutputResult<()> {
        writeln!(
            self.out,
            "[{unix_secs}] [{}] [{}] {event}",
            event.level(),
            event.component()
        )?;
        Ok(())
    }

    pub fn flush(&mut self) -> OutputResult<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Consume the log and return its sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}
