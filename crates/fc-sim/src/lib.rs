//! `fc-sim` — the fleet manager tick loop.
//!
//! # Tick structure
//!
//! ```text
//! for each tick:
//!   ① Commands  — drain Spawn / Assign / Remove in submission order.
//!   ② Step      — step robots in ascending id (= priority) order:
//!                   Idle      → plan toward the next queued task
//!                   Moving    → acquire lane + vertex, advance, arrive
//!                   Waiting   → retry; re-plan past the denial threshold
//!                   Charging  → back to Idle once the charge completes
//!   ③ Publish   — events to the observer, then a FleetSnapshot at the
//!                 configured interval.
//! ```
//!
//! Coordination outcomes (conflicts, broken deadlocks, unreachable goals)
//! are [`FleetEvent`]s, and malformed commands are rejected per-command
//! with `CommandRejected` events; `SimError` surfaces only internal
//! failures.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fc_sim::{FleetCommand, FleetManager, NoopObserver};
//!
//! let mut fleet = FleetManager::new(graph, config);
//! fleet.submit(FleetCommand::Spawn { start: v0 });
//! fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: v9 });
//! fleet.run(100, &mut NoopObserver)?;
//! ```

pub mod command;
pub mod error;
pub mod event;
pub mod fleet;
pub mod observer;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use command::FleetCommand;
pub use error::{SimError, SimResult};
pub use event::{FleetEvent, Level};
pub use fleet::FleetManager;
pub use observer::{FleetObserver, NoopObserver};
pub use snapshot::{FleetSnapshot, RobotSnapshot};
