//! External commands accepted by the fleet manager.

use fc_core::{RobotId, VertexId};

/// A command submitted from outside the tick loop.
///
/// Commands queue via [`FleetManager::submit`][crate::FleetManager::submit]
/// and are applied in submission order at the start of the next tick, so a
/// tick never observes a half-applied batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetCommand {
    /// Add a robot standing at `start`.  Robot IDs are assigned
    /// sequentially; spawn order doubles as conflict priority.
    Spawn { start: VertexId },

    /// Enqueue a destination on a robot's task queue.
    Assign { robot: RobotId, destination: VertexId },

    /// Remove a robot from the fleet, releasing everything it holds.
    Remove { robot: RobotId },
}
