//! Immutable per-tick fleet state for observers and output writers.

use fc_core::{LaneId, RobotColor, RobotId, Tick, VertexId};
use fc_robot::RobotState;

/// One robot's state at a tick boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotSnapshot {
    pub robot: RobotId,
    pub state: RobotState,

    /// Interpolated planar position.
    pub x: f32,
    pub y: f32,

    /// Anchor vertex: standing vertex, or the departure vertex while on a
    /// lane.
    pub vertex: VertexId,

    /// Lane currently being traversed, if any.
    pub lane: Option<LaneId>,

    /// Progress along `lane` in `[0, 1]`; `0.0` when at a vertex.
    pub progress: f32,

    /// Goal of the active path, or the next queued destination.
    pub destination: Option<VertexId>,

    /// Tasks still queued behind the active one.
    pub queued_tasks: usize,

    pub color: RobotColor,
}

/// The whole fleet at a tick boundary.
///
/// Published through [`FleetObserver::on_snapshot`][crate::FleetObserver]
/// at the configured interval.  Robots appear in ascending id order.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetSnapshot {
    pub tick: Tick,

    /// Wall-clock timestamp of `tick`.
    pub unix_secs: i64,

    pub robots: Vec<RobotSnapshot>,

    /// Conflict events emitted during this tick.
    pub conflicts: u32,
}

impl FleetSnapshot {
    /// Number of robots currently in `state`.
    pub fn count_in(&self, state: RobotState) -> usize {
        self.robots.iter().filter(|r| r.state == state).count()
    }
}
