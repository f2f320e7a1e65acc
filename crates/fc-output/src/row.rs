//! Plain data row types written by output backends.

use fc_core::{LaneId, VertexId};
use fc_robot::RobotState;
use fc_sim::{FleetSnapshot, RobotSnapshot};

/// One robot's state at a tick boundary, flattened for tabular output.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotSnapshotRow {
    pub robot_id: u32,
    pub tick: u64,
    /// Lowercase state name (`idle`, `moving`, …).
    pub state: String,
    pub x: f32,
    pub y: f32,
    /// Anchor vertex id.
    pub vertex: u32,
    /// Lane currently traversed; `u32::MAX` when at a vertex.
    pub lane: u32,
    pub progress: f32,
    /// Current goal vertex; `u32::MAX` when none.
    pub destination: u32,
    pub queued_tasks: u64,
    /// Display color as `#rrggbb`.
    pub color: String,
}

impl RobotSnapshotRow {
    /// Flatten one robot's snapshot for tabular output.
    pub fn from_snapshot(tick: u64, snap: &RobotSnapshot) -> Self {
        Self {
            robot_id: snap.robot.0,
            tick,
            state: snap.state.to_string(),
            x: snap.x,
            y: snap.y,
            vertex: snap.vertex.0,
            lane: snap.lane.unwrap_or(LaneId::INVALID).0,
            progress: snap.progress,
            destination: snap.destination.unwrap_or(VertexId::INVALID).0,
            queued_tasks: snap.queued_tasks as u64,
            color: format!("#{:02x}{:02x}{:02x}", snap.color.r, snap.color.g, snap.color.b),
        }
    }
}

/// Summary statistics for one coordination tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick: u64,
    pub unix_secs: i64,
    pub robots: u64,
    pub idle: u64,
    pub moving: u64,
    pub waiting: u64,
    pub charging: u64,
    pub unknown: u64,
    pub conflicts: u64,
}

impl TickSummaryRow {
    /// Summarize a fleet snapshot into per-state robot counts.
    pub fn from_snapshot(snap: &FleetSnapshot) -> Self {
        Self {
            tick: snap.tick.0,
            unix_secs: snap.unix_secs,
            robots: snap.robots.len() as u64,
            idle: snap.count_in(RobotState::Idle) as u64,
            moving: snap.count_in(RobotState::Moving) as u64,
            waiting: snap.count_in(RobotState::Waiting) as u64,
            charging: snap.count_in(RobotState::Charging) as u64,
            unknown: snap.count_in(RobotState::Unknown) as u64,
            conflicts: snap.conflicts as u64,
        }
    }
}
