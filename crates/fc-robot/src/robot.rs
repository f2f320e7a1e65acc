//! The robot record: identity, position, path, tasks, counters.

use std::collections::VecDeque;

use fc_core::{LaneId, RobotColor, RobotId, Tick, VertexId};
use fc_plan::Path;

use crate::{RobotError, RobotResult, RobotState};

// ── Position ──────────────────────────────────────────────────────────────────

/// Where a robot physically is: parked on a vertex, or part-way along a
/// lane.
///
/// While on a lane the robot's *anchor* stays the departure vertex until it
/// fully arrives; the anchor is what its vertex reservation covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    AtVertex(VertexId),
    OnLane {
        lane: LaneId,
        from: VertexId,
        to: VertexId,
        /// Fraction of the lane traversed, in `[0, 1)`.
        progress: f32,
    },
}

impl Position {
    /// The vertex this robot's physical presence is anchored to.
    #[inline]
    pub fn anchor_vertex(self) -> VertexId {
        match self {
            Position::AtVertex(v) => v,
            Position::OnLane { from, .. } => from,
        }
    }

    /// The lane the robot is on, if any.
    #[inline]
    pub fn lane(self) -> Option<LaneId> {
        match self {
            Position::AtVertex(_) => None,
            Position::OnLane { lane, .. } => Some(lane),
        }
    }
}

// ── Robot ─────────────────────────────────────────────────────────────────────

/// Per-robot coordination state.
///
/// All movement permissions flow through the traffic manager; the robot
/// only records the outcome.  Fields are `pub` for the fleet manager, which
/// is the single writer; external collaborators see robots only through
/// immutable snapshots.
pub struct Robot {
    pub id: RobotId,

    /// Conflict priority: lower value wins.  Equal to spawn order.
    pub priority: u32,

    /// Display color for rendering collaborators.
    pub color: RobotColor,

    state: RobotState,

    pub position: Position,

    /// The active path, if any.  Replaced wholesale on re-plan.
    pub path: Option<Path>,

    /// Index of the next hop of `path` (0 = first lane not yet completed).
    pub path_index: usize,

    /// Destination queue.  Front is the active task's goal while a path is
    /// being followed.
    pub tasks: VecDeque<VertexId>,

    /// Consecutive ticks the next step has been denied.
    pub denial_streak: u32,

    /// Re-plans attempted for the current task.
    pub replan_attempts: u32,

    /// The robot will not re-plan before this tick (deadlock backoff).
    pub backoff_until: Tick,

    /// While `Charging`: the tick at which charging completes.
    pub charge_until: Tick,
}

impl Robot {
    pub fn new(id: RobotId, priority: u32, start: VertexId, color: RobotColor) -> Self {
        Self {
            id,
            priority,
            color,
            state: RobotState::Idle,
            position: Position::AtVertex(start),
            path: None,
            path_index: 0,
            tasks: VecDeque::new(),
            denial_streak: 0,
            replan_attempts: 0,
            backoff_until: Tick::ZERO,
            charge_until: Tick::ZERO,
        }
    }

    // ── State machine ─────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> RobotState {
        self.state
    }

    /// Transition to `to`, enforcing the transition table.
    ///
    /// Returns the `(from, to)` edge for event emission, or `None` when
    /// `to` equals the current state (no event).  Illegal transitions fail
    /// with `InvalidTransition` and leave the state unchanged.
    pub fn set_state(&mut self, to: RobotState) -> RobotResult<Option<(RobotState, RobotState)>> {
        let from = self.state;
        if from == to {
            return Ok(None);
        }
        if !from.can_transition(to) {
            return Err(RobotError::InvalidTransition { robot: self.id, from, to });
        }
        self.state = to;
        Ok(Some((from, to)))
    }

    // ── Tasks ─────────────────────────────────────────────────────────────

    /// Enqueue a destination.  Rejected when the robot is `Unknown`: a
    /// lost robot must be removed or manually recovered first.
    pub fn assign_task(&mut self, destination: VertexId) -> RobotResult<()> {
        if self.state == RobotState::Unknown {
            return Err(RobotError::InvalidTransition {
                robot: self.id,
                from: RobotState::Unknown,
                to: RobotState::Moving,
            });
        }
        self.tasks.push_back(destination);
        Ok(())
    }

    /// The goal of the active path, or the next queued destination.
    pub fn current_destination(&self) -> Option<VertexId> {
        match &self.path {
            Some(p) => Some(p.goal()),
            None => self.tasks.front().copied(),
        }
    }

    // ── Path bookkeeping ──────────────────────────────────────────────────

    /// Install a freshly planned path, resetting hop and denial counters.
    pub fn set_path(&mut self, path: Path) {
        self.path = Some(path);
        self.path_index = 0;
        self.denial_streak = 0;
    }

    /// Abandon the current path (re-plan or deadlock break).
    pub fn clear_path(&mut self) {
        self.path = None;
        self.path_index = 0;
        self.denial_streak = 0;
    }

    /// The `(lane, destination_vertex)` of the next hop, or `None` when the
    /// path is finished or absent.
    pub fn current_hop(&self) -> Option<(LaneId, VertexId)> {
        self.path.as_ref()?.hop(self.path_index)
    }

    /// `true` once every hop of the active path has been completed.
    pub fn path_complete(&self) -> bool {
        match &self.path {
            Some(p) => self.path_index >= p.hop_count(),
            None => true,
        }
    }

    // ── Denial / re-plan counters ─────────────────────────────────────────

    /// Record one denied tick; returns the new streak length.
    pub fn record_denial(&mut self) -> u32 {
        self.denial_streak += 1;
        self.denial_streak
    }

    pub fn clear_denials(&mut self) {
        self.denial_streak = 0;
    }

    /// Reset per-task counters once a task finishes.
    pub fn finish_task(&mut self) {
        self.replan_attempts = 0;
        self.denial_streak = 0;
        self.clear_path();
    }
}
