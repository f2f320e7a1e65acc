//! The traffic manager: request/release arbitration, spacing, deadlocks.

use rustc_hash::FxHashMap;

use fc_core::{LaneId, RobotId, Tick, VertexId};
use fc_plan::CongestionModel;

use crate::{ReservationTable, Resource, WaitForGraph};

// ── RequestOutcome ────────────────────────────────────────────────────────────

/// Result of a reservation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The robot now holds the resource.
    Granted,

    /// Another robot holds it; the requester has been recorded as waiting.
    Denied { holder: RobotId },

    /// Granting is impossible and waiting would close a cycle in the
    /// wait-for graph.  `victim` is the robot the resolution protocol
    /// chose to break the cycle (lowest priority — i.e. newest — member).
    WouldDeadlock { victim: RobotId, cycle_len: usize },
}

// ── TrafficManager ────────────────────────────────────────────────────────────

/// Owns the reservation table and the wait-for graph.
///
/// Within a tick, requests are processed in ascending priority order by the
/// fleet manager; when two robots contend for the same resource on the same
/// tick, the higher-priority (lower value) robot therefore requests first
/// and wins — deterministic, and starvation-aware because priority is
/// monotonic spawn order, never re-randomized.
pub struct TrafficManager {
    table: ReservationTable,
    waits: WaitForGraph,

    /// Robot → priority value (lower wins).  Registered at spawn.
    priorities: FxHashMap<RobotId, u32>,

    /// Robot → (lane, progress fraction) for robots currently on a lane.
    lane_positions: FxHashMap<RobotId, (LaneId, f32)>,

    /// Minimum separation in graph-distance units between two robots on the
    /// same lane.
    min_separation: f32,

    /// Planning penalty for resources held by another robot.
    congestion_penalty: f32,
}

impl TrafficManager {
    pub fn new(min_separation: f32, congestion_penalty: f32) -> Self {
        Self {
            table: ReservationTable::new(),
            waits: WaitForGraph::new(),
            priorities: FxHashMap::default(),
            lane_positions: FxHashMap::default(),
            min_separation,
            congestion_penalty,
        }
    }

    // ── Fleet membership ──────────────────────────────────────────────────

    /// Register a robot and its priority.  Must precede any request.
    pub fn register_robot(&mut self, robot: RobotId, priority: u32) {
        self.priorities.insert(robot, priority);
    }

    /// Remove a robot entirely: releases every resource it holds and drops
    /// all of its wait-for edges, so it cannot be a residual cause of a
    /// deadlock detection.  Returns the released resources.
    pub fn remove_robot(&mut self, robot: RobotId) -> Vec<Resource> {
        self.waits.remove_robot(robot);
        self.lane_positions.remove(&robot);
        self.priorities.remove(&robot);
        self.table.release_all(robot)
    }

    // ── Reservation protocol ──────────────────────────────────────────────

    /// Request exclusive use of `resource` for `robot` at `tick`.
    ///
    /// On denial the robot is recorded in the wait-for graph and a cycle
    /// check runs from it; the check is a chain walk bounded by the number
    /// of currently-waiting robots.
    pub fn request(&mut self, robot: RobotId, resource: Resource, tick: Tick) -> RequestOutcome {
        if self.table.try_reserve(robot, resource, tick) {
            self.waits.clear_wait(robot);
            return RequestOutcome::Granted;
        }

        // try_reserve only fails when a different robot holds it.
        let holder = match self.table.holder(resource) {
            Some(h) => h,
            None => return RequestOutcome::Granted,
        };
        self.waits.set_wait(robot, holder, resource);

        if let Some(cycle) = self.waits.find_cycle(robot) {
            let victim = self.pick_victim(&cycle);
            return RequestOutcome::WouldDeadlock { victim, cycle_len: cycle.len() };
        }

        RequestOutcome::Denied { holder }
    }

    /// Release `resource` if held by `robot`.  Idempotent.
    pub fn release(&mut self, robot: RobotId, resource: Resource) {
        self.table.release(robot, resource);
    }

    /// Release everything `victim` holds except `keep`, and clear its wait
    /// edge.  This is the deadlock-breaking action: with `keep = None` the
    /// victim yields even its standing vertex, which guarantees the robots
    /// waiting on it can make progress.  Re-plan cleanup passes the standing
    /// vertex as `keep` instead, since no one is being broken out there.
    pub fn break_deadlock(&mut self, victim: RobotId, keep: Option<Resource>) -> Vec<Resource> {
        let released = self.table.release_all(victim);
        let mut dropped = Vec::with_capacity(released.len());
        for resource in released {
            if Some(resource) == keep {
                // Re-claim the standing vertex; it was never contested by
                // the victim's own movement.
                self.table.try_reserve(victim, resource, Tick::ZERO);
            } else {
                dropped.push(resource);
            }
        }
        self.waits.clear_wait(victim);
        dropped
    }

    // ── Safe-distance spacing ─────────────────────────────────────────────

    /// Record that `robot` is on `lane` at `progress ∈ [0, 1]`.
    pub fn update_position(&mut self, robot: RobotId, lane: LaneId, progress: f32) {
        self.lane_positions.insert(robot, (lane, progress));
    }

    /// Record that `robot` left its lane (arrived at a vertex).
    pub fn clear_position(&mut self, robot: RobotId) {
        self.lane_positions.remove(&robot);
    }

    /// Would placing `robot` at `candidate_progress` on `lane` (of length
    /// `lane_len`) keep it at least `min_separation` away from every other
    /// robot on that lane?
    ///
    /// Independent of vertex-level reservations: this is what prevents
    /// rear-end contact on long lanes.
    pub fn check_safe_distance(
        &self,
        robot: RobotId,
        lane: LaneId,
        candidate_progress: f32,
        lane_len: f32,
    ) -> bool {
        self.lane_positions
            .iter()
            .filter(|&(&other, &(l, _))| other != robot && l == lane)
            .all(|(_, &(_, progress))| {
                (progress - candidate_progress).abs() * lane_len >= self.min_separation
            })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn table(&self) -> &ReservationTable {
        &self.table
    }

    pub fn waits(&self) -> &WaitForGraph {
        &self.waits
    }

    /// A [`CongestionModel`] view of the table from `robot`'s perspective:
    /// resources held by *other* robots are penalized, its own are free.
    pub fn congestion_view(&self, robot: RobotId) -> CongestionView<'_> {
        CongestionView { traffic: self, robot }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// The cycle member with the weakest claim: largest priority value,
    /// ties broken by larger robot id.  Deterministic for reproducible
    /// deadlock tests.
    fn pick_victim(&self, cycle: &[RobotId]) -> RobotId {
        debug_assert!(!cycle.is_empty());
        cycle
            .iter()
            .copied()
            .max_by_key(|&r| (self.priorities.get(&r).copied().unwrap_or(u32::MAX), r))
            .unwrap_or(RobotId::INVALID)
    }
}

// ── CongestionView ────────────────────────────────────────────────────────────

/// Borrowed view of the reservation table used by the planner.
pub struct CongestionView<'a> {
    traffic: &'a TrafficManager,
    robot: RobotId,
}

impl CongestionModel for CongestionView<'_> {
    fn lane_penalty(&self, lane: LaneId) -> f32 {
        match self.traffic.table.holder(Resource::Lane(lane)) {
            Some(holder) if holder != self.robot => self.traffic.congestion_penalty,
            _ => 0.0,
        }
    }

    fn vertex_penalty(&self, vertex: VertexId) -> f32 {
        match self.traffic.table.holder(Resource::Vertex(vertex)) {
            Some(holder) if holder != self.robot => self.traffic.congestion_penalty,
            _ => 0.0,
        }
    }
}
