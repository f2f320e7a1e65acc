//! The `FleetManager` and its tick loop.

use std::collections::{BTreeMap, VecDeque};

use fc_core::{FleetClock, FleetConfig, RobotColor, RobotId, Tick};
use fc_graph::NavGraph;
use fc_plan::{AStarPlanner, PlanError, Planner};
use fc_robot::{Position, Robot, RobotState};
use fc_traffic::{RequestOutcome, Resource, TrafficManager};

use crate::{
    FleetCommand, FleetEvent, FleetObserver, FleetSnapshot, RobotSnapshot, SimError, SimResult,
};

// ── Pending deadlock resolution ───────────────────────────────────────────────

/// A deadlock detected while stepping one robot, resolved by the caller
/// after the robot borrow ends (the victim may be a different robot).
struct Pending {
    victim: RobotId,
    cycle_len: u32,
}

// ── FleetManager ──────────────────────────────────────────────────────────────

/// The central coordinator.
///
/// `FleetManager<P>` owns the graph, the traffic manager, and every robot,
/// and drives the per-tick loop:
///
/// 1. **Commands**: drain queued `Spawn` / `Assign` / `Remove` commands in
///    submission order.
/// 2. **Step**: step each robot in ascending id order (id order is spawn
///    order is priority order, so same-tick contention resolves
///    deterministically in favor of the older robot).
/// 3. **Publish**: deliver events to the observer, then a [`FleetSnapshot`]
///    at the configured interval.
///
/// Per-robot outcomes (denials, unreachable goals, broken deadlocks) are
/// events, never errors, and a command that fails validation is rejected
/// with a [`FleetEvent::CommandRejected`] event rather than an error, so
/// one bad command never stalls the rest of the batch or the tick.
pub struct FleetManager<P: Planner> {
    /// Engine configuration.
    pub config: FleetConfig,

    /// Tick counter and wall-clock mapping.
    pub clock: FleetClock,

    graph: NavGraph,
    planner: P,
    traffic: TrafficManager,

    /// All robots, keyed by id.  BTreeMap iteration order doubles as the
    /// priority-ordered stepping order.
    robots: BTreeMap<RobotId, Robot>,

    /// Commands submitted since the last tick started.
    pending: VecDeque<FleetCommand>,

    next_robot: u32,

    /// Conflict events counted during the most recent tick.
    last_conflicts: u32,
}

impl FleetManager<AStarPlanner> {
    /// Create a fleet manager with the default A* planner.
    pub fn new(graph: NavGraph, config: FleetConfig) -> Self {
        Self::with_planner(graph, config, AStarPlanner)
    }
}

impl<P: Planner> FleetManager<P> {
    /// Create a fleet manager with a custom planner implementation.
    pub fn with_planner(graph: NavGraph, config: FleetConfig, planner: P) -> Self {
        let clock = config.make_clock();
        let traffic = TrafficManager::new(config.min_separation, config.congestion_penalty);
        Self {
            config,
            clock,
            graph,
            planner,
            traffic,
            robots: BTreeMap::new(),
            pending: VecDeque::new(),
            next_robot: 0,
            last_conflicts: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Queue a command for the start of the next tick.
    pub fn submit(&mut self, command: FleetCommand) {
        self.pending.push_back(command);
    }

    /// Run `ticks` ticks, then fire `on_sim_end`.
    pub fn run<O: FleetObserver>(&mut self, ticks: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..ticks {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Execute exactly one tick.
    pub fn step<O: FleetObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let mut events = Vec::new();
        self.drain_commands(now, &mut events);

        let ids: Vec<RobotId> = self.robots.keys().copied().collect();
        let stepped = ids.len();
        for id in ids {
            if let Some(pending) = self.step_robot(id, now, &mut events)? {
                let victim = pending.victim;
                self.resolve_deadlock(pending, now, &mut events)?;
                if victim != id {
                    // The requester stays blocked until the victim's
                    // resources actually free up.
                    if let Some(robot) = self.robots.get_mut(&id) {
                        robot.record_denial();
                        if let Some((from, to)) = robot.set_state(RobotState::Waiting)? {
                            events.push(FleetEvent::StateChanged { robot: id, from, to });
                        }
                    }
                }
            }
        }

        self.last_conflicts = events
            .iter()
            .filter(|e| matches!(e, FleetEvent::ConflictDetected { .. }))
            .count() as u32;

        for event in &events {
            observer.on_event(now, event);
        }

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0 % interval == 0 {
            let snapshot = self.snapshot();
            observer.on_snapshot(&snapshot);
        }

        observer.on_tick_end(now, stepped);
        self.clock.advance();
        Ok(())
    }

    /// Capture the current fleet state.  Robots appear in ascending id
    /// order.
    pub fn snapshot(&self) -> FleetSnapshot {
        let tick = self.clock.current_tick;
        let robots = self
            .robots
            .values()
            .map(|r| {
                let (x, y, lane, progress) = match r.position {
                    Position::AtVertex(v) => {
                        let p = self.graph.vertex_pos[v.index()];
                        (p.x, p.y, None, 0.0)
                    }
                    Position::OnLane { lane, from, to, progress } => {
                        let a = self.graph.vertex_pos[from.index()];
                        let b = self.graph.vertex_pos[to.index()];
                        let p = a.lerp(b, progress);
                        (p.x, p.y, Some(lane), progress)
                    }
                };
                RobotSnapshot {
                    robot: r.id,
                    state: r.state(),
                    x,
                    y,
                    vertex: r.position.anchor_vertex(),
                    lane,
                    progress,
                    destination: r.current_destination(),
                    queued_tasks: r.tasks.len(),
                    color: r.color,
                }
            })
            .collect();
        FleetSnapshot {
            tick,
            unix_secs: self.clock.unix_secs_at(tick),
            robots,
            conflicts: self.last_conflicts,
        }
    }

    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(&id)
    }

    pub fn robots(&self) -> impl Iterator<Item = &Robot> {
        self.robots.values()
    }

    pub fn robot_count(&self) -> usize {
        self.robots.len()
    }

    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    pub fn traffic(&self) -> &TrafficManager {
        &self.traffic
    }

    // ── Command intake ────────────────────────────────────────────────────

    /// Drain queued commands, applying each independently.  Validation
    /// failures become `CommandRejected` events; the rest of the batch
    /// still applies and the tick proceeds.
    fn drain_commands(&mut self, now: Tick, events: &mut Vec<FleetEvent>) {
        while let Some(command) = self.pending.pop_front() {
            if let Err(err) = self.apply_command(command, now, events) {
                events.push(FleetEvent::CommandRejected { reason: err.to_string() });
            }
        }
    }

    fn apply_command(
        &mut self,
        command: FleetCommand,
        now: Tick,
        events: &mut Vec<FleetEvent>,
    ) -> SimResult<()> {
        match command {
            FleetCommand::Spawn { start } => {
                self.graph.check_vertex(start)?;
                let id = RobotId(self.next_robot);
                let priority = self.next_robot;
                self.traffic.register_robot(id, priority);
                match self.traffic.request(id, Resource::Vertex(start), now) {
                    RequestOutcome::Granted => {}
                    RequestOutcome::Denied { holder }
                    | RequestOutcome::WouldDeadlock { victim: holder, .. } => {
                        self.traffic.remove_robot(id);
                        return Err(SimError::SpawnBlocked { vertex: start, holder });
                    }
                }
                self.next_robot += 1;
                let color = RobotColor::for_robot(self.config.seed, id);
                self.robots.insert(id, Robot::new(id, priority, start, color));
                events.push(FleetEvent::RobotSpawned { robot: id, vertex: start });
            }
            FleetCommand::Assign { robot, destination } => {
                self.graph.check_vertex(destination)?;
                let r = self
                    .robots
                    .get_mut(&robot)
                    .ok_or(SimError::UnknownRobot(robot))?;
                r.assign_task(destination)?;
                events.push(FleetEvent::TaskAssigned { robot, destination });
            }
            FleetCommand::Remove { robot } => {
                if self.robots.remove(&robot).is_none() {
                    return Err(SimError::UnknownRobot(robot));
                }
                self.traffic.remove_robot(robot);
                events.push(FleetEvent::RobotRemoved { robot });
            }
        }
        Ok(())
    }

    // ── Robot stepping ────────────────────────────────────────────────────

    fn step_robot(
        &mut self,
        id: RobotId,
        now: Tick,
        events: &mut Vec<FleetEvent>,
    ) -> SimResult<Option<Pending>> {
        let graph = &self.graph;
        let planner = &self.planner;
        let config = &self.config;
        let traffic = &mut self.traffic;
        let Some(robot) = self.robots.get_mut(&id) else {
            return Ok(None);
        };

        match robot.state() {
            RobotState::Unknown => Ok(None),

            RobotState::Charging => {
                // A new task ends the charge early.
                if now >= robot.charge_until || !robot.tasks.is_empty() {
                    if let Some((from, to)) = robot.set_state(RobotState::Idle)? {
                        events.push(FleetEvent::StateChanged { robot: id, from, to });
                    }
                    if !robot.tasks.is_empty() {
                        return plan_next_task(robot, planner, graph, traffic, events);
                    }
                }
                Ok(None)
            }

            RobotState::Idle => plan_next_task(robot, planner, graph, traffic, events),

            RobotState::Moving => match robot.position {
                Position::AtVertex(_) => {
                    try_enter_lane(robot, graph, config, traffic, now, events)
                }
                Position::OnLane { .. } => {
                    advance_on_lane(robot, graph, config, traffic, now, events)
                }
            },

            RobotState::Waiting => {
                if now < robot.backoff_until {
                    return Ok(None);
                }
                let needs_replan =
                    robot.path.is_none() || robot.denial_streak > config.replan_threshold;
                if needs_replan && matches!(robot.position, Position::AtVertex(_)) {
                    return replan(robot, planner, graph, config, traffic, now, events);
                }
                match robot.position {
                    Position::AtVertex(_) => {
                        try_enter_lane(robot, graph, config, traffic, now, events)
                    }
                    Position::OnLane { .. } => {
                        advance_on_lane(robot, graph, config, traffic, now, events)
                    }
                }
            }
        }
    }

    /// Break the cycle around `victim`: release everything it holds
    /// (standing vertex included, so the waiter is guaranteed to make
    /// progress), re-queue its goal, and impose a backoff proportional to
    /// the cycle length so the survivors clear out first.  The victim may
    /// transiently share its vertex with the robot that claims it; the
    /// backoff plus re-plan moves it away.
    fn resolve_deadlock(
        &mut self,
        pending: Pending,
        now: Tick,
        events: &mut Vec<FleetEvent>,
    ) -> SimResult<()> {
        let Pending { victim, cycle_len } = pending;
        events.push(FleetEvent::DeadlockResolved { victim, cycle_len });

        self.traffic.break_deadlock(victim, None);
        let Some(robot) = self.robots.get_mut(&victim) else {
            return Ok(());
        };

        if let Some(goal) = robot.path.as_ref().map(|p| p.goal()) {
            robot.tasks.push_front(goal);
        }
        robot.clear_path();
        robot.backoff_until = now.offset(cycle_len as u64);
        if let Some((from, to)) = robot.set_state(RobotState::Waiting)? {
            events.push(FleetEvent::StateChanged { robot: victim, from, to });
        }
        Ok(())
    }
}

// ── Step helpers ──────────────────────────────────────────────────────────────
//
// Free functions so a robot borrow and the traffic manager borrow stay
// visibly disjoint.

/// Idle robot: pop the next queued destination and plan toward it.
fn plan_next_task(
    robot: &mut Robot,
    planner: &dyn Planner,
    graph: &NavGraph,
    traffic: &mut TrafficManager,
    events: &mut Vec<FleetEvent>,
) -> SimResult<Option<Pending>> {
    let Some(&dest) = robot.tasks.front() else {
        return Ok(None);
    };
    let start = robot.position.anchor_vertex();
    if dest == start {
        robot.tasks.pop_front();
        events.push(FleetEvent::TaskCompleted { robot: robot.id, destination: dest });
        return Ok(None);
    }
    match planner.plan(graph, start, dest, &traffic.congestion_view(robot.id)) {
        Ok(path) => {
            robot.tasks.pop_front();
            robot.set_path(path);
            if let Some((from, to)) = robot.set_state(RobotState::Moving)? {
                events.push(FleetEvent::StateChanged { robot: robot.id, from, to });
            }
            Ok(None)
        }
        Err(PlanError::Unreachable { from, to }) => {
            // Report and drop; retrying a disconnected goal cannot succeed.
            robot.tasks.pop_front();
            events.push(FleetEvent::PathUnreachable { robot: robot.id, from, to });
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Robot standing at a vertex with an active path: acquire the next lane
/// and arrival vertex, then enter the lane if spacing allows.
fn try_enter_lane(
    robot: &mut Robot,
    graph: &NavGraph,
    config: &FleetConfig,
    traffic: &mut TrafficManager,
    now: Tick,
    events: &mut Vec<FleetEvent>,
) -> SimResult<Option<Pending>> {
    let Some((lane, next_vertex)) = robot.current_hop() else {
        if let Some((from, to)) = robot.set_state(RobotState::Moving)? {
            events.push(FleetEvent::StateChanged { robot: robot.id, from, to });
        }
        return complete_path(robot, graph, config, now, events);
    };

    // Lane first, then the arrival vertex.  Re-requests of already-held
    // resources are grants, so a waiting robot retries the same pair each
    // tick without churn.
    for resource in [Resource::Lane(lane), Resource::Vertex(next_vertex)] {
        match traffic.request(robot.id, resource, now) {
            RequestOutcome::Granted => {}
            RequestOutcome::Denied { holder } => {
                robot.record_denial();
                events.push(FleetEvent::ConflictDetected {
                    robot: robot.id,
                    resource,
                    holder,
                });
                if let Some((from, to)) = robot.set_state(RobotState::Waiting)? {
                    events.push(FleetEvent::StateChanged { robot: robot.id, from, to });
                }
                return Ok(None);
            }
            RequestOutcome::WouldDeadlock { victim, cycle_len } => {
                return Ok(Some(Pending { victim, cycle_len: cycle_len as u32 }));
            }
        }
    }

    let lane_len = graph.lane_cost[lane.index()];
    let step = step_fraction(config.robot_speed, graph.lane_speed_limit[lane.index()], lane_len);
    if !traffic.check_safe_distance(robot.id, lane, step.min(1.0), lane_len) {
        robot.record_denial();
        if let Some((from, to)) = robot.set_state(RobotState::Waiting)? {
            events.push(FleetEvent::StateChanged { robot: robot.id, from, to });
        }
        return Ok(None);
    }

    let departure = robot.position.anchor_vertex();
    robot.clear_denials();
    if let Some((from, to)) = robot.set_state(RobotState::Moving)? {
        events.push(FleetEvent::StateChanged { robot: robot.id, from, to });
    }
    if step >= 1.0 {
        // Short lane: crossed within a single tick.
        robot.position = Position::OnLane { lane, from: departure, to: next_vertex, progress: 1.0 };
        return arrive(robot, graph, config, traffic, now, events);
    }
    robot.position = Position::OnLane { lane, from: departure, to: next_vertex, progress: step };
    traffic.update_position(robot.id, lane, step);
    Ok(None)
}

/// Robot mid-lane: advance by one tick of travel, stalling if another robot
/// on the lane is too close.
fn advance_on_lane(
    robot: &mut Robot,
    graph: &NavGraph,
    config: &FleetConfig,
    traffic: &mut TrafficManager,
    now: Tick,
    events: &mut Vec<FleetEvent>,
) -> SimResult<Option<Pending>> {
    let Position::OnLane { lane, from, to, progress } = robot.position else {
        return Ok(None);
    };
    let lane_len = graph.lane_cost[lane.index()];
    let step = step_fraction(config.robot_speed, graph.lane_speed_limit[lane.index()], lane_len);
    let candidate = (progress + step).min(1.0);

    if !traffic.check_safe_distance(robot.id, lane, candidate, lane_len) {
        robot.record_denial();
        if let Some((f, t)) = robot.set_state(RobotState::Waiting)? {
            events.push(FleetEvent::StateChanged { robot: robot.id, from: f, to: t });
        }
        return Ok(None);
    }

    robot.clear_denials();
    if let Some((f, t)) = robot.set_state(RobotState::Moving)? {
        events.push(FleetEvent::StateChanged { robot: robot.id, from: f, to: t });
    }
    if candidate >= 1.0 {
        robot.position = Position::OnLane { lane, from, to, progress: 1.0 };
        return arrive(robot, graph, config, traffic, now, events);
    }
    robot.position = Position::OnLane { lane, from, to, progress: candidate };
    traffic.update_position(robot.id, lane, candidate);
    Ok(None)
}

/// Arrival: the robot reaches the far vertex and hands back the departure
/// vertex and the lane.  The arrival vertex, already held, becomes its new
/// standing vertex.
fn arrive(
    robot: &mut Robot,
    graph: &NavGraph,
    config: &FleetConfig,
    traffic: &mut TrafficManager,
    now: Tick,
    events: &mut Vec<FleetEvent>,
) -> SimResult<Option<Pending>> {
    let Position::OnLane { lane, from, to, .. } = robot.position else {
        return Ok(None);
    };
    robot.position = Position::AtVertex(to);
    traffic.clear_position(robot.id);
    traffic.release(robot.id, Resource::Vertex(from));
    traffic.release(robot.id, Resource::Lane(lane));
    robot.path_index += 1;
    if robot.path_complete() {
        return complete_path(robot, graph, config, now, events);
    }
    Ok(None)
}

/// Task finished: park on a charger or drop back to idle, then reset
/// per-task counters.
fn complete_path(
    robot: &mut Robot,
    graph: &NavGraph,
    config: &FleetConfig,
    now: Tick,
    events: &mut Vec<FleetEvent>,
) -> SimResult<Option<Pending>> {
    let here = robot.position.anchor_vertex();
    events.push(FleetEvent::TaskCompleted { robot: robot.id, destination: here });
    robot.finish_task();
    if graph.is_charger(here)? {
        robot.charge_until = now.offset(config.charge_duration_ticks);
        if let Some((from, to)) = robot.set_state(RobotState::Charging)? {
            events.push(FleetEvent::StateChanged { robot: robot.id, from, to });
        }
    } else if let Some((from, to)) = robot.set_state(RobotState::Idle)? {
        events.push(FleetEvent::StateChanged { robot: robot.id, from, to });
    }
    Ok(None)
}

/// Blocked past the threshold (or left without a path by a deadlock
/// break): plan a fresh route around the current congestion.
fn replan(
    robot: &mut Robot,
    planner: &dyn Planner,
    graph: &NavGraph,
    config: &FleetConfig,
    traffic: &mut TrafficManager,
    now: Tick,
    events: &mut Vec<FleetEvent>,
) -> SimResult<Option<Pending>> {
    let Some(goal) = robot.current_destination() else {
        return Ok(None);
    };
    robot.replan_attempts += 1;
    let start = robot.position.anchor_vertex();

    if robot.replan_attempts > config.max_replan_attempts {
        traffic.break_deadlock(robot.id, Some(Resource::Vertex(start)));
        robot.clear_path();
        if let Some((from, to)) = robot.set_state(RobotState::Unknown)? {
            events.push(FleetEvent::StateChanged { robot: robot.id, from, to });
        }
        events.push(FleetEvent::RobotLost { robot: robot.id });
        return Ok(None);
    }

    if start == goal {
        // A deadlock break re-queued a goal the robot already stands on.
        if robot.path.is_none() {
            robot.tasks.pop_front();
        }
        if let Some((from, to)) = robot.set_state(RobotState::Moving)? {
            events.push(FleetEvent::StateChanged { robot: robot.id, from, to });
        }
        return complete_path(robot, graph, config, now, events);
    }

    let goal_from_queue = robot.path.is_none();
    match planner.plan(graph, start, goal, &traffic.congestion_view(robot.id)) {
        Ok(path) => {
            if goal_from_queue {
                robot.tasks.pop_front();
            }
            // Hand back everything but the standing vertex so the old
            // route's partial acquisitions stop blocking others.
            traffic.break_deadlock(robot.id, Some(Resource::Vertex(start)));
            robot.set_path(path);
            try_enter_lane(robot, graph, config, traffic, now, events)
        }
        Err(PlanError::Unreachable { from, to }) => {
            // Finite congestion penalties cannot disconnect a reachable
            // goal, so this only fires on a genuinely severed graph; keep
            // the old route and keep retrying it.
            events.push(FleetEvent::PathUnreachable { robot: robot.id, from, to });
            robot.clear_denials();
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Per-tick progress fraction for a lane: the robot's nominal speed, capped
/// by the lane's limit when one is set, divided by the lane length.
fn step_fraction(robot_speed: f32, speed_limit: f32, lane_len: f32) -> f32 {
    let speed = if speed_limit > 0.0 {
        robot_speed.min(speed_limit)
    } else {
        robot_speed
    };
    if lane_len <= f32::EPSILON {
        1.0
    } else {
        speed / lane_len
    }
}
