//! Integration tests for fc-sim.

use fc_core::{FleetConfig, Point, RobotId, Tick, VertexId};
use fc_graph::{NavGraph, NavGraphBuilder};
use fc_plan::AStarPlanner;
use fc_robot::{Position, RobotState};
use fc_traffic::Resource;

use crate::{
    FleetCommand, FleetEvent, FleetManager, FleetObserver, FleetSnapshot, NoopObserver,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config() -> FleetConfig {
    FleetConfig {
        seed: 42,
        robot_speed: 1.0,
        min_separation: 0.25,
        congestion_penalty: 25.0,
        replan_threshold: 3,
        max_replan_attempts: 5,
        charge_duration_ticks: 2,
        snapshot_interval_ticks: 1,
        ..FleetConfig::default()
    }
}

fn fleet(graph: NavGraph) -> FleetManager<AStarPlanner> {
    FleetManager::new(graph, test_config())
}

/// V0 ─ V1 ─ V2 ─ V3 at unit spacing, bidirectional.
fn line_graph() -> NavGraph {
    let mut b = NavGraphBuilder::new();
    let v: Vec<VertexId> = (0..4).map(|i| b.add_vertex(Point::new(i as f32, 0.0))).collect();
    for w in v.windows(2) {
        b.add_bidirectional(w[0], w[1], 0.0);
    }
    b.build()
}

/// Two entries feeding a shared vertex, with an exit:
/// V0 → V2, V1 → V2, V2 → V3 (directed).
fn merge_graph() -> NavGraph {
    let mut b = NavGraphBuilder::new();
    let v0 = b.add_vertex(Point::new(0.0, 0.0));
    let v1 = b.add_vertex(Point::new(0.0, 2.0));
    let v2 = b.add_vertex(Point::new(1.0, 1.0));
    let v3 = b.add_vertex(Point::new(2.0, 1.0));
    b.add_lane(v0, v2, 0.0);
    b.add_lane(v1, v2, 0.0);
    b.add_lane(v2, v3, 0.0);
    b.build()
}

/// Corridor a ─ b ─ c with a spur b ─ d, all bidirectional.  Vertex ids in
/// creation order: a=0, b=1, c=2, d=3.
fn spur_graph() -> NavGraph {
    let mut b = NavGraphBuilder::new();
    let a = b.add_vertex(Point::new(0.0, 0.0));
    let bb = b.add_vertex(Point::new(1.0, 0.0));
    let c = b.add_vertex(Point::new(2.0, 0.0));
    let d = b.add_vertex(Point::new(1.0, 1.0));
    b.add_bidirectional(a, bb, 0.0);
    b.add_bidirectional(bb, c, 0.0);
    b.add_bidirectional(bb, d, 0.0);
    b.build()
}

/// Direct route a ─ m ─ g plus a detour a ─ d ─ g, and a feeder x ─ m for a
/// blocking robot.  Ids: a=0, m=1, g=2, d=3, x=4.
fn detour_graph() -> NavGraph {
    let mut b = NavGraphBuilder::new();
    let a = b.add_vertex(Point::new(0.0, 0.0));
    let m = b.add_vertex(Point::new(1.0, 0.0));
    let g = b.add_vertex(Point::new(2.0, 0.0));
    let d = b.add_vertex(Point::new(1.0, 1.0));
    let x = b.add_vertex(Point::new(1.0, -1.0));
    b.add_bidirectional(a, m, 0.0);
    b.add_bidirectional(m, g, 0.0);
    b.add_bidirectional(a, d, 0.0);
    b.add_bidirectional(d, g, 0.0);
    b.add_bidirectional(x, m, 0.0);
    b.build()
}

/// Collects every event and snapshot it sees.
#[derive(Default)]
struct Recorder {
    events: Vec<FleetEvent>,
    snapshots: Vec<FleetSnapshot>,
}

impl FleetObserver for Recorder {
    fn on_event(&mut self, _tick: Tick, event: &FleetEvent) {
        self.events.push(event.clone());
    }

    fn on_snapshot(&mut self, snapshot: &FleetSnapshot) {
        self.snapshots.push(snapshot.clone());
    }
}

fn run_ticks(fleet: &mut FleetManager<AStarPlanner>, n: u64, recorder: &mut Recorder) {
    for _ in 0..n {
        fleet.step(recorder).unwrap();
    }
}

// ── Command intake ────────────────────────────────────────────────────────────

mod commands {
    use super::*;

    #[test]
    fn spawn_reserves_the_start_vertex() {
        let mut fleet = fleet(line_graph());
        fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
        fleet.step(&mut NoopObserver).unwrap();

        let robot = fleet.robot(RobotId(0)).unwrap();
        assert_eq!(robot.state(), RobotState::Idle);
        assert_eq!(robot.position, Position::AtVertex(VertexId(0)));
        assert_eq!(
            fleet.traffic().table().holder(Resource::Vertex(VertexId(0))),
            Some(RobotId(0))
        );
    }

    #[test]
    fn robot_ids_follow_spawn_order() {
        let mut fleet = fleet(line_graph());
        fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
        fleet.submit(FleetCommand::Spawn { start: VertexId(2) });
        fleet.step(&mut NoopObserver).unwrap();

        assert_eq!(fleet.robot_count(), 2);
        assert_eq!(fleet.robot(RobotId(0)).unwrap().priority, 0);
        assert_eq!(fleet.robot(RobotId(1)).unwrap().priority, 1);
    }

    #[test]
    fn spawn_on_an_occupied_vertex_is_rejected() {
        let mut fleet = fleet(line_graph());
        let mut rec = Recorder::default();
        fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
        fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
        run_ticks(&mut fleet, 1, &mut rec);

        assert_eq!(fleet.robot_count(), 1);
        assert!(rec.events.iter().any(|e| matches!(
            e,
            FleetEvent::CommandRejected { reason } if reason.contains("occupied by R0")
        )));
    }

    #[test]
    fn assign_to_unknown_robot_is_rejected() {
        let mut fleet = fleet(line_graph());
        let mut rec = Recorder::default();
        fleet.submit(FleetCommand::Assign { robot: RobotId(7), destination: VertexId(1) });
        run_ticks(&mut fleet, 1, &mut rec);

        assert!(rec.events.iter().any(|e| matches!(
            e,
            FleetEvent::CommandRejected { reason } if reason.contains("unknown robot R7")
        )));
    }

    #[test]
    fn a_rejected_command_does_not_abort_the_batch() {
        let mut fleet = fleet(line_graph());
        let mut rec = Recorder::default();
        fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
        fleet.submit(FleetCommand::Assign { robot: RobotId(7), destination: VertexId(1) });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: VertexId(2) });
        run_ticks(&mut fleet, 1, &mut rec);

        // The spawn before the bad command landed, and its event was
        // delivered alongside the rejection.
        assert!(rec.events.contains(&FleetEvent::RobotSpawned {
            robot: RobotId(0),
            vertex: VertexId(0),
        }));
        assert!(rec.events.iter().any(|e| matches!(e, FleetEvent::CommandRejected { .. })));

        // The command after the bad one applied too, and the robot still
        // stepped this tick.
        assert_eq!(fleet.robot(RobotId(0)).unwrap().state(), RobotState::Moving);
    }

    #[test]
    fn remove_frees_held_resources() {
        let mut fleet = fleet(line_graph());
        let mut rec = Recorder::default();
        fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
        run_ticks(&mut fleet, 1, &mut rec);

        fleet.submit(FleetCommand::Remove { robot: RobotId(0) });
        run_ticks(&mut fleet, 1, &mut rec);

        assert_eq!(fleet.robot_count(), 0);
        assert_eq!(fleet.traffic().table().holder(Resource::Vertex(VertexId(0))), None);
        assert!(rec.events.contains(&FleetEvent::RobotRemoved { robot: RobotId(0) }));
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

mod movement {
    use super::*;

    #[test]
    fn plans_the_exact_line_path() {
        let mut fleet = fleet(line_graph());
        fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: VertexId(3) });
        fleet.step(&mut NoopObserver).unwrap();

        let robot = fleet.robot(RobotId(0)).unwrap();
        assert_eq!(robot.state(), RobotState::Moving);
        let path = robot.path.as_ref().unwrap();
        assert_eq!(
            path.vertices,
            vec![VertexId(0), VertexId(1), VertexId(2), VertexId(3)]
        );
    }

    #[test]
    fn drives_to_the_goal_and_goes_idle() {
        let mut fleet = fleet(line_graph());
        let mut rec = Recorder::default();
        fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: VertexId(3) });
        run_ticks(&mut fleet, 6, &mut rec);

        let robot = fleet.robot(RobotId(0)).unwrap();
        assert_eq!(robot.state(), RobotState::Idle);
        assert_eq!(robot.position, Position::AtVertex(VertexId(3)));
        assert!(rec.events.contains(&FleetEvent::TaskCompleted {
            robot: RobotId(0),
            destination: VertexId(3),
        }));

        // Only the final standing vertex is still held.
        assert_eq!(fleet.traffic().table().len(), 1);
        assert_eq!(
            fleet.traffic().table().holder(Resource::Vertex(VertexId(3))),
            Some(RobotId(0))
        );
    }

    #[test]
    fn task_for_the_current_vertex_completes_immediately() {
        let mut fleet = fleet(line_graph());
        let mut rec = Recorder::default();
        fleet.submit(FleetCommand::Spawn { start: VertexId(1) });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: VertexId(1) });
        run_ticks(&mut fleet, 1, &mut rec);

        assert_eq!(fleet.robot(RobotId(0)).unwrap().state(), RobotState::Idle);
        assert!(rec.events.contains(&FleetEvent::TaskCompleted {
            robot: RobotId(0),
            destination: VertexId(1),
        }));
    }

    #[test]
    fn unreachable_goal_is_reported_and_dropped() {
        let mut b = NavGraphBuilder::new();
        let v0 = b.add_vertex(Point::new(0.0, 0.0));
        let v1 = b.add_vertex(Point::new(1.0, 0.0));
        let island = b.add_vertex(Point::new(9.0, 9.0));
        b.add_bidirectional(v0, v1, 0.0);

        let mut fleet = fleet(b.build());
        let mut rec = Recorder::default();
        fleet.submit(FleetCommand::Spawn { start: v0 });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: island });
        run_ticks(&mut fleet, 2, &mut rec);

        let robot = fleet.robot(RobotId(0)).unwrap();
        assert_eq!(robot.state(), RobotState::Idle);
        assert!(robot.tasks.is_empty());
        assert!(rec.events.contains(&FleetEvent::PathUnreachable {
            robot: RobotId(0),
            from: v0,
            to: island,
        }));
    }

    #[test]
    fn lane_speed_limit_caps_progress() {
        let mut b = NavGraphBuilder::new();
        let v0 = b.add_vertex(Point::new(0.0, 0.0));
        let v1 = b.add_vertex(Point::new(1.0, 0.0));
        b.add_bidirectional(v0, v1, 0.5);

        let mut fleet = fleet(b.build());
        fleet.submit(FleetCommand::Spawn { start: v0 });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: v1 });
        fleet.step(&mut NoopObserver).unwrap(); // plan
        fleet.step(&mut NoopObserver).unwrap(); // enter the lane at half speed

        match fleet.robot(RobotId(0)).unwrap().position {
            Position::OnLane { progress, .. } => assert!((progress - 0.5).abs() < 1e-6),
            other => panic!("expected mid-lane position, got {other:?}"),
        }

        fleet.step(&mut NoopObserver).unwrap();
        assert_eq!(fleet.robot(RobotId(0)).unwrap().position, Position::AtVertex(v1));
    }

    #[test]
    fn charger_destination_triggers_charging_then_idle() {
        let mut b = NavGraphBuilder::new();
        let v0 = b.add_vertex(Point::new(0.0, 0.0));
        let dock = b.add_vertex_with(Point::new(1.0, 0.0), "dock".to_string(), true);
        b.add_bidirectional(v0, dock, 0.0);

        let mut fleet = fleet(b.build());
        fleet.submit(FleetCommand::Spawn { start: v0 });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: dock });
        fleet.step(&mut NoopObserver).unwrap(); // plan
        fleet.step(&mut NoopObserver).unwrap(); // arrive at the dock

        assert_eq!(fleet.robot(RobotId(0)).unwrap().state(), RobotState::Charging);

        // charge_duration_ticks = 2 in the test config
        fleet.step(&mut NoopObserver).unwrap();
        fleet.step(&mut NoopObserver).unwrap();
        assert_eq!(fleet.robot(RobotId(0)).unwrap().state(), RobotState::Idle);
    }

    #[test]
    fn a_new_task_interrupts_charging() {
        let mut b = NavGraphBuilder::new();
        let v0 = b.add_vertex(Point::new(0.0, 0.0));
        let dock = b.add_vertex_with(Point::new(1.0, 0.0), "dock".to_string(), true);
        b.add_bidirectional(v0, dock, 0.0);

        let config = FleetConfig { charge_duration_ticks: 50, ..test_config() };
        let mut fleet = FleetManager::new(b.build(), config);
        fleet.submit(FleetCommand::Spawn { start: v0 });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: dock });
        fleet.step(&mut NoopObserver).unwrap(); // plan
        fleet.step(&mut NoopObserver).unwrap(); // arrive and start charging
        assert_eq!(fleet.robot(RobotId(0)).unwrap().state(), RobotState::Charging);

        // A fresh task ends the charge immediately, not at charge_until.
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: v0 });
        fleet.step(&mut NoopObserver).unwrap();
        assert_eq!(fleet.robot(RobotId(0)).unwrap().state(), RobotState::Moving);

        fleet.step(&mut NoopObserver).unwrap();
        assert_eq!(fleet.robot(RobotId(0)).unwrap().position, Position::AtVertex(v0));
        assert_eq!(fleet.robot(RobotId(0)).unwrap().state(), RobotState::Idle);
    }
}

// ── Contention ────────────────────────────────────────────────────────────────

mod contention {
    use super::*;

    #[test]
    fn same_tick_contention_favors_the_older_robot() {
        let mut fleet = fleet(merge_graph());
        let mut rec = Recorder::default();
        fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
        fleet.submit(FleetCommand::Spawn { start: VertexId(1) });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: VertexId(3) });
        fleet.submit(FleetCommand::Assign { robot: RobotId(1), destination: VertexId(2) });
        run_ticks(&mut fleet, 2, &mut rec);

        assert_eq!(fleet.robot(RobotId(0)).unwrap().state(), RobotState::Moving);
        assert_eq!(fleet.robot(RobotId(1)).unwrap().state(), RobotState::Waiting);
        assert!(rec.events.iter().any(|e| matches!(
            e,
            FleetEvent::ConflictDetected {
                robot: RobotId(1),
                resource: Resource::Vertex(VertexId(2)),
                holder: RobotId(0),
            }
        )));
    }

    #[test]
    fn waiter_proceeds_once_the_holder_moves_on() {
        let mut fleet = fleet(merge_graph());
        let mut rec = Recorder::default();
        fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
        fleet.submit(FleetCommand::Spawn { start: VertexId(1) });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: VertexId(3) });
        fleet.submit(FleetCommand::Assign { robot: RobotId(1), destination: VertexId(2) });
        run_ticks(&mut fleet, 8, &mut rec);

        assert_eq!(fleet.robot(RobotId(0)).unwrap().position, Position::AtVertex(VertexId(3)));
        assert_eq!(fleet.robot(RobotId(1)).unwrap().position, Position::AtVertex(VertexId(2)));
        assert_eq!(fleet.robot(RobotId(1)).unwrap().state(), RobotState::Idle);
        assert!(!rec.events.iter().any(|e| matches!(e, FleetEvent::DeadlockResolved { .. })));
    }
}

// ── Deadlock resolution ───────────────────────────────────────────────────────

mod deadlock {
    use super::*;

    /// Two robots meet head-on in the corridor: R0 drives a → c, R1 parks
    /// at c and wants the spur d.  R0 waits on c (held by R1), R1 waits on
    /// b (held by R0): a 2-cycle.
    #[test]
    fn two_cycle_is_broken_and_both_robots_recover() {
        let (a, c, d) = (VertexId(0), VertexId(2), VertexId(3));
        let mut fleet = fleet(spur_graph());
        let mut rec = Recorder::default();
        fleet.submit(FleetCommand::Spawn { start: a });
        fleet.submit(FleetCommand::Spawn { start: c });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: c });
        fleet.submit(FleetCommand::Assign { robot: RobotId(1), destination: d });
        run_ticks(&mut fleet, 8, &mut rec);

        // The newer robot was chosen as the victim.
        assert!(rec.events.contains(&FleetEvent::DeadlockResolved {
            victim: RobotId(1),
            cycle_len: 2,
        }));

        // Both robots made it to their goals afterwards.
        assert_eq!(fleet.robot(RobotId(0)).unwrap().position, Position::AtVertex(c));
        assert_eq!(fleet.robot(RobotId(0)).unwrap().state(), RobotState::Idle);
        assert_eq!(fleet.robot(RobotId(1)).unwrap().position, Position::AtVertex(d));
        assert_eq!(fleet.robot(RobotId(1)).unwrap().state(), RobotState::Idle);

        // No residual wait edges.
        assert!(fleet.traffic().waits().is_empty());
    }

    #[test]
    fn both_robots_reach_moving_again_after_the_break() {
        let (a, c, d) = (VertexId(0), VertexId(2), VertexId(3));
        let mut fleet = fleet(spur_graph());
        let mut rec = Recorder::default();
        fleet.submit(FleetCommand::Spawn { start: a });
        fleet.submit(FleetCommand::Spawn { start: c });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: c });
        fleet.submit(FleetCommand::Assign { robot: RobotId(1), destination: d });
        run_ticks(&mut fleet, 8, &mut rec);

        let resolved_at = rec
            .events
            .iter()
            .position(|e| matches!(e, FleetEvent::DeadlockResolved { .. }))
            .expect("deadlock should have been detected");
        let moving_after = |robot: RobotId| {
            rec.events[resolved_at..].iter().any(|e| {
                matches!(e, FleetEvent::StateChanged { robot: r, to: RobotState::Moving, .. } if *r == robot)
            })
        };
        assert!(moving_after(RobotId(0)));
        assert!(moving_after(RobotId(1)));
    }
}

// ── Re-planning around congestion ─────────────────────────────────────────────

mod replan {
    use super::*;

    /// A parked robot occupies the midpoint of the direct route; the
    /// blocked robot re-plans onto the detour after its denial streak
    /// crosses the threshold.
    #[test]
    fn blocked_robot_replans_around_a_parked_robot() {
        let (a, m, g, d, x) =
            (VertexId(0), VertexId(1), VertexId(2), VertexId(3), VertexId(4));
        let mut fleet = fleet(detour_graph());
        let mut rec = Recorder::default();
        // The blocker spawns first so it wins the midpoint.
        fleet.submit(FleetCommand::Spawn { start: x });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: m });
        fleet.submit(FleetCommand::Spawn { start: a });
        fleet.submit(FleetCommand::Assign { robot: RobotId(1), destination: g });
        run_ticks(&mut fleet, 6, &mut rec);

        // Past the streak threshold the robot now carries the detour path.
        let path = fleet.robot(RobotId(1)).unwrap().path.as_ref().unwrap();
        assert_eq!(path.vertices, vec![a, d, g]);

        run_ticks(&mut fleet, 4, &mut rec);
        assert_eq!(fleet.robot(RobotId(1)).unwrap().position, Position::AtVertex(g));
        assert_eq!(fleet.robot(RobotId(1)).unwrap().state(), RobotState::Idle);
        assert!(rec.events.iter().any(|e| matches!(
            e,
            FleetEvent::ConflictDetected { robot: RobotId(1), .. }
        )));
    }

    #[test]
    fn exhausted_replan_budget_marks_the_robot_lost() {
        // Straight corridor only: a - m - g, with a feeder for the blocker.
        let mut b = NavGraphBuilder::new();
        let a = b.add_vertex(Point::new(0.0, 0.0));
        let m = b.add_vertex(Point::new(1.0, 0.0));
        let g = b.add_vertex(Point::new(2.0, 0.0));
        let x = b.add_vertex(Point::new(1.0, -1.0));
        b.add_bidirectional(a, m, 0.0);
        b.add_bidirectional(m, g, 0.0);
        b.add_bidirectional(x, m, 0.0);

        let config = FleetConfig {
            replan_threshold: 1,
            max_replan_attempts: 1,
            ..test_config()
        };
        let mut fleet = FleetManager::new(b.build(), config);
        let mut rec = Recorder::default();
        fleet.submit(FleetCommand::Spawn { start: x });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: m });
        fleet.submit(FleetCommand::Spawn { start: a });
        fleet.submit(FleetCommand::Assign { robot: RobotId(1), destination: g });
        run_ticks(&mut fleet, 10, &mut rec);

        assert_eq!(fleet.robot(RobotId(1)).unwrap().state(), RobotState::Unknown);
        assert!(rec.events.contains(&FleetEvent::RobotLost { robot: RobotId(1) }));

        // Lost robots reject further work.
        fleet.submit(FleetCommand::Assign { robot: RobotId(1), destination: a });
        run_ticks(&mut fleet, 1, &mut rec);
        assert!(fleet.robot(RobotId(1)).unwrap().tasks.is_empty());
        assert!(rec.events.iter().any(|e| matches!(
            e,
            FleetEvent::CommandRejected { reason } if reason.contains("illegal transition")
        )));
    }
}

// ── Snapshots & determinism ───────────────────────────────────────────────────

mod snapshots {
    use super::*;

    #[test]
    fn mid_lane_positions_are_interpolated() {
        let mut b = NavGraphBuilder::new();
        let v0 = b.add_vertex(Point::new(0.0, 0.0));
        let v1 = b.add_vertex(Point::new(2.0, 0.0));
        b.add_bidirectional(v0, v1, 0.0);

        let mut fleet = fleet(b.build());
        fleet.submit(FleetCommand::Spawn { start: v0 });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: v1 });
        fleet.step(&mut NoopObserver).unwrap(); // plan
        fleet.step(&mut NoopObserver).unwrap(); // half-way along the 2-unit lane

        let snap = fleet.snapshot();
        let r = &snap.robots[0];
        assert_eq!(r.state, RobotState::Moving);
        assert!((r.x - 1.0).abs() < 1e-6);
        assert!((r.progress - 0.5).abs() < 1e-6);
        assert!(r.lane.is_some());
    }

    #[test]
    fn snapshot_interval_is_respected() {
        let config = FleetConfig { snapshot_interval_ticks: 2, ..test_config() };
        let mut fleet = FleetManager::new(line_graph(), config);
        let mut rec = Recorder::default();
        fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
        run_ticks(&mut fleet, 4, &mut rec);

        // Ticks 0 and 2 publish; 1 and 3 do not.
        assert_eq!(rec.snapshots.len(), 2);
        assert_eq!(rec.snapshots[0].tick, Tick(0));
        assert_eq!(rec.snapshots[1].tick, Tick(2));
    }

    #[test]
    fn identical_runs_produce_identical_output() {
        let run = || {
            let mut fleet = fleet(spur_graph());
            let mut rec = Recorder::default();
            fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
            fleet.submit(FleetCommand::Spawn { start: VertexId(2) });
            fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: VertexId(2) });
            fleet.submit(FleetCommand::Assign { robot: RobotId(1), destination: VertexId(3) });
            run_ticks(&mut fleet, 10, &mut rec);
            rec
        };
        let first = run();
        let second = run();
        assert_eq!(first.events, second.events);
        assert_eq!(first.snapshots, second.snapshots);
    }
}
