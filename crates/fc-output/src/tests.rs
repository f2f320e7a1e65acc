//! Tests for fc-output.

use fc_core::{FleetConfig, LaneId, Point, RobotColor, RobotId, Tick, VertexId};
use fc_robot::RobotState;
use fc_sim::{FleetEvent, FleetSnapshot, RobotSnapshot};

use crate::{CsvWriter, EventLog, RobotSnapshotRow, SnapshotWriter, TickSummaryRow};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn standing_snapshot(robot: u32, vertex: u32, state: RobotState) -> RobotSnapshot {
    RobotSnapshot {
        robot: RobotId(robot),
        state,
        x: vertex as f32,
        y: 0.0,
        vertex: VertexId(vertex),
        lane: None,
        progress: 0.0,
        destination: None,
        queued_tasks: 0,
        color: RobotColor { r: 10, g: 20, b: 30 },
    }
}

fn rendered(unix_secs: i64, event: &FleetEvent) -> String {
    let mut log = EventLog::new(Vec::new());
    log.log(unix_secs, event).unwrap();
    String::from_utf8(log.into_inner()).unwrap()
}

// ── Rows ──────────────────────────────────────────────────────────────────────

mod rows {
    use super::*;

    #[test]
    fn standing_robot_uses_the_invalid_sentinels() {
        let snap = standing_snapshot(3, 5, RobotState::Idle);
        let row = RobotSnapshotRow::from_snapshot(7, &snap);

        assert_eq!(row.robot_id, 3);
        assert_eq!(row.tick, 7);
        assert_eq!(row.state, "idle");
        assert_eq!(row.vertex, 5);
        assert_eq!(row.lane, u32::MAX);
        assert_eq!(row.destination, u32::MAX);
        assert_eq!(row.color, "#0a141e");
    }

    #[test]
    fn traversing_robot_carries_lane_and_progress() {
        let snap = RobotSnapshot {
            lane: Some(LaneId(4)),
            progress: 0.5,
            destination: Some(VertexId(9)),
            queued_tasks: 2,
            ..standing_snapshot(1, 0, RobotState::Moving)
        };
        let row = RobotSnapshotRow::from_snapshot(12, &snap);

        assert_eq!(row.state, "moving");
        assert_eq!(row.lane, 4);
        assert_eq!(row.progress, 0.5);
        assert_eq!(row.destination, 9);
        assert_eq!(row.queued_tasks, 2);
    }

    #[test]
    fn summary_counts_robots_per_state() {
        let snap = FleetSnapshot {
            tick: Tick(4),
            unix_secs: 40,
            robots: vec![
                standing_snapshot(0, 0, RobotState::Idle),
                standing_snapshot(1, 1, RobotState::Moving),
                standing_snapshot(2, 2, RobotState::Moving),
                standing_snapshot(3, 3, RobotState::Waiting),
            ],
            conflicts: 2,
        };
        let row = TickSummaryRow::from_snapshot(&snap);

        assert_eq!(row.tick, 4);
        assert_eq!(row.unix_secs, 40);
        assert_eq!(row.robots, 4);
        assert_eq!(row.idle, 1);
        assert_eq!(row.moving, 2);
        assert_eq!(row.waiting, 1);
        assert_eq!(row.charging, 0);
        assert_eq!(row.unknown, 0);
        assert_eq!(row.conflicts, 2);
    }
}

// ── Event log ─────────────────────────────────────────────────────────────────

mod event_log {
    use super::*;

    #[test]
    fn info_line_format_is_exact() {
        let event = FleetEvent::RobotSpawned { robot: RobotId(0), vertex: VertexId(2) };
        assert_eq!(rendered(1000, &event), "[1000] [INFO] [fleet] R0 spawned at V2\n");
    }

    #[test]
    fn warn_events_render_with_their_component() {
        let event = FleetEvent::DeadlockResolved { victim: RobotId(1), cycle_len: 2 };
        assert_eq!(
            rendered(50, &event),
            "[50] [WARN] [traffic] wait cycle of 2 broken, victim R1\n"
        );
    }

    #[test]
    fn error_events_render_with_their_component() {
        let event = FleetEvent::RobotLost { robot: RobotId(7) };
        assert_eq!(
            rendered(0, &event),
            "[0] [ERROR] [robot] R7 exceeded replan budget, marked unknown\n"
        );
    }

    #[test]
    fn lines_accumulate_in_order() {
        let mut log = EventLog::new(Vec::new());
        log.log(10, &FleetEvent::RobotSpawned { robot: RobotId(0), vertex: VertexId(0) })
            .unwrap();
        log.log(20, &FleetEvent::RobotRemoved { robot: RobotId(0) }).unwrap();

        let text = String::from_utf8(log.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[10] "));
        assert!(lines[1].starts_with("[20] "));
    }
}

// ── CSV files ─────────────────────────────────────────────────────────────────

mod csv_files {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn sample_rows() -> Vec<RobotSnapshotRow> {
        vec![
            RobotSnapshotRow {
                robot_id: 0,
                tick: 3,
                state: "moving".to_string(),
                x: 1.25,
                y: 0.0,
                vertex: 1,
                lane: 4,
                progress: 0.25,
                destination: 9,
                queued_tasks: 1,
                color: "#0a141e".to_string(),
            },
            RobotSnapshotRow {
                robot_id: 1,
                tick: 3,
                state: "idle".to_string(),
                x: 2.0,
                y: 1.0,
                vertex: 2,
                lane: u32::MAX,
                progress: 0.0,
                destination: u32::MAX,
                queued_tasks: 0,
                color: "#c89664".to_string(),
            },
        ]
    }

    #[test]
    fn header_rows_are_written_on_creation() {
        let dir = tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        writer.finish().unwrap();

        let snapshots = fs::read_to_string(dir.path().join("robot_snapshots.csv")).unwrap();
        assert_eq!(
            snapshots.lines().next().unwrap(),
            "robot_id,tick,state,x,y,vertex,lane,progress,destination,queued_tasks,color"
        );

        let summaries = fs::read_to_string(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(
            summaries.lines().next().unwrap(),
            "tick,unix_secs,robots,idle,moving,waiting,charging,unknown,conflicts"
        );
    }

    #[test]
    fn snapshot_rows_round_trip() {
        let dir = tempdir().unwrap();
        let rows = sample_rows();

        let mut writer = CsvWriter::new(dir.path()).unwrap();
        writer.write_snapshots(&rows).unwrap();
        writer.finish().unwrap();

        let mut reader = csv::Reader::from_path(dir.path().join("robot_snapshots.csv")).unwrap();
        let parsed: Vec<RobotSnapshotRow> = reader
            .records()
            .map(|record| {
                let r = record.unwrap();
                RobotSnapshotRow {
                    robot_id: r[0].parse().unwrap(),
                    tick: r[1].parse().unwrap(),
                    state: r[2].to_string(),
                    x: r[3].parse().unwrap(),
                    y: r[4].parse().unwrap(),
                    vertex: r[5].parse().unwrap(),
                    lane: r[6].parse().unwrap(),
                    progress: r[7].parse().unwrap(),
                    destination: r[8].parse().unwrap(),
                    queued_tasks: r[9].parse().unwrap(),
                    color: r[10].to_string(),
                }
            })
            .collect();

        assert_eq!(parsed, rows);
    }

    #[test]
    fn summary_rows_are_written_in_column_order() {
        let dir = tempdir().unwrap();
        let row = TickSummaryRow {
            tick: 3,
            unix_secs: 30,
            robots: 2,
            idle: 1,
            moving: 1,
            waiting: 0,
            charging: 0,
            unknown: 0,
            conflicts: 4,
        };

        let mut writer = CsvWriter::new(dir.path()).unwrap();
        writer.write_tick_summary(&row).unwrap();
        writer.finish().unwrap();

        let text = fs::read_to_string(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(text.lines().nth(1).unwrap(), "3,30,2,1,1,0,0,0,4");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

mod observer {
    use std::fs;

    use fc_graph::{NavGraph, NavGraphBuilder};
    use fc_sim::{FleetCommand, FleetManager};
    use tempfile::tempdir;

    use super::*;
    use crate::LogObserver;

    /// V0 ─ V1 ─ V2 at unit spacing, bidirectional.
    fn line_graph() -> NavGraph {
        let mut b = NavGraphBuilder::new();
        let v: Vec<VertexId> = (0..3).map(|i| b.add_vertex(Point::new(i as f32, 0.0))).collect();
        for w in v.windows(2) {
            b.add_bidirectional(w[0], w[1], 0.0);
        }
        b.build()
    }

    #[test]
    fn run_streams_events_and_snapshots_to_both_sinks() {
        let dir = tempdir().unwrap();
        let config = FleetConfig { seed: 42, ..FleetConfig::default() };

        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut observer = LogObserver::new(writer, Vec::new(), &config);

        let mut fleet = FleetManager::new(line_graph(), config);
        fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
        fleet.submit(FleetCommand::Assign { robot: RobotId(0), destination: VertexId(2) });
        fleet.run(8, &mut observer).unwrap();

        assert!(observer.take_error().is_none());
        let (_, log) = observer.into_parts();
        let text = String::from_utf8(log).unwrap();

        let first = text.lines().next().unwrap();
        assert_eq!(first, "[0] [INFO] [fleet] R0 spawned at V0");
        assert!(text.contains("completed task at V2"));

        // One snapshot per tick at the default interval, plus the header.
        let snapshots = fs::read_to_string(dir.path().join("robot_snapshots.csv")).unwrap();
        assert_eq!(snapshots.lines().count(), 9);
        let summaries = fs::read_to_string(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(summaries.lines().count(), 9);
    }

    #[test]
    fn first_error_is_kept_and_taken_once() {
        struct FailingWriter;

        impl SnapshotWriter for FailingWriter {
            fn write_snapshots(&mut self, _rows: &[RobotSnapshotRow]) -> crate::OutputResult<()> {
                Err(std::io::Error::other("disk full").into())
            }
            fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> crate::OutputResult<()> {
                Ok(())
            }
            fn finish(&mut self) -> crate::OutputResult<()> {
                Ok(())
            }
        }

        let config = FleetConfig::default();
        let mut observer = LogObserver::new(FailingWriter, Vec::new(), &config);

        let mut fleet = FleetManager::new(line_graph(), config);
        fleet.submit(FleetCommand::Spawn { start: VertexId(0) });
        fleet.run(3, &mut observer).unwrap();

        assert!(observer.take_error().is_some());
        assert!(observer.take_error().is_none());
    }
}
