//! Coordination events emitted through the observer.

use std::fmt;

use fc_core::{RobotId, VertexId};
use fc_robot::RobotState;
use fc_traffic::Resource;

// ── Level ─────────────────────────────────────────────────────────────────────

/// Severity attached to an event for log rendering.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        })
    }
}

// ── FleetEvent ────────────────────────────────────────────────────────────────

/// Everything notable that happens during a tick.
///
/// Events are facts, not errors: a deadlock that was detected and broken is
/// a `DeadlockResolved` event, never an `Err`.  The observer receives them
/// in the order they occurred within the tick.
#[derive(Debug, Clone, PartialEq)]
pub enum FleetEvent {
    RobotSpawned { robot: RobotId, vertex: VertexId },
    TaskAssigned { robot: RobotId, destination: VertexId },
    /// A submitted command failed validation and was dropped.
    CommandRejected { reason: String },
    TaskCompleted { robot: RobotId, destination: VertexId },
    StateChanged { robot: RobotId, from: RobotState, to: RobotState },
    ConflictDetected { robot: RobotId, resource: Resource, holder: RobotId },
    DeadlockResolved { victim: RobotId, cycle_len: u32 },
    PathUnreachable { robot: RobotId, from: VertexId, to: VertexId },
    RobotRemoved { robot: RobotId },
    RobotLost { robot: RobotId },
}

impl FleetEvent {
    /// Log severity for this event.
    pub fn level(&self) -> Level {
        match self {
            FleetEvent::CommandRejected { .. }
            | FleetEvent::ConflictDetected { .. }
            | FleetEvent::DeadlockResolved { .. }
            | FleetEvent::PathUnreachable { .. } => Level::Warn,
            FleetEvent::RobotLost { .. } => Level::Error,
            _ => Level::Info,
        }
    }

    /// Subsystem name for the log renderer.
    pub fn component(&self) -> &'static str {
        match self {
            FleetEvent::RobotSpawned { .. }
            | FleetEvent::TaskAssigned { .. }
            | FleetEvent::CommandRejected { .. }
            | FleetEvent::RobotRemoved { .. } => "fleet",
            FleetEvent::TaskCompleted { .. }
            | FleetEvent::StateChanged { .. }
            | FleetEvent::RobotLost { .. } => "robot",
            FleetEvent::ConflictDetected { .. } | FleetEvent::DeadlockResolved { .. } => "traffic",
            FleetEvent::PathUnreachable { .. } => "planner",
        }
    }
}

impl fmt::Display for FleetEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetEvent::RobotSpawned { robot, vertex } => {
                write!(f, "{robot} spawned at {vertex}")
            }
            FleetEvent::TaskAssigned { robot, destination } => {
                write!(f, "{robot} assigned task to {destination}")
            }
            FleetEvent::CommandRejected { reason } => {
                write!(f, "command rejected: {reason}")
            }
            FleetEvent::TaskCompleted { robot, destination } => {
                write!(f, "{robot} completed task at {destination}")
            }
            FleetEvent::StateChanged { robot, from, to } => {
                write!(f, "{robot} {from} -> {to}")
            }
            FleetEvent::ConflictDetected { robot, resource, holder } => {
                write!(f, "{robot} blocked on {resource} held by {holder}")
            }
            FleetEvent::DeadlockResolved { victim, cycle_len } => {
                write!(f, "wait cycle of {cycle_len} broken, victim {victim}")
            }
            FleetEvent::PathUnreachable { robot, from, to } => {
                write!(f, "{robot} has no route {from} -> {to}")
            }
            FleetEvent::RobotRemoved { robot } => {
                write!(f, "{robot} removed from fleet")
            }
            FleetEvent::RobotLost { robot } => {
                write!(f, "{robot} exceeded replan budget, marked unknown")
            }
        }
    }
}
