//! The robot state enum and its transition table.

use std::fmt;

/// Lifecycle state of a robot.
///
/// Closed set — external collaborators match exhaustively on it, so adding
/// a variant is a breaking change.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RobotState {
    /// No active path; ready for a task.
    Idle,
    /// Following a granted path.
    Moving,
    /// Blocked: the next resource is reserved by another robot or spacing
    /// does not allow the step.
    Waiting,
    /// Parked on a charger after completing a task there.
    Charging,
    /// Reservation or planning inconsistency; requires external attention.
    /// No automatic recovery — the one condition the engine does not
    /// self-heal.
    Unknown,
}

impl RobotState {
    /// Whether `self → to` is a legal edge of the state machine.
    ///
    /// The table:
    ///
    /// ```text
    /// Idle     → Moving            task assigned, path granted
    /// Moving   → Waiting           next resource held by another robot
    /// Waiting  → Moving            resource freed / priority win
    /// Moving   → Charging          path completed at a charger
    /// Moving   → Idle              path completed at a plain vertex
    /// Charging → Idle              charge complete or new task
    /// *        → Unknown           inconsistency detected
    /// ```
    pub fn can_transition(self, to: RobotState) -> bool {
        use RobotState::*;
        matches!(
            (self, to),
            (_, Unknown)
                | (Idle, Moving)
                | (Moving, Waiting)
                | (Waiting, Moving)
                | (Moving, Charging)
                | (Moving, Idle)
                | (Charging, Idle)
        )
    }

    /// `true` for states in which the robot can accept movement work.
    pub fn is_operational(self) -> bool {
        self != RobotState::Unknown
    }
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RobotState::Idle => "idle",
            RobotState::Moving => "moving",
            RobotState::Waiting => "waiting",
            RobotState::Charging => "charging",
            RobotState::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
