//! Robot-subsystem error type.

use thiserror::Error;

use fc_core::RobotId;

use crate::RobotState;

/// Errors produced by `fc-robot`.
#[derive(Debug, Error)]
pub enum RobotError {
    #[error("robot {robot}: illegal transition {from} → {to}")]
    InvalidTransition {
        robot: RobotId,
        from: RobotState,
        to: RobotState,
    },
}

pub type RobotResult<T> = Result<T, RobotError>;
