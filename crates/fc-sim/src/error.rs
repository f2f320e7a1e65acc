use thiserror::Error;

use fc_core::{RobotId, VertexId};
use fc_graph::GraphError;
use fc_plan::PlanError;
use fc_robot::RobotError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown robot {0}")]
    UnknownRobot(RobotId),

    #[error("cannot spawn at {vertex}: occupied by {holder}")]
    SpawnBlocked { vertex: VertexId, holder: RobotId },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("planning error: {0}")]
    Plan(#[from] PlanError),

    #[error("robot error: {0}")]
    Robot(#[from] RobotError),
}

pub type SimResult<T> = Result<T, SimError>;
