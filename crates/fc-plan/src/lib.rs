//! `fc-plan` — traffic-aware path planning for the fleetcoord engine.
//!
//! | Module       | Contents                                           |
//! |--------------|----------------------------------------------------|
//! | [`path`]     | `Path` — immutable planned route                   |
//! | [`planner`]  | `Planner` + `CongestionModel` traits, `AStarPlanner` |
//! | [`error`]    | `PlanError`, `PlanResult`                          |

pub mod error;
pub mod path;
pub mod planner;


pub use error::{PlanError, PlanResult};
pub use path::Path;
pub use planner::{AStarPlanner, CongestionModel, FreeFlow, Planner};
