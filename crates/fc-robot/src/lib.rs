//! `fc-robot` — the per-robot state machine.
//!
//! A robot owns its path and task queue; it does **not** own reservations.
//! Those live in the traffic manager and are merely referenced by the robot
//! holding them.  Every state change goes through an explicit transition
//! table; anything not in the table is rejected with `InvalidTransition`
//! and leaves the state untouched.
//!
//! | Module     | Contents                                   |
//! |------------|--------------------------------------------|
//! | [`state`]  | `RobotState` + transition table            |
//! | [`robot`]  | `Robot`, `Position`                        |
//! | [`error`]  | `RobotError`, `RobotResult`                |

pub mod error;
pub mod robot;
pub mod state;


pub use error::{RobotError, RobotResult};
pub use robot::{Position, Robot};
pub use state::RobotState;
