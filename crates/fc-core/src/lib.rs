//! `fc-core` — foundational types for the `fleetcoord` coordination engine.
//!
//! This crate is a dependency of every other `fc-*` crate.  It intentionally
//! has no `fc-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                      |
//! |-------------|-----------------------------------------------|
//! | [`ids`]     | `RobotId`, `VertexId`, `LaneId`               |
//! | [`geo`]     | `Point`, Euclidean distance, interpolation    |
//! | [`time`]    | `Tick`, `FleetClock`, `FleetConfig`           |
//! | [`color`]   | Deterministic per-robot display colors        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod color;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use color::RobotColor;
pub use geo::Point;
pub use ids::{LaneId, RobotId, VertexId};
pub use time::{FleetClock, FleetConfig, Tick};
