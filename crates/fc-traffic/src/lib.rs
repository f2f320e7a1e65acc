//! `fc-traffic` — mutual exclusion over shared infrastructure.
//!
//! The traffic manager owns the global reservation table: robots never
//! touch it directly, they `request` and `release` through the manager and
//! merely reference the reservations they hold.  A wait-for graph tracks
//! which robot is blocked on which holder so deadlock cycles are detected
//! the moment they form, and broken by forcing the newest robot in the
//! cycle to abandon its claims.
//!
//! | Module          | Contents                                          |
//! |-----------------|---------------------------------------------------|
//! | [`reservation`] | `Resource`, `ReservationTable`                    |
//! | [`wait_graph`]  | `WaitForGraph` + chain-walk cycle detection       |
//! | [`manager`]     | `TrafficManager`, `RequestOutcome`, safe distance |

pub mod manager;
pub mod reservation;
pub mod wait_graph;


pub use manager::{CongestionView, RequestOutcome, TrafficManager};
pub use reservation::{ReservationTable, Resource};
pub use wait_graph::WaitForGraph;
