//! `fc-graph` — static navigation topology for the fleetcoord engine.
//!
//! The graph is immutable after construction: all coordination state
//! (reservations, robot positions) lives elsewhere and merely references
//! vertex and lane IDs.  Any topology change requires building a new graph.
//!
//! | Module      | Contents                                        |
//! |-------------|-------------------------------------------------|
//! | [`graph`]   | `NavGraph` (CSR adjacency), `NavGraphBuilder`   |
//! | [`loader`]  | JSON document loader with fail-fast validation  |
//! | [`error`]   | `GraphError`, `GraphLoadError`                  |

pub mod error;
pub mod graph;
pub mod loader;


pub use error::{GraphError, GraphLoadError, GraphResult};
pub use graph::{NavGraph, NavGraphBuilder};
pub use loader::{load_nav_graph, parse_nav_graph};
