//! Observer trait for progress reporting and data collection.

use fc_core::Tick;

use crate::{FleetEvent, FleetSnapshot};

/// Callbacks invoked by [`FleetManager`][crate::FleetManager] at key points
/// in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — conflict counter
///
/// ```rust,ignore
/// struct ConflictCounter { conflicts: usize }
///
/// impl FleetObserver for ConflictCounter {
///     fn on_event(&mut self, _tick: Tick, event: &FleetEvent) {
///         if matches!(event, FleetEvent::ConflictDetected { .. }) {
///             self.conflicts += 1;
///         }
///     }
/// }
/// ```
pub trait FleetObserver {
    /// Called at the very start of each tick, before commands drain.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per event, in the order events occurred within the tick.
    fn on_event(&mut self, _tick: Tick, _event: &FleetEvent) {}

    /// Called at snapshot intervals with the post-step fleet state.
    fn on_snapshot(&mut self, _snapshot: &FleetSnapshot) {}

    /// Called at the end of each tick.  `stepped` is the number of robots
    /// that were stepped.
    fn on_tick_end(&mut self, _tick: Tick, _stepped: usize) {}

    /// Called once after the final tick of a [`run`][crate::FleetManager::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`FleetObserver`] that does nothing.
pub struct NoopObserver;

impl FleetObserver for NoopObserver {}
