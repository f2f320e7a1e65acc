//! Simulation time model and engine configuration.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one full
//! pass of the coordination loop; the mapping to wall-clock time lives in
//! `FleetClock`:
//!
//!   wall_time = start_unix_secs + tick * tick_duration_secs
//!
//! Using an integer tick as the canonical time unit keeps all reservation
//! and backoff arithmetic exact and makes runs reproducible — real-time
//! pacing is the rendering collaborator's problem, not ours.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute coordination-loop tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── FleetClock ────────────────────────────────────────────────────────────────

/// Converts between tick counts and Unix wall-clock seconds.
///
/// Cheap to copy; intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// How many real seconds one tick represents.
    pub tick_duration_secs: u32,
    /// The current tick — advanced by `FleetClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl FleetClock {
    pub fn new(start_unix_secs: i64, tick_duration_secs: u32) -> Self {
        Self {
            start_unix_secs,
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Unix timestamp corresponding to an arbitrary tick.
    #[inline]
    pub fn unix_secs_at(&self, tick: Tick) -> i64 {
        self.start_unix_secs + tick.0 as i64 * self.tick_duration_secs as i64
    }

    /// Unix timestamp corresponding to `current_tick`.
    #[inline]
    pub fn current_unix_secs(&self) -> i64 {
        self.unix_secs_at(self.current_tick)
    }
}

impl fmt::Display for FleetClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.current_unix_secs())
    }
}

// ── FleetConfig ───────────────────────────────────────────────────────────────

/// Top-level coordination-engine configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate and
/// passed to `FleetManager::new`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetConfig {
    /// Unix timestamp for tick 0.
    pub start_unix_secs: i64,

    /// Seconds per tick.  Only affects event timestamps, never coordination.
    pub tick_duration_secs: u32,

    /// Master RNG seed (robot display colors).  Coordination is RNG-free.
    pub seed: u64,

    /// Nominal robot speed in graph-distance units per tick.  The effective
    /// speed on a lane is capped by the lane's speed limit when one is set.
    pub robot_speed: f32,

    /// Minimum separation (graph-distance units) between two robots on the
    /// same lane.  Guards against rear-end contact on long lanes.
    pub min_separation: f32,

    /// Additive planning cost (graph-distance units) for a resource
    /// reserved by another robot.  Large relative to typical lane costs so
    /// congestion is routed around, but finite so a congested-only route is
    /// still found.
    pub congestion_penalty: f32,

    /// Consecutive denied ticks before a blocked robot re-plans.  Keeps
    /// single-tick contention from thrashing the planner.
    pub replan_threshold: u32,

    /// Re-plan attempts per task before a robot is declared lost
    /// (`Unknown`) and left for external intervention.
    pub max_replan_attempts: u32,

    /// Ticks a robot spends in `Charging` after reaching a charger.
    pub charge_duration_ticks: u64,

    /// Publish a snapshot every N ticks.  1 = every tick; 0 = never.
    pub snapshot_interval_ticks: u64,
}

impl FleetConfig {
    /// Construct a `FleetClock` pre-configured for this run.
    pub fn make_clock(&self) -> FleetClock {
        FleetClock::new(self.start_unix_secs, self.tick_duration_secs)
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:         0,
            tick_duration_secs:      1,
            seed:                    0,
            robot_speed:             1.0,
            min_separation:          0.5,
            congestion_penalty:      25.0,
            replan_threshold:        3,
            max_replan_attempts:     5,
            charge_duration_ticks:   10,
            snapshot_interval_ticks: 1,
        }
    }
}
