//! Deterministic per-robot display colors.
//!
//! # Determinism strategy
//!
//! Each robot's color RNG is seeded by:
//!
//!   seed = global_seed XOR (robot_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive robot IDs uniformly across the seed space.
//! Spawning or removing robots never disturbs the colors of existing ones,
//! so two runs with the same seed render identically.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::RobotId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// An RGB display color carried on each robot for rendering collaborators.
///
/// Channels are kept in the 50–200 band so robots stay visible on both
/// light and dark backgrounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RobotColor {
    /// Derive the color for `robot` from the run's global seed.
    pub fn for_robot(global_seed: u64, robot: RobotId) -> Self {
        let seed = global_seed ^ (robot.0 as u64).wrapping_mul(MIXING_CONSTANT);
        let mut rng = SmallRng::seed_from_u64(seed);
        Self {
            r: rng.gen_range(50..=200),
            g: rng.gen_range(50..=200),
            b: rng.gen_range(50..=200),
        }
    }
}
