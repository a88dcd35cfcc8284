//! Benchmark profiles for the Sweep cleaning simulation.
//!
//! Provides pre-built [`RunConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 100x100 grid (10K cells), 50 agents, half dirty
//! - [`stress_profile`]: 316x316 grid (~100K cells), 1000 agents, fully dirty

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use sweep_core::Position;
use sweep_engine::{MovementPolicy, PlacementPolicy, RunConfig};

/// Build a reference benchmark profile: 100x100 grid (10K cells).
///
/// 50 collision-avoiding agents scattered over a half-dirty grid.
pub fn reference_profile(seed: u64) -> RunConfig {
    RunConfig {
        num_agents: 50,
        width: 100,
        height: 100,
        dirty_percentage: 0.5,
        max_steps: 10_000,
        movement: MovementPolicy::CollisionAvoiding,
        placement: PlacementPolicy::scattered(),
        seed: Some(seed),
    }
}

/// Build a stress benchmark profile: 316x316 grid (~100K cells).
///
/// 1000 unrestricted agents stacked on one cell, so the first ticks
/// exercise heavy multi-occupancy.
pub fn stress_profile(seed: u64) -> RunConfig {
    RunConfig {
        num_agents: 1000,
        width: 316,
        height: 316,
        dirty_percentage: 1.0,
        max_steps: 100_000,
        movement: MovementPolicy::Unrestricted,
        placement: PlacementPolicy::Fixed(Position::new(158, 158)),
        seed: Some(seed),
    }
}
