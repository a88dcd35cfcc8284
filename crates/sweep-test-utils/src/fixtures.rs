//! Reusable run configurations.
//!
//! Every fixture carries an explicit seed so tests are reproducible.

use sweep_core::Position;
use sweep_engine::{MovementPolicy, PlacementPolicy, RunConfig};

/// A small fully-specified configuration for quick tests.
pub fn tiny_config(seed: u64) -> RunConfig {
    RunConfig {
        num_agents: 3,
        width: 5,
        height: 5,
        dirty_percentage: 0.6,
        max_steps: 200,
        movement: MovementPolicy::CollisionAvoiding,
        placement: PlacementPolicy::Fixed(Position::new(1, 1)),
        seed: Some(seed),
    }
}

/// One unrestricted agent on a fully dirty 2x2 grid, starting at `(1, 1)`.
///
/// Every cell is adjacent to every other, so the agent cleans the grid
/// well within the 50-step budget.
pub fn two_by_two_scenario(seed: u64) -> RunConfig {
    RunConfig {
        num_agents: 1,
        width: 2,
        height: 2,
        dirty_percentage: 1.0,
        max_steps: 50,
        movement: MovementPolicy::Unrestricted,
        placement: PlacementPolicy::Fixed(Position::new(1, 1)),
        seed: Some(seed),
    }
}

/// A 3x3 grid with nothing to clean.
pub fn no_dirt(seed: u64) -> RunConfig {
    RunConfig {
        num_agents: 2,
        width: 3,
        height: 3,
        dirty_percentage: 0.0,
        max_steps: 10,
        movement: MovementPolicy::Unrestricted,
        placement: PlacementPolicy::Fixed(Position::new(1, 1)),
        seed: Some(seed),
    }
}

/// One agent, one tick, a fully dirty 50x50 grid.
///
/// The agent cleans its starting cell and nothing else, so the run stops
/// on budget with exactly one cell cleaned.
pub fn budget_exhaustion(seed: u64) -> RunConfig {
    RunConfig {
        num_agents: 1,
        width: 50,
        height: 50,
        dirty_percentage: 1.0,
        max_steps: 1,
        movement: MovementPolicy::CollisionAvoiding,
        placement: PlacementPolicy::Fixed(Position::new(1, 1)),
        seed: Some(seed),
    }
}
