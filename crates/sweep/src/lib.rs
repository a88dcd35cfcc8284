//! Sweep: a deterministic grid simulation of random-walk cleaning agents.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Sweep sub-crates. For most users, adding `sweep` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use sweep::prelude::*;
//!
//! // One unrestricted agent on a fully dirty 2x2 grid.
//! let config = RunConfig {
//!     num_agents: 1,
//!     width: 2,
//!     height: 2,
//!     dirty_percentage: 1.0,
//!     max_steps: 50,
//!     movement: MovementPolicy::Unrestricted,
//!     placement: PlacementPolicy::Fixed(Position::new(1, 1)),
//!     seed: Some(42),
//! };
//! let mut run = SimulationRun::new(config).unwrap();
//! assert_eq!(run.dirty_cell_count(), 4);
//!
//! let outcome = run.step().unwrap();
//! assert_eq!(outcome.snapshot.step, StepId(1));
//! assert_eq!(outcome.snapshot.dirty_cells, 3);
//!
//! let terminal = run.run_to_completion().unwrap();
//! assert!(terminal.stopped_at.0 <= 50);
//! assert_eq!(run.history().len() as u64, terminal.stopped_at.0 + 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `sweep-core` | Agent and step IDs, positions |
//! | [`space`] | `sweep-space` | Bounded Moore grid with multi-occupancy cells |
//! | [`engine`] | `sweep-engine` | Agents, dirt, scheduler, runs and metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core IDs and coordinates (`sweep-core`).
pub use sweep_core as types;

/// The bounded grid (`sweep-space`).
///
/// [`space::Grid`] tracks which agents stand on which cell and answers
/// Moore-neighbourhood queries.
pub use sweep_space as space;

/// Simulation engine (`sweep-engine`).
///
/// [`engine::SimulationRun`] is the entry point; [`engine::RunConfig`]
/// describes one run.
pub use sweep_engine as engine;

/// Common imports for typical Sweep usage.
///
/// ```rust
/// use sweep::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use sweep_core::{AgentId, Position, StepId};

    // Space
    pub use sweep_space::{Grid, GridError};

    // Engine
    pub use sweep_engine::{
        CleaningAgent, ConfigError, MetricsSnapshot, MovementPolicy, PlacementPolicy, RunConfig,
        SimulationRun, StepError, StepOutcome, StopReason, TerminalMetrics,
    };
}
