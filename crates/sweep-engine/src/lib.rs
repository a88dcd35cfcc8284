//! Simulation engine for Sweep cleaning runs.
//!
//! A [`SimulationRun`] owns the grid, the dirt layer, the agent
//! population and a single seeded random generator. Each call to
//! [`step()`](SimulationRun::step) lets the [`Scheduler`] activate every
//! agent once in a fresh random order, records a [`MetricsSnapshot`], and
//! evaluates termination. A run is a pure function of its [`RunConfig`]
//! and seed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod dirt;
pub mod error;
pub mod metrics;
pub mod run;
pub mod scheduler;

pub use agent::{AgentTurn, CleaningAgent, Move};
pub use config::{ConfigError, MovementPolicy, PlacementPolicy, RunConfig, MAX_CELLS};
pub use dirt::{DirtMap, DirtMarker};
pub use error::StepError;
pub use metrics::{MetricsHistory, MetricsSnapshot, StopReason, TerminalMetrics};
pub use run::{SimulationRun, StepOutcome};
pub use scheduler::{Scheduler, SchedulerState, TickReport};
