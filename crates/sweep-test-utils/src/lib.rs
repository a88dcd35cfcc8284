//! Test utilities for Sweep development.
//!
//! [`fixtures`] holds ready-made [`RunConfig`](sweep_engine::RunConfig)
//! values for the scenarios the integration tests share.
//! [`trajectory`] records a run tick by tick and checks the invariants
//! that must hold between consecutive frames.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod trajectory;

pub use fixtures::{budget_exhaustion, no_dirt, tiny_config, two_by_two_scenario};
pub use trajectory::{Frame, Trajectory, TrajectoryViolation};
