//! Core types for the Sweep cleaning simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the strongly-typed identifiers and the grid [`Position`] shared by the
//! space, engine, and driver crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod position;

pub use id::{AgentId, StepId};
pub use position::Position;
