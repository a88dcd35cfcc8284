//! Spatial data structures for Sweep simulations.
//!
//! This crate defines [`Grid`], the bounded, non-wrapping 2D lattice on
//! which cleaning agents live. It answers three kinds of question:
//!
//! - **Topology**: which cells are Moore neighbours of a cell, clipped to
//!   the grid extents (corners have 3, edges 5, interior cells 8).
//! - **Occupancy**: which agents stand on a cell. Cells are
//!   multi-occupancy; any number of agents may share one.
//! - **Mutation**: placing an agent and relocating it atomically.
//!
//! Iteration order is deterministic everywhere so that seeded random
//! choices over neighbour lists reproduce exactly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;

#[cfg(test)]
pub(crate) mod compliance;

pub use error::GridError;
pub use grid::{Grid, Neighbours};
