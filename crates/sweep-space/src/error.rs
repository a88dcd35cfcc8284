//! Error types for grid construction and mutation.

use std::fmt;
use sweep_core::{AgentId, Position};

/// Errors arising from grid construction, queries, or agent relocation.
///
/// Out-of-bounds accesses indicate a defect in the caller's candidate
/// selection; the engine surfaces them and never retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A position lies outside `[0, width) x [0, height)`.
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// Attempted to move an agent that was never placed.
    NotPlaced {
        /// The agent.
        agent: AgentId,
    },
    /// Attempted to place an agent that already has a position.
    AlreadyPlaced {
        /// The agent.
        agent: AgentId,
        /// Where the agent currently stands.
        position: Position,
    },
    /// Attempted to construct a grid with zero cells.
    EmptyGrid,
    /// `width * height` does not fit in `u32`.
    TooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                position,
                width,
                height,
            } => write!(
                f,
                "position {position} out of bounds: [0, {width}) x [0, {height})"
            ),
            Self::NotPlaced { agent } => write!(f, "agent {agent} has not been placed"),
            Self::AlreadyPlaced { agent, position } => {
                write!(f, "agent {agent} is already placed at {position}")
            }
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::TooLarge { width, height } => {
                write!(f, "grid {width}x{height} exceeds u32::MAX cells")
            }
        }
    }
}

impl std::error::Error for GridError {}
