//! Cleaning agents and their per-tick behaviour.
//!
//! An agent's turn has two phases that always run in this order:
//!
//! 1. **Clean**: if the cell it stands on is dirty, mark it clean.
//! 2. **Move**: pick a Moore neighbour according to the run's
//!    [`MovementPolicy`] and relocate through the grid.
//!
//! The agent only ever inspects dirt on its own cell; neighbouring cells
//! are consulted for occupancy alone.

use rand::seq::IndexedRandom;
use rand::Rng;
use sweep_core::{AgentId, Position};
use sweep_space::{Grid, GridError, Neighbours};
use tracing::trace;

use crate::config::MovementPolicy;
use crate::dirt::DirtMap;

/// A relocation performed during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    /// Cell the agent left.
    pub from: Position,
    /// Cell the agent arrived on.
    pub to: Position,
}

/// What happened during one agent turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentTurn {
    /// The acting agent.
    pub agent: AgentId,
    /// Whether the agent cleaned its starting cell.
    pub cleaned: bool,
    /// The relocation, or `None` if the agent stayed put.
    pub moved: Option<Move>,
}

/// An active cleaning entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleaningAgent {
    id: AgentId,
    position: Position,
    movement_count: u64,
}

impl CleaningAgent {
    /// Create an agent standing on `position` with no recorded moves.
    ///
    /// The caller is responsible for placing the same agent on the grid.
    pub fn new(id: AgentId, position: Position) -> Self {
        Self {
            id,
            position,
            movement_count: 0,
        }
    }

    /// Stable identity for the run.
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Current cell.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of moves made so far.
    pub fn movement_count(&self) -> u64 {
        self.movement_count
    }

    /// Execute one full turn: clean, then move.
    ///
    /// All random draws come from `rng`. A [`GridError`] here means the
    /// grid and the agent disagree about where the agent stands, or a
    /// destination escaped the grid. Both are logic errors. The agent does
    /// not move, but its cell has already been cleaned by then.
    pub fn act<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        dirt: &mut DirtMap,
        policy: MovementPolicy,
        rng: &mut R,
    ) -> Result<AgentTurn, GridError> {
        let cleaned = dirt.clean_at(self.position);

        let moved = match self.choose_destination(grid, policy, rng)? {
            Some(to) => {
                let from = grid.move_to(self.id, to)?;
                debug_assert_eq!(from, self.position);
                self.position = to;
                self.movement_count += 1;
                Some(Move { from, to })
            }
            None => None,
        };

        trace!(
            agent = %self.id,
            cleaned,
            from = ?moved.map(|m| m.from),
            to = ?moved.map(|m| m.to),
            "agent turn"
        );

        Ok(AgentTurn {
            agent: self.id,
            cleaned,
            moved,
        })
    }

    /// Pick the next cell, or `None` if no candidate exists.
    fn choose_destination<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        policy: MovementPolicy,
        rng: &mut R,
    ) -> Result<Option<Position>, GridError> {
        let neighbours = grid.neighbours(self.position, false)?;
        let candidates = match policy {
            MovementPolicy::Unrestricted => neighbours,
            MovementPolicy::CollisionAvoiding => {
                let mut free = Neighbours::new();
                for nb in neighbours {
                    if grid.is_empty(nb)? {
                        free.push(nb);
                    }
                }
                free
            }
        };
        Ok(candidates.as_slice().choose(rng).copied())
    }
}
