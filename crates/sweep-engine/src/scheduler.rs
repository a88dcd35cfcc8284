//! Turn-based scheduler with randomized activation.
//!
//! Each tick activates every agent exactly once, in an order drawn as a
//! fresh uniform permutation from the run's generator. Turns never
//! interleave: one agent's clean-and-move completes before the next
//! agent starts. When two agents race for the same cell, the activation
//! order decides who gets there first.
//!
//! ```text
//!          tick()                 ok
//!  Idle ───────────▶ Ticking ─────────▶ Idle
//!   │                   │ grid error
//!   │                   └────────────▶ Idle (error returned)
//!   │ terminate()
//!   └────────────────▶ Terminated
//! ```

use rand::seq::SliceRandom;
use rand::Rng;
use sweep_core::StepId;
use sweep_space::Grid;
use tracing::debug;

use crate::agent::CleaningAgent;
use crate::config::MovementPolicy;
use crate::dirt::DirtMap;
use crate::error::StepError;

/// Lifecycle state of a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Ready to tick.
    Idle,
    /// Agents are taking their turns.
    Ticking,
    /// The run is over; further ticks are rejected.
    Terminated,
}

/// Summary of one completed tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Step counter after the tick.
    pub step: StepId,
    /// Cells cleaned during the tick.
    pub cleaned: u32,
    /// Agents that moved during the tick.
    pub moves: u32,
}

/// Drives ticks and owns the global step counter.
#[derive(Debug, Clone)]
pub struct Scheduler {
    state: SchedulerState,
    step: StepId,
    order: Vec<usize>,
}

impl Scheduler {
    /// A scheduler at step 0 in the `Idle` state.
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Idle,
            step: StepId(0),
            order: Vec::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Number of completed ticks.
    pub fn current_step(&self) -> StepId {
        self.step
    }

    /// Activation order used by the most recent tick, as indices into the
    /// agent slice.
    pub fn last_order(&self) -> &[usize] {
        &self.order
    }

    /// Run one tick over `agents`.
    ///
    /// Builds a fresh random permutation of `0..agents.len()`, lets each
    /// agent act in that order, then advances the step counter. A grid
    /// error aborts the tick without advancing the counter and returns
    /// the scheduler to `Idle`.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        agents: &mut [CleaningAgent],
        grid: &mut Grid,
        dirt: &mut DirtMap,
        policy: MovementPolicy,
        rng: &mut R,
    ) -> Result<TickReport, StepError> {
        if self.state == SchedulerState::Terminated {
            return Err(StepError::Terminated { step: self.step });
        }
        self.state = SchedulerState::Ticking;

        self.order.clear();
        self.order.extend(0..agents.len());
        self.order.shuffle(rng);

        let mut cleaned = 0u32;
        let mut moves = 0u32;
        for &i in &self.order {
            match agents[i].act(grid, dirt, policy, rng) {
                Ok(turn) => {
                    cleaned += u32::from(turn.cleaned);
                    moves += u32::from(turn.moved.is_some());
                }
                Err(e) => {
                    self.state = SchedulerState::Idle;
                    return Err(e.into());
                }
            }
        }

        self.step = self.step.next();
        self.state = SchedulerState::Idle;
        debug!(
            step = self.step.0,
            cleaned,
            moves,
            dirty_remaining = dirt.dirty_count(),
            "tick complete"
        );
        Ok(TickReport {
            step: self.step,
            cleaned,
            moves,
        })
    }

    /// Move to `Terminated`. Idempotent.
    pub fn terminate(&mut self) {
        self.state = SchedulerState::Terminated;
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
