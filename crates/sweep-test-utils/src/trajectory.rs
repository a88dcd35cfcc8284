//! Per-tick recording of a run and frame-to-frame invariant checks.
//!
//! A [`Trajectory`] is a list of [`Frame`]s, one at step 0 and one after
//! every tick. [`Trajectory::check()`] walks consecutive frames and
//! reports the first [`TrajectoryViolation`] it finds.

use std::fmt;

use sweep_core::{Position, StepId};
use sweep_engine::{SimulationRun, StepError};

/// Observable run state at one step.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub step: StepId,
    /// Agent positions, indexed by agent ID.
    pub positions: Vec<Position>,
    /// Agent movement counters, indexed by agent ID.
    pub movement_counts: Vec<u64>,
    /// `(cell, dirty)` for every marker, in creation order.
    pub dirt: Vec<(Position, bool)>,
    pub running: bool,
}

impl Frame {
    /// Capture the current state of `run`.
    pub fn capture(run: &SimulationRun) -> Self {
        Self {
            step: run.current_step(),
            positions: run.agents().iter().map(|a| a.position()).collect(),
            movement_counts: run.agents().iter().map(|a| a.movement_count()).collect(),
            dirt: run.dirt().iter().map(|m| (m.position(), m.is_dirty())).collect(),
            running: run.is_running(),
        }
    }

    pub fn dirty_count(&self) -> usize {
        self.dirt.iter().filter(|(_, d)| *d).count()
    }

    pub fn total_movements(&self) -> u64 {
        self.movement_counts.iter().sum()
    }
}

/// A broken frame-to-frame invariant.
#[derive(Clone, Debug, PartialEq)]
pub enum TrajectoryViolation {
    StepNotConsecutive { from: StepId, to: StepId },
    OutOfBounds { step: StepId, agent: usize, position: Position },
    MarkerSetChanged { step: StepId },
    DirtReappeared { step: StepId, position: Position },
    CleanedUnvisitedCell { step: StepId, position: Position },
    MovementCountDecreased { step: StepId, agent: usize },
    MovementMismatch { step: StepId, agent: usize, from: Position, to: Position, delta: u64 },
    RunningAfterClean { step: StepId },
}

impl fmt::Display for TrajectoryViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepNotConsecutive { from, to } => {
                write!(f, "step jumped from {from} to {to}")
            }
            Self::OutOfBounds { step, agent, position } => {
                write!(f, "step {step}: agent {agent} at {position} is off the grid")
            }
            Self::MarkerSetChanged { step } => {
                write!(f, "step {step}: dirt markers were added or removed")
            }
            Self::DirtReappeared { step, position } => {
                write!(f, "step {step}: cell {position} became dirty again")
            }
            Self::CleanedUnvisitedCell { step, position } => {
                write!(f, "step {step}: cell {position} cleaned with no agent on it")
            }
            Self::MovementCountDecreased { step, agent } => {
                write!(f, "step {step}: agent {agent} movement count decreased")
            }
            Self::MovementMismatch {
                step,
                agent,
                from,
                to,
                delta,
            } => write!(
                f,
                "step {step}: agent {agent} went {from} -> {to} with movement delta {delta}"
            ),
            Self::RunningAfterClean { step } => {
                write!(f, "step {step}: run still active with no dirt left")
            }
        }
    }
}

impl std::error::Error for TrajectoryViolation {}

/// Recorded frames of one run plus the grid size needed to check them.
#[derive(Clone, Debug)]
pub struct Trajectory {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<Frame>,
}

impl Trajectory {
    /// Step `run` until it stops, capturing a frame before the first tick
    /// and after each one.
    pub fn record(run: &mut SimulationRun) -> Result<Self, StepError> {
        let mut frames = vec![Frame::capture(run)];
        while run.is_running() {
            run.step()?;
            frames.push(Frame::capture(run));
        }
        Ok(Self {
            width: run.grid().width(),
            height: run.grid().height(),
            frames,
        })
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Check every invariant across every pair of consecutive frames.
    pub fn check(&self) -> Result<(), TrajectoryViolation> {
        for frame in &self.frames {
            self.check_frame(frame)?;
        }
        for pair in self.frames.windows(2) {
            check_transition(&pair[0], &pair[1])?;
        }
        Ok(())
    }

    fn check_frame(&self, frame: &Frame) -> Result<(), TrajectoryViolation> {
        for (agent, &position) in frame.positions.iter().enumerate() {
            if position.x >= self.width || position.y >= self.height {
                return Err(TrajectoryViolation::OutOfBounds {
                    step: frame.step,
                    agent,
                    position,
                });
            }
        }
        if frame.running && frame.step.0 > 0 && frame.dirty_count() == 0 {
            return Err(TrajectoryViolation::RunningAfterClean { step: frame.step });
        }
        Ok(())
    }
}

fn check_transition(prev: &Frame, next: &Frame) -> Result<(), TrajectoryViolation> {
    let step = next.step;
    if next.step != prev.step.next() {
        return Err(TrajectoryViolation::StepNotConsecutive {
            from: prev.step,
            to: next.step,
        });
    }

    if prev.dirt.len() != next.dirt.len()
        || prev.dirt.iter().zip(&next.dirt).any(|(a, b)| a.0 != b.0)
    {
        return Err(TrajectoryViolation::MarkerSetChanged { step });
    }
    for (&(position, was_dirty), &(_, is_dirty)) in prev.dirt.iter().zip(&next.dirt) {
        if !was_dirty && is_dirty {
            return Err(TrajectoryViolation::DirtReappeared { step, position });
        }
        // Agents clean where they stood when the tick began.
        if was_dirty && !is_dirty && !prev.positions.contains(&position) {
            return Err(TrajectoryViolation::CleanedUnvisitedCell { step, position });
        }
    }

    for (agent, (&before, &after)) in prev
        .movement_counts
        .iter()
        .zip(&next.movement_counts)
        .enumerate()
    {
        if after < before {
            return Err(TrajectoryViolation::MovementCountDecreased { step, agent });
        }
        let delta = after - before;
        let from = prev.positions[agent];
        let to = next.positions[agent];
        let consistent = match delta {
            0 => from == to,
            1 => from.chebyshev(to) == 1,
            _ => false,
        };
        if !consistent {
            return Err(TrajectoryViolation::MovementMismatch {
                step,
                agent,
                from,
                to,
                delta,
            });
        }
    }
    Ok(())
}
