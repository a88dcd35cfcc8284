//! Errors raised while advancing a run.

use std::error::Error;
use std::fmt;

use sweep_core::StepId;
use sweep_space::GridError;

/// Errors from [`SimulationRun::step()`](crate::run::SimulationRun::step).
///
/// Neither variant is recoverable within the run: a terminated run stays
/// terminated, and a grid error means an agent produced an impossible
/// destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The run already stopped; no further ticks execute.
    Terminated {
        /// Step at which the run stopped.
        step: StepId,
    },
    /// A grid query or relocation failed during an agent's turn.
    Grid(GridError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminated { step } => write!(f, "run terminated at step {step}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Terminated { .. } => None,
        }
    }
}

impl From<GridError> for StepError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
