//! Run configuration, validation, and error types.
//!
//! [`RunConfig`] is the construction input for a [`SimulationRun`]. The
//! run constructor calls [`validate()`](RunConfig::validate) first, so an
//! invalid configuration never produces a partially built run.
//!
//! [`SimulationRun`]: crate::run::SimulationRun

use std::error::Error;
use std::fmt;

use sweep_core::Position;
use sweep_space::GridError;

/// Cell where all agents start under the default placement policy.
pub const DEFAULT_START: Position = Position::new(1, 1);

/// Largest grid a run accepts, in cells (a 4096x4096 grid).
///
/// Grid occupancy and the dirt layer both allocate per cell up front.
pub const MAX_CELLS: usize = 1 << 24;

// ── Policies ──────────────────────────────────────────────────────

/// How an agent picks its next cell after cleaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MovementPolicy {
    /// Uniform choice among all Moore neighbours. Always moves unless the
    /// grid is a single cell.
    Unrestricted,
    /// Uniform choice among neighbours with no agent on them. If every
    /// neighbour is occupied the agent stays put for the tick.
    #[default]
    CollisionAvoiding,
}

impl fmt::Display for MovementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrestricted => write!(f, "unrestricted"),
            Self::CollisionAvoiding => write!(f, "collision-avoiding"),
        }
    }
}

/// Where agents are placed at initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementPolicy {
    /// Every agent starts on the same cell.
    Fixed(Position),
    /// Each agent starts on a uniformly chosen cell with no agent on it.
    /// Once every cell holds an agent, the rest go to `fallback`.
    Scattered {
        /// Cell used when no empty cell remains.
        fallback: Position,
    },
}

impl PlacementPolicy {
    /// Scattered placement with `(0, 0)` as the fallback cell.
    pub const fn scattered() -> Self {
        Self::Scattered {
            fallback: Position::new(0, 0),
        }
    }

    /// The cell this policy may place agents on unconditionally.
    pub fn anchor(&self) -> Position {
        match *self {
            Self::Fixed(position) => position,
            Self::Scattered { fallback } => fallback,
        }
    }
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self::Fixed(DEFAULT_START)
    }
}

impl fmt::Display for PlacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(position) => write!(f, "fixed at {position}"),
            Self::Scattered { fallback } => write!(f, "scattered (fallback {fallback})"),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`RunConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Width or height is zero.
    EmptyGrid {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// `width * height` does not fit in `u32`.
    CellCountOverflow {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// `width * height` exceeds [`MAX_CELLS`].
    GridTooLarge {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
        /// The cell ceiling.
        max: usize,
    },
    /// `dirty_percentage` is NaN or outside `[0, 1]`.
    DirtyPercentageOutOfRange {
        /// The invalid value.
        value: f64,
    },
    /// `num_agents` is zero.
    NoAgents,
    /// `max_steps` is zero.
    ZeroMaxSteps,
    /// The placement cell lies outside the grid.
    PlacementOutOfBounds {
        /// The configured cell.
        position: Position,
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// Grid construction or initial placement failed.
    ///
    /// Unreachable for a configuration that passed
    /// [`validate()`](RunConfig::validate); present so grid errors convert
    /// with `?` during construction.
    Grid(GridError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid dimensions must be positive, got {width}x{height}")
            }
            Self::CellCountOverflow { width, height } => {
                write!(f, "grid {width}x{height} exceeds u32::MAX cells")
            }
            Self::GridTooLarge { width, height, max } => {
                write!(f, "grid {width}x{height} exceeds the {max}-cell limit")
            }
            Self::DirtyPercentageOutOfRange { value } => {
                write!(f, "dirty_percentage must be in [0.0, 1.0], got {value}")
            }
            Self::NoAgents => write!(f, "num_agents must be at least 1"),
            Self::ZeroMaxSteps => write!(f, "max_steps must be at least 1"),
            Self::PlacementOutOfBounds {
                position,
                width,
                height,
            } => write!(
                f,
                "placement cell {position} outside {width}x{height} grid"
            ),
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── RunConfig ──────────────────────────────────────────────────────

/// Complete configuration for one simulation run.
///
/// The defaults reproduce the reference setup: ten agents on a fully
/// dirty 10x10 grid, all starting at `(1, 1)`, avoiding each other.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Number of cleaning agents. Must be at least 1.
    pub num_agents: u32,
    /// Grid width in cells. Must be positive.
    pub width: u32,
    /// Grid height in cells. Must be positive.
    pub height: u32,
    /// Fraction of cells that start dirty, in `[0, 1]`.
    pub dirty_percentage: f64,
    /// Step budget. The run stops once this many ticks have executed.
    pub max_steps: u64,
    /// Movement rule applied by every agent.
    pub movement: MovementPolicy,
    /// Initial agent placement.
    pub placement: PlacementPolicy,
    /// RNG seed. `None` draws a fresh seed from OS entropy at construction;
    /// the drawn value is available from `SimulationRun::seed()`.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_agents: 10,
            width: 10,
            height: 10,
            dirty_percentage: 1.0,
            max_steps: 1000,
            movement: MovementPolicy::default(),
            placement: PlacementPolicy::default(),
            seed: None,
        }
    }
}

impl RunConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Grid must have at least one cell, and the count must fit in u32.
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::CellCountOverflow {
                width: self.width,
                height: self.height,
            });
        }
        if self.cell_count() > MAX_CELLS {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_CELLS,
            });
        }
        // 2. Dirty fraction in [0, 1]. NaN fails the range check.
        if !(0.0..=1.0).contains(&self.dirty_percentage) {
            return Err(ConfigError::DirtyPercentageOutOfRange {
                value: self.dirty_percentage,
            });
        }
        // 3. Population and budget.
        if self.num_agents == 0 {
            return Err(ConfigError::NoAgents);
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroMaxSteps);
        }
        // 4. Placement anchor inside the grid.
        let anchor = self.placement.anchor();
        if anchor.x >= self.width || anchor.y >= self.height {
            return Err(ConfigError::PlacementOutOfBounds {
                position: anchor,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Total number of grid cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// `floor(width * height * dirty_percentage)`, capped at the cell count.
    pub fn dirty_cell_count(&self) -> usize {
        let cells = self.cell_count();
        let dirty = (cells as f64 * self.dirty_percentage).floor();
        if dirty <= 0.0 {
            return 0;
        }
        (dirty as usize).min(cells)
    }
}
