//! Flag definitions and their mapping onto [`RunConfig`].

use clap::{Parser, ValueEnum};
use sweep_core::Position;
use sweep_engine::{MovementPolicy, PlacementPolicy, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "sweep")]
#[command(about = "Run a seeded cleaning-agent grid simulation")]
#[command(version)]
pub(crate) struct Cli {
    /// Number of cleaning agents.
    #[arg(long, default_value_t = 10)]
    pub(crate) agents: u32,

    /// Grid width in cells.
    #[arg(long, default_value_t = 10)]
    pub(crate) width: u32,

    /// Grid height in cells.
    #[arg(long, default_value_t = 10)]
    pub(crate) height: u32,

    /// Fraction of cells that start dirty, in [0, 1].
    #[arg(long, default_value_t = 1.0)]
    pub(crate) dirty: f64,

    /// Step budget.
    #[arg(long, default_value_t = 1000)]
    pub(crate) max_steps: u64,

    /// Movement rule.
    #[arg(long, value_enum, default_value_t = Movement::Avoid)]
    pub(crate) movement: Movement,

    /// Initial placement.
    #[arg(long, value_enum, default_value_t = Placement::Fixed)]
    pub(crate) placement: Placement,

    /// Start column for fixed placement, or fallback column for scattered.
    #[arg(long)]
    pub(crate) start_x: Option<u32>,

    /// Start row for fixed placement, or fallback row for scattered.
    #[arg(long)]
    pub(crate) start_y: Option<u32>,

    /// RNG seed. Drawn from OS entropy when omitted.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Include every per-tick snapshot in the report.
    #[arg(long)]
    pub(crate) history: bool,

    /// Emit the report as JSON.
    #[arg(long)]
    pub(crate) json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Movement {
    /// Move to any neighbour.
    Free,
    /// Move only to neighbours with no agent on them.
    Avoid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Placement {
    /// All agents on one cell.
    Fixed,
    /// Agents on distinct random cells while any are free.
    Scattered,
}

impl Cli {
    pub(crate) fn to_config(&self) -> RunConfig {
        let movement = match self.movement {
            Movement::Free => MovementPolicy::Unrestricted,
            Movement::Avoid => MovementPolicy::CollisionAvoiding,
        };
        let placement = match self.placement {
            Placement::Fixed => {
                let default = PlacementPolicy::default().anchor();
                PlacementPolicy::Fixed(self.anchor_or(default))
            }
            Placement::Scattered => PlacementPolicy::Scattered {
                fallback: self.anchor_or(PlacementPolicy::scattered().anchor()),
            },
        };
        RunConfig {
            num_agents: self.agents,
            width: self.width,
            height: self.height,
            dirty_percentage: self.dirty,
            max_steps: self.max_steps,
            movement,
            placement,
            seed: self.seed,
        }
    }

    fn anchor_or(&self, default: Position) -> Position {
        Position::new(
            self.start_x.unwrap_or(default.x),
            self.start_y.unwrap_or(default.y),
        )
    }
}
