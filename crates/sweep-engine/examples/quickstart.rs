//! Sweep Quickstart: a complete cleaning run from scratch.
//!
//! Demonstrates:
//!   1. Building a RunConfig
//!   2. Stepping a SimulationRun and reading snapshots
//!   3. Rendering the dirt layer
//!   4. Reading terminal metrics and resetting
//!
//! Run with:
//!   cargo run --example quickstart

use sweep_core::Position;
use sweep_engine::{MovementPolicy, PlacementPolicy, RunConfig, SimulationRun};

// ─── Grid parameters ────────────────────────────────────────────

const WIDTH: u32 = 12;
const HEIGHT: u32 = 8;
const AGENTS: u32 = 4;

fn render(run: &SimulationRun) -> Vec<String> {
    (0..HEIGHT)
        .map(|y| {
            (0..WIDTH)
                .map(|x| {
                    let pos = Position::new(x, y);
                    let occupied = run
                        .grid()
                        .occupants_at(pos)
                        .map(|o| !o.is_empty())
                        .unwrap_or(false);
                    match (occupied, run.dirt().is_dirty_at(pos)) {
                        (true, _) => "@",
                        (false, true) => "#",
                        (false, false) => ".",
                    }
                })
                .collect()
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Sweep Quickstart ===\n");

    let config = RunConfig {
        num_agents: AGENTS,
        width: WIDTH,
        height: HEIGHT,
        dirty_percentage: 0.5,
        max_steps: 500,
        movement: MovementPolicy::CollisionAvoiding,
        placement: PlacementPolicy::scattered(),
        seed: Some(42),
    };
    let mut run = SimulationRun::new(config)?;
    println!(
        "Grid {}x{}, {} agents, {} dirty cells, seed {}\n",
        WIDTH,
        HEIGHT,
        AGENTS,
        run.dirt().total(),
        run.seed()
    );
    for row in render(&run) {
        println!("  {row}");
    }

    // Step until the run stops, printing every tenth snapshot.
    loop {
        let outcome = run.step()?;
        if outcome.snapshot.step.0 % 10 == 0 {
            println!(
                "  step {:>4}: {:>3} dirty, {:>4} moves",
                outcome.snapshot.step, outcome.snapshot.dirty_cells, outcome.snapshot.cumulative_movements
            );
        }
        if let Some(terminal) = outcome.terminal {
            println!("\nStopped at step {} ({})", terminal.stopped_at, terminal.reason);
            match terminal.clean_time {
                Some(t) => println!("Clean time: {t}"),
                None => println!("Clean time: never"),
            }
            println!("Cleaned: {:.1}%", terminal.final_clean_percentage);
            println!("Total movements: {}", terminal.total_movements);
            break;
        }
    }

    println!("\nFinal grid:");
    for row in render(&run) {
        println!("  {row}");
    }

    run.reset(123)?;
    println!("\nReset to seed 123, step: {}", run.current_step());
    println!("Done.");
    Ok(())
}
