//! Serializable summary of a finished run.

use std::io::{self, Write};

use serde::Serialize;
use sweep_engine::{PlacementPolicy, SimulationRun, TerminalMetrics};

#[derive(Debug, Serialize)]
pub(crate) struct Report {
    config: ConfigReport,
    seed: u64,
    terminal: TerminalReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<SnapshotReport>>,
}

#[derive(Debug, Serialize)]
struct ConfigReport {
    num_agents: u32,
    width: u32,
    height: u32,
    dirty_percentage: f64,
    max_steps: u64,
    movement: String,
    placement: String,
    start: [u32; 2],
}

#[derive(Debug, Serialize)]
struct TerminalReport {
    stopped_at: u64,
    reason: String,
    clean_time: Option<u64>,
    final_clean_percentage: f64,
    total_movements: u64,
    cleaned_cells: usize,
    total_dirty_cells: usize,
}

#[derive(Debug, Serialize)]
struct SnapshotReport {
    step: u64,
    dirty_cells: usize,
    cumulative_movements: u64,
}

impl Report {
    pub(crate) fn new(run: &SimulationRun, terminal: &TerminalMetrics, with_history: bool) -> Self {
        let config = run.config();
        let anchor = config.placement.anchor();
        let placement = match config.placement {
            PlacementPolicy::Fixed(_) => "fixed",
            PlacementPolicy::Scattered { .. } => "scattered",
        };
        Self {
            config: ConfigReport {
                num_agents: config.num_agents,
                width: config.width,
                height: config.height,
                dirty_percentage: config.dirty_percentage,
                max_steps: config.max_steps,
                movement: config.movement.to_string(),
                placement: placement.to_owned(),
                start: [anchor.x, anchor.y],
            },
            seed: run.seed(),
            terminal: TerminalReport {
                stopped_at: terminal.stopped_at.0,
                reason: terminal.reason.to_string(),
                clean_time: terminal.clean_time.map(|s| s.0),
                final_clean_percentage: terminal.final_clean_percentage,
                total_movements: terminal.total_movements,
                cleaned_cells: terminal.cleaned_cells,
                total_dirty_cells: terminal.total_dirty_cells,
            },
            history: with_history.then(|| {
                run.history()
                    .iter()
                    .map(|s| SnapshotReport {
                        step: s.step.0,
                        dirty_cells: s.dirty_cells,
                        cumulative_movements: s.cumulative_movements,
                    })
                    .collect()
            }),
        }
    }

    pub(crate) fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let c = &self.config;
        writeln!(
            out,
            "grid {}x{}, {} agents ({}, {} at ({}, {})), dirty {}, max steps {}, seed {}",
            c.width,
            c.height,
            c.num_agents,
            c.movement,
            c.placement,
            c.start[0],
            c.start[1],
            c.dirty_percentage,
            c.max_steps,
            self.seed
        )?;
        if let Some(history) = &self.history {
            writeln!(out, "step  dirty  movements")?;
            for s in history {
                writeln!(out, "{:>4}  {:>5}  {:>9}", s.step, s.dirty_cells, s.cumulative_movements)?;
            }
        }
        let t = &self.terminal;
        writeln!(out, "stopped at step {} ({})", t.stopped_at, t.reason)?;
        match t.clean_time {
            Some(step) => writeln!(out, "clean time: {step}")?,
            None => writeln!(out, "clean time: not reached")?,
        }
        writeln!(
            out,
            "cleaned {}/{} cells ({:.2}%)",
            t.cleaned_cells, t.total_dirty_cells, t.final_clean_percentage
        )?;
        writeln!(out, "total movements: {}", t.total_movements)
    }
}
