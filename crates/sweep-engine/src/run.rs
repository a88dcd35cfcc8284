//! Simulation run lifecycle.
//!
//! [`SimulationRun`] is the user-facing API. Construction validates the
//! [`RunConfig`], seeds the dirt layer and places the agents; each call to
//! [`step()`](SimulationRun::step) executes one tick, records a
//! [`MetricsSnapshot`] and evaluates termination.
//!
//! # Determinism
//!
//! A run owns exactly one [`ChaCha8Rng`], seeded once at construction and
//! threaded by `&mut` through dirt sampling, agent placement, activation
//! order and every movement choice, in that order. Two runs built from the
//! same configuration and seed therefore produce identical trajectories.
//!
//! # Ownership model
//!
//! `SimulationRun` is [`Send`] but all mutation goes through `&mut self`;
//! there is no interior mutability and no background thread.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sweep_core::{AgentId, StepId};
use sweep_space::Grid;
use tracing::{debug, error, info, warn};

use crate::agent::CleaningAgent;
use crate::config::{ConfigError, PlacementPolicy, RunConfig};
use crate::dirt::DirtMap;
use crate::error::StepError;
use crate::metrics::{clean_percentage, MetricsHistory, MetricsSnapshot, StopReason, TerminalMetrics};
use crate::scheduler::{Scheduler, TickReport};

// Compile-time assertion: SimulationRun can move between threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<SimulationRun>();
    }
};

// ── StepOutcome ─────────────────────────────────────────────────

/// Result of a successful [`SimulationRun::step()`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// What the scheduler did this tick.
    pub report: TickReport,
    /// Snapshot recorded after the tick.
    pub snapshot: MetricsSnapshot,
    /// Terminal metrics if this tick ended the run.
    pub terminal: Option<TerminalMetrics>,
}

// ── SimulationRun ───────────────────────────────────────────────

/// One cleaning simulation, from initialization to termination.
///
/// # Example
///
/// ```
/// use sweep_engine::{MovementPolicy, RunConfig, SimulationRun};
///
/// let config = RunConfig {
///     width: 4,
///     height: 4,
///     num_agents: 2,
///     movement: MovementPolicy::Unrestricted,
///     seed: Some(7),
///     ..RunConfig::default()
/// };
/// let mut run = SimulationRun::new(config).unwrap();
/// let terminal = run.run_to_completion().unwrap();
/// assert!(!run.is_running());
/// assert!(terminal.final_clean_percentage <= 100.0);
/// ```
pub struct SimulationRun {
    config: RunConfig,
    seed: u64,
    rng: ChaCha8Rng,
    grid: Grid,
    dirt: DirtMap,
    agents: Vec<CleaningAgent>,
    scheduler: Scheduler,
    history: MetricsHistory,
    running: bool,
    clean_time: Option<StepId>,
    terminal: Option<TerminalMetrics>,
}

impl SimulationRun {
    /// Validate `config` and build a run ready to step.
    ///
    /// If `config.seed` is `None` a seed is drawn from OS entropy; read it
    /// back with [`seed()`](Self::seed) to reproduce the run.
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = match config.seed {
            Some(seed) => seed,
            None => rand::rng().random(),
        };
        Self::build(config, seed)
    }

    /// Rebuild the run from its configuration with a new seed.
    ///
    /// Discards all progress and history; the run is back at step 0 with
    /// freshly sampled dirt and agents.
    pub fn reset(&mut self, seed: u64) -> Result<(), ConfigError> {
        *self = Self::build(self.config.clone(), seed)?;
        Ok(())
    }

    fn build(config: RunConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = Grid::new(config.width, config.height)?;
        let dirt = DirtMap::scatter(&grid, config.dirty_cell_count(), &mut rng);
        let agents = place_agents(&mut grid, &config, &mut rng)?;

        info!(
            width = config.width,
            height = config.height,
            agents = config.num_agents,
            dirty_cells = dirt.total(),
            max_steps = config.max_steps,
            movement = %config.movement,
            placement = %config.placement,
            seed,
            "simulation run initialized"
        );

        let mut run = Self {
            config,
            seed,
            rng,
            grid,
            dirt,
            agents,
            scheduler: Scheduler::new(),
            history: MetricsHistory::new(),
            running: true,
            clean_time: None,
            terminal: None,
        };
        let initial = run.snapshot_now();
        run.history.record(initial);
        Ok(run)
    }

    /// Execute one tick.
    ///
    /// Activates every agent once in random order, records a snapshot,
    /// then evaluates termination: the run stops when no dirt remains or
    /// the step budget is spent, and terminal metrics are frozen.
    ///
    /// # Errors
    ///
    /// [`StepError::Terminated`] if the run already stopped.
    /// [`StepError::Grid`] if an agent turn hit a grid error. Earlier turns
    /// of that tick have already been applied, so the run stops without
    /// terminal metrics and every later `step()` returns
    /// [`StepError::Terminated`].
    pub fn step(&mut self) -> Result<StepOutcome, StepError> {
        if !self.running {
            return Err(StepError::Terminated {
                step: self.current_step(),
            });
        }

        let report = match self.scheduler.tick(
            &mut self.agents,
            &mut self.grid,
            &mut self.dirt,
            self.config.movement,
            &mut self.rng,
        ) {
            Ok(report) => report,
            Err(e) => {
                // Earlier turns of this tick are already applied.
                error!(step = self.current_step().0, error = %e, "tick aborted; run stopped");
                self.running = false;
                self.scheduler.terminate();
                return Err(e);
            }
        };

        let snapshot = self.snapshot_now();
        self.history.record(snapshot);

        let step = report.step;
        let any_dirty = self.dirt.any_dirty();
        if !any_dirty && self.clean_time.is_none() {
            self.clean_time = Some(step);
        }
        if !any_dirty {
            self.finish(StopReason::AllClean);
        } else if step.0 >= self.config.max_steps {
            self.finish(StopReason::StepBudgetExhausted);
        }

        Ok(StepOutcome {
            report,
            snapshot,
            terminal: self.terminal.clone(),
        })
    }

    /// Tick until the run stops and return its terminal metrics.
    ///
    /// Returns immediately if the run already stopped.
    pub fn run_to_completion(&mut self) -> Result<TerminalMetrics, StepError> {
        loop {
            if let Some(terminal) = &self.terminal {
                return Ok(terminal.clone());
            }
            let _ = self.step()?;
        }
    }

    /// Execute at most `ticks` ticks, stopping early if the run ends.
    ///
    /// Returns the number of ticks actually executed.
    pub fn run_for(&mut self, ticks: u64) -> Result<u64, StepError> {
        let mut executed = 0;
        while executed < ticks && self.running {
            let _ = self.step()?;
            executed += 1;
        }
        Ok(executed)
    }

    /// Tick until the run stops or `cancel` is set.
    ///
    /// `cancel` is checked before every tick. Returns the terminal metrics
    /// if the run stopped, or `None` if it was cancelled first; a
    /// cancelled run is still running and may be resumed.
    pub fn run_until_cancelled(
        &mut self,
        cancel: &AtomicBool,
    ) -> Result<Option<TerminalMetrics>, StepError> {
        loop {
            if let Some(terminal) = &self.terminal {
                return Ok(Some(terminal.clone()));
            }
            if cancel.load(Ordering::Acquire) {
                debug!(step = self.current_step().0, "run cancelled");
                return Ok(None);
            }
            let _ = self.step()?;
        }
    }

    fn finish(&mut self, reason: StopReason) {
        let stopped_at = self.current_step();
        let terminal = TerminalMetrics {
            stopped_at,
            reason,
            clean_time: self.clean_time,
            final_clean_percentage: clean_percentage(self.dirt.cleaned_count(), self.dirt.total()),
            total_movements: self.cumulative_movements(),
            cleaned_cells: self.dirt.cleaned_count(),
            total_dirty_cells: self.dirt.total(),
        };
        info!(
            step = stopped_at.0,
            %reason,
            clean_time = ?terminal.clean_time.map(|s| s.0),
            clean_percentage = terminal.final_clean_percentage,
            total_movements = terminal.total_movements,
            "simulation run finished"
        );
        self.running = false;
        self.scheduler.terminate();
        self.terminal = Some(terminal);
    }

    fn snapshot_now(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            step: self.current_step(),
            dirty_cells: self.dirt.dirty_count(),
            cumulative_movements: self.cumulative_movements(),
        }
    }

    // ── Accessors ───────────────────────────────────────────────

    /// The configuration this run was built from.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The resolved RNG seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of completed ticks.
    pub fn current_step(&self) -> StepId {
        self.scheduler.current_step()
    }

    /// The step budget.
    pub fn max_steps(&self) -> u64 {
        self.config.max_steps
    }

    /// `true` until the run stops.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// First step at which no dirt remained.
    pub fn clean_time(&self) -> Option<StepId> {
        self.clean_time
    }

    /// Terminal metrics, once the run has stopped.
    pub fn terminal(&self) -> Option<&TerminalMetrics> {
        self.terminal.as_ref()
    }

    /// Final clean percentage, once the run has stopped.
    pub fn final_clean_percentage(&self) -> Option<f64> {
        self.terminal.as_ref().map(|t| t.final_clean_percentage)
    }

    /// Total movements, once the run has stopped.
    pub fn total_movements(&self) -> Option<u64> {
        self.terminal.as_ref().map(|t| t.total_movements)
    }

    /// Step at which the run stopped.
    pub fn stopped_at(&self) -> Option<StepId> {
        self.terminal.as_ref().map(|t| t.stopped_at)
    }

    /// Cells still dirty right now.
    pub fn dirty_cell_count(&self) -> usize {
        self.dirt.dirty_count()
    }

    /// Sum of all agents' movement counters right now.
    pub fn cumulative_movements(&self) -> u64 {
        self.agents.iter().map(CleaningAgent::movement_count).sum()
    }

    /// All snapshots so far, starting with step 0.
    pub fn history(&self) -> &MetricsHistory {
        &self.history
    }

    /// Agents in ID order.
    pub fn agents(&self) -> &[CleaningAgent] {
        &self.agents
    }

    /// The dirt layer.
    pub fn dirt(&self) -> &DirtMap {
        &self.dirt
    }

    /// The grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Scheduler state and activation order of the last tick.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}

impl std::fmt::Debug for SimulationRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationRun")
            .field("current_step", &self.current_step())
            .field("max_steps", &self.config.max_steps)
            .field("running", &self.running)
            .field("seed", &self.seed)
            .field("agents", &self.agents.len())
            .field("dirty_cells", &self.dirt.dirty_count())
            .finish()
    }
}

/// Create `config.num_agents` agents and place them per the placement policy.
fn place_agents<R: Rng + ?Sized>(
    grid: &mut Grid,
    config: &RunConfig,
    rng: &mut R,
) -> Result<Vec<CleaningAgent>, ConfigError> {
    let mut agents = Vec::with_capacity(config.num_agents as usize);
    match config.placement {
        PlacementPolicy::Fixed(position) => {
            for i in 0..config.num_agents {
                let id = AgentId(i);
                grid.place(id, position)?;
                agents.push(CleaningAgent::new(id, position));
            }
        }
        PlacementPolicy::Scattered { fallback } => {
            // Every cell starts empty; each pick removes one.
            let mut free = grid.canonical_ordering();
            let mut warned = false;
            for i in 0..config.num_agents {
                let id = AgentId(i);
                let position = if free.is_empty() {
                    if !warned {
                        warn!(
                            agent = i,
                            %fallback,
                            "no empty cell left; placing remaining agents on fallback"
                        );
                        warned = true;
                    }
                    fallback
                } else {
                    free.swap_remove(rng.random_range(0..free.len()))
                };
                grid.place(id, position)?;
                agents.push(CleaningAgent::new(id, position));
            }
        }
    }
    Ok(agents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MovementPolicy;
    use sweep_core::Position;

    fn config(w: u32, h: u32, agents: u32, dirty: f64, max_steps: u64) -> RunConfig {
        RunConfig {
            num_agents: agents,
            width: w,
            height: h,
            dirty_percentage: dirty,
            max_steps,
            movement: MovementPolicy::CollisionAvoiding,
            placement: PlacementPolicy::Fixed(Position::new(0, 0)),
            seed: Some(42),
        }
    }

    #[test]
    fn new_rejects_invalid_config() {
        let err = SimulationRun::new(config(3, 3, 0, 0.5, 10)).unwrap_err();
        assert_eq!(err, ConfigError::NoAgents);
    }

    #[test]
    fn construction_records_initial_snapshot() {
        let run = SimulationRun::new(config(4, 4, 2, 0.5, 10)).unwrap();
        assert!(run.is_running());
        assert_eq!(run.current_step(), StepId(0));
        assert_eq!(run.history().len(), 1);
        assert_eq!(
            run.history().latest(),
            Some(&MetricsSnapshot {
                step: StepId(0),
                dirty_cells: 8,
                cumulative_movements: 0,
            })
        );
        assert_eq!(run.dirt().total(), 8);
        assert!(run.terminal().is_none());
        assert!(run.final_clean_percentage().is_none());
    }

    #[test]
    fn fixed_placement_stacks_agents() {
        let run = SimulationRun::new(config(4, 4, 5, 0.0, 10)).unwrap();
        assert_eq!(
            run.grid().occupants_at(Position::new(0, 0)).unwrap().len(),
            5
        );
        assert!(run
            .agents()
            .iter()
            .all(|a| a.position() == Position::new(0, 0)));
    }

    #[test]
    fn scattered_placement_uses_distinct_cells() {
        let mut cfg = config(4, 4, 16, 0.0, 10);
        cfg.placement = PlacementPolicy::scattered();
        let run = SimulationRun::new(cfg).unwrap();
        for pos in run.grid().canonical_ordering() {
            assert_eq!(run.grid().occupants_at(pos).unwrap().len(), 1);
        }
    }

    #[test]
    fn scattered_placement_falls_back_when_full() {
        let mut cfg = config(2, 2, 6, 0.0, 10);
        cfg.placement = PlacementPolicy::Scattered {
            fallback: Position::new(1, 1),
        };
        let run = SimulationRun::new(cfg).unwrap();
        assert_eq!(run.grid().agent_count(), 6);
        assert_eq!(
            run.grid().occupants_at(Position::new(1, 1)).unwrap().len(),
            3
        );
    }

    #[test]
    fn step_after_termination_errors() {
        let mut run = SimulationRun::new(config(3, 3, 1, 0.0, 10)).unwrap();
        let outcome = run.step().unwrap();
        assert!(outcome.terminal.is_some());
        assert_eq!(
            run.step().unwrap_err(),
            StepError::Terminated { step: StepId(1) }
        );
    }

    #[test]
    fn grid_error_mid_tick_stops_the_run() {
        let mut run = SimulationRun::new(config(4, 4, 2, 1.0, 10)).unwrap();
        // A fresh grid knows none of the run's agents.
        run.grid = Grid::new(4, 4).unwrap();

        assert!(matches!(run.step(), Err(StepError::Grid(_))));
        assert!(!run.is_running());
        assert!(run.terminal().is_none());
        assert_eq!(run.history().len(), 1);
        assert_eq!(
            run.scheduler().state(),
            crate::scheduler::SchedulerState::Terminated
        );
        assert_eq!(
            run.step().unwrap_err(),
            StepError::Terminated { step: StepId(0) }
        );
        assert_eq!(
            run.run_to_completion().unwrap_err(),
            StepError::Terminated { step: StepId(0) }
        );
    }

    #[test]
    fn run_for_stops_at_budget() {
        let mut run = SimulationRun::new(config(20, 20, 1, 1.0, 5)).unwrap();
        assert_eq!(run.run_for(3).unwrap(), 3);
        assert!(run.is_running());
        assert_eq!(run.run_for(10).unwrap(), 2);
        assert!(!run.is_running());
        assert_eq!(run.stopped_at(), Some(StepId(5)));
    }

    #[test]
    fn run_until_cancelled_respects_flag() {
        let mut run = SimulationRun::new(config(20, 20, 1, 1.0, 50)).unwrap();
        let cancel = AtomicBool::new(true);
        assert_eq!(run.run_until_cancelled(&cancel).unwrap(), None);
        assert_eq!(run.current_step(), StepId(0));
        assert!(run.is_running());

        cancel.store(false, Ordering::Release);
        let terminal = run.run_until_cancelled(&cancel).unwrap().unwrap();
        assert_eq!(terminal.stopped_at, StepId(50));
    }

    #[test]
    fn reset_rebuilds_from_step_zero() {
        let mut run = SimulationRun::new(config(6, 6, 2, 1.0, 3)).unwrap();
        let _ = run.run_to_completion().unwrap();
        run.reset(7).unwrap();
        assert!(run.is_running());
        assert_eq!(run.seed(), 7);
        assert_eq!(run.current_step(), StepId(0));
        assert_eq!(run.history().len(), 1);
        assert_eq!(run.dirty_cell_count(), 36);
        assert_eq!(run.cumulative_movements(), 0);
    }

    #[test]
    fn unseeded_run_reports_its_seed() {
        let mut cfg = config(5, 5, 2, 1.0, 20);
        cfg.seed = None;
        let mut first = SimulationRun::new(cfg.clone()).unwrap();
        cfg.seed = Some(first.seed());
        let mut second = SimulationRun::new(cfg).unwrap();
        assert_eq!(
            first.run_to_completion().unwrap(),
            second.run_to_completion().unwrap()
        );
    }
}
