//! Per-tick snapshots and terminal metrics.
//!
//! [`MetricsSnapshot`] is what a reporting or visualization layer reads
//! each tick. [`TerminalMetrics`] is frozen once when the run stops.

use sweep_core::StepId;

/// Observable state after a tick (or at step 0, before any tick).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Step the snapshot was taken at.
    pub step: StepId,
    /// Cells still dirty.
    pub dirty_cells: usize,
    /// Sum of all agents' movement counters.
    pub cumulative_movements: u64,
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// No dirt remained.
    AllClean,
    /// `max_steps` ticks executed with dirt remaining.
    StepBudgetExhausted,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllClean => write!(f, "all clean"),
            Self::StepBudgetExhausted => write!(f, "step budget exhausted"),
        }
    }
}

/// Metrics frozen when a run stops.
#[derive(Clone, Debug, PartialEq)]
pub struct TerminalMetrics {
    /// Step at which the run stopped.
    pub stopped_at: StepId,
    /// Why it stopped.
    pub reason: StopReason,
    /// First step at which no dirt remained, if that ever happened.
    pub clean_time: Option<StepId>,
    /// `100 * cleaned / total_dirty`, or 100 when nothing started dirty.
    pub final_clean_percentage: f64,
    /// Sum of all agents' movement counters.
    pub total_movements: u64,
    /// Markers cleaned over the run.
    pub cleaned_cells: usize,
    /// Markers created at initialization.
    pub total_dirty_cells: usize,
}

/// Percentage of initially dirty cells that were cleaned, in `[0, 100]`.
///
/// Defined as 100 when nothing started dirty.
pub fn clean_percentage(cleaned: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (cleaned.min(total) as f64 / total as f64) * 100.0
}

/// Ordered sequence of snapshots, one per step starting at step 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsHistory {
    snapshots: Vec<MetricsSnapshot>,
}

impl MetricsHistory {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot. Steps must be strictly increasing.
    pub fn record(&mut self, snapshot: MetricsSnapshot) {
        debug_assert!(
            self.latest().is_none_or(|last| last.step < snapshot.step),
            "snapshot steps must be strictly increasing"
        );
        self.snapshots.push(snapshot);
    }

    /// Most recent snapshot.
    pub fn latest(&self) -> Option<&MetricsSnapshot> {
        self.snapshots.last()
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no snapshot was recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All snapshots in step order.
    pub fn as_slice(&self) -> &[MetricsSnapshot] {
        &self.snapshots
    }

    /// Iterate over snapshots in step order.
    pub fn iter(&self) -> std::slice::Iter<'_, MetricsSnapshot> {
        self.snapshots.iter()
    }
}

impl<'a> IntoIterator for &'a MetricsHistory {
    type Item = &'a MetricsSnapshot;
    type IntoIter = std::slice::Iter<'a, MetricsSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(step: u64, dirty: usize, moves: u64) -> MetricsSnapshot {
        MetricsSnapshot {
            step: StepId(step),
            dirty_cells: dirty,
            cumulative_movements: moves,
        }
    }

    #[test]
    fn clean_percentage_handles_empty_total() {
        assert_eq!(clean_percentage(0, 0), 100.0);
    }

    #[test]
    fn clean_percentage_bounds() {
        assert_eq!(clean_percentage(0, 4), 0.0);
        assert_eq!(clean_percentage(1, 4), 25.0);
        assert_eq!(clean_percentage(4, 4), 100.0);
        assert_eq!(clean_percentage(9, 4), 100.0);
    }

    #[test]
    fn history_records_in_order() {
        let mut h = MetricsHistory::new();
        assert!(h.is_empty());
        h.record(snap(0, 4, 0));
        h.record(snap(1, 3, 2));
        assert_eq!(h.len(), 2);
        assert_eq!(h.latest(), Some(&snap(1, 3, 2)));
        let steps: Vec<_> = h.iter().map(|s| s.step.0).collect();
        assert_eq!(steps, vec![0, 1]);
        assert_eq!((&h).into_iter().count(), 2);
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    #[cfg(debug_assertions)]
    fn history_rejects_out_of_order_steps() {
        let mut h = MetricsHistory::new();
        h.record(snap(2, 0, 0));
        h.record(snap(1, 0, 0));
    }

    #[test]
    fn stop_reason_display() {
        assert_eq!(StopReason::AllClean.to_string(), "all clean");
        assert_eq!(
            StopReason::StepBudgetExhausted.to_string(),
            "step budget exhausted"
        );
    }
}
