//! Bounded 2D grid with Moore neighbourhood and multi-occupancy cells.

use crate::error::GridError;
use indexmap::IndexMap;
use smallvec::SmallVec;
use sweep_core::{AgentId, Position};

/// All 8 offsets as `(dx, dy)`: N, S, W, E, NW, NE, SW, SE.
const OFFSETS_8: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Neighbour list returned by [`Grid::neighbours`].
///
/// Nine slots cover the full Moore neighbourhood plus the optional center
/// without touching the heap.
pub type Neighbours = SmallVec<[Position; 9]>;

/// A two-dimensional, non-wrapping grid of multi-occupancy cells.
///
/// Each cell has coordinate `(x, y)` with `x` in `[0, width)` and `y` in
/// `[0, height)`. Neighbours are the 8-connected Moore neighbourhood
/// clipped to the grid: cells beyond the edge are omitted, never wrapped.
///
/// Occupancy is tracked in two directions that are always kept in sync:
/// a per-cell list of agents and a per-agent position. Every placed agent
/// has exactly one recorded position, and [`move_to`](Grid::move_to)
/// updates both sides before returning, so no query ever observes an
/// agent in two cells or in none.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<SmallVec<[AgentId; 4]>>,
    positions: IndexMap<AgentId, Position>,
}

impl Grid {
    /// Create an empty `width x height` grid.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if either dimension is 0, or
    /// `Err(GridError::TooLarge)` if the cell count exceeds `u32::MAX`.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        let cell_count = width
            .checked_mul(height)
            .ok_or(GridError::TooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![SmallVec::new(); cell_count as usize],
            positions: IndexMap::new(),
        })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of placed agents.
    pub fn agent_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether `position` lies inside the grid.
    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// Row-major index of `position`, or `None` if it is out of bounds.
    pub fn rank(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        Some(position.y as usize * self.width as usize + position.x as usize)
    }

    /// Inverse of [`rank`](Self::rank).
    pub fn position_at(&self, rank: usize) -> Option<Position> {
        if rank >= self.cells.len() {
            return None;
        }
        let w = self.width as usize;
        // Both quotients are below u32::MAX because the cell count is.
        Some(Position::new((rank % w) as u32, (rank / w) as u32))
    }

    /// All cells in row-major order: `(0,0), (1,0), ..., (width-1, height-1)`.
    pub fn canonical_ordering(&self) -> Vec<Position> {
        let mut out = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(Position::new(x, y));
            }
        }
        out
    }

    /// Moore neighbours of `position`, clipped to the grid.
    ///
    /// The order is fixed (N, S, W, E, NW, NE, SW, SE) with the center
    /// appended last when `include_center` is set. A 1x1 grid has no
    /// neighbours.
    pub fn neighbours(
        &self,
        position: Position,
        include_center: bool,
    ) -> Result<Neighbours, GridError> {
        self.check_bounds(position)?;
        let mut result = Neighbours::new();
        for (dx, dy) in OFFSETS_8 {
            if let Some(nb) = position.offset(dx, dy) {
                if self.contains(nb) {
                    result.push(nb);
                }
            }
        }
        if include_center {
            result.push(position);
        }
        Ok(result)
    }

    /// Agents standing on `position`, in arrival order.
    pub fn occupants_at(&self, position: Position) -> Result<&[AgentId], GridError> {
        let rank = self.check_bounds(position)?;
        Ok(self.cells[rank].as_slice())
    }

    /// `true` iff no agent stands on `position`.
    ///
    /// Only agents count as occupants; per-cell state such as dirt lives
    /// outside the grid and never makes a cell non-empty.
    pub fn is_empty(&self, position: Position) -> Result<bool, GridError> {
        Ok(self.occupants_at(position)?.is_empty())
    }

    /// Current position of `agent`, if it has been placed.
    pub fn position_of(&self, agent: AgentId) -> Option<Position> {
        self.positions.get(&agent).copied()
    }

    /// Record `agent` at `position`.
    ///
    /// Fails with [`GridError::OutOfBounds`] outside the grid and with
    /// [`GridError::AlreadyPlaced`] if the agent already has a position.
    /// On failure the grid is unchanged.
    pub fn place(&mut self, agent: AgentId, position: Position) -> Result<(), GridError> {
        let rank = self.check_bounds(position)?;
        if let Some(&current) = self.positions.get(&agent) {
            return Err(GridError::AlreadyPlaced {
                agent,
                position: current,
            });
        }
        self.cells[rank].push(agent);
        let _ = self.positions.insert(agent, position);
        Ok(())
    }

    /// Atomically relocate `agent` to `position`.
    ///
    /// Both the target bounds and the agent's placement are validated
    /// before anything is mutated, so on error the grid is unchanged.
    /// Returns the position the agent left.
    pub fn move_to(&mut self, agent: AgentId, position: Position) -> Result<Position, GridError> {
        let to_rank = self.check_bounds(position)?;
        let from = self
            .position_of(agent)
            .ok_or(GridError::NotPlaced { agent })?;
        let from_rank = self.check_bounds(from)?;

        let cell = &mut self.cells[from_rank];
        if let Some(slot) = cell.iter().position(|&a| a == agent) {
            let _ = cell.remove(slot);
        }
        self.cells[to_rank].push(agent);
        let _ = self.positions.insert(agent, position);
        Ok(from)
    }

    /// Validate `position` and return its row-major rank.
    fn check_bounds(&self, position: Position) -> Result<usize, GridError> {
        self.rank(position).ok_or(GridError::OutOfBounds {
            position,
            width: self.width,
            height: self.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn p(x: u32, y: u32) -> Position {
        Position::new(x, y)
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn new_zero_width_returns_error() {
        assert_eq!(Grid::new(0, 5).unwrap_err(), GridError::EmptyGrid);
        assert_eq!(Grid::new(5, 0).unwrap_err(), GridError::EmptyGrid);
    }

    #[test]
    fn new_rejects_cell_count_overflow() {
        assert!(matches!(
            Grid::new(u32::MAX, 2),
            Err(GridError::TooLarge { .. })
        ));
    }

    #[test]
    fn rank_roundtrips_row_major() {
        let g = Grid::new(4, 3).unwrap();
        assert_eq!(g.rank(p(0, 0)), Some(0));
        assert_eq!(g.rank(p(3, 0)), Some(3));
        assert_eq!(g.rank(p(1, 2)), Some(9));
        assert_eq!(g.rank(p(4, 0)), None);
        assert_eq!(g.position_at(9), Some(p(1, 2)));
        assert_eq!(g.position_at(12), None);
    }

    #[test]
    fn canonical_ordering_is_row_major() {
        let g = Grid::new(2, 2).unwrap();
        assert_eq!(
            g.canonical_ordering(),
            vec![p(0, 0), p(1, 0), p(0, 1), p(1, 1)]
        );
    }

    // ── Neighbour tests ─────────────────────────────────────────

    #[test]
    fn neighbours_interior() {
        let g = Grid::new(5, 5).unwrap();
        let n = g.neighbours(p(2, 2), false).unwrap();
        assert_eq!(n.len(), 8);
        assert!(!n.contains(&p(2, 2)));
    }

    #[test]
    fn neighbours_corner() {
        let g = Grid::new(5, 5).unwrap();
        let n = g.neighbours(p(0, 0), false).unwrap();
        assert_eq!(n.len(), 3);
        assert!(n.contains(&p(1, 0)));
        assert!(n.contains(&p(0, 1)));
        assert!(n.contains(&p(1, 1)));
    }

    #[test]
    fn neighbours_far_corner_does_not_wrap() {
        let g = Grid::new(5, 5).unwrap();
        let n = g.neighbours(p(4, 4), false).unwrap();
        assert_eq!(n.len(), 3);
        assert!(!n.contains(&p(0, 0)));
    }

    #[test]
    fn neighbours_edge() {
        let g = Grid::new(5, 5).unwrap();
        assert_eq!(g.neighbours(p(2, 0), false).unwrap().len(), 5);
        assert_eq!(g.neighbours(p(0, 2), false).unwrap().len(), 5);
    }

    #[test]
    fn neighbours_include_center_appends_self() {
        let g = Grid::new(5, 5).unwrap();
        let n = g.neighbours(p(2, 2), true).unwrap();
        assert_eq!(n.len(), 9);
        assert_eq!(n.last(), Some(&p(2, 2)));
    }

    #[test]
    fn neighbours_fixed_order() {
        let g = Grid::new(3, 3).unwrap();
        let n = g.neighbours(p(1, 1), false).unwrap();
        assert_eq!(
            n.as_slice(),
            &[
                p(1, 0),
                p(1, 2),
                p(0, 1),
                p(2, 1),
                p(0, 0),
                p(2, 0),
                p(0, 2),
                p(2, 2)
            ]
        );
    }

    #[test]
    fn single_cell_has_no_neighbours() {
        let g = Grid::new(1, 1).unwrap();
        assert!(g.neighbours(p(0, 0), false).unwrap().is_empty());
        assert_eq!(g.neighbours(p(0, 0), true).unwrap().as_slice(), &[p(0, 0)]);
    }

    #[test]
    fn neighbours_out_of_bounds_errors() {
        let g = Grid::new(3, 3).unwrap();
        assert!(matches!(
            g.neighbours(p(3, 0), false),
            Err(GridError::OutOfBounds { width: 3, height: 3, .. })
        ));
    }

    // ── Occupancy tests ─────────────────────────────────────────

    #[test]
    fn place_records_position_and_occupant() {
        let mut g = Grid::new(3, 3).unwrap();
        g.place(AgentId(0), p(1, 1)).unwrap();
        assert_eq!(g.position_of(AgentId(0)), Some(p(1, 1)));
        assert_eq!(g.occupants_at(p(1, 1)).unwrap(), &[AgentId(0)]);
        assert!(!g.is_empty(p(1, 1)).unwrap());
        assert!(g.is_empty(p(0, 0)).unwrap());
    }

    #[test]
    fn cells_are_multi_occupancy() {
        let mut g = Grid::new(3, 3).unwrap();
        for i in 0..4 {
            g.place(AgentId(i), p(1, 1)).unwrap();
        }
        assert_eq!(g.occupants_at(p(1, 1)).unwrap().len(), 4);
        assert_eq!(g.agent_count(), 4);
    }

    #[test]
    fn place_out_of_bounds_leaves_grid_unchanged() {
        let mut g = Grid::new(3, 3).unwrap();
        let err = g.place(AgentId(0), p(3, 3)).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { .. }));
        assert_eq!(g.agent_count(), 0);
    }

    #[test]
    fn place_twice_is_rejected() {
        let mut g = Grid::new(3, 3).unwrap();
        g.place(AgentId(0), p(0, 0)).unwrap();
        assert_eq!(
            g.place(AgentId(0), p(1, 1)).unwrap_err(),
            GridError::AlreadyPlaced {
                agent: AgentId(0),
                position: p(0, 0)
            }
        );
        assert_eq!(g.position_of(AgentId(0)), Some(p(0, 0)));
    }

    #[test]
    fn move_is_atomic_remove_then_insert() {
        let mut g = Grid::new(3, 3).unwrap();
        g.place(AgentId(0), p(0, 0)).unwrap();
        g.place(AgentId(1), p(0, 0)).unwrap();
        let from = g.move_to(AgentId(0), p(1, 0)).unwrap();
        assert_eq!(from, p(0, 0));
        assert_eq!(g.occupants_at(p(0, 0)).unwrap(), &[AgentId(1)]);
        assert_eq!(g.occupants_at(p(1, 0)).unwrap(), &[AgentId(0)]);
        assert_eq!(g.position_of(AgentId(0)), Some(p(1, 0)));
        compliance::assert_occupancy_consistent(&g);
    }

    #[test]
    fn move_out_of_bounds_leaves_agent_in_place() {
        let mut g = Grid::new(3, 3).unwrap();
        g.place(AgentId(0), p(2, 2)).unwrap();
        assert!(matches!(
            g.move_to(AgentId(0), p(3, 2)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(g.position_of(AgentId(0)), Some(p(2, 2)));
        assert_eq!(g.occupants_at(p(2, 2)).unwrap(), &[AgentId(0)]);
    }

    #[test]
    fn move_unplaced_agent_errors() {
        let mut g = Grid::new(3, 3).unwrap();
        assert_eq!(
            g.move_to(AgentId(9), p(0, 0)).unwrap_err(),
            GridError::NotPlaced { agent: AgentId(9) }
        );
    }

    // ── Compliance suites ───────────────────────────────────────

    #[test]
    fn compliance_square() {
        let g = Grid::new(6, 6).unwrap();
        compliance::run_full_compliance(&g);
    }

    #[test]
    fn compliance_strip() {
        let g = Grid::new(1, 7).unwrap();
        compliance::run_full_compliance(&g);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn neighbours_symmetric_and_in_bounds(
            width in 1u32..12,
            height in 1u32..12,
            x in 0u32..12,
            y in 0u32..12,
        ) {
            let g = Grid::new(width, height).unwrap();
            let pos = p(x % width, y % height);
            for nb in g.neighbours(pos, false).unwrap() {
                prop_assert!(g.contains(nb));
                prop_assert_eq!(nb.chebyshev(pos), 1);
                prop_assert!(g.neighbours(nb, false).unwrap().contains(&pos));
            }
        }

        #[test]
        fn random_moves_keep_occupancy_consistent(
            moves in proptest::collection::vec((0u32..4, 0u32..5, 0u32..5), 0..40),
        ) {
            let mut g = Grid::new(5, 5).unwrap();
            for i in 0..4 {
                g.place(AgentId(i), p(0, 0)).unwrap();
            }
            for (agent, x, y) in moves {
                g.move_to(AgentId(agent), p(x, y)).unwrap();
            }
            compliance::assert_occupancy_consistent(&g);
            prop_assert_eq!(g.agent_count(), 4);
        }
    }
}
