//! Grid invariant test helpers.
//!
//! Reused across the grid test module to check topology and occupancy
//! invariants on arbitrary grid shapes.

use crate::grid::Grid;
use indexmap::IndexSet;

/// Assert that `b in neighbours(a)` implies `a in neighbours(b)`.
pub fn assert_neighbours_symmetric(grid: &Grid) {
    for pos in grid.canonical_ordering() {
        for nb in grid.neighbours(pos, false).unwrap() {
            let back = grid.neighbours(nb, false).unwrap();
            assert!(
                back.contains(&pos),
                "neighbour symmetry violated: {nb} in N({pos}) but {pos} not in N({nb})"
            );
        }
    }
}

/// Assert that every neighbour lies inside the grid and is distinct.
pub fn assert_neighbours_in_bounds_and_unique(grid: &Grid) {
    for pos in grid.canonical_ordering() {
        let n = grid.neighbours(pos, false).unwrap();
        let unique: IndexSet<_> = n.iter().copied().collect();
        assert_eq!(unique.len(), n.len(), "duplicate neighbours of {pos}");
        for nb in n {
            assert!(grid.contains(nb), "neighbour {nb} of {pos} out of bounds");
            assert_ne!(nb, pos, "{pos} listed as its own neighbour");
        }
    }
}

/// Assert the Moore degree of each cell: `(cols in window) * (rows in window) - 1`.
pub fn assert_degree_profile(grid: &Grid) {
    let (w, h) = (grid.width(), grid.height());
    for pos in grid.canonical_ordering() {
        let span = |v: u32, len: u32| -> usize {
            let lo = v.saturating_sub(1);
            let hi = (v + 1).min(len - 1);
            (hi - lo + 1) as usize
        };
        let expected = span(pos.x, w) * span(pos.y, h) - 1;
        let got = grid.neighbours(pos, false).unwrap().len();
        assert_eq!(got, expected, "degree of {pos} in {w}x{h} grid");
    }
}

/// Assert that `canonical_ordering` returns exactly `cell_count` unique cells.
pub fn assert_canonical_ordering_complete(grid: &Grid) {
    let ordering = grid.canonical_ordering();
    assert_eq!(ordering.len(), grid.cell_count());
    let unique: IndexSet<_> = ordering.iter().copied().collect();
    assert_eq!(unique.len(), ordering.len(), "duplicate cells in ordering");
    for (rank, pos) in ordering.iter().enumerate() {
        assert_eq!(grid.rank(*pos), Some(rank));
    }
}

/// Assert that per-cell occupants and per-agent positions agree.
pub fn assert_occupancy_consistent(grid: &Grid) {
    let mut seen = 0usize;
    for pos in grid.canonical_ordering() {
        for &agent in grid.occupants_at(pos).unwrap() {
            assert_eq!(
                grid.position_of(agent),
                Some(pos),
                "agent {agent} listed at {pos} but recorded elsewhere"
            );
            seen += 1;
        }
    }
    assert_eq!(seen, grid.agent_count(), "occupant count mismatch");
}

/// Run all topology compliance checks.
pub fn run_full_compliance(grid: &Grid) {
    assert_neighbours_symmetric(grid);
    assert_neighbours_in_bounds_and_unique(grid);
    assert_degree_profile(grid);
    assert_canonical_ordering_complete(grid);
    assert_occupancy_consistent(grid);
}
