//! Grid coordinates.

use std::fmt;

/// A cell coordinate on a two-dimensional grid.
///
/// `x` is the column and `y` is the row; both are zero-based. Whether a
/// position lies inside a particular grid is decided by that grid, not
/// by this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl Position {
    /// Create a position from column and row indices.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Apply a signed offset, returning `None` if either axis would
    /// become negative or overflow `u32`.
    ///
    /// Upper bounds are not checked here; the grid clips against its
    /// own extents.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Self { x, y })
    }

    /// Chebyshev (L-inf) distance, the number of king moves between cells.
    pub fn chebyshev(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u32, u32)> for Position {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn offset_rejects_negative_axes() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.offset(-1, 0), None);
        assert_eq!(origin.offset(0, -1), None);
        assert_eq!(origin.offset(1, 1), Some(Position::new(1, 1)));
    }

    #[test]
    fn offset_rejects_overflow() {
        let edge = Position::new(u32::MAX, 3);
        assert_eq!(edge.offset(1, 0), None);
        assert_eq!(edge.offset(-1, 0), Some(Position::new(u32::MAX - 1, 3)));
    }

    #[test]
    fn display_as_tuple() {
        assert_eq!(Position::new(3, 4).to_string(), "(3, 4)");
    }

    #[test]
    fn chebyshev_counts_diagonals_once() {
        assert_eq!(Position::new(0, 0).chebyshev(Position::new(1, 1)), 1);
        assert_eq!(Position::new(0, 0).chebyshev(Position::new(3, 4)), 4);
    }

    proptest! {
        #[test]
        fn chebyshev_is_symmetric(
            ax in 0u32..1000, ay in 0u32..1000,
            bx in 0u32..1000, by in 0u32..1000,
        ) {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            prop_assert_eq!(a.chebyshev(b), b.chebyshev(a));
            prop_assert_eq!(a.chebyshev(a), 0);
        }
    }
}
