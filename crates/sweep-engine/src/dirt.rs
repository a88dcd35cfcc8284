//! Passive per-cell dirt state.
//!
//! Dirt is not an agent: it never acts and never occupies a cell in the
//! grid's sense. [`DirtMap`] stores at most one [`DirtMarker`] per cell,
//! addressed by position, and only ever transitions markers from dirty
//! to clean.

use rand::seq::index;
use rand::Rng;
use sweep_core::Position;
use sweep_space::{Grid, GridError};

/// Dirt state of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtMarker {
    position: Position,
    dirty: bool,
}

impl DirtMarker {
    fn new(position: Position) -> Self {
        Self {
            position,
            dirty: true,
        }
    }

    /// The cell this marker belongs to.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether the cell still needs cleaning.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// The dirt layer of a run.
///
/// Markers are created once at initialization and never removed, so
/// cleaned cells remain available for final accounting.
#[derive(Clone, Debug)]
pub struct DirtMap {
    width: u32,
    height: u32,
    /// Row-major cell rank -> index into `markers`.
    cells: Vec<Option<usize>>,
    markers: Vec<DirtMarker>,
    dirty: usize,
}

impl DirtMap {
    /// An empty dirt layer sized to `grid`.
    pub fn empty(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: vec![None; grid.cell_count()],
            markers: Vec::new(),
            dirty: 0,
        }
    }

    /// Mark `count` distinct cells dirty, sampled uniformly without
    /// replacement. `count` is capped at the grid's cell count.
    pub fn scatter<R: Rng + ?Sized>(grid: &Grid, count: usize, rng: &mut R) -> Self {
        let mut map = Self::empty(grid);
        let amount = count.min(grid.cell_count());
        for rank in index::sample(rng, grid.cell_count(), amount) {
            if let Some(position) = grid.position_at(rank) {
                map.insert(rank, position);
            }
        }
        map
    }

    /// Mark the given cells dirty. Duplicate positions collapse into one
    /// marker.
    pub fn from_positions(
        grid: &Grid,
        positions: impl IntoIterator<Item = Position>,
    ) -> Result<Self, GridError> {
        let mut map = Self::empty(grid);
        for position in positions {
            let rank = grid.rank(position).ok_or(GridError::OutOfBounds {
                position,
                width: grid.width(),
                height: grid.height(),
            })?;
            map.insert(rank, position);
        }
        Ok(map)
    }

    fn insert(&mut self, rank: usize, position: Position) {
        if self.cells[rank].is_some() {
            return;
        }
        self.cells[rank] = Some(self.markers.len());
        self.markers.push(DirtMarker::new(position));
        self.dirty += 1;
    }

    fn slot(&self, position: Position) -> Option<usize> {
        if position.x >= self.width || position.y >= self.height {
            return None;
        }
        let rank = position.y as usize * self.width as usize + position.x as usize;
        self.cells[rank]
    }

    /// The marker on `position`, if that cell was ever dirty.
    pub fn at(&self, position: Position) -> Option<&DirtMarker> {
        self.slot(position).map(|i| &self.markers[i])
    }

    /// Whether `position` currently holds dirt.
    pub fn is_dirty_at(&self, position: Position) -> bool {
        self.at(position).is_some_and(DirtMarker::is_dirty)
    }

    /// Clean `position`. Returns `true` iff a dirty marker became clean.
    ///
    /// Cells without a marker, already-clean cells and positions outside
    /// the layer are left alone.
    pub fn clean_at(&mut self, position: Position) -> bool {
        let Some(i) = self.slot(position) else {
            return false;
        };
        let marker = &mut self.markers[i];
        if !marker.dirty {
            return false;
        }
        marker.dirty = false;
        self.dirty -= 1;
        true
    }

    /// Number of markers, i.e. cells that started dirty.
    pub fn total(&self) -> usize {
        self.markers.len()
    }

    /// Number of markers still dirty.
    pub fn dirty_count(&self) -> usize {
        self.dirty
    }

    /// Number of markers cleaned so far.
    pub fn cleaned_count(&self) -> usize {
        self.markers.len() - self.dirty
    }

    /// `true` while any marker is dirty.
    pub fn any_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// All markers in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &DirtMarker> + '_ {
        self.markers.iter()
    }
}
