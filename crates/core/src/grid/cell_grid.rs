//! Rectangular cell grid with a fixed burnt-out boundary ring

use rand::distr::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core_types::{CellState, NEIGHBOR_OFFSETS};
use crate::error::ConfigError;
use crate::grid::{SpeciesDistribution, StateCensus};

/// State the boundary ring is held at
pub const BOUNDARY_STATE: CellState = CellState::BurnedGround;

/// A `width × height` array of cell states, stored row-major.
///
/// Coordinates are `(x, y)` with `x` the column and `y` the row. The outermost ring
/// (row 0, row `height-1`, column 0, column `width-1`) is boundary; only interior cells
/// take part in the automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

/// Unchecked wire form of [`Grid`]; deserialization goes through [`Grid::from_cells`]
#[derive(Deserialize)]
struct GridRepr {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = ConfigError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        Self::from_cells(repr.width, repr.height, repr.cells)
    }
}

impl Grid {
    /// Smallest dimension that still leaves one interior cell
    pub const MIN_DIMENSION: usize = 3;

    /// Largest cell count a single allocation can hold
    pub const MAX_CELLS: usize = isize::MAX.unsigned_abs();

    /// Create a grid with every interior cell set to `fill` and the boundary burnt out
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::GridTooSmall`] if either dimension is below 3 and
    /// [`ConfigError::GridTooLarge`] if the cell count does not fit in memory.
    pub fn new(width: usize, height: usize, fill: CellState) -> Result<Self, ConfigError> {
        let len = cell_count(width, height)?;
        let mut grid = Self {
            width,
            height,
            cells: vec![fill; len],
        };
        grid.force_boundary();
        Ok(grid)
    }

    /// Wrap an existing row-major cell buffer.
    ///
    /// The buffer is taken verbatim, boundary included, so callers can hand in
    /// snapshots from elsewhere. The next step restores the boundary.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::GridTooSmall`] for dimensions below 3,
    /// [`ConfigError::GridTooLarge`] if `width * height` overflows and
    /// [`ConfigError::CellCountMismatch`] if `cells.len() != width * height`.
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<CellState>,
    ) -> Result<Self, ConfigError> {
        let expected = cell_count(width, height)?;
        if cells.len() != expected {
            return Err(ConfigError::CellCountMismatch {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Fill the interior by independent weighted draws from `distribution`
    ///
    /// Cells are drawn in row-major order, one draw per interior cell.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::GridTooSmall`] if either dimension is below 3 and
    /// [`ConfigError::GridTooLarge`] if the cell count does not fit in memory.
    pub fn random<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        distribution: &SpeciesDistribution,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let mut grid = Self::new(width, height, BOUNDARY_STATE)?;
        let sampler = distribution.sampler()?;

        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let drawn = CellState::ALL[sampler.sample(rng)];
                grid.set(x, y, drawn);
            }
        }

        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major view of all cells, boundary included
    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        y * self.width + x
    }

    /// State at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn state(&self, x: usize, y: usize) -> CellState {
        self.cells[self.idx(x, y)]
    }

    /// State at `(x, y)`, or `None` outside the grid
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<CellState> {
        (x < self.width && y < self.height).then(|| self.state(x, y))
    }

    /// Overwrite the state at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, state: CellState) {
        let i = self.idx(x, y);
        self.cells[i] = state;
    }

    #[inline]
    pub fn is_boundary(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    /// Reset every boundary cell to [`BOUNDARY_STATE`]
    pub fn force_boundary(&mut self) {
        let (w, h) = (self.width, self.height);
        for x in 0..w {
            self.cells[x] = BOUNDARY_STATE;
            self.cells[(h - 1) * w + x] = BOUNDARY_STATE;
        }
        for y in 1..h - 1 {
            self.cells[y * w] = BOUNDARY_STATE;
            self.cells[y * w + w - 1] = BOUNDARY_STATE;
        }
    }

    /// True if every boundary cell holds [`BOUNDARY_STATE`]
    pub fn boundary_intact(&self) -> bool {
        self.boundary_cells()
            .all(|(x, y)| self.state(x, y) == BOUNDARY_STATE)
    }

    /// Coordinates of every boundary cell
    pub fn boundary_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (w, h) = (self.width, self.height);
        (0..h)
            .flat_map(move |y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_boundary(x, y))
    }

    /// Interior coordinates in stepping order: column by column, top to bottom
    pub fn interior(&self) -> impl Iterator<Item = (usize, usize)> {
        let (w, h) = (self.width, self.height);
        (1..w - 1).flat_map(move |x| (1..h - 1).map(move |y| (x, y)))
    }

    /// State of the neighbor of `(x, y)` at [`NEIGHBOR_OFFSETS`]`[index]`, `None` if off-grid
    #[inline]
    pub fn neighbor(&self, x: usize, y: usize, index: usize) -> Option<CellState> {
        let (dy, dx) = NEIGHBOR_OFFSETS[index];
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.get(nx, ny)
    }

    /// True if any of the eight neighbors of `(x, y)` is `state`
    pub fn has_neighbor(&self, x: usize, y: usize, state: CellState) -> bool {
        (0..NEIGHBOR_OFFSETS.len()).any(|i| self.neighbor(x, y, i) == Some(state))
    }

    /// Number of cells (boundary included) in `state`
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Per-state cell counts
    pub fn census(&self) -> StateCensus {
        StateCensus::from_cells(&self.cells)
    }
}

/// Number of cells of a `width × height` grid, rejecting unusable sizes
fn cell_count(width: usize, height: usize) -> Result<usize, ConfigError> {
    if width < Grid::MIN_DIMENSION || height < Grid::MIN_DIMENSION {
        return Err(ConfigError::GridTooSmall { width, height });
    }
    width
        .checked_mul(height)
        .filter(|&len| len <= Grid::MAX_CELLS)
        .ok_or(ConfigError::GridTooLarge { width, height })
}
