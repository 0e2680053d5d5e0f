//! Grid module - the scene's cell grid and its per-frame energy accumulators
//!
//! The grid is a fixed-size 2D array of cells stored as a flat row-major
//! array for cache locality. Each cell covers a `CELL_SIZE` x `CELL_SIZE`
//! square of world units. Solidity and emissivity are set once at
//! scene-build time; only the raw intensity accumulators change during a
//! frame, and they are kept in a separate parallel array so the static scene
//! data stays immutable while rays are in flight.

use gridlight_types::CELL_SIZE;

/// Static per-cell state, fixed after scene construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cell {
    /// Solid cells block and reflect light; open cells accumulate it.
    pub is_solid: bool,
    /// Attenuation factor applied to a ray's intensity on collision.
    /// Meaningful only for solid cells; in [0, 1].
    pub emissivity: f32,
}

/// Construction-time configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Rows or columns were zero.
    ZeroDimension,
    /// A pixel-buffer size was not divisible by `CELL_SIZE`.
    NotCellAligned { width: usize, height: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::ZeroDimension => write!(f, "grid dimensions must be positive"),
            GridError::NotCellAligned { width, height } => write!(
                f,
                "image size {}x{} is not divisible by the cell size {}",
                width, height, CELL_SIZE
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// The lighting grid: `rows x cols` cells plus raw intensity accumulators.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    raw: Vec<f32>,
}

impl Grid {
    /// Create an all-open grid. Fails fast on zero dimensions.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::ZeroDimension);
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
            raw: vec![0.0; rows * cols],
        })
    }

    /// Create a grid sized to tile a pixel buffer of `width x height`.
    pub fn for_image(width: usize, height: usize) -> Result<Self, GridError> {
        if width % CELL_SIZE != 0 || height % CELL_SIZE != 0 {
            return Err(GridError::NotCellAligned { width, height });
        }
        Self::new(height / CELL_SIZE, width / CELL_SIZE)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells (length of the flat arrays).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Calculate flat index from (col, row) coordinates.
    /// Returns None if out of bounds.
    #[inline(always)]
    pub fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || col >= self.cols as i32 || row < 0 || row >= self.rows as i32 {
            return None;
        }
        Some((row as usize) * self.cols + (col as usize))
    }

    /// Get the cell at (col, row). Returns None if out of bounds.
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row).map(|i| self.cells[i])
    }

    /// Cell lookup by flat index; callers must hold an index from
    /// [`Grid::index`].
    #[inline(always)]
    pub fn cell_at(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    /// Set solidity/emissivity at (col, row). Scene-build time only.
    /// Returns false if out of bounds.
    pub fn set_surface(&mut self, col: i32, row: i32, is_solid: bool, emissivity: f32) -> bool {
        match self.index(col, row) {
            Some(i) => {
                self.cells[i] = Cell {
                    is_solid,
                    emissivity,
                };
                true
            }
            None => false,
        }
    }

    /// Raw accumulated intensity at (col, row). Returns None if out of bounds.
    pub fn raw_intensity(&self, col: i32, row: i32) -> Option<f32> {
        self.index(col, row).map(|i| self.raw[i])
    }

    /// The full raw accumulation buffer, row-major.
    pub fn raw_values(&self) -> &[f32] {
        &self.raw
    }

    /// Merge a worker's partial accumulation buffer into the grid.
    ///
    /// `partial` must have one entry per cell; this is how the tracer's
    /// per-worker buffers land in the grid after the parallel cast joins.
    pub fn deposit(&mut self, partial: &[f32]) {
        debug_assert_eq!(partial.len(), self.raw.len());
        for (acc, add) in self.raw.iter_mut().zip(partial) {
            *acc += add;
        }
    }

    /// Reset all raw accumulators to zero. Called once per frame after the
    /// post-processor has consumed them.
    pub fn reset_intensities(&mut self) {
        self.raw.fill(0.0);
    }
}
