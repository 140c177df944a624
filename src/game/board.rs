//! Board Model
//!
//! Square grid of gem ids stored row-major. A cell is either a gem
//! (`Some(id)`) or empty (`None`); empties only exist mid-resolution.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::hash::StateHasher;
use crate::core::point::GridPoint;

/// Gem identifier, always below the session's `gem_types`.
pub type GemId = u8;

/// Contents of one board cell.
pub type Cell = Option<GemId>;

/// Byte used for empty cells when hashing.
const EMPTY_HASH_MARKER: u8 = 0xFF;

/// N x N grid of cells, addressed by `(x, y)` with row 0 at the top.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board with every cell empty.
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a board from rows of gem ids.
    ///
    /// Returns `None` unless the rows form a non-empty square.
    pub fn from_rows<R: AsRef<[GemId]>>(rows: &[R]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|row| row.as_ref().len() != size) {
            return None;
        }
        let cells = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().map(|&gem| Some(gem)))
            .collect();
        Some(Self { size, cells })
    }

    /// Edge length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.size && y < self.size,
            "cell ({x}, {y}) off {size}x{size} board",
            size = self.size
        );
        y * self.size + x
    }

    /// True if `point` lies on the board.
    #[inline]
    pub fn in_bounds(&self, point: GridPoint) -> bool {
        point.in_bounds(self.size)
    }

    /// Cell at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is off the board. [`Board::at`] accepts any point.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    /// Cell at `point`, or `None` if off the board or empty.
    #[inline]
    pub fn at(&self, point: GridPoint) -> Cell {
        if self.in_bounds(point) {
            self.get(point.x as usize, point.y as usize)
        } else {
            None
        }
    }

    /// Overwrite the cell at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is off the board.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let i = self.index(x, y);
        self.cells[i] = cell;
    }

    /// Empty the cell at `point` if it is on the board.
    pub fn clear(&mut self, point: GridPoint) {
        if self.in_bounds(point) {
            self.set(point.x as usize, point.y as usize, None);
        }
    }

    /// Exchange two cells.
    ///
    /// # Panics
    ///
    /// If either point is off the board.
    pub fn swap(&mut self, a: GridPoint, b: GridPoint) {
        assert!(self.in_bounds(a) && self.in_bounds(b), "swap {a} <-> {b} leaves the board");
        let ia = self.index(a.x as usize, a.y as usize);
        let ib = self.index(b.x as usize, b.y as usize);
        self.cells.swap(ia, ib);
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Copy of the grid for renderers.
    pub fn snapshot(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// Hash the grid row-major.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.write_u32(self.size as u32);
        for cell in &self.cells {
            hasher.write_u8(cell.unwrap_or(EMPTY_HASH_MARKER));
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{}", self.size, self.size)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(gem) => gem.to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
