//! Match Finder
//!
//! Reports every maximal straight run of three or more equal gems.

use serde::{Serialize, Deserialize};

use crate::core::point::GridPoint;
use crate::game::board::{Board, GemId};

/// Shortest run that counts as a match.
pub const MIN_RUN: usize = 3;

/// Direction a run extends in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Along a row
    Horizontal,
    /// Along a column
    Vertical,
}

/// One maximal run of equal gems.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Gem shared by every cell
    pub gem: GemId,
    /// Run direction
    pub axis: Axis,
    /// Cells in scan order (left to right or top to bottom)
    pub cells: Vec<GridPoint>,
}

impl Match {
    /// Number of cells in the run.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a reported match; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if this run covers `point`.
    pub fn contains(&self, point: GridPoint) -> bool {
        self.cells.contains(&point)
    }
}

/// Find all runs of length >= 3.
///
/// Rows are scanned first (top to bottom, left to right), then columns
/// (left to right, top to bottom). A cell may belong to both a horizontal
/// and a vertical match; both are reported and never merged.
pub fn find_matches(board: &Board) -> Vec<Match> {
    let size = board.size();
    let mut matches = Vec::new();

    for y in 0..size {
        scan_line(size, |i| GridPoint::new(i as i32, y as i32), board, Axis::Horizontal, &mut matches);
    }
    for x in 0..size {
        scan_line(size, |i| GridPoint::new(x as i32, i as i32), board, Axis::Vertical, &mut matches);
    }

    matches
}

/// Collapse one line into runs and keep the long ones.
fn scan_line<F>(len: usize, point_at: F, board: &Board, axis: Axis, out: &mut Vec<Match>)
where
    F: Fn(usize) -> GridPoint,
{
    let mut start = 0;
    while start < len {
        let value = board.at(point_at(start));
        let mut run = 1;
        while start + run < len && board.at(point_at(start + run)) == value {
            run += 1;
        }

        if let Some(gem) = value {
            if run >= MIN_RUN {
                out.push(Match {
                    gem,
                    axis,
                    cells: (start..start + run).map(&point_at).collect(),
                });
            }
        }

        start += run;
    }
}
