//! Board Initializer
//!
//! Fills a fresh board so that no run of three exists at creation time.

use crate::core::rng::SessionRng;
use crate::game::board::{Board, GemId};

/// Create a `size` x `size` board with no initial matches.
///
/// Cells are filled row-major. Each cell redraws until its gem does not
/// complete a run with the two cells to its left or the two cells above it.
/// Callers must pass `gem_types >= 3`; settings validation enforces this,
/// because at most two values are forbidden per cell.
pub fn generate_board(size: usize, gem_types: u32, rng: &mut SessionRng) -> Board {
    debug_assert!(gem_types >= 3, "board generation needs at least 3 gem types");

    let mut board = Board::empty(size);
    for y in 0..size {
        for x in 0..size {
            let gem = pick_safe_gem(&board, x, y, gem_types, rng);
            board.set(x, y, Some(gem));
        }
    }
    board
}

fn pick_safe_gem(board: &Board, x: usize, y: usize, gem_types: u32, rng: &mut SessionRng) -> GemId {
    loop {
        let candidate = rng.random_int(gem_types) as GemId;
        if !completes_run(board, x, y, candidate) {
            return candidate;
        }
    }
}

/// True if `gem` at `(x, y)` would finish a run with already placed cells.
fn completes_run(board: &Board, x: usize, y: usize, gem: GemId) -> bool {
    let horizontal = x >= 2
        && board.get(x - 1, y) == Some(gem)
        && board.get(x - 2, y) == Some(gem);
    let vertical = y >= 2
        && board.get(x, y - 1) == Some(gem)
        && board.get(x, y - 2) == Some(gem);
    horizontal || vertical
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::matcher::find_matches;

    /// Seed 42, 8x8, 5 gem types. Regression fixture: must never change.
    const SEED_42_BOARD: [[GemId; 8]; 8] = [
        [3, 2, 4, 3, 0, 2, 1, 3],
        [4, 2, 1, 4, 3, 1, 0, 2],
        [3, 3, 0, 2, 4, 0, 2, 0],
        [1, 0, 0, 3, 2, 0, 0, 4],
        [2, 4, 1, 2, 0, 2, 2, 1],
        [3, 1, 1, 3, 4, 2, 1, 1],
        [1, 0, 3, 3, 4, 0, 4, 2],
        [4, 0, 0, 1, 2, 3, 4, 0],
    ];

    #[test]
    fn test_seed_42_fixture() {
        let mut rng = SessionRng::new(42);
        let board = generate_board(8, 5, &mut rng);
        assert_eq!(board, Board::from_rows(&SEED_42_BOARD).unwrap());
    }

    #[test]
    fn test_generated_boards_have_no_matches() {
        for seed in 0..200 {
            let mut rng = SessionRng::new(seed);
            let board = generate_board(8, 5, &mut rng);
            assert!(find_matches(&board).is_empty(), "seed {seed} produced a match");
        }
    }

    #[test]
    fn test_three_gem_types_terminates() {
        for seed in 0..50 {
            let mut rng = SessionRng::new(seed);
            let board = generate_board(10, 3, &mut rng);
            assert!(find_matches(&board).is_empty());
        }
    }

    #[test]
    fn test_gems_within_range() {
        let mut rng = SessionRng::new(9);
        let board = generate_board(12, 6, &mut rng);
        for row in board.rows() {
            for cell in row {
                assert!(matches!(cell, Some(gem) if *gem < 6));
            }
        }
    }

    #[test]
    fn test_completes_run_checks_both_axes() {
        let board = Board::from_rows(&[[1, 1, 0], [1, 0, 0], [9, 3, 9]]).unwrap();
        assert!(completes_run(&board, 2, 0, 1));
        assert!(!completes_run(&board, 2, 0, 0));
        assert!(completes_run(&board, 0, 2, 1));
        assert!(completes_run(&board, 2, 2, 0));
        assert!(!completes_run(&board, 1, 2, 3));
    }
}
