//! Swap Controller
//!
//! Entry point for player input. A swap is validated, applied, resolved
//! and either kept or undone, all inside one call.

use tracing::{debug, instrument};

use crate::core::point::GridPoint;
use crate::game::events::GameEvent;
use crate::game::input::{Direction, MoveRecord};
use crate::game::resolve::resolve_board;
use crate::game::state::GameSession;

/// Why a swap never touched the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Another swap is resolving or the session is held
    Busy,
    /// Source or target lies off the board
    OutOfBounds,
    /// Delta is not a single orthogonal step
    NotAdjacent,
}

/// Result of a swap attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap produced matches and stays applied
    Kept {
        /// Points added by the cascade
        points: u64,
        /// Resolution cycles run
        cycles: u32,
        /// Combo depth after the cascade
        combo: u32,
    },
    /// The swap produced no match and was undone
    Reverted,
    /// The swap was refused before any change
    Rejected(RejectReason),
}

impl SwapOutcome {
    /// True only if the swap stayed applied.
    pub fn kept(&self) -> bool {
        matches!(self, SwapOutcome::Kept { .. })
    }
}

/// Try to swap `source` with `source + delta`.
///
/// Rejections leave the session untouched. A swap that matches nothing
/// is reverted and resets the combo, but consumes no randomness.
#[instrument(level = "debug", skip(session), fields(seed = session.seed()))]
pub fn attempt_swap(session: &mut GameSession, source: GridPoint, delta: GridPoint) -> SwapOutcome {
    if session.moving {
        return SwapOutcome::Rejected(RejectReason::Busy);
    }

    let Some(direction) = Direction::from_delta(delta) else {
        return SwapOutcome::Rejected(RejectReason::NotAdjacent);
    };

    let target = source + delta;
    if !session.board.in_bounds(source) || !session.board.in_bounds(target) {
        return SwapOutcome::Rejected(RejectReason::OutOfBounds);
    }

    let move_index = session.move_count();
    session.moving = true;
    session.history.push(MoveRecord::new(source, direction));

    session.board.swap(source, target);
    session.push_event(GameEvent::swap_applied(move_index, source, target));

    let result = resolve_board(session, move_index);

    let outcome = if result.matched {
        debug!(points = result.points, cycles = result.cycles, score = session.score, "swap kept");
        SwapOutcome::Kept {
            points: result.points,
            cycles: result.cycles,
            combo: result.combo,
        }
    } else {
        session.board.swap(source, target);
        session.combo = 0;
        session.push_event(GameEvent::swap_reverted(move_index, source, target));
        debug!("swap reverted");
        SwapOutcome::Reverted
    };

    session.moving = false;
    outcome
}

/// Try to swap `source` with its neighbour in `direction`.
pub fn attempt_move(session: &mut GameSession, source: GridPoint, direction: Direction) -> SwapOutcome {
    attempt_swap(session, source, direction.delta())
}

/// Apply a recorded move.
pub fn apply_record(session: &mut GameSession, record: MoveRecord) -> SwapOutcome {
    attempt_move(session, record.source, record.direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::game::board::Board;
    use crate::game::events::GameEventData;
    use crate::game::matcher::find_matches;

    const BASE: [[u8; 8]; 8] = [
        [0, 1, 2, 3, 4, 0, 1, 2],
        [2, 3, 4, 0, 1, 2, 3, 4],
        [4, 0, 0, 2, 3, 4, 0, 1],
        [1, 2, 3, 0, 0, 1, 2, 3],
        [3, 4, 0, 1, 2, 3, 4, 0],
        [0, 1, 2, 3, 4, 0, 1, 2],
        [2, 3, 4, 0, 1, 2, 3, 4],
        [4, 0, 1, 2, 3, 4, 0, 1],
    ];

    fn session(seed: u64) -> GameSession {
        let board = Board::from_rows(&BASE).unwrap();
        GameSession::from_board(Settings::default().with_seed(seed), board).unwrap()
    }

    #[test]
    fn test_single_match_keeps_swap() {
        let mut s = session(0);
        let outcome = attempt_swap(&mut s, GridPoint::new(3, 2), GridPoint::DOWN);

        assert!(outcome.kept());
        assert_eq!(outcome, SwapOutcome::Kept { points: 10, cycles: 1, combo: 0 });
        assert_eq!(s.score(), 10);
        assert_eq!(s.combo(), 0);
        assert!(!s.is_busy());

        let expected = Board::from_rows(&[
            [0, 1, 0, 1, 4, 0, 1, 2],
            [2, 1, 2, 3, 1, 2, 3, 4],
            [4, 3, 4, 0, 3, 4, 0, 1],
            [1, 2, 3, 2, 0, 1, 2, 3],
            [3, 4, 0, 1, 2, 3, 4, 0],
            [0, 1, 2, 3, 4, 0, 1, 2],
            [2, 3, 4, 0, 1, 2, 3, 4],
            [4, 0, 1, 2, 3, 4, 0, 1],
        ])
        .unwrap();
        assert_eq!(s.board(), &expected);
    }

    #[test]
    fn test_cascade_builds_combo() {
        let mut s = session(7);
        let outcome = attempt_swap(&mut s, GridPoint::new(3, 2), GridPoint::DOWN);
        assert_eq!(outcome, SwapOutcome::Kept { points: 21, cycles: 2, combo: 1 });
        assert_eq!(s.score(), 21);
        assert_eq!(s.combo(), 1);

        let mut s = session(23);
        let outcome = attempt_swap(&mut s, GridPoint::new(3, 2), GridPoint::DOWN);
        assert_eq!(outcome, SwapOutcome::Kept { points: 33, cycles: 3, combo: 2 });
        assert_eq!(s.combo(), 2);
        assert!(find_matches(s.board()).is_empty());
    }

    #[test]
    fn test_failed_swap_reverts() {
        let mut s = session(0);
        let rng_before = s.rng.clone();

        let outcome = attempt_swap(&mut s, GridPoint::new(0, 0), GridPoint::RIGHT);

        assert_eq!(outcome, SwapOutcome::Reverted);
        assert!(!outcome.kept());
        assert_eq!(s.board(), &Board::from_rows(&BASE).unwrap());
        assert_eq!(s.score(), 0);
        assert_eq!(s.rng, rng_before);
        assert_eq!(s.move_count(), 1);

        let labels: Vec<_> = s.take_events().iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["swap", "revert"]);
    }

    #[test]
    fn test_failed_swap_resets_combo() {
        let mut s = session(7);
        attempt_swap(&mut s, GridPoint::new(3, 2), GridPoint::DOWN);
        assert_eq!(s.combo(), 1);

        // Find any swap that does nothing on the new board.
        let reverted = (0..8)
            .flat_map(|y| (0..7).map(move |x| GridPoint::new(x, y)))
            .any(|p| attempt_swap(&mut s, p, GridPoint::RIGHT) == SwapOutcome::Reverted);
        assert!(reverted);
        assert_eq!(s.combo(), 0);
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut s = session(0);
        let hash = s.compute_hash();

        assert_eq!(
            attempt_swap(&mut s, GridPoint::new(7, 0), GridPoint::RIGHT),
            SwapOutcome::Rejected(RejectReason::OutOfBounds)
        );
        assert_eq!(
            attempt_swap(&mut s, GridPoint::new(-1, 0), GridPoint::RIGHT),
            SwapOutcome::Rejected(RejectReason::OutOfBounds)
        );
        assert_eq!(
            attempt_swap(&mut s, GridPoint::new(2, 2), GridPoint::new(1, 1)),
            SwapOutcome::Rejected(RejectReason::NotAdjacent)
        );
        assert_eq!(
            attempt_swap(&mut s, GridPoint::new(2, 2), GridPoint::ZERO),
            SwapOutcome::Rejected(RejectReason::NotAdjacent)
        );
        assert_eq!(
            attempt_swap(&mut s, GridPoint::new(2, 2), GridPoint::new(2, 0)),
            SwapOutcome::Rejected(RejectReason::NotAdjacent)
        );

        s.set_busy(true);
        assert_eq!(
            attempt_swap(&mut s, GridPoint::new(3, 2), GridPoint::DOWN),
            SwapOutcome::Rejected(RejectReason::Busy)
        );
        s.set_busy(false);

        assert_eq!(s.compute_hash(), hash);
        assert_eq!(s.move_count(), 0);
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn test_direction_form_matches_delta_form() {
        let mut a = session(7);
        let mut b = session(7);
        attempt_swap(&mut a, GridPoint::new(3, 2), GridPoint::DOWN);
        attempt_move(&mut b, GridPoint::new(3, 2), Direction::Down);
        assert_eq!(a.compute_hash(), b.compute_hash());

        // Swapping from the other end is the same swap.
        let mut c = session(7);
        attempt_move(&mut c, GridPoint::new(3, 3), Direction::Up);
        assert_eq!(a.board(), c.board());
        assert_eq!(a.score(), c.score());
    }

    #[test]
    fn test_kept_swap_event_order() {
        let mut s = session(7);
        attempt_swap(&mut s, GridPoint::new(3, 2), GridPoint::DOWN);
        let events = s.take_events();

        assert!(events.iter().all(|e| e.move_index == 0));
        assert!(matches!(events[0].data, GameEventData::SwapApplied { .. }));
        assert!(matches!(
            events.last().map(|e| &e.data),
            Some(GameEventData::CascadeFinished { cycles: 2, points: 21, combo: 1, score: 21 })
        ));

        let cleared: Vec<_> = events
            .iter()
            .filter_map(|e| match &e.data {
                GameEventData::MatchesCleared { chain, points, .. } => Some((*chain, *points)),
                _ => None,
            })
            .collect();
        assert_eq!(cleared, vec![(0, 10), (1, 11)]);
    }
}
