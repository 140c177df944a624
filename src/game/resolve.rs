//! Cascade Resolver
//!
//! Drives the board from a freshly swapped state back to a stable one:
//!
//! ```text
//!   Scanning ──no matches──▶ Done
//!      │
//!   matches
//!      ▼
//!   Clearing ──▶ Collapsing ──▶ Refilling ──chain + 1──▶ Scanning
//! ```
//!
//! Each full cycle scores its matches once, using the chain depth it
//! started with. There is no cycle cap; long cascades simply run on.

use tracing::trace;

use crate::core::point::GridPoint;
use crate::core::rng::SessionRng;
use crate::game::board::{Board, GemId};
use crate::game::events::{GameEvent, GemFall, GemSpawn};
use crate::game::matcher::{find_matches, Match};
use crate::game::state::GameSession;

/// Phase of the resolution state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvePhase {
    /// Looking for matches
    Scanning,
    /// Removing the matches just found
    Clearing(Vec<Match>),
    /// Dropping surviving gems into gaps
    Collapsing,
    /// Drawing new gems for empty cells
    Refilling,
    /// Board is stable
    Done,
}

/// Summary of one resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveResult {
    /// True if the first scan found anything
    pub matched: bool,
    /// Points added across all cycles
    pub points: u64,
    /// Completed clear/collapse/refill cycles
    pub cycles: u32,
    /// Combo depth left on the session (`cycles - 1`, or 0)
    pub combo: u32,
}

/// Resolve the session's board until no match remains.
///
/// Mutates board, score, combo and RNG, and records one event per step
/// tagged with `move_index`.
pub fn resolve_board(session: &mut GameSession, move_index: u32) -> ResolveResult {
    let gem_types = session.settings.gem_types;
    let mut phase = ResolvePhase::Scanning;
    let mut chain: u32 = 0;
    let mut points: u64 = 0;

    loop {
        phase = match phase {
            ResolvePhase::Scanning => {
                let matches = find_matches(&session.board);
                if matches.is_empty() {
                    ResolvePhase::Done
                } else {
                    ResolvePhase::Clearing(matches)
                }
            }
            ResolvePhase::Clearing(matches) => {
                let cycle_points = session.scoring.cycle_points(&matches, chain);
                let multiplier = session.scoring.multiplier_units(chain);
                trace!(chain, matches = matches.len(), cycle_points, "clearing");

                clear_matches(&mut session.board, &matches);
                points = points.saturating_add(cycle_points);
                session.score = session.score.saturating_add(cycle_points);
                session.push_event(GameEvent::matches_cleared(
                    move_index,
                    chain,
                    matches,
                    cycle_points,
                    multiplier,
                ));
                ResolvePhase::Collapsing
            }
            ResolvePhase::Collapsing => {
                let falls = collapse_board(&mut session.board);
                if !falls.is_empty() {
                    session.push_event(GameEvent::collapsed(move_index, chain, falls));
                }
                ResolvePhase::Refilling
            }
            ResolvePhase::Refilling => {
                let spawns = refill_board(&mut session.board, gem_types, &mut session.rng);
                session.push_event(GameEvent::refilled(move_index, chain, spawns));

                #[cfg(feature = "debug-tracing")]
                trace!(chain, board = %session.board, "cycle complete");

                chain += 1;
                ResolvePhase::Scanning
            }
            ResolvePhase::Done => break,
        };
    }

    let combo = chain.saturating_sub(1);
    session.combo = combo;

    if chain > 0 {
        session.push_event(GameEvent::cascade_finished(
            move_index,
            chain,
            points,
            combo,
            session.score,
        ));
    }

    ResolveResult {
        matched: chain > 0,
        points,
        cycles: chain,
        combo,
    }
}

/// Empty every cell covered by a match.
pub fn clear_matches(board: &mut Board, matches: &[Match]) {
    for m in matches {
        for &cell in &m.cells {
            board.clear(cell);
        }
    }
}

/// Compact each column downward, keeping gem order.
///
/// Returns every gem that moved. Empty cells end up at the top.
pub fn collapse_board(board: &mut Board) -> Vec<GemFall> {
    let size = board.size();
    let mut falls = Vec::new();

    for x in 0..size {
        // Next free row from the bottom; never underflows since at most
        // `size` gems exist per column.
        let mut write = size;
        for y in (0..size).rev() {
            let Some(gem) = board.get(x, y) else {
                continue;
            };
            write -= 1;
            if write != y {
                board.set(x, write, Some(gem));
                board.set(x, y, None);
                falls.push(GemFall {
                    gem,
                    from: GridPoint::new(x as i32, y as i32),
                    to: GridPoint::new(x as i32, write as i32),
                });
            }
        }
    }

    falls
}

/// Fill every empty cell with a fresh gem.
///
/// Columns are processed left to right, each from its lowest empty cell
/// upward; the RNG draw order depends on this. Refills may create new
/// matches.
pub fn refill_board(board: &mut Board, gem_types: u32, rng: &mut SessionRng) -> Vec<GemSpawn> {
    let size = board.size();
    let mut spawns = Vec::new();

    for x in 0..size {
        let mut entry_row: i32 = 0;
        for y in (0..size).rev() {
            if board.get(x, y).is_some() {
                continue;
            }
            entry_row -= 1;
            let gem = rng.random_int(gem_types) as GemId;
            board.set(x, y, Some(gem));
            spawns.push(GemSpawn {
                gem,
                from: GridPoint::new(x as i32, entry_row),
                to: GridPoint::new(x as i32, y as i32),
            });
        }
    }

    spawns
}
