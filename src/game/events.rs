//! Game Events
//!
//! Step log recorded while a swap resolves. The presentation layer replays
//! it for animation; the core never reads it back.

use serde::{Serialize, Deserialize};

use crate::core::point::GridPoint;
use crate::game::board::GemId;
use crate::game::matcher::Match;

/// A gem dropping inside its column during collapse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemFall {
    /// Gem that moved
    pub gem: GemId,
    /// Cell before the collapse
    pub from: GridPoint,
    /// Cell after the collapse
    pub to: GridPoint,
}

impl GemFall {
    /// Rows travelled.
    pub fn distance(&self) -> u32 {
        (self.to.y - self.from.y).unsigned_abs()
    }
}

/// A new gem entering a column during refill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemSpawn {
    /// Gem drawn from the RNG
    pub gem: GemId,
    /// Virtual cell above the board it enters from (row -1, -2, ...)
    pub from: GridPoint,
    /// Cell it lands in
    pub to: GridPoint,
}

impl GemSpawn {
    /// Rows travelled from the virtual entry row.
    pub fn distance(&self) -> u32 {
        (self.to.y - self.from.y).unsigned_abs()
    }
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Two cells were exchanged by the player
    SwapApplied {
        /// Cell the swipe started on
        source: GridPoint,
        /// Neighbour it swapped with
        target: GridPoint,
    },

    /// The swap produced no match and was undone
    SwapReverted {
        /// Cell the swipe started on
        source: GridPoint,
        /// Neighbour it swapped back with
        target: GridPoint,
    },

    /// One resolution cycle cleared its matches
    MatchesCleared {
        /// Cycle index, 0 for the swap's own matches
        chain: u32,
        /// Runs removed
        matches: Vec<Match>,
        /// Points this cycle added
        points: u64,
        /// Multiplier applied, in billionths
        multiplier_units: u64,
    },

    /// Surviving gems fell into the gaps
    Collapsed {
        /// Cycle index
        chain: u32,
        /// Gems that moved
        falls: Vec<GemFall>,
    },

    /// Empty cells were filled with fresh gems
    Refilled {
        /// Cycle index
        chain: u32,
        /// New gems, in draw order
        spawns: Vec<GemSpawn>,
    },

    /// The board settled
    CascadeFinished {
        /// Cycles run
        cycles: u32,
        /// Points the whole cascade added
        points: u64,
        /// Combo depth left on the session
        combo: u32,
        /// Session score afterwards
        score: u64,
    },
}

/// A game event tagged with the move that caused it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Index of the swap attempt (0-based) within the session
    pub move_index: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(move_index: u32, data: GameEventData) -> Self {
        Self { move_index, data }
    }

    /// Create swap applied event.
    pub fn swap_applied(move_index: u32, source: GridPoint, target: GridPoint) -> Self {
        Self::new(move_index, GameEventData::SwapApplied { source, target })
    }

    /// Create swap reverted event.
    pub fn swap_reverted(move_index: u32, source: GridPoint, target: GridPoint) -> Self {
        Self::new(move_index, GameEventData::SwapReverted { source, target })
    }

    /// Create matches cleared event.
    pub fn matches_cleared(
        move_index: u32,
        chain: u32,
        matches: Vec<Match>,
        points: u64,
        multiplier_units: u64,
    ) -> Self {
        Self::new(
            move_index,
            GameEventData::MatchesCleared {
                chain,
                matches,
                points,
                multiplier_units,
            },
        )
    }

    /// Create collapsed event.
    pub fn collapsed(move_index: u32, chain: u32, falls: Vec<GemFall>) -> Self {
        Self::new(move_index, GameEventData::Collapsed { chain, falls })
    }

    /// Create refilled event.
    pub fn refilled(move_index: u32, chain: u32, spawns: Vec<GemSpawn>) -> Self {
        Self::new(move_index, GameEventData::Refilled { chain, spawns })
    }

    /// Create cascade finished event.
    pub fn cascade_finished(move_index: u32, cycles: u32, points: u64, combo: u32, score: u64) -> Self {
        Self::new(
            move_index,
            GameEventData::CascadeFinished {
                cycles,
                points,
                combo,
                score,
            },
        )
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match &self.data {
            GameEventData::SwapApplied { .. } => "swap",
            GameEventData::SwapReverted { .. } => "revert",
            GameEventData::MatchesCleared { .. } => "clear",
            GameEventData::Collapsed { .. } => "collapse",
            GameEventData::Refilled { .. } => "refill",
            GameEventData::CascadeFinished { .. } => "settled",
        }
    }
}
