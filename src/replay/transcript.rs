//! Game Transcript Recording
//!
//! Everything needed to reproduce a finished game: settings with the
//! seed pinned, the move history and the results to check against.

use serde::{Serialize, Deserialize};

use crate::config::Settings;
use crate::core::hash::{fingerprint, StateHash};
use crate::error::ReplayError;
use crate::game::input::MoveRecord;
use crate::game::state::GameSession;
use crate::replay::verify::replay_with;

/// Current transcript version.
pub const TRANSCRIPT_VERSION: u8 = 1;

/// Moves between recorded checkpoints.
pub const CHECKPOINT_INTERVAL: u32 = 10;

/// Session digest at a fixed point in the move history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Moves applied when the digest was taken
    pub move_count: u32,
    /// Score at that point
    pub score: u64,
    /// Session digest at that point
    pub state_hash: StateHash,
}

/// Recorded game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Version for forward compatibility.
    pub version: u8,

    /// Settings with `seed` always set.
    pub settings: Settings,

    /// Every move that reached the resolver, in order.
    pub moves: Vec<MoveRecord>,

    /// Digests every [`CHECKPOINT_INTERVAL`] moves.
    pub checkpoints: Vec<Checkpoint>,

    /// Score after the last move.
    pub final_score: u64,

    /// Session digest after the last move.
    pub final_digest: StateHash,
}

impl Transcript {
    /// Record a transcript of `session`.
    ///
    /// Checkpoints are collected by replaying the history. Sessions built
    /// with [`GameSession::from_board`] give [`ReplayError::NotReplayable`].
    pub fn from_session(session: &GameSession) -> Result<Self, ReplayError> {
        if !session.is_replayable() {
            return Err(ReplayError::NotReplayable);
        }
        let settings = session.settings().clone().with_seed(session.seed());
        let moves = session.history().to_vec();

        let mut checkpoints = Vec::new();
        replay_with(settings.clone(), &moves, |replayed| {
            let move_count = replayed.move_count();
            if move_count % CHECKPOINT_INTERVAL == 0 {
                checkpoints.push(Checkpoint {
                    move_count,
                    score: replayed.score(),
                    state_hash: replayed.compute_hash(),
                });
            }
        })?;

        Ok(Self {
            version: TRANSCRIPT_VERSION,
            settings,
            moves,
            checkpoints,
            final_score: session.score(),
            final_digest: session.compute_hash(),
        })
    }

    /// Seed the game started from.
    pub fn seed(&self) -> Option<u64> {
        self.settings.seed
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(s: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize to bytes using bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ReplayError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ReplayError> {
        Ok(bincode::deserialize(data)?)
    }

    /// Content hash of the binary encoding.
    ///
    /// Two transcripts share a fingerprint only if every field matches.
    pub fn fingerprint(&self) -> Result<StateHash, ReplayError> {
        Ok(fingerprint(&self.to_bytes()?))
    }
}
