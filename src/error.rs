//! Error types.
//!
//! Invalid game input never surfaces here: a rejected swap is a normal
//! [`SwapOutcome`](crate::game::swap::SwapOutcome). These errors cover
//! configuration and replay only.

use std::path::PathBuf;

/// Settings rejected at session creation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Board smaller than a single run.
    #[error("board size {size} is below the minimum of {min}")]
    BoardTooSmall {
        /// Requested size
        size: usize,
        /// Smallest allowed
        min: usize,
    },

    /// Board larger than the engine supports.
    #[error("board size {size} exceeds the maximum of {max}")]
    BoardTooLarge {
        /// Requested size
        size: usize,
        /// Largest allowed
        max: usize,
    },

    /// Fewer than three gem types cannot guarantee a match-free board.
    #[error("gem types {gem_types} is below the minimum of {min}")]
    TooFewGemTypes {
        /// Requested count
        gem_types: u32,
        /// Smallest allowed
        min: u32,
    },

    /// Gem ids must fit in a byte.
    #[error("gem types {gem_types} exceeds the maximum of {max}")]
    TooManyGemTypes {
        /// Requested count
        gem_types: u32,
        /// Largest allowed
        max: u32,
    },

    /// A supplied board holds a gem outside `[0, gem_types)`.
    #[error("gem {gem} at ({x}, {y}) is outside 0..{gem_types}")]
    GemOutOfRange {
        /// Offending gem
        gem: u8,
        /// Column
        x: usize,
        /// Row
        y: usize,
        /// Configured gem types
        gem_types: u32,
    },

    /// A supplied board has empty cells.
    #[error("board has an empty cell at ({x}, {y})")]
    EmptyCell {
        /// Column
        x: usize,
        /// Row
        y: usize,
    },

    /// A supplied board already contains a run of three.
    #[error("board already contains {count} match(es)")]
    BoardHasMatches {
        /// Runs found
        count: usize,
    },

    /// Combo step must be a finite, non-negative number.
    #[error("combo step {step} must be finite and non-negative")]
    InvalidComboStep {
        /// Configured step
        step: f64,
    },

    /// Combo step has more than nine decimal places.
    #[error("combo step {step} is not a whole number of billionths")]
    ComboStepTooFine {
        /// Configured step
        step: f64,
    },
}

/// Failure loading settings from disk or JSON.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// File could not be read.
    #[error("failed to read settings file {path:?}: {source}")]
    FileRead {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Malformed JSON.
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed but rejected by validation.
    #[error("invalid settings: {0}")]
    Invalid(#[from] ConfigError),
}

/// Failure reproducing a recorded game.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Recorded settings no longer validate.
    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),

    /// Session started from a prepared board, so its seed cannot rebuild it.
    #[error("session started from a prepared board and cannot be replayed")]
    NotReplayable,

    /// Intermediate digest differs.
    #[error("checkpoint after move {move_count} diverged: expected {expected}, got {actual}")]
    CheckpointMismatch {
        /// Moves applied at the checkpoint
        move_count: u32,
        /// Recorded digest (hex)
        expected: String,
        /// Replayed digest (hex)
        actual: String,
    },

    /// Final digest differs.
    #[error("state digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch {
        /// Recorded digest (hex)
        expected: String,
        /// Replayed digest (hex)
        actual: String,
    },

    /// Final score differs.
    #[error("score mismatch: expected {expected}, got {actual}")]
    ScoreMismatch {
        /// Recorded score
        expected: u64,
        /// Replayed score
        actual: u64,
    },

    /// Transcript written by an incompatible version.
    #[error("transcript version {got} is not supported (expected {expected})")]
    VersionMismatch {
        /// Supported version
        expected: u8,
        /// Version found
        got: u8,
    },

    /// Malformed transcript JSON.
    #[error("transcript JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed or truncated binary transcript.
    #[error("transcript encoding: {0}")]
    Binary(#[from] bincode::Error),
}
