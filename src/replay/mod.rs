//! Replay
//!
//! Reproduces a game from its seed and move history:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         REPLAY                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  transcript.rs   - Seed, moves, checkpoints, final digest   │
//! │  verify.rs       - Re-run moves and compare digests         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only sessions built with [`GameSession::new`](crate::GameSession::new)
//! can be replayed; a prepared board is not derivable from the seed, and
//! recording one fails with `ReplayError::NotReplayable`.

pub mod transcript;
pub mod verify;

// Re-export key types
pub use transcript::{Checkpoint, Transcript, CHECKPOINT_INTERVAL, TRANSCRIPT_VERSION};
pub use verify::{replay_moves, replay_with, verify_transcript};
