//! # Gem Cascade
//!
//! Deterministic match-3 engine: seeded board generation, swap
//! validation, cascade resolution and scoring.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       GEM CASCADE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                 │
//! │  ├── rng.rs      - Mulberry32 session generator             │
//! │  ├── point.rs    - Grid coordinates and unit steps          │
//! │  └── hash.rs     - State digests                            │
//! │                                                             │
//! │  game/           - Board rules (deterministic)              │
//! │  ├── board.rs    - Grid storage                             │
//! │  ├── generate.rs - Match-free initial boards                │
//! │  ├── matcher.rs  - Run detection                            │
//! │  ├── scoring.rs  - Points and chain multiplier              │
//! │  ├── resolve.rs  - Clear / collapse / refill loop           │
//! │  ├── swap.rs     - Player swap entry point                  │
//! │  ├── state.rs    - Session state                            │
//! │  └── events.rs   - Step log                                 │
//! │                                                             │
//! │  replay/         - Transcripts and replay verification      │
//! │  present/        - Animation timing (read-only)             │
//! │  config.rs       - JSON settings                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! A session's evolution depends only on its settings, its seed and the
//! swaps applied to it:
//! - One generator per session, never shared
//! - Combo multipliers in integer billionths
//! - Fixed scan and refill order
//!
//! ```
//! use gem_cascade::{attempt_swap, GameSession, GridPoint, Settings};
//!
//! let mut session = GameSession::new(Settings::default().with_seed(42)).unwrap();
//! let outcome = attempt_swap(&mut session, GridPoint::new(5, 1), GridPoint::RIGHT);
//! assert!(outcome.kept());
//! assert_eq!(session.score(), 21);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod replay;
pub mod present;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use crate::core::point::GridPoint;
pub use crate::core::rng::SessionRng;
pub use config::{ScoreValues, Settings};
pub use error::{ConfigError, ReplayError, SettingsError};
pub use game::board::{Board, Cell, GemId};
pub use game::input::{Direction, MoveRecord};
pub use game::matcher::{find_matches, Match};
pub use game::state::GameSession;
pub use game::swap::{attempt_move, attempt_swap, SwapOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default board edge length
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Default number of gem types
pub const DEFAULT_GEM_TYPES: u32 = 5;

/// Default multiplier step per cascade level
pub const DEFAULT_COMBO_STEP: f64 = 0.1;

/// Smallest board that can hold a run
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest supported board edge
pub const MAX_BOARD_SIZE: usize = 256;

/// Fewest gem types that keep generation and refill terminating
pub const MIN_GEM_TYPES: u32 = 3;

/// Most gem types; id 255 is reserved as the empty marker in digests
pub const MAX_GEM_TYPES: u32 = 255;
