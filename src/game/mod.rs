//! Game Logic Module
//!
//! All board logic. Deterministic for a given seed.
//!
//! ## Module Structure
//!
//! - `board`: Grid storage and cell access
//! - `generate`: Match-free initial boards
//! - `matcher`: Run detection
//! - `scoring`: Points and chain multipliers
//! - `resolve`: Clear / collapse / refill loop
//! - `swap`: Player swap entry point
//! - `state`: Session state
//! - `input`: Directions and move records
//! - `events`: Step log for animation and replay

pub mod board;
pub mod generate;
pub mod matcher;
pub mod scoring;
pub mod resolve;
pub mod swap;
pub mod state;
pub mod input;
pub mod events;

// Re-export key types
pub use board::{Board, Cell, GemId};
pub use events::{GameEvent, GameEventData};
pub use input::{Direction, MoveRecord};
pub use matcher::{find_matches, Axis, Match};
pub use resolve::ResolveResult;
pub use state::{GameSession, MAX_PENDING_EVENTS};
pub use swap::{attempt_move, attempt_swap, RejectReason, SwapOutcome};
