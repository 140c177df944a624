//! Core deterministic primitives.
//!
//! Everything the game rules build on: the seeded generator, grid
//! coordinates, and state hashing. Nothing here knows about gems.

pub mod point;
pub mod rng;
pub mod hash;

// Re-export core types
pub use point::GridPoint;
pub use rng::SessionRng;
pub use hash::{fingerprint, StateHash, StateHasher};
