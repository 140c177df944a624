//! Presentation Helpers
//!
//! Read-only consumers of the event log. Nothing here touches game state;
//! a frontend holds the session busy (`GameSession::set_busy`) while a
//! [`Sequencer`] is playing if it wants swipes ignored mid-animation.

pub mod sequencer;

pub use sequencer::{
    build_steps, ease_out_cubic, AnimationStep, CellTransform, FallEntry, Sequencer, StepKind,
};
