//! Animation Sequencer
//!
//! Turns a drained event log into timed animation steps and plays them
//! back against a caller-supplied clock. The board state is already
//! final when playback starts; this only decides what to draw.

use std::collections::VecDeque;

use crate::core::point::GridPoint;
use crate::game::events::{GameEvent, GameEventData};

/// Swap (and swap-back) duration.
pub const SWAP_MS: u32 = 200;

/// Clear (fade and shrink) duration.
pub const CLEAR_MS: u32 = 220;

/// Fall duration for a single gem.
pub const FALL_MS: u32 = 400;

/// Extra delay per row a gem falls.
pub const FALL_STAGGER_MS: u32 = 18;

/// Cubic ease-out on `[0, 1]`.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// One gem in a fall step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FallEntry {
    /// Landing cell
    pub cell: GridPoint,
    /// Row the gem starts from (negative for new gems)
    pub from_row: i32,
    /// Start delay within the step
    pub delay_ms: u32,
}

impl FallEntry {
    fn new(from: GridPoint, to: GridPoint) -> Self {
        let rows = (to.y - from.y).max(0) as u32;
        Self {
            cell: to,
            from_row: from.y,
            delay_ms: rows * FALL_STAGGER_MS,
        }
    }
}

/// What a step animates.
#[derive(Clone, Debug, PartialEq)]
pub enum StepKind {
    /// Two gems trading places (also used for the swap-back)
    Swap {
        /// First cell
        a: GridPoint,
        /// Second cell
        b: GridPoint,
    },
    /// Matched gems fading out
    Clear {
        /// Cleared cells
        cells: Vec<GridPoint>,
    },
    /// Surviving and new gems dropping into place
    Fall {
        /// Cascade cycle this fall belongs to
        chain: u32,
        /// Gems that move
        entries: Vec<FallEntry>,
    },
}

/// A timed animation.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationStep {
    /// Move that produced it
    pub move_index: u32,
    /// What to draw
    pub kind: StepKind,
    /// Base duration
    pub duration_ms: u32,
}

impl AnimationStep {
    fn swap(move_index: u32, a: GridPoint, b: GridPoint) -> Self {
        Self {
            move_index,
            kind: StepKind::Swap { a, b },
            duration_ms: SWAP_MS,
        }
    }

    /// Staggered tail after the base duration (falls only).
    pub fn extra_ms(&self) -> u32 {
        match &self.kind {
            StepKind::Fall { entries, .. } => entries.iter().map(|e| e.delay_ms).max().unwrap_or(0),
            _ => 0,
        }
    }

    /// Time until the step is done.
    pub fn total_ms(&self) -> u32 {
        self.duration_ms + self.extra_ms()
    }

    /// Draw transform for `cell` at `elapsed_ms` into this step.
    ///
    /// Offsets are in cells; the renderer scales them to pixels.
    pub fn transform(&self, cell: GridPoint, elapsed_ms: u32) -> CellTransform {
        let mut out = CellTransform::IDENTITY;
        let ease = ease_out_cubic(f64::from(elapsed_ms) / f64::from(self.duration_ms));

        match &self.kind {
            StepKind::Swap { a, b } => {
                let from = if cell == *a {
                    Some(*b)
                } else if cell == *b {
                    Some(*a)
                } else {
                    None
                };
                if let Some(from) = from {
                    out.offset_x = f64::from(from.x - cell.x) * (1.0 - ease);
                    out.offset_y = f64::from(from.y - cell.y) * (1.0 - ease);
                }
            }
            StepKind::Clear { cells } => {
                if cells.contains(&cell) {
                    out.alpha = 1.0 - ease;
                    out.scale = 1.0 - 0.4 * ease;
                }
            }
            StepKind::Fall { entries, .. } => {
                if let Some(entry) = entries.iter().find(|e| e.cell == cell) {
                    let local = elapsed_ms.saturating_sub(entry.delay_ms);
                    let ease = ease_out_cubic(f64::from(local) / f64::from(self.duration_ms));
                    out.offset_y = f64::from(entry.from_row - cell.y) * (1.0 - ease);
                }
            }
        }

        out
    }
}

/// How to draw one cell this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellTransform {
    /// Horizontal offset in cells
    pub offset_x: f64,
    /// Vertical offset in cells
    pub offset_y: f64,
    /// Opacity
    pub alpha: f64,
    /// Size factor
    pub scale: f64,
}

impl CellTransform {
    /// No offset, fully visible.
    pub const IDENTITY: Self = Self {
        offset_x: 0.0,
        offset_y: 0.0,
        alpha: 1.0,
        scale: 1.0,
    };
}

/// Build animation steps from events.
///
/// A collapse and the refill of the same cycle become one fall step;
/// `CascadeFinished` has nothing to draw.
pub fn build_steps(events: &[GameEvent]) -> Vec<AnimationStep> {
    let mut steps: Vec<AnimationStep> = Vec::new();

    for event in events {
        let move_index = event.move_index;
        match &event.data {
            GameEventData::SwapApplied { source, target }
            | GameEventData::SwapReverted { source, target } => {
                steps.push(AnimationStep::swap(move_index, *source, *target));
            }
            GameEventData::MatchesCleared { matches, .. } => {
                let mut cells: Vec<GridPoint> = Vec::new();
                for cell in matches.iter().flat_map(|m| m.cells.iter().copied()) {
                    if !cells.contains(&cell) {
                        cells.push(cell);
                    }
                }
                steps.push(AnimationStep {
                    move_index,
                    kind: StepKind::Clear { cells },
                    duration_ms: CLEAR_MS,
                });
            }
            GameEventData::Collapsed { chain, falls } => {
                let entries = falls.iter().map(|f| FallEntry::new(f.from, f.to));
                push_fall(&mut steps, move_index, *chain, entries);
            }
            GameEventData::Refilled { chain, spawns } => {
                let entries = spawns.iter().map(|s| FallEntry::new(s.from, s.to));
                push_fall(&mut steps, move_index, *chain, entries);
            }
            GameEventData::CascadeFinished { .. } => {}
        }
    }

    steps
}

fn push_fall<I>(steps: &mut Vec<AnimationStep>, move_index: u32, chain: u32, entries: I)
where
    I: IntoIterator<Item = FallEntry>,
{
    if let Some(AnimationStep {
        move_index: last_move,
        kind: StepKind::Fall { chain: last_chain, entries: existing },
        ..
    }) = steps.last_mut()
    {
        if *last_move == move_index && *last_chain == chain {
            existing.extend(entries);
            return;
        }
    }

    let entries: Vec<FallEntry> = entries.into_iter().collect();
    if entries.is_empty() {
        return;
    }
    steps.push(AnimationStep {
        move_index,
        kind: StepKind::Fall { chain, entries },
        duration_ms: FALL_MS,
    });
}

/// Plays animation steps back one after another.
#[derive(Clone, Debug, Default)]
pub struct Sequencer {
    steps: VecDeque<AnimationStep>,
    elapsed_ms: u32,
}

impl Sequencer {
    /// Create an empty sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequencer for the given events.
    pub fn from_events(events: &[GameEvent]) -> Self {
        let mut sequencer = Self::new();
        sequencer.push_events(events);
        sequencer
    }

    /// Queue steps for more events behind whatever is playing.
    pub fn push_events(&mut self, events: &[GameEvent]) {
        self.steps.extend(build_steps(events));
    }

    /// Advance playback by `elapsed_ms`.
    ///
    /// Returns the steps that finished during this call. Time left over
    /// after a step ends carries into the next one.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<AnimationStep> {
        let mut finished = Vec::new();
        let mut budget = elapsed_ms;

        while let Some(step) = self.steps.front() {
            let remaining = step.total_ms().saturating_sub(self.elapsed_ms);
            if budget < remaining {
                self.elapsed_ms += budget;
                break;
            }
            budget -= remaining;
            self.elapsed_ms = 0;
            if let Some(done) = self.steps.pop_front() {
                finished.push(done);
            }
        }

        finished
    }

    /// Step being played and time spent in it.
    pub fn current(&self) -> Option<(&AnimationStep, u32)> {
        self.steps.front().map(|step| (step, self.elapsed_ms))
    }

    /// Transform for `cell` in the current frame.
    pub fn transform(&self, cell: GridPoint) -> CellTransform {
        match self.current() {
            Some((step, elapsed)) => step.transform(cell, elapsed),
            None => CellTransform::IDENTITY,
        }
    }

    /// True once every queued step has played.
    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps still queued, including the current one.
    pub fn pending(&self) -> usize {
        self.steps.len()
    }

    /// Time left until playback ends.
    pub fn remaining_ms(&self) -> u32 {
        let total: u32 = self.steps.iter().map(AnimationStep::total_ms).sum();
        total.saturating_sub(self.elapsed_ms)
    }
}
