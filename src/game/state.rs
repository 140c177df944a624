//! Game Session State
//!
//! One session owns one board and one RNG. Nothing is shared between
//! sessions, so any number of them can run side by side.
//!
//! Every swap appends to the session's event log. Callers that want the
//! events drain them with [`GameSession::take_events`]; a log that is
//! never drained keeps only the newest [`MAX_PENDING_EVENTS`] entries.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::config::Settings;
use crate::core::hash::{StateHash, StateHasher};
use crate::core::rng::SessionRng;
use crate::error::ConfigError;
use crate::game::board::{Board, Cell};
use crate::game::events::GameEvent;
use crate::game::generate::generate_board;
use crate::game::input::MoveRecord;
use crate::game::matcher::find_matches;
use crate::game::scoring::ScoreTable;

/// Undrained events kept per session. Older ones are dropped first.
pub const MAX_PENDING_EVENTS: usize = 4096;

/// Complete state of one match-3 game.
#[derive(Clone, Debug)]
pub struct GameSession {
    /// Validated settings
    pub(crate) settings: Settings,

    /// Scoring rules derived from settings
    pub(crate) scoring: ScoreTable,

    /// Seed the RNG started from (for verification)
    pub(crate) rng_seed: u64,

    /// Deterministic RNG state
    pub(crate) rng: SessionRng,

    /// Authoritative board
    pub(crate) board: Board,

    /// Running score, never decreases
    pub(crate) score: u64,

    /// Cascade depth of the last resolved swap
    pub(crate) combo: u32,

    /// Busy guard: set while a swap resolves or a replay holds the session
    pub(crate) moving: bool,

    /// Swaps that reached the resolver (kept or reverted)
    pub(crate) history: Vec<MoveRecord>,

    /// Events generated since the last drain, oldest first
    pub(crate) pending_events: VecDeque<GameEvent>,

    /// Events dropped from the front of the log since the last drain
    pub(crate) dropped_events: u64,

    /// False when the starting board was supplied rather than generated
    pub(crate) replayable: bool,
}

impl GameSession {
    /// Create a session with a freshly generated, match-free board.
    ///
    /// Settings are validated first; invalid ones never reach the generator.
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let rng_seed = settings.resolve_seed();
        let mut rng = SessionRng::new(rng_seed);
        let board = generate_board(settings.board_size, settings.gem_types, &mut rng);

        debug!(seed = rng_seed, size = settings.board_size, gem_types = settings.gem_types, "session created");

        Ok(Self::assemble(settings, rng_seed, rng, board, true))
    }

    /// Create a session around a prepared board.
    ///
    /// The RNG is seeded but not advanced, so refills start at the first
    /// value of the seed's sequence. `board_size` is taken from the board.
    pub fn from_board(mut settings: Settings, board: Board) -> Result<Self, ConfigError> {
        settings.board_size = board.size();
        settings.validate()?;

        for (y, row) in board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    None => return Err(ConfigError::EmptyCell { x, y }),
                    Some(gem) if u32::from(*gem) >= settings.gem_types => {
                        return Err(ConfigError::GemOutOfRange {
                            gem: *gem,
                            x,
                            y,
                            gem_types: settings.gem_types,
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        let existing = find_matches(&board).len();
        if existing > 0 {
            return Err(ConfigError::BoardHasMatches { count: existing });
        }

        let rng_seed = settings.resolve_seed();
        let rng = SessionRng::new(rng_seed);
        Ok(Self::assemble(settings, rng_seed, rng, board, false))
    }

    fn assemble(settings: Settings, rng_seed: u64, rng: SessionRng, board: Board, replayable: bool) -> Self {
        Self {
            scoring: ScoreTable::from_settings(&settings),
            settings,
            rng_seed,
            rng,
            board,
            score: 0,
            combo: 0,
            moving: false,
            history: Vec::new(),
            pending_events: VecDeque::new(),
            dropped_events: 0,
            replayable,
        }
    }

    /// Settings the session was created with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Scoring rules in effect.
    pub fn scoring(&self) -> &ScoreTable {
        &self.scoring
    }

    /// Read-only view of the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Copy of the grid for renderers.
    pub fn snapshot(&self) -> Vec<Vec<Cell>> {
        self.board.snapshot()
    }

    /// Current score.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Cascade depth of the last kept swap (0 after a failed swap).
    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// True if the starting board came from the seed, so the session can
    /// be rebuilt from its settings and history.
    pub fn is_replayable(&self) -> bool {
        self.replayable
    }

    /// Seed the session started from.
    pub fn seed(&self) -> u64 {
        self.rng_seed
    }

    /// Number of swaps that reached the resolver.
    pub fn move_count(&self) -> u32 {
        self.history.len() as u32
    }

    /// Swaps that reached the resolver, in order.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// True while a swap is in flight or the presentation layer holds the session.
    pub fn is_busy(&self) -> bool {
        self.moving
    }

    /// Hold or release the session.
    ///
    /// A presentation layer replaying a cascade can hold the session so that
    /// swipes arriving mid-animation are rejected instead of queued.
    pub fn set_busy(&mut self, busy: bool) {
        self.moving = busy;
    }

    /// Take pending events (consumes them).
    ///
    /// Drain after each swap to see every event. Once more than
    /// [`MAX_PENDING_EVENTS`] pile up the oldest are discarded.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.dropped_events = 0;
        Vec::from(std::mem::take(&mut self.pending_events))
    }

    /// Events waiting to be drained.
    pub fn pending_event_count(&self) -> usize {
        self.pending_events.len()
    }

    /// Events discarded since the last drain because the log was full.
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    /// Push a game event.
    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.pending_events.len() >= MAX_PENDING_EVENTS {
            if self.dropped_events == 0 {
                warn!(limit = MAX_PENDING_EVENTS, "event log full, dropping oldest events");
            }
            self.pending_events.pop_front();
            self.dropped_events += 1;
        }
        self.pending_events.push_back(event);
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::session(self.move_count(), self.rng_seed);
        self.board.hash_into(&mut hasher);
        hasher.write_u64(self.score);
        hasher.write_u32(self.combo);
        hasher.write_u32(self.rng.state());
        hasher.finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
