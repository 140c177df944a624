//! Replay Verification
//!
//! Rebuilds a session from the seed and reapplies every recorded move.
//! Reverted moves are replayed too: they consume no randomness but do
//! count towards the move index.

use tracing::debug;

use crate::config::Settings;
use crate::error::{ConfigError, ReplayError};
use crate::game::input::MoveRecord;
use crate::game::state::GameSession;
use crate::game::swap::apply_record;
use crate::replay::transcript::{Transcript, TRANSCRIPT_VERSION};

/// Replay `moves`, calling `on_move` after each one.
///
/// `settings.seed` must be set for the result to be meaningful; with no
/// seed the session is clock-seeded like any other.
pub fn replay_with<F>(
    settings: Settings,
    moves: &[MoveRecord],
    mut on_move: F,
) -> Result<GameSession, ConfigError>
where
    F: FnMut(&GameSession),
{
    let mut session = GameSession::new(settings)?;
    for &record in moves {
        apply_record(&mut session, record);
        on_move(&session);
    }
    Ok(session)
}

/// Replay `moves` on a fresh session.
pub fn replay_moves(settings: Settings, moves: &[MoveRecord]) -> Result<GameSession, ConfigError> {
    replay_with(settings, moves, |_| {})
}

/// Replay a transcript and check it against its recorded results.
///
/// Checkpoints are compared as the replay passes them, so the error
/// names the first stretch of moves that diverged. Returns the replayed
/// session on success.
pub fn verify_transcript(transcript: &Transcript) -> Result<GameSession, ReplayError> {
    if transcript.version != TRANSCRIPT_VERSION {
        return Err(ReplayError::VersionMismatch {
            expected: TRANSCRIPT_VERSION,
            got: transcript.version,
        });
    }

    let mut checkpoints = transcript.checkpoints.iter().peekable();
    let mut divergence: Option<ReplayError> = None;

    let session = replay_with(transcript.settings.clone(), &transcript.moves, |session| {
        if divergence.is_some() {
            return;
        }
        let Some(checkpoint) = checkpoints.next_if(|c| c.move_count == session.move_count()) else {
            return;
        };
        let actual = session.compute_hash();
        if actual != checkpoint.state_hash {
            divergence = Some(ReplayError::CheckpointMismatch {
                move_count: checkpoint.move_count,
                expected: hex::encode(checkpoint.state_hash),
                actual: hex::encode(actual),
            });
        }
    })?;

    if let Some(err) = divergence {
        return Err(err);
    }

    if session.score() != transcript.final_score {
        return Err(ReplayError::ScoreMismatch {
            expected: transcript.final_score,
            actual: session.score(),
        });
    }

    let digest = session.compute_hash();
    if digest != transcript.final_digest {
        return Err(ReplayError::DigestMismatch {
            expected: hex::encode(transcript.final_digest),
            actual: hex::encode(digest),
        });
    }

    debug!(
        moves = transcript.moves.len(),
        score = session.score(),
        digest = %hex::encode(digest),
        "transcript verified"
    );

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::point::GridPoint;
    use crate::game::input::Direction;
    use crate::game::swap::attempt_move;

    fn play(seed: u64, limit: usize) -> GameSession {
        let mut session = GameSession::new(Settings::default().with_seed(seed)).unwrap();
        let mut kept = 0;
        'outer: for y in 0..8 {
            for x in 0..8 {
                for dir in [Direction::Right, Direction::Down] {
                    if attempt_move(&mut session, GridPoint::new(x, y), dir).kept() {
                        kept += 1;
                        if kept == limit {
                            break 'outer;
                        }
                    }
                }
            }
        }
        session
    }

    #[test]
    fn test_replay_reproduces_session() {
        let live = play(42, 5);
        assert!(live.move_count() > 0);

        let settings = live.settings().clone().with_seed(live.seed());
        let replayed = replay_moves(settings, live.history()).unwrap();

        assert_eq!(replayed.board(), live.board());
        assert_eq!(replayed.score(), live.score());
        assert_eq!(replayed.compute_hash(), live.compute_hash());
    }

    #[test]
    fn test_replay_calls_back_per_move() {
        let live = play(9, 3);
        let settings = live.settings().clone().with_seed(live.seed());

        let mut seen = Vec::new();
        replay_with(settings, live.history(), |s| seen.push(s.move_count())).unwrap();

        let expected: Vec<u32> = (1..=live.move_count()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_verify_accepts_honest_transcript() {
        let live = play(42, 10);
        let transcript = Transcript::from_session(&live).unwrap();
        let replayed = verify_transcript(&transcript).unwrap();
        assert_eq!(replayed.score(), live.score());
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let live = play(42, 10);
        let transcript = Transcript::from_session(&live).unwrap();

        let mut bad_score = transcript.clone();
        bad_score.final_score += 1;
        assert!(matches!(
            verify_transcript(&bad_score),
            Err(ReplayError::ScoreMismatch { .. })
        ));

        let mut bad_digest = transcript.clone();
        bad_digest.final_digest[0] ^= 0xFF;
        assert!(matches!(
            verify_transcript(&bad_digest),
            Err(ReplayError::DigestMismatch { .. })
        ));

        let mut bad_version = transcript.clone();
        bad_version.version = TRANSCRIPT_VERSION + 1;
        assert!(matches!(
            verify_transcript(&bad_version),
            Err(ReplayError::VersionMismatch { .. })
        ));

        let mut bad_seed = transcript;
        bad_seed.settings.seed = Some(43);
        assert!(verify_transcript(&bad_seed).is_err());
    }

    #[test]
    fn test_verify_reports_first_bad_checkpoint() {
        let live = play(42, 10);
        let mut transcript = Transcript::from_session(&live).unwrap();
        assert!(!transcript.checkpoints.is_empty());

        transcript.checkpoints[0].state_hash = [0; 32];
        let err = verify_transcript(&transcript).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::CheckpointMismatch { move_count, .. } if move_count == transcript.checkpoints[0].move_count
        ));
    }
}
