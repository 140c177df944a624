//! Session Digests
//!
//! SHA-256 over a fixed little-endian layout. Two sessions built from the
//! same settings and swaps produce the same digest; anything else differs.
//! Session digests and transcript fingerprints use separate domain tags,
//! so one can never be passed off as the other.

use sha2::{Digest, Sha256};

/// 32-byte SHA-256 output.
pub type StateHash = [u8; 32];

const SESSION_DOMAIN: &[u8] = b"GEM_CASCADE_STATE_V1";
const FINGERPRINT_DOMAIN: &[u8] = b"GEM_CASCADE_TRANSCRIPT_V1";

/// Incremental digest of one session.
///
/// Field order is part of the digest; callers write in a fixed order.
pub struct StateHasher {
    inner: Sha256,
}

impl StateHasher {
    /// Start a session digest. The header pins the move count and seed
    /// before any board or score data.
    pub fn session(move_count: u32, seed: u64) -> Self {
        let mut inner = Sha256::new();
        inner.update(SESSION_DOMAIN);
        inner.update(move_count.to_le_bytes());
        inner.update(seed.to_le_bytes());
        Self { inner }
    }

    /// Append one byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.inner.update([value]);
    }

    /// Append a little-endian u32.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.inner.update(value.to_le_bytes());
    }

    /// Append a little-endian u64.
    #[inline]
    pub fn write_u64(&mut self, value: u64) {
        self.inner.update(value.to_le_bytes());
    }

    /// Consume the hasher.
    pub fn finish(self) -> StateHash {
        self.inner.finalize().into()
    }
}

/// Fingerprint of an encoded transcript.
pub fn fingerprint(encoded: &[u8]) -> StateHash {
    let mut inner = Sha256::new();
    inner.update(FINGERPRINT_DOMAIN);
    inner.update(encoded);
    inner.finalize().into()
}

// =============================================================================
// TESTS
// =============================================================================
