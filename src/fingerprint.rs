//! Stable-prefix fingerprinting
//!
//! The selected stable bytes are hashed into a 160-bit digest rendered as
//! lowercase hex. The digest is the logical identity key: equal signatures
//! mean the same physical tracker, distinct signatures are always distinct
//! trackers. Hash collisions between different prefixes are an accepted
//! residual risk and are not handled.

use sha1::{Digest, Sha1};

/// Logical identity key: 40-character lowercase hex SHA-1 digest
pub type Signature = String;

/// Hash a stable byte prefix into its signature
///
/// Deterministic and unsalted: the same bytes always produce the same
/// signature, including across process restarts.
#[must_use]
pub fn fingerprint(stable_bytes: &[u8]) -> Signature {
    hex::encode(Sha1::digest(stable_bytes))
}
