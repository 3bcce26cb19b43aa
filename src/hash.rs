//! Short-code derivation
//!
//! A code is a pure function of the target URL: SHAKE-128 squeezed to 24
//! bytes and hex-encoded. Both the client and the backend must agree on this
//! construction, since the edge router carries no hashing logic of its own.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake128;

/// Number of bytes squeezed from the XOF; rendered as 48 hex characters
pub const CODE_BYTES: usize = 24;

/// Derives the short code for a URL
///
/// Deterministic, keyed by nothing: the same URL always yields the same
/// code, so repeated submissions of one URL address the same mapping.
/// Distinct URLs colliding on a code is the backend's problem to resolve.
pub fn derive_code(url: &str) -> String {
    let mut hasher = Shake128::default();
    hasher.update(url.as_bytes());
    let mut reader = hasher.finalize_xof();
    let mut digest = [0u8; CODE_BYTES];
    reader.read(&mut digest);
    hex::encode(digest)
}
