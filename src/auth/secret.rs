use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Compare a candidate against the operator secret in constant time.
///
/// Both sides are hashed first so the comparison length is fixed and the
/// secret's length does not leak.
pub fn matches(candidate: &str, secret: &str) -> bool {
    let candidate = Sha256::digest(candidate.as_bytes());
    let secret = Sha256::digest(secret.as_bytes());
    candidate.as_slice().ct_eq(secret.as_slice()).into()
}
