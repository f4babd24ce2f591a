//! Content fingerprints for drift detection.

use md5::{Digest, Md5};

/// Length of a rendered fingerprint in hex characters.
pub const FINGERPRINT_LEN: usize = 32;

/// Computes the MD5 digest of `text` (UTF-8 bytes) as lowercase hex.
pub fn fingerprint(text: &str) -> String {
    hex::encode(Md5::digest(text.as_bytes()))
}

/// Returns `true` if `candidate` looks like a fingerprint produced by
/// [`fingerprint`].
pub fn is_fingerprint(candidate: &str) -> bool {
    candidate.len() == FINGERPRINT_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
