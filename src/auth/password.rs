//! Salted password hashing.
//!
//! # Responsibilities
//! - Produce a storable hash from a plaintext password
//! - Verify a candidate password against a stored hash
//!
//! # Design Decisions
//! - Random 16-byte salt per user, SHA-256 over salt || password
//! - Stored form is `base64(salt)$base64(digest)`; plaintext is never kept
//! - Verification failure is indistinguishable for malformed and mismatched hashes

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// Hash a plaintext password into its storable form.
pub fn hash(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let digest = digest(&salt, password);
    format!("{}${}", BASE64.encode(salt), BASE64.encode(digest))
}

/// Verify a candidate password against a stored hash.
///
/// Returns false for malformed stored values rather than erroring; a
/// corrupt record must never authenticate.
pub fn verify(password: &str, stored: &str) -> bool {
    let Some((salt_b64, digest_b64)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = BASE64.decode(salt_b64) else {
        return false;
    };
    let Ok(expected) = BASE64.decode(digest_b64) else {
        return false;
    };

    let candidate = digest(&salt, password);
    if expected.len() != candidate.len() {
        return false;
    }

    // Fixed-time comparison over the digest bytes.
    expected
        .iter()
        .zip(candidate.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let stored = hash("hunter2");
        assert!(verify("hunter2", &stored));
    }

    #[test]
    fn wrong_password_fails() {
        let stored = hash("hunter2");
        assert!(!verify("hunter3", &stored));
    }

    #[test]
    fn salts_are_unique() {
        let a = hash("same");
        let b = hash("same");
        assert_ne!(a, b);
        assert!(verify("same", &a));
        assert!(verify("same", &b));
    }

    #[test]
    fn malformed_stored_value_fails() {
        assert!(!verify("anything", ""));
        assert!(!verify("anything", "no-separator"));
        assert!(!verify("anything", "!!!$###"));
    }
}
