//! Access token issuance and verification.
//!
//! Tokens are JWTs signed with HS256 using the configured secret. Claims
//! carry the username (`sub`) and expiry (`exp`); nothing else.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to.
    pub sub: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: u64,
}

/// Error type for token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token rejected: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
    #[error("token has no subject")]
    MissingSubject,
}

/// Issue a signed access token for the given username.
pub fn issue(username: &str, secret: &[u8], ttl_minutes: u64) -> Result<String, TokenError> {
    let claims = Claims {
        sub: username.to_string(),
        exp: jsonwebtoken::get_current_timestamp() + ttl_minutes * 60,
    };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))?;
    Ok(token)
}

/// Verify a token and return the username it was issued to.
///
/// Rejects bad signatures, malformed tokens, expired tokens, and tokens
/// without a subject.
pub fn verify(token: &str, secret: &[u8]) -> Result<String, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )?;

    if data.claims.sub.is_empty() {
        return Err(TokenError::MissingSubject);
    }

    Ok(data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"unit-test-secret";

    #[test]
    fn round_trip() {
        let token = issue("alice", SECRET, 30).unwrap();
        assert_eq!(verify(&token, SECRET).unwrap(), "alice");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue("alice", SECRET, 30).unwrap();
        assert!(matches!(
            verify(&token, b"other-secret"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            verify("not.a.token", SECRET),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Two minutes past expiry clears the default leeway.
        let claims = Claims {
            sub: "alice".into(),
            exp: jsonwebtoken::get_current_timestamp() - 120,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(matches!(
            verify(&token, SECRET),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn empty_subject_is_rejected() {
        let claims = Claims {
            sub: String::new(),
            exp: jsonwebtoken::get_current_timestamp() + 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(matches!(
            verify(&token, SECRET),
            Err(TokenError::MissingSubject)
        ));
    }
}
