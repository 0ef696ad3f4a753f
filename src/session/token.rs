//! Access token verification.
//!
//! Tokens are HS256 JWTs minted by the backend with a secret shared with this
//! process. `verify` lets the JWT library reject bad signatures and expired
//! tokens; `is_unexpired` repeats the expiry check against our own clock so
//! the boundary does not rest on library defaults alone.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::LoggedUser;

/// Decoded access token claims: the user snapshot plus standard JWT times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenPayload {
    #[serde(flatten)]
    pub user: LoggedUser,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    /// Issued-at, seconds since the epoch.
    #[serde(default)]
    pub iat: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("access token expired")]
    Expired,
    #[error("access token signature mismatch")]
    BadSignature,
    #[error("malformed access token: {0}")]
    Malformed(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::BadSignature,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self { key: DecodingKey::from_secret(secret.as_bytes()), validation }
    }

    /// Verify signature and expiry, returning the decoded claims.
    ///
    /// # Errors
    ///
    /// Returns a `TokenError` for bad signatures, malformed tokens and expired tokens.
    pub fn verify(&self, token: &str) -> Result<AccessTokenPayload, TokenError> {
        let data = decode::<AccessTokenPayload>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}

/// `exp * 1000 > now` in milliseconds.
#[must_use]
pub fn is_unexpired(payload: &AccessTokenPayload, now: OffsetDateTime) -> bool {
    let now_ms = i64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX);
    payload.exp.saturating_mul(1000) > now_ms
}

/// Expiry of the token as a timestamp. Out-of-range values clamp to the epoch.
#[must_use]
pub fn expires_at(payload: &AccessTokenPayload) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(payload.exp).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
