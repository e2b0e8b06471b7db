use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use aula_core::UserId;

use crate::Role;

/// Claims embedded in the session token.
///
/// Mirrors the backend's claims struct: numeric user id, username, role, and
/// a unix-seconds expiry. Claims gate UI only; authorization is re-checked
/// server-side on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    /// Expiry as unix seconds (`exp` registered claim).
    pub exp: i64,
}

impl SessionClaims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Why a stored token does not constitute a valid session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("no session token stored")]
    Missing,

    #[error("session token is malformed: {0}")]
    Malformed(String),

    #[error("session token has expired")]
    Expired,
}

/// Decode the claims carried in a token **without verifying the signature**.
///
/// The client never holds the signing secret; this is UI-side introspection
/// only, the equivalent of reading the payload segment. Expiry is checked
/// separately by [`validate_session`] so a malformed-vs-expired distinction
/// survives.
pub fn decode_claims(token: &str) -> Result<SessionClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data =
        jsonwebtoken::decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;
    Ok(data.claims)
}

/// Deterministically judge a stored token at `now`.
///
/// Missing, undecodable, and past-expiry tokens are the three ways a session
/// stops being valid; everything else yields the decoded claims.
pub fn validate_session(
    token: Option<&str>,
    now: DateTime<Utc>,
) -> Result<SessionClaims, TokenError> {
    let token = token.ok_or(TokenError::Missing)?;
    let claims = decode_claims(token)?;
    if claims.is_expired(now) {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}
