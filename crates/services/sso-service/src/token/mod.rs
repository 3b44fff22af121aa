//! Access token issuance.
//!
//! Tokens are compact HS256 JWTs keyed by the secret of the app they are
//! issued for, so a token minted for one app never verifies under another
//! app's secret.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain::{App, User};

/// Flat claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub uid: i64,
    pub email: String,
    pub exp: i64,
    pub app_id: i32,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token lifetime {0:?} is out of range")]
    TtlOutOfRange(Duration),

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Issue a token for `user`, scoped to `app`, expiring `ttl` from now.
pub fn issue_token(user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
    issue_token_at(user, app, ttl, Utc::now())
}

fn issue_token_at(
    user: &User,
    app: &App,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let claims = Claims {
        uid: user.id,
        email: user.email.clone(),
        exp: expires_at(now, ttl)?,
        app_id: app.id,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(app.secret_bytes()),
    )
    .map_err(TokenError::Signing)
}

fn expires_at(now: DateTime<Utc>, ttl: Duration) -> Result<i64, TokenError> {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .map(|at| at.timestamp())
        .ok_or(TokenError::TtlOutOfRange(ttl))
}

/// Verify signature and expiry with the app secret and return the claims.
pub fn decode_token(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(TokenError::Invalid)
}
