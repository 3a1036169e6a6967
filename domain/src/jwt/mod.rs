//! This module provides functionality for handling session tokens (JWTs) within the domain layer.
//!
//! Tokens are HS256-signed with the configured `jwt_secret` and carry the acting
//! user's id and role. Verifying a token yields the [`Actor`] the rest of the
//! domain layer works with.

use crate::actor::Actor;
use crate::error::Error;
use crate::users;
use claims::SessionClaims;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::*;
use service::config::Config;

pub(crate) mod claims;

fn signing_secret(config: &Config) -> Result<String, Error> {
    config.jwt_secret().ok_or_else(|| {
        warn!("Failed to get jwt secret from config");
        Error::config("Server misconfigured: JWT_SECRET missing")
    })
}

/// Issues a session token for `user`, valid for the configured expiry.
pub fn issue_session_token(config: &Config, user: &users::Model) -> Result<String, Error> {
    let secret = signing_secret(config)?;
    let now = chrono::Utc::now().timestamp().max(0) as u64;

    let claims = SessionClaims {
        id: Some(user.id),
        role: user.role,
        iat: now,
        exp: now.saturating_add(config.jwt_expiry_seconds),
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Verifies `token` and returns the actor it identifies.
pub fn verify_session_token(config: &Config, token: &str) -> Result<Actor, Error> {
    let secret = signing_secret(config)?;

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    trace!("Verified session token for {:?}", token_data.claims.id);

    Ok(Actor {
        id: token_data.claims.id,
        role: token_data.claims.role,
    })
}
