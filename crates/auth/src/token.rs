//! Token issuance, validation, and revocation.
//!
//! Tokens are HS512-signed JWTs carrying [`Claims`]. The signing secret is
//! configured as base64 and must decode to at least 32 bytes; an undersized
//! key is a construction failure, never a per-request one.

use std::sync::Arc;

use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use boardkit_core::UserId;

use crate::claims::Claims;
use crate::error::{AuthError, TokenConfigError};
use crate::revocation::RevocationStore;

/// Minimum decoded signing-key length in bytes (HS512-class MAC).
const MIN_SECRET_BYTES: usize = 32;

/// Token service configuration.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Base64-encoded symmetric signing secret.
    pub secret_base64: String,

    /// Lifetime of issued tokens.
    pub ttl: Duration,
}

/// Issues and validates signed expiring credentials.
///
/// Issuance is a pure function of inputs, key, and clock — the service is
/// safe for unsynchronized concurrent use. Revocation state lives behind the
/// [`RevocationStore`] collaborator.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    revoked: Arc<dyn RevocationStore>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build the service, decoding and checking the signing secret.
    pub fn new(
        config: &TokenConfig,
        revoked: Arc<dyn RevocationStore>,
    ) -> Result<Self, TokenConfigError> {
        let key = BASE64
            .decode(config.secret_base64.as_bytes())
            .map_err(|_| TokenConfigError::SecretNotBase64)?;

        if key.len() < MIN_SECRET_BYTES {
            return Err(TokenConfigError::SecretTooShort(key.len()));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(&key),
            decoding: DecodingKey::from_secret(&key),
            ttl: config.ttl,
            revoked,
        })
    }

    /// Issue a token for the given principal.
    pub fn issue(&self, email: &str, user_id: UserId) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            user_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        tracing::info!(%user_id, email, "issuing token");

        jsonwebtoken::encode(&Header::new(Algorithm::HS512), &claims, &self.encoding)
            .context("failed to encode token")
    }

    /// Verify signature, structure, and expiry. Does **not** consult the
    /// revocation store — use [`TokenService::check`] for that.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;

        let claims = match jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => data.claims,
            Err(err) => {
                return Err(match err.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AuthError::ExpiredCredential
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AuthError::InvalidSignature
                    }
                    _ => AuthError::MalformedCredential,
                });
            }
        };

        // Expiry is exclusive: the token is already dead at exactly `exp`.
        // The decoder only rejects strictly-past timestamps, so re-check.
        if Utc::now().timestamp() >= claims.exp {
            return Err(AuthError::ExpiredCredential);
        }

        Ok(claims)
    }

    /// Full usability check: revocation first, then signature/expiry.
    ///
    /// The revocation lookup must short-circuit — a structurally valid but
    /// revoked token is rejected without further inspection.
    pub fn check(&self, token: &str) -> Result<Claims, AuthError> {
        if self.revoked.contains(token) {
            tracing::warn!("rejected revoked token");
            return Err(AuthError::RevokedCredential);
        }
        self.validate(token)
    }

    /// Boolean form of [`TokenService::check`].
    pub fn is_valid(&self, token: &str) -> bool {
        self.check(token).is_ok()
    }

    /// Revoke a token before its natural expiry (logout).
    ///
    /// Revoking an already-revoked token is an idempotent success. Revoking
    /// an expired or malformed token is an explicit error: there is nothing
    /// left to invalidate, and accepting it would mask a client bug.
    pub fn revoke(&self, token: &str) -> Result<(), AuthError> {
        if self.revoked.contains(token) {
            return Ok(());
        }

        let claims = self.validate(token)?;
        let expires_at = claims.expires_at().ok_or(AuthError::MalformedCredential)?;

        // Keep the original expiry so the record never outlives the window
        // in which the token would have been honored anyway.
        self.revoked.add(token, expires_at);
        tracing::info!(user_id = %claims.user_id, "token revoked");
        Ok(())
    }
}
