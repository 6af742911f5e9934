//! Per-request credential authentication.
//!
//! Transport-agnostic core of the authentication interceptor: the HTTP layer
//! hands over the raw `Authorization` header value and receives either a
//! resolved principal or a failure that must reject the request before any
//! business logic runs.

use std::sync::Arc;

use crate::error::AuthError;
use crate::principal::Principal;
use crate::stores::IdentityStore;
use crate::token::TokenService;

const BEARER_PREFIX: &str = "Bearer ";

/// Resolves the principal behind a bearer credential.
pub struct Authenticator {
    tokens: Arc<TokenService>,
    identity: Arc<dyn IdentityStore>,
}

impl Authenticator {
    pub fn new(tokens: Arc<TokenService>, identity: Arc<dyn IdentityStore>) -> Self {
        Self { tokens, identity }
    }

    /// Authenticate a request given its `Authorization` header, if any.
    ///
    /// Validation order: bearer extraction, revocation/signature/expiry
    /// check, then principal resolution by the token's subject. A validly
    /// signed token whose subject no longer exists is an internal
    /// consistency failure surfaced as `Unauthenticated`.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Principal, AuthError> {
        let token = extract_bearer(authorization)?;
        let claims = self.tokens.check(token)?;

        self.identity.find_by_email(&claims.sub).ok_or_else(|| {
            tracing::error!(user_id = %claims.user_id, "valid token for unknown principal");
            AuthError::Unauthenticated
        })
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn extract_bearer(authorization: Option<&str>) -> Result<&str, AuthError> {
    let header = authorization.ok_or(AuthError::MissingCredential)?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedCredential)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MalformedCredential);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBoardStore;
    use crate::revocation::InMemoryRevocationStore;
    use crate::token::TokenConfig;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use boardkit_core::UserId;
    use chrono::Duration;

    fn setup() -> (Authenticator, Arc<TokenService>, Arc<InMemoryBoardStore>) {
        let revoked = Arc::new(InMemoryRevocationStore::new());
        let config = TokenConfig {
            secret_base64: BASE64.encode(b"0123456789abcdef0123456789abcdef"),
            ttl: Duration::hours(1),
        };
        let tokens = Arc::new(TokenService::new(&config, revoked).unwrap());

        let store = Arc::new(InMemoryBoardStore::new());
        store.add_user(Principal {
            id: UserId::new(7),
            email: "a@x.com".to_string(),
            password_hash: String::new(),
        });

        let authenticator = Authenticator::new(tokens.clone(), store.clone());
        (authenticator, tokens, store)
    }

    #[test]
    fn missing_header_is_missing_credential() {
        let (authenticator, _, _) = setup();
        assert_eq!(
            authenticator.authenticate(None).unwrap_err(),
            AuthError::MissingCredential
        );
    }

    #[test]
    fn non_bearer_header_is_malformed() {
        let (authenticator, _, _) = setup();
        for header in ["Basic abc123", "bearer lowercase", "Bearer ", "Bearer    "] {
            assert_eq!(
                authenticator.authenticate(Some(header)).unwrap_err(),
                AuthError::MalformedCredential,
                "header: {header:?}"
            );
        }
    }

    #[test]
    fn valid_token_resolves_principal() {
        let (authenticator, tokens, _) = setup();
        let token = tokens.issue("a@x.com", UserId::new(7)).unwrap();

        let principal = authenticator
            .authenticate(Some(&format!("Bearer {token}")))
            .unwrap();
        assert_eq!(principal.id, UserId::new(7));
        assert_eq!(principal.email, "a@x.com");
    }

    #[test]
    fn valid_token_for_deleted_user_is_unauthenticated() {
        let (authenticator, tokens, _) = setup();
        // Signed by us, but the subject has no principal behind it.
        let token = tokens.issue("ghost@x.com", UserId::new(404)).unwrap();

        assert_eq!(
            authenticator
                .authenticate(Some(&format!("Bearer {token}")))
                .unwrap_err(),
            AuthError::Unauthenticated
        );
    }

    #[test]
    fn revoked_token_is_rejected_at_authentication() {
        let (authenticator, tokens, _) = setup();
        let token = tokens.issue("a@x.com", UserId::new(7)).unwrap();
        tokens.revoke(&token).unwrap();

        assert_eq!(
            authenticator
                .authenticate(Some(&format!("Bearer {token}")))
                .unwrap_err(),
            AuthError::RevokedCredential
        );
    }
}
