//! Service wiring for the HTTP application.

use std::sync::Arc;

use chrono::Duration;

use boardkit_auth::{
    Authenticator, InMemoryBoardStore, InMemoryRevocationStore, PolicyEngine, TokenConfig,
    TokenConfigError, TokenService,
};

/// Process configuration for the API binary.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base64-encoded JWT signing secret (decoded key must be ≥ 32 bytes).
    pub jwt_secret_base64: String,

    /// Lifetime of issued tokens.
    pub token_ttl: Duration,
}

/// Everything handlers need, built once at startup.
pub struct AppServices {
    pub store: Arc<InMemoryBoardStore>,
    pub tokens: Arc<TokenService>,
    pub authenticator: Arc<Authenticator>,
    pub policy: PolicyEngine,
}

/// Wire up the service graph.
///
/// An unusable signing secret fails here, before the listener is bound —
/// never at request time.
pub fn build_services(config: &ApiConfig) -> Result<AppServices, TokenConfigError> {
    let revoked = Arc::new(InMemoryRevocationStore::new());
    let tokens = Arc::new(TokenService::new(
        &TokenConfig {
            secret_base64: config.jwt_secret_base64.clone(),
            ttl: config.token_ttl,
        },
        revoked,
    )?);

    let store = Arc::new(InMemoryBoardStore::new());
    let authenticator = Arc::new(Authenticator::new(tokens.clone(), store.clone()));
    let policy = PolicyEngine::new(store.clone(), store.clone(), store.clone());

    Ok(AppServices {
        store,
        tokens,
        authenticator,
        policy,
    })
}
