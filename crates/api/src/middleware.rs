//! Authentication interceptor.
//!
//! Runs once per inbound request on the protected router. Public routes
//! (health, login) are wired outside this layer and bypass it entirely. On
//! success the resolved [`IdentityContext`] is stored as a request
//! extension; it is dropped with the request on every exit path, so no
//! identity can leak into a reused connection or worker.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use boardkit_auth::{AuthError, Authenticator, IdentityContext};

use crate::app::errors;

#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<Authenticator>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    // No double authentication: a request that already carries a resolved
    // identity passes through untouched.
    if req
        .extensions()
        .get::<IdentityContext>()
        .is_some_and(IdentityContext::is_authenticated)
    {
        return Ok(next.run(req).await);
    }

    let header = match req.headers().get(AUTHORIZATION) {
        None => None,
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| errors::auth_error_response(&AuthError::MalformedCredential))?,
        ),
    };

    let principal = state
        .authenticator
        .authenticate(header)
        .map_err(|err| errors::auth_error_response(&err))?;

    req.extensions_mut()
        .insert(IdentityContext::authenticated(principal));

    Ok(next.run(req).await)
}
