//! HTTP routes.
//!
//! `public_router` holds the allow-listed routes that bypass authentication;
//! everything else lives on `protected_router` behind the interceptor.

use axum::routing::{get, post};
use axum::Router;

pub mod auth;
pub mod authz;
pub mod system;

pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/auth/login", post(auth::login))
}

pub fn protected_router() -> Router {
    Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/authz/check", post(authz::check))
}
