//! Login, logout, and current-identity routes.

use std::sync::Arc;

use axum::extract::Extension;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use boardkit_auth::authenticate::extract_bearer;
use boardkit_auth::{verify_password, AuthError, IdentityContext, IdentityStore};

use crate::app::errors;
use crate::app::services::AppServices;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login — public route.
///
/// Unknown email and wrong password produce the same rejection so the
/// endpoint does not reveal which accounts exist.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    let invalid =
        || errors::json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", "invalid email or password");

    let Some(principal) = services.store.find_by_email(&body.email) else {
        return invalid();
    };

    match verify_password(&body.password, &principal.password_hash) {
        Ok(true) => {}
        Ok(false) => return invalid(),
        Err(err) => {
            tracing::error!(user_id = %principal.id, error = %err, "unusable stored password hash");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "login failed",
            );
        }
    }

    let token = match services.tokens.issue(&principal.email, principal.id) {
        Ok(token) => token,
        Err(err) => {
            tracing::error!(error = %err, "token issuance failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "login failed",
            );
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "token": token,
            "user": { "id": principal.id, "email": principal.email },
        })),
    )
        .into_response()
}

/// POST /auth/logout — revokes the presented bearer token.
pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let header = match headers.get(AUTHORIZATION).map(|v| v.to_str()) {
        Some(Ok(value)) => Some(value),
        Some(Err(_)) => return errors::auth_error_response(&AuthError::MalformedCredential),
        None => None,
    };

    let token = match extract_bearer(header) {
        Ok(token) => token,
        Err(err) => return errors::auth_error_response(&err),
    };

    match services.tokens.revoke(token) {
        Ok(()) => (StatusCode::OK, Json(json!({ "revoked": true }))).into_response(),
        Err(err) => errors::auth_error_response(&err),
    }
}

/// GET /auth/me — the principal resolved for this request.
pub async fn me(Extension(ctx): Extension<IdentityContext>) -> axum::response::Response {
    match ctx.principal() {
        Ok(principal) => (
            StatusCode::OK,
            Json(json!({ "id": principal.id, "email": principal.email })),
        )
            .into_response(),
        Err(err) => errors::auth_error_response(&err),
    }
}
