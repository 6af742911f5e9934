//! Consistent JSON error responses.
//!
//! Authentication failures map to 401, authorization denials to 403, and
//! policy-resolution misses to 404 — the latter two are never conflated.
//! Messages come from the error taxonomy and never contain the submitted
//! credential.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use boardkit_auth::AuthError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn auth_error_response(err: &AuthError) -> axum::response::Response {
    let (status, code) = match err {
        AuthError::MissingCredential => (StatusCode::UNAUTHORIZED, "missing_credential"),
        AuthError::MalformedCredential => (StatusCode::UNAUTHORIZED, "malformed_credential"),
        AuthError::ExpiredCredential => (StatusCode::UNAUTHORIZED, "expired_credential"),
        AuthError::RevokedCredential => (StatusCode::UNAUTHORIZED, "revoked_credential"),
        AuthError::InvalidSignature => (StatusCode::UNAUTHORIZED, "invalid_signature"),
        AuthError::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthenticated"),
        AuthError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
        AuthError::ResourceNotFound => (StatusCode::NOT_FOUND, "not_found"),
    };

    json_error(status, code, err.to_string())
}
