//! Explicit authorization decision endpoint.
//!
//! Business handlers guard themselves by calling the policy engine at the
//! top of the handler body; this route exposes the same decision over HTTP
//! so callers (and operators) can ask "may the current principal do X to Y"
//! without performing the operation.

use std::sync::Arc;

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use boardkit_auth::{IdentityContext, Policy, Resource, Role};

use crate::app::errors;
use crate::app::services::AppServices;

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    /// The resource the operation would target, e.g. `{"kind":"task","id":500}`.
    pub resource: Resource,

    /// Roles the policy admits; empty means any member.
    #[serde(default)]
    pub roles: Vec<Role>,

    /// Whether the operation writes (writes require ADMIN).
    #[serde(default)]
    pub write: bool,
}

/// POST /authz/check
pub async fn check(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<IdentityContext>,
    Json(body): Json<CheckRequest>,
) -> axum::response::Response {
    let policy = Policy {
        required_roles: body.roles,
        requires_write_access: body.write,
    };

    match services.policy.authorize(&ctx, &policy, body.resource) {
        Ok(()) => (StatusCode::OK, Json(json!({ "authorized": true }))).into_response(),
        Err(err) => errors::auth_error_response(&err),
    }
}
