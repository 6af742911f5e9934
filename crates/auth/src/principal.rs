//! Principal identity and project membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use boardkit_core::{ProjectId, UserId};

use crate::policy::Role;

/// The identity attributed to a request once its credential has been
/// validated.
///
/// Owned by the external identity store; immutable from this crate's
/// perspective. The password hash is carried for login verification only and
/// must never be serialized into a response — hence no `Serialize` here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
}

/// The record granting a user a role within a specific project — the sole
/// basis for project-scoped authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMembership {
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub role: Role,
    pub added_at: DateTime<Utc>,
}
