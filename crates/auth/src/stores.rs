//! Collaborator traits consumed by the auth core.
//!
//! Persistence owns the data behind these traits; the core only requires
//! bounded, synchronous key lookups with read-committed consistency. All
//! lookups return `Option` — mapping a miss to `ResourceNotFound` versus an
//! authorization failure is the policy engine's job.

use boardkit_core::{ColumnId, ProjectId, TagId, TaskId, UserId};

use crate::principal::{Principal, ProjectMembership};

/// Principal lookups against the external identity store.
pub trait IdentityStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> Option<Principal>;

    fn find_by_id(&self, id: UserId) -> Option<Principal>;
}

/// Membership lookup for (user, project).
pub trait MembershipStore: Send + Sync {
    fn find_membership(&self, user_id: UserId, project_id: ProjectId)
    -> Option<ProjectMembership>;
}

/// One step of the ownership chain each; the policy engine walks
/// tag → task → column → project with these.
pub trait ProjectResolver: Send + Sync {
    fn project_exists(&self, id: ProjectId) -> bool;

    fn column_project(&self, id: ColumnId) -> Option<ProjectId>;

    fn task_column(&self, id: TaskId) -> Option<ColumnId>;

    fn tag_task(&self, id: TagId) -> Option<TaskId>;
}
