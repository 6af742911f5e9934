//! In-memory collaborator store.
//!
//! Backs the [`IdentityStore`], [`MembershipStore`], and [`ProjectResolver`]
//! traits with plain maps for tests and the dev server. A production
//! deployment replaces this with the persistence layer's own
//! implementations; nothing in the auth core cares which is wired in.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::Utc;

use boardkit_core::{ColumnId, ProjectId, TagId, TaskId, UserId};

use crate::policy::Role;
use crate::principal::{Principal, ProjectMembership};
use crate::stores::{IdentityStore, MembershipStore, ProjectResolver};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<UserId, Principal>,
    memberships: HashMap<(UserId, ProjectId), ProjectMembership>,
    projects: HashSet<ProjectId>,
    columns: HashMap<ColumnId, ProjectId>,
    tasks: HashMap<TaskId, ColumnId>,
    tags: HashMap<TagId, TaskId>,
}

/// Identity, membership, and ownership data behind one lock.
#[derive(Debug, Default)]
pub struct InMemoryBoardStore {
    inner: RwLock<Inner>,
}

impl InMemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, principal: Principal) {
        let mut inner = self.inner.write().expect("board store poisoned");
        inner.users.insert(principal.id, principal);
    }

    pub fn add_project(&self, id: ProjectId) {
        let mut inner = self.inner.write().expect("board store poisoned");
        inner.projects.insert(id);
    }

    pub fn add_membership(&self, user_id: UserId, project_id: ProjectId, role: Role) {
        let mut inner = self.inner.write().expect("board store poisoned");
        inner.memberships.insert(
            (user_id, project_id),
            ProjectMembership {
                user_id,
                project_id,
                role,
                added_at: Utc::now(),
            },
        );
    }

    pub fn add_column(&self, id: ColumnId, project: ProjectId) {
        let mut inner = self.inner.write().expect("board store poisoned");
        inner.columns.insert(id, project);
    }

    pub fn add_task(&self, id: TaskId, column: ColumnId) {
        let mut inner = self.inner.write().expect("board store poisoned");
        inner.tasks.insert(id, column);
    }

    pub fn add_tag(&self, id: TagId, task: TaskId) {
        let mut inner = self.inner.write().expect("board store poisoned");
        inner.tags.insert(id, task);
    }
}

impl IdentityStore for InMemoryBoardStore {
    fn find_by_email(&self, email: &str) -> Option<Principal> {
        let inner = self.inner.read().expect("board store poisoned");
        inner.users.values().find(|p| p.email == email).cloned()
    }

    fn find_by_id(&self, id: UserId) -> Option<Principal> {
        let inner = self.inner.read().expect("board store poisoned");
        inner.users.get(&id).cloned()
    }
}

impl MembershipStore for InMemoryBoardStore {
    fn find_membership(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> Option<ProjectMembership> {
        let inner = self.inner.read().expect("board store poisoned");
        inner.memberships.get(&(user_id, project_id)).cloned()
    }
}

impl ProjectResolver for InMemoryBoardStore {
    fn project_exists(&self, id: ProjectId) -> bool {
        let inner = self.inner.read().expect("board store poisoned");
        inner.projects.contains(&id)
    }

    fn column_project(&self, id: ColumnId) -> Option<ProjectId> {
        let inner = self.inner.read().expect("board store poisoned");
        inner.columns.get(&id).copied()
    }

    fn task_column(&self, id: TaskId) -> Option<ColumnId> {
        let inner = self.inner.read().expect("board store poisoned");
        inner.tasks.get(&id).copied()
    }

    fn tag_task(&self, id: TagId) -> Option<TaskId> {
        let inner = self.inner.read().expect("board store poisoned");
        inner.tags.get(&id).copied()
    }
}
