//! Declarative role-based access control over the resource hierarchy.
//!
//! A [`Policy`] is attached to a business operation; the [`PolicyEngine`]
//! evaluates it against the current identity and the resource the operation
//! targets. The check runs as an explicit guard at the top of each handler —
//! no reflection, no interception framework.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use boardkit_core::{ColumnId, ProjectId, TagId, TaskId, UserId};

use crate::error::{AuthError, ForbiddenReason};
use crate::identity::IdentityContext;
use crate::stores::{IdentityStore, MembershipStore, ProjectResolver};

/// Role granted by a project membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Member,
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Role::Admin => f.write_str("ADMIN"),
            Role::Member => f.write_str("MEMBER"),
        }
    }
}

/// The declarative access rule attached to an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Roles allowed to perform the operation. Empty means "any member".
    #[serde(default)]
    pub required_roles: Vec<Role>,

    /// Write operations additionally require the `Admin` role.
    #[serde(default)]
    pub requires_write_access: bool,
}

impl Policy {
    /// The default policy: any member, read access.
    pub fn read() -> Self {
        Self {
            required_roles: Vec::new(),
            requires_write_access: false,
        }
    }

    /// Admin-only write.
    pub fn admin_write() -> Self {
        Self {
            required_roles: vec![Role::Admin],
            requires_write_access: true,
        }
    }

    /// Write open to both roles (still gated on `Admin` by the write rule).
    pub fn member_write() -> Self {
        Self {
            required_roles: vec![Role::Admin, Role::Member],
            requires_write_access: true,
        }
    }

    fn allows_role(&self, role: Role) -> bool {
        self.required_roles.is_empty() || self.required_roles.contains(&role)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::read()
    }
}

/// Identifier of the resource an operation targets.
///
/// Everything except `User` resolves upward to an owning project; `User` is
/// scoped to the principal's own identity instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Resource {
    Project(ProjectId),
    Column(ColumnId),
    Task(TaskId),
    Tag(TagId),
    User(UserId),
}

/// Central evaluator for [`Policy`] declarations.
pub struct PolicyEngine {
    identity: Arc<dyn IdentityStore>,
    memberships: Arc<dyn MembershipStore>,
    resolver: Arc<dyn ProjectResolver>,
}

impl PolicyEngine {
    pub fn new(
        identity: Arc<dyn IdentityStore>,
        memberships: Arc<dyn MembershipStore>,
        resolver: Arc<dyn ProjectResolver>,
    ) -> Self {
        Self {
            identity,
            memberships,
            resolver,
        }
    }

    /// Evaluate `policy` for the current principal against `resource`.
    ///
    /// Resource resolution runs before the membership check: a nonexistent
    /// resource yields `ResourceNotFound` even for a non-member, and
    /// `Forbidden` is only ever reported for a resource known to exist.
    pub fn authorize(
        &self,
        ctx: &IdentityContext,
        policy: &Policy,
        resource: Resource,
    ) -> Result<(), AuthError> {
        let principal = ctx.principal()?;

        // User-scoped resources authorize by identity equality only;
        // project memberships play no part.
        if let Resource::User(user_id) = resource {
            if self.identity.find_by_id(user_id).is_none() {
                return Err(AuthError::ResourceNotFound);
            }
            if principal.id != user_id {
                tracing::warn!(
                    principal = %principal.id,
                    target = %user_id,
                    "denied access to another user's resource"
                );
                return Err(AuthError::Forbidden(ForbiddenReason::NotSelf));
            }
            return Ok(());
        }

        let project_id = self.resolve_owning_project(resource)?;

        let membership = self
            .memberships
            .find_membership(principal.id, project_id)
            .ok_or_else(|| {
                tracing::warn!(
                    principal = %principal.id,
                    project = %project_id,
                    "denied: no membership in project"
                );
                AuthError::Forbidden(ForbiddenReason::NotAMember)
            })?;

        let role_ok = policy.allows_role(membership.role);
        let write_ok = !policy.requires_write_access || membership.role == Role::Admin;

        if role_ok && write_ok {
            Ok(())
        } else {
            tracing::warn!(
                principal = %principal.id,
                project = %project_id,
                role = %membership.role,
                "denied: role does not satisfy policy"
            );
            Err(AuthError::Forbidden(ForbiddenReason::InsufficientRole))
        }
    }

    /// Walk the ownership chain up to the project that governs `resource`.
    ///
    /// Any miss along the chain is `ResourceNotFound` — the resource (or an
    /// ancestor it claims) does not exist.
    fn resolve_owning_project(&self, resource: Resource) -> Result<ProjectId, AuthError> {
        let project_id = match resource {
            Resource::Project(id) => {
                if !self.resolver.project_exists(id) {
                    return Err(AuthError::ResourceNotFound);
                }
                id
            }
            Resource::Column(id) => self
                .resolver
                .column_project(id)
                .ok_or(AuthError::ResourceNotFound)?,
            Resource::Task(id) => {
                let column = self
                    .resolver
                    .task_column(id)
                    .ok_or(AuthError::ResourceNotFound)?;
                self.resolver
                    .column_project(column)
                    .ok_or(AuthError::ResourceNotFound)?
            }
            Resource::Tag(id) => {
                let task = self
                    .resolver
                    .tag_task(id)
                    .ok_or(AuthError::ResourceNotFound)?;
                let column = self
                    .resolver
                    .task_column(task)
                    .ok_or(AuthError::ResourceNotFound)?;
                self.resolver
                    .column_project(column)
                    .ok_or(AuthError::ResourceNotFound)?
            }
            Resource::User(_) => unreachable!("user resources are handled before resolution"),
        };

        Ok(project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBoardStore;
    use crate::principal::Principal;

    // Fixture: project 5 with alice (ADMIN) and bob (MEMBER), project 9 with
    // only carol (ADMIN). Column 50 / task 500 / tag 5000 live in project 5;
    // column 90 / task 900 in project 9.
    fn fixture() -> (Arc<InMemoryBoardStore>, PolicyEngine) {
        let store = Arc::new(InMemoryBoardStore::new());

        store.add_user(Principal {
            id: UserId::new(1),
            email: "alice@x.com".to_string(),
            password_hash: String::new(),
        });
        store.add_user(Principal {
            id: UserId::new(2),
            email: "bob@x.com".to_string(),
            password_hash: String::new(),
        });
        store.add_user(Principal {
            id: UserId::new(3),
            email: "carol@x.com".to_string(),
            password_hash: String::new(),
        });

        store.add_project(ProjectId::new(5));
        store.add_project(ProjectId::new(9));
        store.add_membership(UserId::new(1), ProjectId::new(5), Role::Admin);
        store.add_membership(UserId::new(2), ProjectId::new(5), Role::Member);
        store.add_membership(UserId::new(3), ProjectId::new(9), Role::Admin);

        store.add_column(ColumnId::new(50), ProjectId::new(5));
        store.add_task(TaskId::new(500), ColumnId::new(50));
        store.add_tag(TagId::new(5000), TaskId::new(500));
        store.add_column(ColumnId::new(90), ProjectId::new(9));
        store.add_task(TaskId::new(900), ColumnId::new(90));

        let engine = PolicyEngine::new(store.clone(), store.clone(), store.clone());
        (store, engine)
    }

    fn ctx_for(store: &InMemoryBoardStore, email: &str) -> IdentityContext {
        IdentityContext::authenticated(store.find_by_email(email).unwrap())
    }

    #[test]
    fn unauthenticated_context_is_rejected_first() {
        let (_, engine) = fixture();
        let err = engine
            .authorize(
                &IdentityContext::anonymous(),
                &Policy::read(),
                Resource::Project(ProjectId::new(5)),
            )
            .unwrap_err();
        assert_eq!(err, AuthError::Unauthenticated);
    }

    #[test]
    fn member_can_read_project_resources() {
        let (store, engine) = fixture();
        let bob = ctx_for(&store, "bob@x.com");

        for resource in [
            Resource::Project(ProjectId::new(5)),
            Resource::Column(ColumnId::new(50)),
            Resource::Task(TaskId::new(500)),
            Resource::Tag(TagId::new(5000)),
        ] {
            assert!(engine.authorize(&bob, &Policy::read(), resource).is_ok());
        }
    }

    #[test]
    fn member_cannot_perform_admin_write() {
        let (store, engine) = fixture();
        let bob = ctx_for(&store, "bob@x.com");

        // Delete-column shape: requires ADMIN + write.
        let err = engine
            .authorize(&bob, &Policy::admin_write(), Resource::Column(ColumnId::new(50)))
            .unwrap_err();
        assert_eq!(err, AuthError::Forbidden(ForbiddenReason::InsufficientRole));
    }

    #[test]
    fn member_write_policy_still_requires_admin_for_writes() {
        let (store, engine) = fixture();
        let bob = ctx_for(&store, "bob@x.com");

        // Role list admits MEMBER, but write access is gated on ADMIN.
        let err = engine
            .authorize(&bob, &Policy::member_write(), Resource::Task(TaskId::new(500)))
            .unwrap_err();
        assert_eq!(err, AuthError::Forbidden(ForbiddenReason::InsufficientRole));
    }

    #[test]
    fn admin_passes_any_write_policy_in_their_project() {
        let (store, engine) = fixture();
        let alice = ctx_for(&store, "alice@x.com");

        for resource in [
            Resource::Project(ProjectId::new(5)),
            Resource::Column(ColumnId::new(50)),
            Resource::Task(TaskId::new(500)),
            Resource::Tag(TagId::new(5000)),
        ] {
            assert!(
                engine
                    .authorize(&alice, &Policy::admin_write(), resource)
                    .is_ok()
            );
            assert!(
                engine
                    .authorize(&alice, &Policy::member_write(), resource)
                    .is_ok()
            );
        }
    }

    #[test]
    fn non_member_is_rejected_for_existing_resource() {
        let (store, engine) = fixture();
        let bob = ctx_for(&store, "bob@x.com");

        // Bob has no membership in project 9; task 900 exists there.
        let err = engine
            .authorize(&bob, &Policy::read(), Resource::Task(TaskId::new(900)))
            .unwrap_err();
        assert_eq!(err, AuthError::Forbidden(ForbiddenReason::NotAMember));
    }

    #[test]
    fn roles_in_other_projects_grant_nothing() {
        let (store, engine) = fixture();
        let alice = ctx_for(&store, "alice@x.com");

        // Alice is ADMIN of project 5, but holds nothing in project 9.
        let err = engine
            .authorize(&alice, &Policy::admin_write(), Resource::Column(ColumnId::new(90)))
            .unwrap_err();
        assert_eq!(err, AuthError::Forbidden(ForbiddenReason::NotAMember));
    }

    #[test]
    fn missing_resource_is_not_found_even_for_non_members() {
        let (store, engine) = fixture();
        let bob = ctx_for(&store, "bob@x.com");

        for resource in [
            Resource::Project(ProjectId::new(999)),
            Resource::Column(ColumnId::new(999)),
            Resource::Task(TaskId::new(999)),
            Resource::Tag(TagId::new(999)),
        ] {
            let err = engine.authorize(&bob, &Policy::read(), resource).unwrap_err();
            assert_eq!(err, AuthError::ResourceNotFound);
        }
    }

    #[test]
    fn broken_ownership_chain_is_not_found() {
        let (store, engine) = fixture();
        let bob = ctx_for(&store, "bob@x.com");

        // A tag pointing at a task that does not exist.
        store.add_tag(TagId::new(7777), TaskId::new(404));

        let err = engine
            .authorize(&bob, &Policy::read(), Resource::Tag(TagId::new(7777)))
            .unwrap_err();
        assert_eq!(err, AuthError::ResourceNotFound);
    }

    #[test]
    fn user_scope_authorizes_self_only() {
        let (store, engine) = fixture();
        let bob = ctx_for(&store, "bob@x.com");

        assert!(
            engine
                .authorize(&bob, &Policy::read(), Resource::User(UserId::new(2)))
                .is_ok()
        );

        let err = engine
            .authorize(&bob, &Policy::read(), Resource::User(UserId::new(1)))
            .unwrap_err();
        assert_eq!(err, AuthError::Forbidden(ForbiddenReason::NotSelf));
    }

    #[test]
    fn user_scope_misses_are_not_found() {
        let (store, engine) = fixture();
        let bob = ctx_for(&store, "bob@x.com");

        let err = engine
            .authorize(&bob, &Policy::read(), Resource::User(UserId::new(404)))
            .unwrap_err();
        assert_eq!(err, AuthError::ResourceNotFound);
    }

    #[test]
    fn user_scope_ignores_memberships_entirely() {
        let (store, engine) = fixture();
        // Carol has no membership overlapping with bob, yet may act on
        // her own user resource under any policy.
        let carol = ctx_for(&store, "carol@x.com");

        assert!(
            engine
                .authorize(&carol, &Policy::admin_write(), Resource::User(UserId::new(3)))
                .is_ok()
        );
    }

    #[test]
    fn default_policy_admits_both_roles_for_reads() {
        let (store, engine) = fixture();
        let alice = ctx_for(&store, "alice@x.com");
        let bob = ctx_for(&store, "bob@x.com");

        let policy = Policy::default();
        let resource = Resource::Project(ProjectId::new(5));
        assert!(engine.authorize(&alice, &policy, resource).is_ok());
        assert!(engine.authorize(&bob, &policy, resource).is_ok());
    }
}
