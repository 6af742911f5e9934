//! `boardkit-auth` — authentication/authorization boundary for the board server.
//!
//! This crate is intentionally decoupled from HTTP and storage. It owns:
//!
//! - signed expiring credentials ([`token::TokenService`]),
//! - early revocation of credentials on logout ([`revocation`]),
//! - per-request identity resolution ([`authenticate::Authenticator`],
//!   [`identity::IdentityContext`]),
//! - declarative role-based access control over the
//!   project → column → task → tag hierarchy ([`policy::PolicyEngine`]).
//!
//! Persistence is consumed through the collaborator traits in [`stores`];
//! [`memory`] provides the in-memory implementation used by tests and the
//! dev server.

pub mod authenticate;
pub mod claims;
pub mod error;
pub mod identity;
pub mod memory;
pub mod password;
pub mod policy;
pub mod principal;
pub mod revocation;
pub mod stores;
pub mod token;

pub use authenticate::Authenticator;
pub use claims::Claims;
pub use error::{AuthError, ForbiddenReason, TokenConfigError};
pub use identity::IdentityContext;
pub use memory::InMemoryBoardStore;
pub use password::{hash_password, verify_password};
pub use policy::{Policy, PolicyEngine, Resource, Role};
pub use principal::{Principal, ProjectMembership};
pub use revocation::{InMemoryRevocationStore, RevocationStore};
pub use stores::{IdentityStore, MembershipStore, ProjectResolver};
pub use token::{TokenConfig, TokenService};
