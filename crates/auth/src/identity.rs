//! Request-scoped identity holder.
//!
//! One `IdentityContext` is created per request and dropped with it — on
//! success, error, timeout, or cancellation alike. There is deliberately no
//! process- or thread-global context: identity travels with the request
//! (an extension/explicit parameter), so a reused worker can never observe a
//! previous request's principal.

use crate::error::AuthError;
use crate::principal::Principal;

/// Holder for the principal resolved for the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityContext {
    principal: Option<Principal>,
}

impl IdentityContext {
    /// An empty context, as every request starts out.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A context holding an authenticated principal.
    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    /// The current principal, or `Unauthenticated` if the context is empty.
    pub fn principal(&self) -> Result<&Principal, AuthError> {
        self.principal.as_ref().ok_or(AuthError::Unauthenticated)
    }

    /// The current principal's email, or `Unauthenticated` if empty.
    pub fn current_email(&self) -> Result<&str, AuthError> {
        Ok(self.principal()?.email.as_str())
    }

    /// Explicitly drop the held principal.
    pub fn clear(&mut self) {
        self.principal = None;
    }
}
