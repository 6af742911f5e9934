//! Authentication/authorization error taxonomy.
//!
//! Error messages never include the submitted credential: a token string is
//! a bearer secret and must not leak into logs or responses.

use thiserror::Error;

/// Outcome taxonomy for authentication and authorization.
///
/// The first five variants are credential failures (pre-identity), the rest
/// are decided against a resolved identity. `ResourceNotFound` is a
/// non-security outcome and is deliberately distinct from `Forbidden`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No credential was presented on a protected route.
    #[error("missing credential")]
    MissingCredential,

    /// The credential was present but not structurally usable
    /// (no bearer prefix, unparseable token, etc).
    #[error("malformed credential")]
    MalformedCredential,

    /// The credential's expiry has passed.
    #[error("credential has expired")]
    ExpiredCredential,

    /// The credential was revoked before its natural expiry (logout).
    #[error("credential has been revoked")]
    RevokedCredential,

    /// The credential's signature does not verify against the configured key.
    #[error("credential signature is invalid")]
    InvalidSignature,

    /// No authenticated principal (empty identity context, or a validly
    /// signed token whose subject no longer exists).
    #[error("not authenticated")]
    Unauthenticated,

    /// The principal is known but not allowed to perform the operation.
    #[error("forbidden: {0}")]
    Forbidden(ForbiddenReason),

    /// The target resource does not exist. Reported before any membership
    /// check, and never conflated with `Forbidden`.
    #[error("resource not found")]
    ResourceNotFound,
}

/// Why an authorization decision denied access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    /// No membership row for (principal, resolved project).
    NotAMember,
    /// Membership exists but the role does not satisfy the policy.
    InsufficientRole,
    /// User-scoped operation attempted on somebody else's user resource.
    NotSelf,
}

impl core::fmt::Display for ForbiddenReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ForbiddenReason::NotAMember => f.write_str("not a member of the project"),
            ForbiddenReason::InsufficientRole => f.write_str("insufficient role"),
            ForbiddenReason::NotSelf => f.write_str("not the resource owner"),
        }
    }
}

/// Signing-key configuration failure.
///
/// Raised once at construction time; the process must refuse to start rather
/// than defer a bad key to request time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenConfigError {
    #[error("signing secret is not valid base64")]
    SecretNotBase64,

    #[error("signing secret too short: {0} bytes decoded, at least 32 required")]
    SecretTooShort(usize),
}
