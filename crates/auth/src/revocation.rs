//! Early token revocation (logout).
//!
//! The store is append-only: a record is created when a token is revoked and
//! never mutated. Records logically retire once the token's natural expiry
//! passes — pruning is an optimization, not a correctness requirement, since
//! `TokenService` re-checks expiry independently.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

/// Lookup/append interface over revoked tokens.
///
/// Implementations must provide read-your-writes within a single store
/// instance; no cross-instance ordering is required.
pub trait RevocationStore: Send + Sync {
    /// Record a token as revoked, keeping its original expiry.
    ///
    /// Idempotent: adding an already-present token is a no-op success.
    fn add(&self, token: &str, expires_at: DateTime<Utc>);

    /// Whether the token has been revoked.
    fn contains(&self, token: &str) -> bool;
}

/// In-memory revocation store.
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop entries whose natural expiry has passed.
    ///
    /// Returns the number of entries removed. Optional housekeeping only:
    /// an expired token is rejected by validation whether or not its
    /// revocation record is still present.
    pub fn prune(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().expect("revocation store poisoned");
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("revocation store poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RevocationStore for InMemoryRevocationStore {
    fn add(&self, token: &str, expires_at: DateTime<Utc>) {
        let mut entries = self.entries.write().expect("revocation store poisoned");
        entries.entry(token.to_string()).or_insert(expires_at);
    }

    fn contains(&self, token: &str) -> bool {
        self.entries
            .read()
            .expect("revocation store poisoned")
            .contains_key(token)
    }
}
