//! Store-backed registry of live refresh tokens.
//!
//! Records are keyed by (user id, token digest) with a store-native TTL equal
//! to the token's remaining lifetime, so membership checks are O(1) and
//! cleanup is expiry-driven. The raw token value never reaches the store.
//!
//! Failure policy: the security of the refresh flow depends entirely on
//! store-backed revocation, so every store error propagates and the calling
//! flow fails closed.

use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::DomainResult;

use super::kv::KeyValueStore;

const REFRESH_KEY_PREFIX: &str = "refresh";

/// Registry of live refresh tokens in the shared store
pub struct RefreshTokenStore<S: KeyValueStore> {
    store: Arc<S>,
}

impl<S: KeyValueStore> RefreshTokenStore<S> {
    /// Create a registry over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn record_key(user_id: Uuid, token: &str) -> String {
        format!("{}:{}:{}", REFRESH_KEY_PREFIX, user_id, digest(token))
    }

    fn user_prefix(user_id: Uuid) -> String {
        format!("{}:{}:", REFRESH_KEY_PREFIX, user_id)
    }

    /// Persist a refresh token record with the token's remaining lifetime
    pub async fn store(&self, user_id: Uuid, token: &str, ttl_seconds: u64) -> DomainResult<()> {
        let key = Self::record_key(user_id, token);
        let issued_at = Utc::now().to_rfc3339();
        self.store.set_with_expiry(&key, &issued_at, ttl_seconds).await?;

        debug!(user_id = %user_id, ttl_seconds, "Stored refresh token record");
        Ok(())
    }

    /// True iff an unexpired record exists for (user, token)
    pub async fn verify(&self, user_id: Uuid, token: &str) -> DomainResult<bool> {
        let key = Self::record_key(user_id, token);
        Ok(self.store.exists(&key).await?)
    }

    /// Atomically consume the record for (user, token)
    ///
    /// Returns true iff a live record existed and was deleted. This is the
    /// rotation primitive: of two concurrent calls for the same token, at
    /// most one observes true.
    pub async fn take(&self, user_id: Uuid, token: &str) -> DomainResult<bool> {
        let key = Self::record_key(user_id, token);
        Ok(self.store.take(&key).await?.is_some())
    }

    /// Delete exactly the record for (user, token)
    pub async fn revoke(&self, user_id: Uuid, token: &str) -> DomainResult<bool> {
        let key = Self::record_key(user_id, token);
        Ok(self.store.delete(&key).await?)
    }

    /// Delete every refresh token record for the user
    ///
    /// Records carry no secondary index, so this enumerates the user-scoped
    /// key prefix. Used for logout, password reset, and suspected compromise.
    pub async fn revoke_all(&self, user_id: Uuid) -> DomainResult<usize> {
        let keys = self.store.keys_with_prefix(&Self::user_prefix(user_id)).await?;
        let mut revoked = 0;
        for key in &keys {
            if self.store.delete(key).await? {
                revoked += 1;
            }
        }

        info!(user_id = %user_id, revoked, "Revoked all refresh tokens for user");
        Ok(revoked)
    }
}

/// Hex-encoded SHA-256 digest of a token value
fn digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
