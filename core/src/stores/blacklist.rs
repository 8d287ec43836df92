//! Denylist of explicitly revoked access tokens.
//!
//! Entries are keyed by the raw token string, record the revocation time,
//! and carry a TTL equal to the token's remaining lifetime, so store growth
//! is bounded by the number of outstanding tokens.
//!
//! Failure policy: blacklisting is defense-in-depth on top of the 15-minute
//! access window, so membership checks fail open - a store outage must not
//! make the system unusable.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::errors::DomainResult;

use super::kv::KeyValueStore;

const BLACKLIST_KEY_PREFIX: &str = "blacklist";

/// Store-backed access token denylist
pub struct TokenBlacklist<S: KeyValueStore> {
    store: Arc<S>,
}

impl<S: KeyValueStore> TokenBlacklist<S> {
    /// Create a denylist over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn entry_key(token: &str) -> String {
        format!("{}:{}", BLACKLIST_KEY_PREFIX, token)
    }

    /// Blacklist a token for the remainder of its lifetime
    ///
    /// Idempotent: re-adding overwrites the entry with a fresh revocation
    /// timestamp. A non-positive TTL means the token has already expired
    /// naturally and nothing is stored.
    pub async fn add(&self, token: &str, ttl_seconds: i64) -> DomainResult<()> {
        if ttl_seconds <= 0 {
            debug!("Skipping blacklist entry for already-expired token");
            return Ok(());
        }

        let key = Self::entry_key(token);
        let revoked_at = Utc::now().to_rfc3339();
        self.store
            .set_with_expiry(&key, &revoked_at, ttl_seconds as u64)
            .await?;

        debug!(ttl_seconds, "Access token blacklisted");
        Ok(())
    }

    /// Whether the token has been explicitly revoked
    ///
    /// Fails open: a store error is logged and treated as "not blacklisted".
    pub async fn is_blacklisted(&self, token: &str) -> bool {
        let key = Self::entry_key(token);
        match self.store.exists(&key).await {
            Ok(blacklisted) => blacklisted,
            Err(e) => {
                warn!(error = %e, "Blacklist check failed, treating token as not blacklisted");
                false
            }
        }
    }
}
