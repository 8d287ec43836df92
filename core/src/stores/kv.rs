//! Shared key-value store abstraction.
//!
//! The refresh-token registry, blacklist, and lockout counters are the only
//! shared mutable state in the system. No service instance owns exclusive
//! write access; correctness rests on the store's atomic per-key operations,
//! which is why `take` (atomic read-then-delete) is part of the contract.

use async_trait::async_trait;

use crate::errors::StoreError;

/// Contract for the shared key-value store backing the token lifecycle
///
/// Implementations must provide per-key atomicity for every operation.
/// All operations are suspension points; implementations are expected to
/// bound their own network timeouts and surface failures as `StoreError`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Store a value under `key` with a TTL in seconds
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), StoreError>;

    /// Fetch the value under `key`, if present and unexpired
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Atomically fetch and delete the value under `key`
    ///
    /// Returns the value that was present, or `None` if the key did not
    /// exist. Two concurrent `take` calls for the same key observe at most
    /// one `Some`.
    async fn take(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Delete `key`, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// Check whether `key` exists and is unexpired
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Remaining TTL in seconds, `None` if the key is absent or has no expiry
    async fn ttl(&self, key: &str) -> Result<Option<i64>, StoreError>;

    /// Enumerate all live keys starting with `prefix`
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}
