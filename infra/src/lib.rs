//! Infrastructure layer for SessionVault.
//!
//! Provides the Redis implementation of the shared key-value store that
//! the core session lifecycle runs against. Everything else the core
//! consumes (credential storage) is deployment-specific and wired by the
//! embedding service.

use thiserror::Error;

use sv_shared::config::cache::CacheConfig;

pub mod cache;

pub use cache::RedisStore;

/// Errors raised while standing up infrastructure components
#[derive(Debug, Error)]
pub enum InfraError {
    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Shared store connection failure
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    /// Connection establishment exceeded the configured timeout
    #[error("Store connection timed out after {0}s")]
    ConnectTimeout(u64),
}

/// Connect to the shared store using environment configuration
///
/// Loads `.env` when present, then reads `REDIS_URL` and related variables.
pub async fn connect_from_env() -> Result<RedisStore, InfraError> {
    dotenvy::dotenv().ok();
    RedisStore::connect(CacheConfig::from_env()).await
}
