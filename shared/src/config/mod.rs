//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token lifetimes and account lockout policy
//! - `cache` - Shared key-value store (Redis) configuration
//! - `keys` - Signing/verification key material locations

pub mod auth;
pub mod cache;
pub mod keys;

// Re-export commonly used types
pub use auth::{AuthConfig, LockoutConfig, TokenConfig};
pub use cache::CacheConfig;
pub use keys::KeyConfig;
