//! Shared-store abstraction and the store-backed registries.

pub mod blacklist;
pub mod kv;
pub mod memory;
pub mod refresh;

pub use blacklist::TokenBlacklist;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use refresh::RefreshTokenStore;
