//! Domain services.

pub mod auth;
pub mod token;

pub use auth::{AccountLockGuard, AuthService, SessionOutcome};
pub use token::{KeyProvider, TokenIssuer, TokenVerifier};
