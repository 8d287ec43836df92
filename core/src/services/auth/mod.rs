//! Sign-up, sign-in, refresh, and logout flows.

pub mod account_lock;
pub mod email;
pub mod service;

pub use account_lock::AccountLockGuard;
pub use service::{AuthService, SessionOutcome};
