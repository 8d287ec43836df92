//! Abstractions over external storage collaborators.

pub mod credential;
pub mod mock;

pub use credential::CredentialStore;
pub use mock::MockCredentialStore;
