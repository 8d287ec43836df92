//! Credential store abstraction.
//!
//! Account storage and password comparison live outside this crate; the
//! session lifecycle consumes only the boolean outcome through this trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::UserAccount;
use crate::errors::DomainError;

/// External account and credential storage
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an account by email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Create a new account with the given credentials
    async fn create_account(&self, email: &str, password: &str)
        -> Result<UserAccount, DomainError>;

    /// Compare a candidate password against the stored credential
    async fn verify_password(&self, user_id: Uuid, password: &str) -> Result<bool, DomainError>;
}
