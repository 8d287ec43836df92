//! Mock implementation of CredentialStore for testing

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::UserAccount;
use crate::errors::{AuthError, DomainError};

use super::credential::CredentialStore;

struct MockAccount {
    account: UserAccount,
    password: String,
}

/// In-memory credential store for tests
pub struct MockCredentialStore {
    accounts: Arc<RwLock<HashMap<String, MockAccount>>>,
}

impl MockCredentialStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed an account directly, bypassing signup
    pub async fn insert(&self, account: UserAccount, password: &str) {
        let mut accounts = self.accounts.write().await;
        accounts.insert(
            account.email.clone(),
            MockAccount {
                account,
                password: password.to_string(),
            },
        );
    }
}

impl Default for MockCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(email).map(|a| a.account.clone()))
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserAccount, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(email) {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        let account = UserAccount {
            id: Uuid::new_v4(),
            email: email.to_string(),
            email_verified: false,
        };
        accounts.insert(
            email.to_string(),
            MockAccount {
                account: account.clone(),
                password: password.to_string(),
            },
        );
        Ok(account)
    }

    async fn verify_password(&self, user_id: Uuid, password: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .any(|a| a.account.id == user_id && a.password == password))
    }
}
