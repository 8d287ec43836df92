//! Account lockout after repeated failed sign-ins.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::lockout::FailedLoginState;
use crate::errors::{DomainError, StoreError};
use crate::stores::kv::KeyValueStore;
use sv_shared::config::auth::LockoutConfig;

const ATTEMPT_KEY_PREFIX: &str = "login_attempts";

pub(crate) fn attempt_key(user_id: Uuid) -> String {
    format!("{}:{}", ATTEMPT_KEY_PREFIX, user_id)
}

/// Tracks failed sign-in attempts and enforces the lock window
///
/// State lives in the shared store, so the lock holds across every service
/// instance. Lock decisions fail closed: when the store is unreachable the
/// caller sees the error rather than a silent "not locked".
pub struct AccountLockGuard<S: KeyValueStore> {
    store: Arc<S>,
    config: LockoutConfig,
}

impl<S: KeyValueStore> AccountLockGuard<S> {
    pub fn new(store: Arc<S>, config: LockoutConfig) -> Self {
        Self { store, config }
    }

    /// Whether the account is currently locked
    pub async fn is_locked(&self, user_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.lock_status(user_id).await?.is_some())
    }

    /// Remaining lock duration in seconds, or `None` when not locked
    ///
    /// An account is locked when it has reached the failure threshold and
    /// the most recent failure is still inside the lock window. Once the
    /// window elapses the state no longer counts as a lock, even if the
    /// store entry has not expired yet.
    pub async fn lock_status(&self, user_id: Uuid) -> Result<Option<i64>, DomainError> {
        let state = match self.load_state(user_id).await? {
            Some(state) => state,
            None => return Ok(None),
        };

        if state.failed_attempts < self.config.max_failed_attempts {
            return Ok(None);
        }

        let elapsed = state.seconds_since_last_failure();
        if elapsed >= self.config.lock_window_seconds {
            return Ok(None);
        }

        Ok(Some(self.config.lock_window_seconds - elapsed))
    }

    /// Record a failed sign-in attempt
    ///
    /// Returns the updated attempt count. Each failure refreshes the
    /// entry's TTL to the full lock window, so the lock measures from the
    /// most recent failure.
    pub async fn increment_failed_attempts(&self, user_id: Uuid) -> Result<u32, DomainError> {
        let state = match self.load_state(user_id).await? {
            Some(mut state) => {
                state.record_failure();
                state
            }
            None => FailedLoginState::first_failure(),
        };

        self.save_state(user_id, &state).await?;

        if state.failed_attempts >= self.config.max_failed_attempts {
            warn!(
                user_id = %user_id,
                failed_attempts = state.failed_attempts,
                "Account locked after repeated failed sign-ins"
            );
        }

        Ok(state.failed_attempts)
    }

    /// Clear the failure counter after a successful sign-in
    pub async fn reset_failed_attempts(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.store.delete(&attempt_key(user_id)).await?;
        info!(user_id = %user_id, "Reset failed sign-in counter");
        Ok(())
    }

    async fn load_state(&self, user_id: Uuid) -> Result<Option<FailedLoginState>, DomainError> {
        let raw = self.store.get(&attempt_key(user_id)).await?;
        match raw {
            Some(json) => {
                let state = serde_json::from_str(&json).map_err(|e| {
                    DomainError::Store(StoreError::Serialization {
                        message: e.to_string(),
                    })
                })?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    async fn save_state(&self, user_id: Uuid, state: &FailedLoginState) -> Result<(), DomainError> {
        let json = serde_json::to_string(state).map_err(|e| {
            DomainError::Store(StoreError::Serialization {
                message: e.to_string(),
            })
        })?;
        self.store
            .set_with_expiry(
                &attempt_key(user_id),
                &json,
                self.config.lock_window_seconds.max(0) as u64,
            )
            .await?;
        Ok(())
    }
}
