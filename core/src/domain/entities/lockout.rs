//! Failed sign-in state persisted per account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user failed sign-in counter, stored as JSON in the shared store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedLoginState {
    /// Consecutive failed attempts since the last successful sign-in
    pub failed_attempts: u32,

    /// Timestamp of the most recent failure
    pub last_failed_at: DateTime<Utc>,
}

impl FailedLoginState {
    /// State after a first failure
    pub fn first_failure() -> Self {
        Self {
            failed_attempts: 1,
            last_failed_at: Utc::now(),
        }
    }

    /// Records one more failure at the current time
    pub fn record_failure(&mut self) {
        self.failed_attempts += 1;
        self.last_failed_at = Utc::now();
    }

    /// Seconds elapsed since the most recent failure
    pub fn seconds_since_last_failure(&self) -> i64 {
        (Utc::now() - self.last_failed_at).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_first_failure() {
        let state = FailedLoginState::first_failure();
        assert_eq!(state.failed_attempts, 1);
        assert!(state.seconds_since_last_failure() <= 1);
    }

    #[test]
    fn test_record_failure_increments() {
        let mut state = FailedLoginState::first_failure();
        state.record_failure();
        state.record_failure();
        assert_eq!(state.failed_attempts, 3);
    }

    #[test]
    fn test_seconds_since_last_failure() {
        let state = FailedLoginState {
            failed_attempts: 5,
            last_failed_at: Utc::now() - Duration::seconds(1000),
        };
        assert!(state.seconds_since_last_failure() >= 1000);
    }

    #[test]
    fn test_state_serialization_round_trip() {
        let state = FailedLoginState::first_failure();
        let json = serde_json::to_string(&state).unwrap();
        let decoded: FailedLoginState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, decoded);
    }
}
