//! Token lifetime and account lockout configuration

use serde::{Deserialize, Serialize};

/// Token lifetime configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
        }
    }
}

impl TokenConfig {
    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "900".to_string())
            .parse()
            .unwrap_or(900);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()
            .unwrap_or(604800);

        Self {
            access_token_expiry,
            refresh_token_expiry,
        }
    }
}

/// Failed sign-in lockout configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LockoutConfig {
    /// Failed attempts before the account locks
    pub max_failed_attempts: u32,

    /// Window in seconds within which failures count toward a lock,
    /// and for which a lock remains active
    pub lock_window_seconds: i64,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lock_window_seconds: 900, // 15 minutes
        }
    }
}

impl LockoutConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let max_failed_attempts = std::env::var("AUTH_MAX_FAILED_ATTEMPTS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);
        let lock_window_seconds = std::env::var("AUTH_LOCK_WINDOW_SECONDS")
            .unwrap_or_else(|_| "900".to_string())
            .parse()
            .unwrap_or(900);

        Self {
            max_failed_attempts,
            lock_window_seconds,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Token lifetime configuration
    #[serde(default)]
    pub tokens: TokenConfig,

    /// Lockout policy
    #[serde(default)]
    pub lockout: LockoutConfig,

    /// Minimum accepted password length at sign-up
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Whether a verified email is required before tokens are issued
    #[serde(default)]
    pub require_email_verification: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            tokens: TokenConfig::default(),
            lockout: LockoutConfig::default(),
            min_password_length: default_min_password_length(),
            require_email_verification: false,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let min_password_length = std::env::var("AUTH_MIN_PASSWORD_LENGTH")
            .unwrap_or_else(|_| "8".to_string())
            .parse()
            .unwrap_or(8);
        let require_email_verification = std::env::var("AUTH_REQUIRE_EMAIL_VERIFICATION")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .unwrap_or(false);

        Self {
            tokens: TokenConfig::from_env(),
            lockout: LockoutConfig::from_env(),
            min_password_length,
            require_email_verification,
        }
    }
}

fn default_min_password_length() -> usize {
    8
}
