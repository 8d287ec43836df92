//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token lifetime (15 minutes)
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 900;

/// Refresh token lifetime (7 days)
pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 604800;

/// The kind of credential a token represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims structure for the JWT payload
///
/// Carries only the minimal claim set; no extra PII crosses the wire.
/// The `jti` makes every minted token distinct: RS256 signing is
/// deterministic, so without it two tokens for the same user in the same
/// second would be byte-identical and a rotated refresh token could
/// collide with its replacement in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Account email
    pub email: String,

    /// Whether this is an access or refresh token
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Unique token identifier
    pub jti: Uuid,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for an access token, exp = iat + 15 minutes
    pub fn new_access_token(user_id: Uuid, email: &str) -> Self {
        Self::with_ttl(user_id, email, TokenType::Access, ACCESS_TOKEN_TTL_SECONDS)
    }

    /// Creates claims for a refresh token, exp = iat + 7 days
    pub fn new_refresh_token(user_id: Uuid, email: &str) -> Self {
        Self::with_ttl(user_id, email, TokenType::Refresh, REFRESH_TOKEN_TTL_SECONDS)
    }

    /// Creates claims with an explicit lifetime
    pub fn with_ttl(user_id: Uuid, email: &str, token_type: TokenType, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            token_type,
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Remaining lifetime in seconds, floored at zero
    pub fn remaining_lifetime(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with the standard expiry times
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: ACCESS_TOKEN_TTL_SECONDS,
            refresh_expires_in: REFRESH_TOKEN_TTL_SECONDS,
        }
    }
}
