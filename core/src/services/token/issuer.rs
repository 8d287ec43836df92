//! Token issuance, available only to the issuing authority.

use jsonwebtoken::{encode, Algorithm, Header};
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPair, TokenType};
use crate::errors::{DomainError, TokenError};
use sv_shared::config::auth::TokenConfig;

use super::keys::SigningKey;

/// Mints signed access and refresh tokens
///
/// Constructible only from a `SigningKey`, so a verification-only service
/// cannot accidentally mint trust: where no private key is configured,
/// `KeyProvider::signing_key()` already failed loudly.
pub struct TokenIssuer {
    signing_key: SigningKey,
    config: TokenConfig,
}

impl TokenIssuer {
    /// Create an issuer with the default token lifetimes
    pub fn new(signing_key: SigningKey) -> Self {
        Self::with_config(signing_key, TokenConfig::default())
    }

    /// Create an issuer with deployment-specific lifetimes
    pub fn with_config(signing_key: SigningKey, config: TokenConfig) -> Self {
        Self {
            signing_key,
            config,
        }
    }

    /// Generate a signed access token, exp = now + 15 minutes by default
    pub fn generate_access_token(&self, user_id: Uuid, email: &str) -> Result<String, DomainError> {
        let claims = Claims::with_ttl(
            user_id,
            email,
            TokenType::Access,
            self.config.access_token_expiry,
        );
        self.encode_jwt(&claims)
    }

    /// Generate a signed refresh token, exp = now + 7 days by default
    pub fn generate_refresh_token(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<String, DomainError> {
        let claims = Claims::with_ttl(
            user_id,
            email,
            TokenType::Refresh,
            self.config.refresh_token_expiry,
        );
        self.encode_jwt(&claims)
    }

    /// The configured refresh lifetime, which doubles as the registry TTL
    pub fn refresh_token_expiry(&self) -> i64 {
        self.config.refresh_token_expiry
    }

    /// Generate a full access + refresh pair
    pub fn generate_pair(&self, user_id: Uuid, email: &str) -> Result<TokenPair, DomainError> {
        let access_token = self.generate_access_token(user_id, email)?;
        let refresh_token = self.generate_refresh_token(user_id, email)?;

        debug!(user_id = %user_id, "Issued token pair");
        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.config.access_token_expiry,
            refresh_expires_in: self.config.refresh_token_expiry,
        })
    }

    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::RS256);
        encode(&header, claims, self.signing_key.encoding_key())
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}
