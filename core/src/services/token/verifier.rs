//! Token verification against the shared public key.

use jsonwebtoken::{decode, Algorithm, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::keys::VerificationKey;

/// Verifies token signatures and expiry
///
/// Needs only the public key, so every service in the deployment can hold
/// one. The accepted algorithm is pinned to RS256; a token whose header
/// names any other algorithm is rejected before signature checking.
pub struct TokenVerifier {
    verification_key: VerificationKey,
}

impl TokenVerifier {
    /// Create a verifier from the shared verification key
    pub fn new(verification_key: VerificationKey) -> Self {
        Self { verification_key }
    }

    /// Verify signature and expiry, returning the claims on success
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let validation = Validation::new(Algorithm::RS256);

        let token_data = decode::<Claims>(token, self.verification_key.decoding_key(), &validation)
            .map_err(|e| DomainError::Token(map_decode_error(e)))?;

        Ok(token_data.claims)
    }

    /// Expiry timestamp without signature verification
    ///
    /// Used for blacklist TTL bookkeeping only. The returned value must
    /// never be treated as authenticated.
    pub fn expires_at(&self, token: &str) -> Result<i64, DomainError> {
        Ok(self.decode_unverified(token)?.exp)
    }

    /// Remaining lifetime in seconds without signature verification,
    /// floored at zero
    pub fn remaining_lifetime(&self, token: &str) -> Result<i64, DomainError> {
        Ok(self.decode_unverified(token)?.remaining_lifetime())
    }

    /// Whether the token is past its expiry, without signature verification
    pub fn is_expired(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.decode_unverified(token)?.is_expired())
    }

    fn decode_unverified(&self, token: &str) -> Result<Claims, DomainError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;

        let token_data = decode::<Claims>(token, self.verification_key.decoding_key(), &validation)
            .map_err(|_| DomainError::Token(TokenError::InvalidTokenFormat))?;

        Ok(token_data.claims)
    }
}

fn map_decode_error(error: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::AlgorithmNotAllowed
        }
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
            TokenError::InvalidTokenFormat
        }
        _ => TokenError::InvalidClaims,
    }
}
