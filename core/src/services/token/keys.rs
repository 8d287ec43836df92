//! RS256 key provisioning.
//!
//! The verification (public) key is loaded in every service; the signing
//! (private) key only where the deployment configures it. `SigningKey` is a
//! separate type so a `TokenIssuer` cannot be constructed in a
//! verification-only service, enforcing the trust boundary at the type level
//! rather than by convention. Key material is loaded once at startup and
//! never mutated.

use std::fs;
use std::path::Path;

use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::errors::{ConfigError, DomainError, TokenError};

use sv_shared::config::KeyConfig;

/// Public key capability: verify signatures, never mint them
#[derive(Clone)]
pub struct VerificationKey {
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationKey").finish_non_exhaustive()
    }
}

impl VerificationKey {
    /// Load from a PEM-encoded RSA public key
    pub fn from_pem(pem: &[u8]) -> Result<Self, DomainError> {
        let decoding_key = DecodingKey::from_rsa_pem(pem).map_err(|e| {
            DomainError::Config(ConfigError::KeyLoad {
                message: format!("invalid public key format: {}", e),
            })
        })?;
        Ok(Self { decoding_key })
    }

    /// Load from a PEM file on disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DomainError> {
        let pem = fs::read(path.as_ref()).map_err(|e| {
            DomainError::Config(ConfigError::KeyLoad {
                message: format!("failed to read public key: {}", e),
            })
        })?;
        Self::from_pem(&pem)
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

/// Private key capability: held only by the issuing authority process
#[derive(Clone)]
pub struct SigningKey {
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

impl SigningKey {
    /// Load from a PEM-encoded RSA private key
    pub fn from_pem(pem: &[u8]) -> Result<Self, DomainError> {
        let encoding_key = EncodingKey::from_rsa_pem(pem).map_err(|e| {
            DomainError::Config(ConfigError::KeyLoad {
                message: format!("invalid private key format: {}", e),
            })
        })?;
        Ok(Self { encoding_key })
    }

    /// Load from a PEM file on disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DomainError> {
        let pem = fs::read(path.as_ref()).map_err(|e| {
            DomainError::Config(ConfigError::KeyLoad {
                message: format!("failed to read private key: {}", e),
            })
        })?;
        Self::from_pem(&pem)
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }
}

/// Startup key loader for a service process
#[derive(Debug, Clone)]
pub struct KeyProvider {
    verification: VerificationKey,
    signing: Option<SigningKey>,
}

impl KeyProvider {
    /// Load key material per the service configuration
    ///
    /// The verification key is mandatory: a service without it must refuse
    /// to start. The signing key is loaded only when configured, which is
    /// the case for the issuing service alone.
    pub fn from_config(config: &KeyConfig) -> Result<Self, DomainError> {
        let public_path = config
            .public_key_path
            .as_deref()
            .ok_or(DomainError::Config(ConfigError::MissingVerificationKey))?;
        let verification = VerificationKey::from_file(public_path)?;

        let signing = match config.private_key_path.as_deref() {
            Some(path) => Some(SigningKey::from_file(path)?),
            None => None,
        };

        Ok(Self {
            verification,
            signing,
        })
    }

    /// Build a provider from in-memory PEM strings
    pub fn from_pem_strings(
        public_key_pem: &str,
        private_key_pem: Option<&str>,
    ) -> Result<Self, DomainError> {
        let verification = VerificationKey::from_pem(public_key_pem.as_bytes())?;
        let signing = match private_key_pem {
            Some(pem) => Some(SigningKey::from_pem(pem.as_bytes())?),
            None => None,
        };
        Ok(Self {
            verification,
            signing,
        })
    }

    /// The verification key, present in every service
    pub fn verification_key(&self) -> &VerificationKey {
        &self.verification
    }

    /// The signing key, or a loud failure where none is configured
    ///
    /// A verification-only service reaching for this is a trust-boundary
    /// violation, not a recoverable condition.
    pub fn signing_key(&self) -> Result<SigningKey, DomainError> {
        self.signing
            .clone()
            .ok_or(DomainError::Token(TokenError::SigningKeyUnavailable))
    }

    /// Whether this process is configured as the issuing authority
    pub fn can_issue(&self) -> bool {
        self.signing.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::token::test_keys::{TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM};

    #[test]
    fn test_verification_only_provider() {
        let provider = KeyProvider::from_pem_strings(TEST_PUBLIC_KEY_PEM, None).unwrap();

        assert!(!provider.can_issue());
        assert!(matches!(
            provider.signing_key(),
            Err(DomainError::Token(TokenError::SigningKeyUnavailable))
        ));
    }

    #[test]
    fn test_issuing_provider() {
        let provider =
            KeyProvider::from_pem_strings(TEST_PUBLIC_KEY_PEM, Some(TEST_PRIVATE_KEY_PEM))
                .unwrap();

        assert!(provider.can_issue());
        assert!(provider.signing_key().is_ok());
    }

    #[test]
    fn test_missing_verification_key_is_fatal() {
        let config = KeyConfig::default();
        let result = KeyProvider::from_config(&config);

        assert!(matches!(
            result,
            Err(DomainError::Config(ConfigError::MissingVerificationKey))
        ));
    }

    #[test]
    fn test_garbage_pem_rejected() {
        let result = VerificationKey::from_pem(b"not a key");
        assert!(matches!(
            result,
            Err(DomainError::Config(ConfigError::KeyLoad { .. }))
        ));
    }

    #[test]
    fn test_debug_does_not_leak_key_material() {
        let provider =
            KeyProvider::from_pem_strings(TEST_PUBLIC_KEY_PEM, Some(TEST_PRIVATE_KEY_PEM))
                .unwrap();
        let output = format!("{:?}", provider);
        assert!(!output.contains("BEGIN"));
    }
}
