//! Key material configuration
//!
//! Every service is configured with the verification (public) key; only the
//! issuing service is configured with the signing (private) key. Absence of
//! the verification key is a fatal startup error, enforced where the keys are
//! loaded in `sv_core`.

use serde::{Deserialize, Serialize};

/// Locations of the RS256 PEM key files
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KeyConfig {
    /// Path to the PEM-encoded public key (required in every service)
    pub public_key_path: Option<String>,

    /// Path to the PEM-encoded private key (issuing service only)
    pub private_key_path: Option<String>,
}

impl KeyConfig {
    /// Create from environment variables
    ///
    /// Reads `JWT_PUBLIC_KEY_PATH` and `JWT_PRIVATE_KEY_PATH`. Unset
    /// variables stay `None`; the key loader rejects a missing public key.
    pub fn from_env() -> Self {
        Self {
            public_key_path: std::env::var("JWT_PUBLIC_KEY_PATH").ok(),
            private_key_path: std::env::var("JWT_PRIVATE_KEY_PATH").ok(),
        }
    }

    /// Configuration for a verification-only service
    pub fn verification_only(public_key_path: impl Into<String>) -> Self {
        Self {
            public_key_path: Some(public_key_path.into()),
            private_key_path: None,
        }
    }

    /// Configuration for the issuing service
    pub fn issuing(
        public_key_path: impl Into<String>,
        private_key_path: impl Into<String>,
    ) -> Self {
        Self {
            public_key_path: Some(public_key_path.into()),
            private_key_path: Some(private_key_path.into()),
        }
    }
}
