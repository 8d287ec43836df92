//! The narrow account view this subsystem needs from the credential store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account as seen by the session lifecycle
///
/// Credential storage and password hashing live behind the external
/// `CredentialStore`; this entity carries only what token issuance and
/// lockout tracking need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique account identifier
    pub id: Uuid,

    /// Account email, also the sign-in identifier
    pub email: String,

    /// Whether the account email has been verified
    pub email_verified: bool,
}

impl UserAccount {
    /// Creates a new unverified account view
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            email_verified: false,
        }
    }
}
