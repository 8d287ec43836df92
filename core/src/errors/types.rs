//! Domain-specific error types for the token lifecycle
//!
//! User-visible behavior deliberately collapses to a small generic set of
//! messages (invalid credentials / account locked / session expired) so a
//! caller cannot tell which factor failed.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Account locked, retry in {retry_after_seconds} seconds")]
    AccountLocked { retry_after_seconds: i64 },

    #[error("Session expired")]
    SessionExpired,
}

/// Token-related errors
///
/// Verification outcomes are local decisions resolved on the hot path,
/// never thrown through it.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Signing algorithm not allowed")]
    AlgorithmNotAllowed,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Refresh token reuse detected")]
    ReplayDetected,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Signing key unavailable in this service")]
    SigningKeyUnavailable,
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Password must be at least {minimum} characters")]
    PasswordTooShort { minimum: usize },

    #[error("Invalid email address")]
    InvalidEmail,
}

/// Shared-store errors
///
/// Caught at the store boundary and converted into the fail-open /
/// fail-closed policy of the calling component; never surfaced raw.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Store operation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Store value corrupt: {message}")]
    Serialization { message: String },
}

/// Startup configuration errors - fatal, the service must refuse to start
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Verification key not configured")]
    MissingVerificationKey,

    #[error("Key material could not be loaded: {message}")]
    KeyLoad { message: String },
}
