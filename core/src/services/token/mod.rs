//! JWT issuance and verification.
//!
//! The trust boundary is expressed in the type system: `TokenVerifier`
//! needs only a `VerificationKey`, while `TokenIssuer` is constructible
//! solely from a `SigningKey`. A deployment distributes the public key to
//! every service and keeps the private key on the issuing authority.

pub mod issuer;
pub mod keys;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_keys;

pub use issuer::TokenIssuer;
pub use keys::{KeyProvider, SigningKey, VerificationKey};
pub use verifier::TokenVerifier;
