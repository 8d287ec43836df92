//! Core domain logic for the SessionVault authentication subsystem.
//!
//! Independently deployed services share trust through an asymmetric key
//! pair: the issuing service signs access and refresh tokens with the
//! private key, and every service verifies them with the public key.
//! Mutable session state (live refresh tokens, the access-token blacklist,
//! failed sign-in counters) lives in a shared key-value store, reached only
//! through the [`stores::KeyValueStore`] trait.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod stores;

pub use errors::{DomainError, DomainResult};
