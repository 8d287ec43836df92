//! # SessionVault Shared
//!
//! Configuration layer shared by every SessionVault service. Token lifetimes,
//! lockout policy, key material locations, and shared-store settings are all
//! named constants here, overridable per deployment.

pub mod config;

pub use config::*;
