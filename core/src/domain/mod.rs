//! Domain layer: entities shared across the token lifecycle.

pub mod entities;

pub use entities::*;
