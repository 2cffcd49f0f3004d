//! Offer-specific registry logic: validation, keys and error types.

pub mod entity;
pub mod error;
pub mod validation;

pub use error::*;
pub use validation::*;
