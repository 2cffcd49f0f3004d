//! Customer segment lookup, backed by an in-memory directory actor.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
