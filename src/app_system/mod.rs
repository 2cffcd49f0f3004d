//! System orchestration, startup, and shutdown logic.

pub mod config;
pub mod offer_system;
pub mod telemetry;

pub use config::*;
pub use offer_system::*;
pub use telemetry::*;
