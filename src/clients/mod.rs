#[macro_use]
mod macros;

pub mod offer_client;
pub mod segment_client;
pub mod offer_resolver;

pub use offer_client::*;
pub use segment_client::*;
pub use offer_resolver::*;
