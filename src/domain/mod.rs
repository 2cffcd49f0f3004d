pub mod offer;
pub mod cart;

pub use offer::*;
pub use cart::*;
