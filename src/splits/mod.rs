//! Splits receivers and their resolution into representational splits.

pub mod resolver;
pub mod types;

pub use resolver::*;
pub use types::*;
