//! Remote splits configuration.

pub mod fetchers;

pub use fetchers::*;
