//! Git projects registered through the repo driver.
//!
//! This module provides:
//! - Project records and their repository sources
//! - The [`ProjectLookup`] seam used to resolve repo-driver accounts

pub mod lookup;
pub mod types;

pub use lookup::*;
pub use types::*;
