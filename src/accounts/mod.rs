//! Account ids and driver classification for the Drips protocol.
//!
//! This module provides:
//! - The [`AccountId`] type and its decimal string encoding
//! - Driver and receiver-kind classification
//! - Address derivation for address-driver accounts

pub mod account_id;

pub use account_id::*;
