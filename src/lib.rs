//! Resolution of Drips splits receivers into representational splits.
//!
//! A splits configuration is a list of `(account id, weight)` receivers. Each
//! account id embeds the driver that owns it; repo-driver receivers are git
//! projects and are resolved to their project record, every other receiver
//! is shown as an address.

pub mod accounts;
pub mod error;
pub mod projects;
pub mod splits;
pub mod state;
pub mod subgraph;
pub mod telemetry;

// Re-export commonly used types
pub use accounts::{AccountId, Driver, ReceiverKind};
pub use error::SplitsError;
pub use projects::{Forge, Project, ProjectLookup, ProjectMetadataHint, ProjectSource};
pub use splits::{RawSplit, ResolvedSplit, resolve_splits, resolve_splits_for_account};
pub use state::{SplitsFetcher, fetch_raw_splits};
pub use subgraph::SubgraphClient;
