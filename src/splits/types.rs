use serde::{Deserialize, Serialize};

use crate::{accounts::AccountId, projects::Project};

/// A splits receiver as configured on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSplit {
    pub account_id: AccountId,
    pub weight: u32,
}

/// A splits receiver as the indexer reports it, weight still a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitsEntry {
    pub account_id: AccountId,
    pub weight: String,
}

/// A splits receiver ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ResolvedSplit {
    AddressSplit { weight: u32, address: String },
    ProjectSplit { weight: u32, project: Project },
}

impl ResolvedSplit {
    pub fn weight(&self) -> u32 {
        match self {
            Self::AddressSplit { weight, .. } | Self::ProjectSplit { weight, .. } => *weight,
        }
    }
}
