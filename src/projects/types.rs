use serde::{Deserialize, Serialize};

use crate::accounts::AccountId;

/// Forge ids as encoded into repo-driver account ids.
pub mod forge_ids {
    pub const GITHUB: u8 = 0;
    pub const GITLAB: u8 = 1;
}

/// Code hosting service a project lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Forge {
    GitHub,
    GitLab,
}

impl Forge {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            forge_ids::GITHUB => Some(Self::GitHub),
            forge_ids::GITLAB => Some(Self::GitLab),
            _ => None,
        }
    }

    pub fn id(&self) -> u8 {
        match self {
            Self::GitHub => forge_ids::GITHUB,
            Self::GitLab => forge_ids::GITLAB,
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Self::GitHub => "https://github.com",
            Self::GitLab => "https://gitlab.com",
        }
    }
}

/// Where a project's repository lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSource {
    pub forge: Forge,
    pub owner_name: String,
    pub repo_name: String,
    pub url: String,
}

impl ProjectSource {
    pub fn new(forge: Forge, owner_name: impl Into<String>, repo_name: impl Into<String>) -> Self {
        let owner_name = owner_name.into();
        let repo_name = repo_name.into();
        let url = format!("{}/{}/{}", forge.base_url(), owner_name, repo_name);
        Self {
            forge,
            owner_name,
            repo_name,
            url,
        }
    }

    /// Parse a registered repo name of the form `owner/repo`.
    pub fn from_name(forge: Forge, name: &str) -> Option<Self> {
        let (owner_name, repo_name) = name.split_once('/')?;
        if owner_name.is_empty() || repo_name.is_empty() || repo_name.contains('/') {
            return None;
        }
        Some(Self::new(forge, owner_name, repo_name))
    }

    /// `owner/repo`, the name the repo driver hashes into the account id.
    pub fn name(&self) -> String {
        format!("{}/{}", self.owner_name, self.repo_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Claimed,
    Unclaimed,
    OwnerUpdateRequested,
    OwnerUpdated,
    PendingOwner,
    PendingMetadata,
}

/// Presentation metadata a claimed project's owner has published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub emoji: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub account_id: AccountId,
    pub source: ProjectSource,
    pub verification_status: VerificationStatus,
    /// Checksummed owner address, set once the project is claimed.
    pub owner: Option<String>,
    /// Only populated by full-detail lookups.
    pub details: Option<ProjectDetails>,
}

impl Project {
    pub fn is_claimed(&self) -> bool {
        self.verification_status == VerificationStatus::Claimed
    }
}

/// Project metadata the caller already knows, used to skip source discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadataHint {
    pub account_id: AccountId,
    pub source: ProjectSource,
}
