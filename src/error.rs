use thiserror::Error;

use crate::accounts::AccountId;

#[derive(Debug, Error)]
pub enum SplitsError {
    /// The splits fetch or a project lookup failed, or answered with data
    /// that could not be decoded.
    #[error("remote lookup failed: {0:#}")]
    RemoteLookup(anyhow::Error),

    /// A repo-driver account resolved to no project at all. Upstream state
    /// is inconsistent; retrying will not help.
    #[error("integrity violation: project account {account_id} resolved to no project record")]
    IntegrityViolation { account_id: AccountId },
}

impl SplitsError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RemoteLookup(_) => true,
            Self::IntegrityViolation { .. } => false,
        }
    }
}
