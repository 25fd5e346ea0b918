use anyhow::Result;

use crate::accounts::AccountId;

use super::{Project, ProjectSource};

/// Looks up the project behind a repo-driver account.
///
/// Implementations must treat `source` as already discovered: when it is
/// given, they skip resolving the repository location themselves.
#[async_trait::async_trait]
pub trait ProjectLookup: Send + Sync {
    /// Returns `Ok(None)` when no project is known for `account_id`.
    ///
    /// `full_detail` asks for presentation metadata in
    /// [`Project::details`](super::Project::details); summary lookups leave it empty.
    async fn project_by_account_id(
        &self,
        account_id: AccountId,
        full_detail: bool,
        source: Option<&ProjectSource>,
    ) -> Result<Option<Project>>;
}
