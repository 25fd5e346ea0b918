//! GraphQL client for the Drips subgraph.
//!
//! Serves both collaborators the resolver needs: the splits configuration of
//! an account ([`SplitsFetcher`]) and the git project behind a repo-driver
//! account ([`ProjectLookup`]).

use std::time::Duration;

use alloy_primitives::Address;
use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    accounts::AccountId,
    projects::{Forge, Project, ProjectDetails, ProjectLookup, ProjectSource, VerificationStatus},
    splits::SplitsEntry,
    state::SplitsFetcher,
};

pub const DEFAULT_SUBGRAPH_URL: &str =
    "https://api.studio.thegraph.com/query/47690/drips-v2-on-ethereum/version/latest";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const SPLITS_ENTRIES_QUERY: &str = r#"
    query SplitsEntries($senderId: String!) {
        splitsEntries(where: { senderId: $senderId }) {
            accountId
            weight
        }
    }
"#;

const GIT_PROJECT_QUERY: &str = r#"
    query GitProject($id: ID!, $withSource: Boolean!, $withDetails: Boolean!) {
        gitProject(id: $id) {
            id
            verificationStatus
            ownerAddress
            forge @include(if: $withSource)
            name @include(if: $withSource)
            url @include(if: $withSource)
            emoji @include(if: $withDetails)
            color @include(if: $withDetails)
            description @include(if: $withDetails)
        }
    }
"#;

#[derive(Debug, Clone)]
pub struct SubgraphClient {
    endpoint: String,
    http: reqwest::Client,
}

impl SubgraphClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let body = json!({
            "query": query,
            "variables": variables,
        });

        let response: Value = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("Subgraph request failed")?
            .error_for_status()
            .context("Subgraph returned an error status")?
            .json()
            .await
            .context("Subgraph response is not JSON")?;

        decode_response(response)
    }
}

#[async_trait::async_trait]
impl SplitsFetcher for SubgraphClient {
    async fn splits_config(&self, account_id: AccountId) -> Result<Vec<SplitsEntry>> {
        let data: SplitsEntriesData = self
            .query(
                SPLITS_ENTRIES_QUERY,
                json!({ "senderId": account_id.to_string() }),
            )
            .await?;

        debug!(%account_id, receivers = data.splits_entries.len(), "Fetched splits config");
        Ok(data.splits_entries)
    }
}

#[async_trait::async_trait]
impl ProjectLookup for SubgraphClient {
    async fn project_by_account_id(
        &self,
        account_id: AccountId,
        full_detail: bool,
        source: Option<&ProjectSource>,
    ) -> Result<Option<Project>> {
        let data: GitProjectData = self
            .query(
                GIT_PROJECT_QUERY,
                json!({
                    "id": account_id.to_string(),
                    "withSource": source.is_none(),
                    "withDetails": full_detail,
                }),
            )
            .await?;

        data.git_project
            .map(|record| record.into_project(account_id, full_detail, source))
            .transpose()
    }
}

/// Unwrap a GraphQL response body into its `data` payload.
fn decode_response<T: DeserializeOwned>(mut response: Value) -> Result<T> {
    if let Some(errors) = response.get("errors").and_then(Value::as_array)
        && let Some(first) = errors.first()
    {
        let message = first
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        bail!("Subgraph error: {message}");
    }

    let data = response
        .get_mut("data")
        .filter(|data| data.is_object())
        .map(Value::take)
        .ok_or_else(|| anyhow!("No data in subgraph response"))?;

    serde_json::from_value(data).context("Malformed subgraph data")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SplitsEntriesData {
    splits_entries: Vec<SplitsEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitProjectData {
    git_project: Option<GitProjectRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitProjectRecord {
    id: AccountId,
    verification_status: VerificationStatus,
    owner_address: Option<String>,
    forge: Option<u8>,
    name: Option<String>,
    url: Option<String>,
    emoji: Option<String>,
    color: Option<String>,
    description: Option<String>,
}

impl GitProjectRecord {
    fn into_project(
        self,
        account_id: AccountId,
        full_detail: bool,
        source: Option<&ProjectSource>,
    ) -> Result<Project> {
        if self.id != account_id {
            bail!("Subgraph returned project {} for account {}", self.id, account_id);
        }

        let source = match source {
            Some(source) => source.clone(),
            None => self.discover_source()?,
        };

        let owner = self
            .owner_address
            .as_deref()
            .map(|owner| {
                owner
                    .parse::<Address>()
                    .map(|address| address.to_checksum(None))
                    .with_context(|| {
                        format!("Invalid owner address {owner:?} for project {account_id}")
                    })
            })
            .transpose()?;

        let details = full_detail.then(|| ProjectDetails {
            emoji: self.emoji,
            color: self.color,
            description: self.description,
        });

        Ok(Project {
            account_id,
            source,
            verification_status: self.verification_status,
            owner,
            details,
        })
    }

    fn discover_source(&self) -> Result<ProjectSource> {
        let forge = self
            .forge
            .and_then(Forge::from_id)
            .or_else(|| self.id.forge())
            .with_context(|| format!("Unknown forge for project {}", self.id))?;

        let name = self
            .name
            .as_deref()
            .with_context(|| format!("Subgraph has no name for project {}", self.id))?;

        let mut source = ProjectSource::from_name(forge, name)
            .with_context(|| format!("Invalid repo name {name:?} for project {}", self.id))?;
        if let Some(url) = &self.url {
            source.url = url.clone();
        }
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;

    use super::*;
    use crate::accounts::driver_ids;

    fn repo_account() -> AccountId {
        AccountId::from_parts(driver_ids::REPO, U256::from(1234u64))
    }

    fn record(value: Value) -> GitProjectRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_decode_splits_entries() {
        let data: SplitsEntriesData = decode_response(json!({
            "data": {
                "splitsEntries": [
                    { "accountId": "1", "weight": "500000" },
                    { "accountId": "2", "weight": "500000" }
                ]
            }
        }))
        .unwrap();

        assert_eq!(data.splits_entries.len(), 2);
        assert_eq!(data.splits_entries[1].account_id, AccountId::new(U256::from(2u8)));
        assert_eq!(data.splits_entries[1].weight, "500000");
    }

    #[test]
    fn test_decode_surfaces_first_graphql_error() {
        let err = decode_response::<SplitsEntriesData>(json!({
            "errors": [{ "message": "indexing_error" }, { "message": "second" }],
            "data": null
        }))
        .unwrap_err();

        assert_eq!(err.to_string(), "Subgraph error: indexing_error");
    }

    #[test]
    fn test_decode_requires_data_object() {
        assert!(decode_response::<SplitsEntriesData>(json!({ "data": null })).is_err());
        assert!(decode_response::<SplitsEntriesData>(json!({})).is_err());
    }

    #[test]
    fn test_decode_rejects_malformed_account_ids() {
        let err = decode_response::<SplitsEntriesData>(json!({
            "data": { "splitsEntries": [{ "accountId": "0xdead", "weight": "1" }] }
        }))
        .unwrap_err();

        assert_eq!(err.to_string(), "Malformed subgraph data");
    }

    #[test]
    fn test_missing_project_decodes_to_none() {
        let data: GitProjectData =
            decode_response(json!({ "data": { "gitProject": null } })).unwrap();

        assert!(data.git_project.is_none());
    }

    #[test]
    fn test_project_source_is_discovered_without_hint() {
        let id = repo_account();
        let project = record(json!({
            "id": id.to_string(),
            "verificationStatus": "CLAIMED",
            "ownerAddress": "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            "forge": 0,
            "name": "drips-network/app",
            "url": "https://github.com/drips-network/app",
            "emoji": "💧",
            "color": "#5555FF",
            "description": null
        }))
        .into_project(id, true, None)
        .unwrap();

        assert_eq!(project.source, ProjectSource::new(Forge::GitHub, "drips-network", "app"));
        assert_eq!(
            project.owner.as_deref(),
            Some("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
        );
        assert!(project.is_claimed());
        assert_eq!(
            project.details,
            Some(ProjectDetails {
                emoji: Some("💧".to_string()),
                color: Some("#5555FF".to_string()),
                description: None,
            })
        );
    }

    #[test]
    fn test_hinted_source_skips_discovery() {
        let id = repo_account();
        let hint = ProjectSource::new(Forge::GitLab, "drips", "app");

        let project = record(json!({
            "id": id.to_string(),
            "verificationStatus": "UNCLAIMED",
            "ownerAddress": null
        }))
        .into_project(id, false, Some(&hint))
        .unwrap();

        assert_eq!(project.source, hint);
        assert_eq!(project.owner, None);
        assert_eq!(project.details, None);
        assert!(!project.is_claimed());
    }

    #[test]
    fn test_forge_falls_back_to_account_id() {
        let id = repo_account();

        let project = record(json!({
            "id": id.to_string(),
            "verificationStatus": "UNCLAIMED",
            "name": "owner/repo"
        }))
        .into_project(id, false, None)
        .unwrap();

        assert_eq!(project.source.forge, Forge::GitHub);
        assert_eq!(project.source.url, "https://github.com/owner/repo");
    }

    #[test]
    fn test_discovery_without_name_fails() {
        let id = repo_account();

        let err = record(json!({
            "id": id.to_string(),
            "verificationStatus": "UNCLAIMED"
        }))
        .into_project(id, false, None)
        .unwrap_err();

        assert!(err.to_string().contains("no name"));
    }

    #[test]
    fn test_mismatched_project_id_is_rejected() {
        let id = repo_account();
        let other = AccountId::from_parts(driver_ids::REPO, U256::from(1u8));

        let result = record(json!({
            "id": other.to_string(),
            "verificationStatus": "UNCLAIMED",
            "name": "owner/repo"
        }))
        .into_project(id, false, None);

        assert!(result.is_err());
    }
}
