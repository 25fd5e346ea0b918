use anyhow::{Context, Result};

use crate::{
    SplitsError,
    accounts::AccountId,
    splits::{RawSplit, SplitsEntry},
};

/// Source of the splits configuration an account has set.
#[async_trait::async_trait]
pub trait SplitsFetcher: Send + Sync {
    async fn splits_config(&self, account_id: AccountId) -> Result<Vec<SplitsEntry>>;
}

/// Fetch an account's splits receivers with their weights parsed.
pub async fn fetch_raw_splits<F>(
    fetcher: &F,
    account_id: AccountId,
) -> Result<Vec<RawSplit>, SplitsError>
where
    F: SplitsFetcher + ?Sized,
{
    let entries = fetcher
        .splits_config(account_id)
        .await
        .with_context(|| format!("Failed to fetch splits config for account {account_id}"))
        .map_err(SplitsError::RemoteLookup)?;

    entries
        .into_iter()
        .map(raw_split_from_entry)
        .collect::<Result<Vec<_>>>()
        .map_err(SplitsError::RemoteLookup)
}

fn raw_split_from_entry(entry: SplitsEntry) -> Result<RawSplit> {
    let weight = entry.weight.trim().parse::<u32>().with_context(|| {
        format!(
            "Invalid weight {:?} for splits receiver {}",
            entry.weight, entry.account_id
        )
    })?;

    Ok(RawSplit {
        account_id: entry.account_id,
        weight,
    })
}
