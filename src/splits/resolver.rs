//! Turns configured splits receivers into representational splits.
//!
//! Address receivers are resolved locally. Project receivers need a
//! [`ProjectLookup`] each; those lookups are started together and joined, so
//! the whole call takes as long as the slowest one.

use futures::future::try_join_all;
use tracing::{debug, error, info, warn};

use crate::{
    SplitsError,
    accounts::{AccountId, ReceiverKind},
    projects::{ProjectLookup, ProjectMetadataHint},
    state::{SplitsFetcher, fetch_raw_splits},
};

use super::{RawSplit, ResolvedSplit};

/// Resolve `raw_splits` into representational splits, in input order.
///
/// Project receivers are looked up with full detail. A matching entry in
/// `hints` hands its source to the lookup so it can skip discovery.
///
/// The first failed lookup fails the whole call and the remaining lookups
/// are dropped. A project receiver with no project record is reported as
/// [`SplitsError::IntegrityViolation`].
#[tracing::instrument(skip_all, fields(splits = raw_splits.len(), hints = hints.len()))]
pub async fn resolve_splits<P>(
    projects: &P,
    raw_splits: &[RawSplit],
    hints: &[ProjectMetadataHint],
) -> Result<Vec<ResolvedSplit>, SplitsError>
where
    P: ProjectLookup + ?Sized,
{
    let resolved = try_join_all(
        raw_splits
            .iter()
            .map(|split| resolve_split(projects, split, hints)),
    )
    .await?;

    info!(count = resolved.len(), "Resolved splits");
    Ok(resolved)
}

/// Fetch the splits configured by `account_id` and resolve them.
#[tracing::instrument(skip_all, fields(account_id = %account_id))]
pub async fn resolve_splits_for_account<F, P>(
    fetcher: &F,
    projects: &P,
    account_id: AccountId,
    hints: &[ProjectMetadataHint],
) -> Result<Vec<ResolvedSplit>, SplitsError>
where
    F: SplitsFetcher + ?Sized,
    P: ProjectLookup + ?Sized,
{
    let raw_splits = fetch_raw_splits(fetcher, account_id).await?;
    resolve_splits(projects, &raw_splits, hints).await
}

async fn resolve_split<P>(
    projects: &P,
    split: &RawSplit,
    hints: &[ProjectMetadataHint],
) -> Result<ResolvedSplit, SplitsError>
where
    P: ProjectLookup + ?Sized,
{
    let account_id = split.account_id;

    match account_id.receiver_kind() {
        ReceiverKind::Address => {
            let address = account_id.checksummed_address();
            debug!(%account_id, %address, weight = split.weight, "Address receiver");

            Ok(ResolvedSplit::AddressSplit {
                weight: split.weight,
                address,
            })
        }
        ReceiverKind::Project => {
            let source = find_hint(hints, account_id).map(|hint| &hint.source);
            debug!(
                %account_id,
                weight = split.weight,
                hinted = source.is_some(),
                "Project receiver"
            );

            let project = projects
                .project_by_account_id(account_id, true, source)
                .await
                .map_err(SplitsError::RemoteLookup)?;

            let Some(project) = project else {
                error!(%account_id, "Project receiver resolved to no project record");
                return Err(SplitsError::IntegrityViolation { account_id });
            };

            Ok(ResolvedSplit::ProjectSplit {
                weight: split.weight,
                project,
            })
        }
    }
}

fn find_hint(
    hints: &[ProjectMetadataHint],
    account_id: AccountId,
) -> Option<&ProjectMetadataHint> {
    let mut matching = hints.iter().filter(|hint| hint.account_id == account_id);
    let first = matching.next()?;

    if matching.next().is_some() {
        warn!(%account_id, "Multiple project hints match account, using the first");
    }

    Some(first)
}
