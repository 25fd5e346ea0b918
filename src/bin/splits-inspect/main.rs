mod config;
mod hints;

use config::Config;
use drips_splits::{SubgraphClient, resolve_splits_for_account, telemetry::init_tracing};
use hints::load_hints;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    let _telemetry = init_tracing(&config.telemetry())?;

    let client = SubgraphClient::with_timeout(&config.subgraph_url, config.request_timeout())?;

    let hints = match &config.project_hints_path {
        Some(path) => load_hints(path).await?,
        None => Vec::new(),
    };

    info!(
        account_id = %config.account_id,
        hints = hints.len(),
        subgraph = client.endpoint(),
        "Resolving splits"
    );

    let splits =
        match resolve_splits_for_account(&client, &client, config.account_id, &hints).await {
            Ok(splits) => splits,
            Err(e) => {
                error!(retryable = e.is_retryable(), "Failed to resolve splits: {e}");
                return Err(e.into());
            }
        };

    println!("{}", serde_json::to_string_pretty(&splits)?);
    Ok(())
}
