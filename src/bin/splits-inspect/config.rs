use std::{env, path::PathBuf, time::Duration};

use anyhow::Context;
use drips_splits::{
    AccountId,
    subgraph::DEFAULT_SUBGRAPH_URL,
    telemetry::{LogFormat, TelemetryConfig},
};

pub struct Config {
    pub subgraph_url: String,
    pub account_id: AccountId,
    pub project_hints_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let subgraph_url =
            env::var("SUBGRAPH_URL").unwrap_or_else(|_| DEFAULT_SUBGRAPH_URL.to_string());

        let account_id = env::var("ACCOUNT_ID")
            .context("ACCOUNT_ID must be set")?
            .parse::<AccountId>()?;

        let project_hints_path = env::var_os("PROJECT_HINTS_PATH").map(PathBuf::from);

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()?;

        let log_format = env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "plain".to_string())
            .parse::<LogFormat>()?;

        let otlp_endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .filter(|endpoint| !endpoint.is_empty());

        Ok(Self {
            subgraph_url,
            account_id,
            project_hints_path,
            request_timeout_secs,
            log_format,
            otlp_endpoint,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig {
            log_format: self.log_format,
            otlp_endpoint: self.otlp_endpoint.clone(),
        }
    }
}
