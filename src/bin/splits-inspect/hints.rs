use std::path::Path;

use anyhow::Context;
use drips_splits::ProjectMetadataHint;

/// Read project hints from a JSON array file.
pub async fn load_hints(path: &Path) -> anyhow::Result<Vec<ProjectMetadataHint>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read project hints from {}", path.display()))?;

    parse_hints(&contents)
        .with_context(|| format!("Invalid project hints in {}", path.display()))
}

fn parse_hints(contents: &str) -> anyhow::Result<Vec<ProjectMetadataHint>> {
    Ok(serde_json::from_str(contents)?)
}
