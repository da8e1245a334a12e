//! Persistence of scraped records as JSON files.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes `data` as pretty-printed UTF-8 JSON, replacing any existing file.
///
/// Missing parent directories are created. Returns the path written to.
pub fn save<T: Serialize + ?Sized>(path: impl AsRef<Path>, data: &T) -> Result<PathBuf> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(data).context("Failed to serialize records")?;
    debug!("Writing {} bytes to {}", json.len(), path.display());

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    info!("Data saved to {}", path.display());
    Ok(path.to_path_buf())
}

/// Reads a previously saved file back as untyped JSON.
pub fn load(path: impl AsRef<Path>) -> Result<serde_json::Value> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read output file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse output file: {}", path.display()))
}
