//! File access scoped to the currently open project folder
//!
//! The root is passed in per call rather than cached: the panel host reads
//! it from its state at the time of each request, so behavior follows the
//! open folder as it changes. File bytes cross the wire as base64.

use anyhow::{anyhow, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::path::Path;

pub const NO_WORKSPACE: &str = "No workspace is open.";

/// Read `filename` under the open root and return its bytes as base64
pub async fn read_file(root: Option<&Path>, filename: &str) -> Result<String> {
    let root = root.ok_or_else(|| anyhow!(NO_WORKSPACE))?;
    let path = root.join(filename);

    log::debug!("reading workspace file {}", path.display());
    let bytes = tokio::fs::read(&path).await?;
    Ok(BASE64.encode(bytes))
}

/// Decode the base64 payload and create or overwrite `filename` under the
/// open root; the same payload is echoed back as confirmation
pub async fn write_file(root: Option<&Path>, filename: &str, content: &str) -> Result<String> {
    let root = root.ok_or_else(|| anyhow!(NO_WORKSPACE))?;
    let bytes = BASE64.decode(content)?;
    let path = root.join(filename);

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    log::debug!("writing {} bytes to {}", bytes.len(), path.display());
    tokio::fs::write(&path, bytes).await?;
    Ok(content.to_string())
}
