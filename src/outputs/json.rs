//! JSON files: the run index and the curated collection metadata.
//!
//! ```text
//! data/
//! ├── index.json               # RunIndex, rewritten by every scrape
//! └── articles_metadata.json   # ResearchMetadata, read by organize
//! ```

use crate::error::{ResearchError, Result};
use crate::models::{IndexEntry, ResearchMetadata};
use crate::utils::write_file;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Write the run index as a pretty-printed JSON array.
#[instrument(level = "info", skip_all, fields(path = %path.display(), entries = index.len()))]
pub async fn write_index(index: &[IndexEntry], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(index).map_err(|source| ResearchError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_file(path, json).await?;
    info!("Wrote run index");
    Ok(())
}

/// Load the collection metadata. A missing or malformed file is an error.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_metadata(path: &Path) -> Result<ResearchMetadata> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ResearchError::MissingMetadata(path.to_path_buf()));
        }
        Err(e) => return Err(ResearchError::io(path, e)),
    };
    serde_json::from_str(&raw).map_err(|source| ResearchError::MalformedMetadata {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `metadata` unless a metadata file already exists.
///
/// Returns whether a file was written.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_metadata_if_absent(metadata: &ResearchMetadata, path: &Path) -> Result<bool> {
    if fs::try_exists(path).await.map_err(|e| ResearchError::io(path, e))? {
        warn!("Metadata file exists; leaving it untouched");
        return Ok(false);
    }
    let json = serde_json::to_string_pretty(metadata).map_err(|source| ResearchError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_file(path, json).await?;
    info!(articles = metadata.articles.len(), "Seeded metadata file");
    Ok(true)
}
