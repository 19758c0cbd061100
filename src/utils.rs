//! Small helpers for string handling, filenames and file system access.
//!
//! - Character-safe truncation for progress lines
//! - Content-addressed filename suffixes
//! - Directory creation and file writes that report the failing path

use crate::error::{ResearchError, Result};
use sha2::{Digest, Sha256};
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Keep the first `max` characters of `s`.
///
/// Unlike byte slicing this never splits a multi-byte character.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("héllo", 2), "hé");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// First 8 lowercase hex characters of the SHA-256 of `url`.
///
/// Used to disambiguate filenames only, never to verify content.
pub fn url_hash_suffix(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let hex = format!("{:x}", digest);
    hex[..8].to_string()
}

/// Create a directory (and parents). Succeeds if it already exists.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| ResearchError::io(path, e))?;
    debug!(path = %path.display(), "Directory ready");
    Ok(())
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and immediately removes a
/// probe file.
///
/// # Errors
///
/// Returns [`ResearchError::Io`] if the directory cannot be created or a file
/// cannot be written inside it.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<()> {
    ensure_dir(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = path.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(ResearchError::io(path, e)),
    }
}

/// Write `contents` to `path`, replacing any previous file.
pub async fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, contents)
        .await
        .map_err(|e| ResearchError::io(path, e))?;
    debug!(path = %path.display(), "Wrote file");
    Ok(())
}
