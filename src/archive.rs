//! Persisting fetched articles.
//!
//! A successful fetch produces two files:
//!
//! ```text
//! articles/raw/<id>.html                  # body, verbatim
//! articles/<category>/<id>_<hash8>.txt    # header block + extracted text
//! ```
//!
//! A failed fetch writes nothing and yields a failed [`IndexEntry`].

use crate::config::Layout;
use crate::error::Result;
use crate::extract::TextExtractor;
use crate::models::{ArticleDescriptor, FetchResult, FetchStatus, IndexEntry};
use crate::utils::{ensure_dir, url_hash_suffix, write_file};
use std::path::PathBuf;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct ArchiveWriter {
    layout: Layout,
}

impl ArchiveWriter {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Create the fixed storage directories. Idempotent.
    pub async fn prepare(&self) -> Result<()> {
        for dir in [
            &self.layout.articles,
            &self.layout.raw,
            &self.layout.data,
            &self.layout.docs,
        ] {
            ensure_dir(dir).await?;
        }
        Ok(())
    }

    /// `<category>/<id>_<hash8>.txt` under the articles directory.
    pub fn text_path(&self, descriptor: &ArticleDescriptor) -> PathBuf {
        let filename = format!("{}_{}.txt", descriptor.id, url_hash_suffix(&descriptor.url));
        self.layout.category_dir(&descriptor.category).join(filename)
    }

    pub fn raw_path(&self, descriptor: &ArticleDescriptor) -> PathBuf {
        self.layout.raw.join(format!("{}.html", descriptor.id))
    }

    /// Store one fetch result and return its index entry.
    ///
    /// # Returns
    ///
    /// For a successful result, an entry with `local_path` and `raw_path`
    /// relative to the base directory. For a failed one, a failed entry; no
    /// file is touched.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Io`](crate::error::ResearchError::Io) if a
    /// directory or file cannot be written.
    #[instrument(level = "info", skip_all, fields(id = %result.descriptor.id, status = result.status.as_str()))]
    pub async fn archive<E>(&self, result: FetchResult, extractor: &E) -> Result<IndexEntry>
    where
        E: TextExtractor + ?Sized,
    {
        let FetchResult {
            descriptor,
            status,
            body,
            fetched_at,
        } = result;

        let body = match (status, body) {
            (FetchStatus::Success, Some(body)) => body,
            _ => return Ok(IndexEntry::failed(descriptor)),
        };

        let raw_path = self.raw_path(&descriptor);
        ensure_dir(&self.layout.raw).await?;
        write_file(&raw_path, &body).await?;

        let extracted = extractor.extract(&body, &descriptor.url);
        let text_path = self.text_path(&descriptor);
        ensure_dir(&self.layout.category_dir(&descriptor.category)).await?;
        write_file(&text_path, compose_document(&descriptor, &extracted.to_string())).await?;

        info!(
            raw = %raw_path.display(),
            text = %text_path.display(),
            "Archived article"
        );

        Ok(IndexEntry {
            local_path: Some(self.layout.relative(&text_path)),
            raw_path: Some(self.layout.relative(&raw_path)),
            descriptor,
            status: FetchStatus::Success,
            fetched_at,
        })
    }
}

/// Header block followed by the extracted text.
pub fn compose_document(descriptor: &ArticleDescriptor, extracted: &str) -> String {
    format!(
        "# {}\n\nURL: {}\nDate: {}\nPlatform: {}\nTopics: {}\n\n---\n\n{}",
        descriptor.title,
        descriptor.url,
        descriptor.date,
        descriptor.platform,
        descriptor.topics.join(", "),
        extracted
    )
}
