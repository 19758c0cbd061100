//! The scrape and organize steps.
//!
//! [`run`] walks the catalog strictly in order: fetch, archive, append to the
//! index. The index is a local value returned to the caller; nothing else
//! holds on to it. [`scrape`] and [`organize`] wrap that with directory
//! setup and the JSON/Markdown outputs.

use crate::archive::ArchiveWriter;
use crate::catalog;
use crate::config::ScraperConfig;
use crate::error::Result;
use crate::extract::TextExtractor;
use crate::fetcher::ContentFetcher;
use crate::models::{ArticleDescriptor, ResearchMetadata, RunIndex};
use crate::outputs::{json, markdown};
use crate::report::RunStats;
use crate::utils::{ensure_dir, ensure_writable_dir, write_file};
use chrono::Local;
use tracing::{info, instrument};

const RULE: &str = "==================================================";

/// Fetch and archive every descriptor, one at a time, in catalog order.
///
/// # Arguments
///
/// * `catalog` - Descriptors to process; their order is the index order.
/// * `fetcher` - Shared HTTP client with the configured pause and timeout.
/// * `archive` - Writer for raw and extracted files.
/// * `extractor` - Turns each fetched body into title, description and text.
///
/// # Returns
///
/// One [`IndexEntry`](crate::models::IndexEntry) per descriptor. Fetch
/// failures appear as failed entries.
///
/// # Errors
///
/// Returns [`ResearchError::Io`](crate::error::ResearchError::Io) as soon as a
/// file under the archive cannot be written; entries gathered so far are lost.
pub async fn run<E>(
    catalog: &[ArticleDescriptor],
    fetcher: &ContentFetcher,
    archive: &ArchiveWriter,
    extractor: &E,
) -> Result<RunIndex>
where
    E: TextExtractor + ?Sized,
{
    let total = catalog.len();
    let mut index = RunIndex::with_capacity(total);

    for (i, descriptor) in catalog.iter().enumerate() {
        println!("[{}/{}] Processing {}", i + 1, total, descriptor.id);

        let result = fetcher.fetch(descriptor).await;
        let entry = archive.archive(result, extractor).await?;

        println!("  Status: {}\n", entry.status.as_str());
        index.push(entry);
    }

    Ok(index)
}

/// Full scrape: prepare directories, run the catalog, write the index,
/// the run summary and (once) the metadata seed.
#[instrument(level = "info", skip_all, fields(base_dir = %config.base_dir.display()))]
pub async fn scrape<E>(config: &ScraperConfig, extractor: &E) -> Result<RunIndex>
where
    E: TextExtractor + ?Sized,
{
    println!("Starting Equity Perps Research Scraper");
    println!("{RULE}");

    ensure_writable_dir(&config.base_dir).await?;
    let archive = ArchiveWriter::new(config.layout());
    archive.prepare().await?;
    let fetcher = ContentFetcher::new(config)?;

    let articles = catalog::articles();
    println!("Found {} articles to process\n", articles.len());

    let index = run(&articles, &fetcher, &archive, extractor).await?;

    let layout = archive.layout();
    let index_path = layout.index_file();
    json::write_index(&index, &index_path).await?;
    println!("Index saved to {}", index_path.display());

    let summary_path = layout.run_summary_file();
    let generated_at = Local::now().format("%Y-%m-%d %H:%M").to_string();
    write_file(&summary_path, markdown::render_run_summary(&index, &generated_at)).await?;
    println!("Summary saved to {}", summary_path.display());

    json::write_metadata_if_absent(&ResearchMetadata::from_catalog(&articles), &layout.metadata_file())
        .await?;

    let stats = RunStats::from_index(&index);
    info!(total = stats.total, success = stats.success, failed = stats.failed, "Scrape complete");
    println!("{RULE}");
    println!("Scraping complete!");
    println!("Success: {}", stats.success);
    println!("Failed: {}", stats.failed);

    Ok(index)
}

/// Render the curated reports from `data/articles_metadata.json`.
///
/// # Errors
///
/// - [`ResearchError::MissingMetadata`](crate::error::ResearchError::MissingMetadata)
///   if the metadata file does not exist; nothing is written.
/// - [`ResearchError::MalformedMetadata`](crate::error::ResearchError::MalformedMetadata)
///   if it cannot be parsed.
/// - [`ResearchError::Io`](crate::error::ResearchError::Io) if a report cannot
///   be written.
#[instrument(level = "info", skip_all, fields(base_dir = %config.base_dir.display()))]
pub async fn organize(config: &ScraperConfig) -> Result<()> {
    println!("Organizing Equity Perpetuals Research");
    println!("{RULE}");

    let layout = config.layout();
    let data = json::load_metadata(&layout.metadata_file()).await?;

    let now = Local::now();
    let today = now.format("%Y-%m-%d").to_string();
    let stamp = now.format("%Y-%m-%d %H:%M").to_string();

    let outputs = [
        (layout.key_insights_file(), markdown::render_key_insights(&today)),
        (
            layout.executive_summary_file(),
            markdown::render_executive_summary(&data, &stamp),
        ),
        (layout.quick_reference_file(), markdown::render_quick_reference()),
    ];
    for (path, contents) in &outputs {
        if let Some(parent) = path.parent() {
            ensure_dir(parent).await?;
        }
        write_file(path, contents).await?;
        println!("Created {}", layout.relative(path));
    }

    info!(files = outputs.len(), "Organize complete");
    println!("{RULE}");
    println!("Organization complete!");
    Ok(())
}
