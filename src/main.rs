//! # Perps Research
//!
//! Fetches a fixed catalog of articles about blockchain equity perpetuals,
//! archives the raw HTML and a plain-text extract of each, and writes JSON
//! and Markdown reports about the collection.
//!
//! ## Usage
//!
//! ```sh
//! perps_research scrape
//! perps_research -b ./research all --extractor dom
//! ```
//!
//! ## Architecture
//!
//! The scrape step is a strictly sequential pipeline:
//! 1. **Catalog**: fixed list of article descriptors
//! 2. **Fetching**: one GET per article after a fixed pause
//! 3. **Extraction**: HTML to title, description and truncated body
//! 4. **Archive**: raw and extracted files, one index entry per article
//! 5. **Reports**: `data/index.json` and `docs/SUMMARY.md`
//!
//! The organize step renders curated reports from `data/articles_metadata.json`.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod archive;
mod catalog;
mod cli;
mod config;
mod error;
mod extract;
mod fetcher;
mod models;
mod outputs;
mod pipeline;
mod report;
mod utils;

use cli::{Cli, Command, ExtractorKind};
use config::ScraperConfig;
use extract::{DomExtractor, RegexExtractor, TextExtractor};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // stdout carries the progress lines; logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("perps_research starting up");

    let args = Cli::parse();
    debug!(base_dir = %args.base_dir.display(), command = ?args.command, "Parsed CLI arguments");

    let config = ScraperConfig::with_base_dir(&args.base_dir);

    let result = match args.command {
        Command::Scrape { extractor } => pipeline::scrape(&config, extractor_for(extractor)).await.map(|_| ()),
        Command::Organize => pipeline::organize(&config).await,
        Command::All { extractor } => {
            match pipeline::scrape(&config, extractor_for(extractor)).await {
                Ok(_) => pipeline::organize(&config).await,
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Run failed");
        return Err(e.into());
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

fn extractor_for(kind: ExtractorKind) -> &'static dyn TextExtractor {
    match kind {
        ExtractorKind::Regex => &RegexExtractor,
        ExtractorKind::Dom => &DomExtractor,
    }
}
