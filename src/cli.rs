//! Command-line interface definitions.
//!
//! The base directory is the only setting; everything else is fixed.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for the research scraper.
///
/// # Examples
///
/// ```sh
/// # Fetch and archive the catalog under the current directory
/// perps_research scrape
///
/// # Regenerate the curated reports under another base directory
/// perps_research -b ./research organize
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base directory for articles/, data/ and docs/
    #[arg(short, long, default_value = ".")]
    pub base_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fetch every catalog article, archive it and write the run index and summary
    Scrape {
        /// HTML-to-text implementation
        #[arg(long, value_enum, default_value_t = ExtractorKind::Regex)]
        extractor: ExtractorKind,
    },
    /// Render the curated reports from data/articles_metadata.json
    Organize,
    /// Scrape, then organize
    All {
        /// HTML-to-text implementation
        #[arg(long, value_enum, default_value_t = ExtractorKind::Regex)]
        extractor: ExtractorKind,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    /// Regular-expression extraction
    Regex,
    /// Parsed-DOM extraction
    Dom,
}
