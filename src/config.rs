//! Runtime configuration and on-disk layout.
//!
//! The only knob exposed to users is the base directory. The pause and
//! timeout are kept here as defaults so tests can shorten them.
//!
//! # Layout
//!
//! ```text
//! base_dir/
//! ├── articles/
//! │   ├── raw/<id>.html
//! │   └── <category>/<id>_<hash8>.txt
//! ├── data/
//! │   ├── index.json
//! │   ├── articles_metadata.json
//! │   └── quick_reference.md
//! └── docs/
//!     ├── SUMMARY.md
//!     ├── KEY_INSIGHTS.md
//!     └── EXECUTIVE_SUMMARY.md
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) Research Bot";

/// Settings for one scrape or organize invocation.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Root under which every output file is written.
    pub base_dir: PathBuf,
    /// Courtesy delay taken before every request.
    pub pause: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            pause: Duration::from_secs(1),
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScraperConfig {
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Default::default()
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::new(&self.base_dir)
    }
}

/// Paths derived from the base directory.
#[derive(Debug, Clone)]
pub struct Layout {
    pub base: PathBuf,
    pub articles: PathBuf,
    pub raw: PathBuf,
    pub data: PathBuf,
    pub docs: PathBuf,
}

impl Layout {
    pub fn new(base: &Path) -> Self {
        let articles = base.join("articles");
        Self {
            base: base.to_path_buf(),
            raw: articles.join("raw"),
            articles,
            data: base.join("data"),
            docs: base.join("docs"),
        }
    }

    pub fn category_dir(&self, category: &str) -> PathBuf {
        self.articles.join(category)
    }

    pub fn index_file(&self) -> PathBuf {
        self.data.join("index.json")
    }

    pub fn metadata_file(&self) -> PathBuf {
        self.data.join("articles_metadata.json")
    }

    pub fn quick_reference_file(&self) -> PathBuf {
        self.data.join("quick_reference.md")
    }

    pub fn run_summary_file(&self) -> PathBuf {
        self.docs.join("SUMMARY.md")
    }

    pub fn key_insights_file(&self) -> PathBuf {
        self.docs.join("KEY_INSIGHTS.md")
    }

    pub fn executive_summary_file(&self) -> PathBuf {
        self.docs.join("EXECUTIVE_SUMMARY.md")
    }

    /// Path relative to the base directory, always with `/` separators.
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.base).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
