//! Output files written by the scrape and organize steps.
//!
//! # Submodules
//!
//! - [`json`]: run index and collection metadata
//! - [`markdown`]: run summary and curated reports
//!
//! # Output Structure
//!
//! ```text
//! base_dir/
//! ├── data/
//! │   ├── index.json
//! │   ├── articles_metadata.json
//! │   └── quick_reference.md
//! └── docs/
//!     ├── SUMMARY.md
//!     ├── KEY_INSIGHTS.md
//!     └── EXECUTIVE_SUMMARY.md
//! ```

pub mod json;
pub mod markdown;
