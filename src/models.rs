//! Data models for catalog entries, fetch results and the run index.
//!
//! - [`ArticleDescriptor`]: static record describing one article to fetch
//! - [`FetchResult`]: outcome of one fetch, owned by the run
//! - [`IndexEntry`]: one record of the [`RunIndex`] written to `data/index.json`
//! - [`ResearchMetadata`]: curated collection file read by the organize step
//!
//! The topic list is serialized as `key_topics` to keep the index files
//! readable by the existing tooling around them.

use chrono::Local;
use itertools::Itertools;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A static record describing one article to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleDescriptor {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: String,
    /// Calendar date in `YYYY-MM-DD` format.
    pub date: String,
    pub platform: String,
    #[serde(rename = "key_topics")]
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Success,
    Failed,
}

impl FetchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStatus::Success => "success",
            FetchStatus::Failed => "failed",
        }
    }
}

/// Outcome of fetching one descriptor.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub descriptor: ArticleDescriptor,
    pub status: FetchStatus,
    pub body: Option<String>,
    /// RFC 3339 local timestamp of a successful fetch.
    pub fetched_at: Option<String>,
}

impl FetchResult {
    pub fn success(descriptor: ArticleDescriptor, body: String) -> Self {
        Self {
            descriptor,
            status: FetchStatus::Success,
            body: Some(body),
            fetched_at: Some(Local::now().to_rfc3339()),
        }
    }

    pub fn failed(descriptor: ArticleDescriptor) -> Self {
        Self {
            descriptor,
            status: FetchStatus::Failed,
            body: None,
            fetched_at: None,
        }
    }
}

/// One record of the run index: descriptor fields plus what the run did with it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndexEntry {
    #[serde(flatten)]
    pub descriptor: ArticleDescriptor,
    pub status: FetchStatus,
    pub fetched_at: Option<String>,
    /// Extracted text document, relative to the base directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
    /// Raw HTML copy, relative to the base directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_path: Option<String>,
}

impl IndexEntry {
    pub fn failed(descriptor: ArticleDescriptor) -> Self {
        Self {
            descriptor,
            status: FetchStatus::Failed,
            fetched_at: None,
            local_path: None,
            raw_path: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == FetchStatus::Success
    }
}

/// Ordered per-descriptor outcomes of one execution.
pub type RunIndex = Vec<IndexEntry>;

/// Curated collection file (`data/articles_metadata.json`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResearchMetadata {
    pub metadata: CollectionStats,
    pub articles: Vec<MetadataArticle>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectionStats {
    pub total_articles: usize,
    pub date_range: DateRange,
    pub categories: CategoryCounts,
}

/// Article count per category, in the order the metadata file lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts(Vec<(String, usize)>);

impl CategoryCounts {
    pub fn get(&self, category: &str) -> Option<usize> {
        self.0.iter().find(|(c, _)| c == category).map(|(_, n)| *n)
    }

    /// Add one article to `category`, appending it if unseen.
    pub fn bump(&mut self, category: &str) {
        match self.0.iter_mut().find(|(c, _)| c == category) {
            Some((_, n)) => *n += 1,
            None => self.0.push((category.to_string(), 1)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(c, n)| (c.as_str(), *n))
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, count) in &self.0 {
            map.serialize_entry(category, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = CategoryCounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category names to article counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut counts = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((category, count)) = access.next_entry::<String, usize>()? {
                    counts.push((category, count));
                }
                Ok(CategoryCounts(counts))
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DateRange {
    pub earliest: String,
    pub latest: String,
}

/// An article as listed in the metadata file. Only the title is required.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataArticle {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl ResearchMetadata {
    /// Seed a metadata file from the catalog.
    pub fn from_catalog(catalog: &[ArticleDescriptor]) -> Self {
        let mut categories = CategoryCounts::default();
        for d in catalog {
            categories.bump(&d.category);
        }
        // ISO dates order lexicographically.
        let (earliest, latest) = match catalog.iter().map(|d| d.date.as_str()).minmax() {
            itertools::MinMaxResult::NoElements => (String::new(), String::new()),
            itertools::MinMaxResult::OneElement(d) => (d.to_string(), d.to_string()),
            itertools::MinMaxResult::MinMax(lo, hi) => (lo.to_string(), hi.to_string()),
        };

        Self {
            metadata: CollectionStats {
                total_articles: catalog.len(),
                date_range: DateRange { earliest, latest },
                categories,
            },
            articles: catalog
                .iter()
                .map(|d| MetadataArticle {
                    title: d.title.clone(),
                    id: Some(d.id.clone()),
                    url: Some(d.url.clone()),
                    category: Some(d.category.clone()),
                    date: Some(d.date.clone()),
                    platform: Some(d.platform.clone()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: &str, category: &str, date: &str) -> ArticleDescriptor {
        ArticleDescriptor {
            id: id.to_string(),
            title: format!("Title of {id}"),
            url: format!("https://example.com/{id}"),
            category: category.to_string(),
            date: date.to_string(),
            platform: "Example".to_string(),
            topics: vec!["funding rates".to_string()],
        }
    }

    #[test]
    fn test_failed_entry_serialization() {
        let entry = IndexEntry::failed(descriptor("a", "cefi", "2025-01-01"));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["status"], "failed");
        assert!(json["fetched_at"].is_null());
        assert_eq!(json["key_topics"][0], "funding rates");
        assert!(json.get("local_path").is_none());
        assert!(json.get("raw_path").is_none());
    }

    #[test]
    fn test_success_entry_deserialization() {
        let json = r#"{
            "id": "bitget-rwa-2025",
            "title": "Bitget RWA Index Perpetuals",
            "url": "https://example.com/bitget",
            "category": "cefi",
            "date": "2025-08-20",
            "platform": "Bitget",
            "key_topics": ["RWA index", "10x leverage"],
            "status": "success",
            "fetched_at": "2025-08-21T10:00:00+00:00",
            "local_path": "articles/cefi/bitget-rwa-2025_deadbeef.txt",
            "raw_path": "articles/raw/bitget-rwa-2025.html"
        }"#;
        let entry: IndexEntry = serde_json::from_str(json).unwrap();
        assert!(entry.is_success());
        assert_eq!(entry.descriptor.topics.len(), 2);
        assert_eq!(entry.raw_path.as_deref(), Some("articles/raw/bitget-rwa-2025.html"));
    }

    #[test]
    fn test_fetch_result_constructors() {
        let ok = FetchResult::success(descriptor("a", "cefi", "2025-01-01"), "<html/>".into());
        assert_eq!(ok.status, FetchStatus::Success);
        assert!(ok.fetched_at.is_some());

        let failed = FetchResult::failed(descriptor("a", "cefi", "2025-01-01"));
        assert_eq!(failed.status, FetchStatus::Failed);
        assert!(failed.body.is_none());
        assert!(failed.fetched_at.is_none());
    }

    #[test]
    fn test_metadata_from_catalog() {
        let catalog = vec![
            descriptor("a", "academic", "2025-06-01"),
            descriptor("b", "cefi", "2022-09-01"),
            descriptor("c", "academic", "2025-08-20"),
        ];
        let meta = ResearchMetadata::from_catalog(&catalog);
        assert_eq!(meta.metadata.total_articles, 3);
        assert_eq!(meta.metadata.date_range.earliest, "2022-09-01");
        assert_eq!(meta.metadata.date_range.latest, "2025-08-20");
        assert_eq!(meta.metadata.categories.get("academic"), Some(2));
        assert_eq!(meta.metadata.categories.get("cefi"), Some(1));
        let order: Vec<&str> = meta.metadata.categories.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec!["academic", "cefi"]);
        assert_eq!(meta.articles[1].platform.as_deref(), Some("Example"));
    }

    #[test]
    fn test_category_counts_keep_file_order() {
        let json = r#"{"technical": 2, "defi-dex": 3, "academic": 1}"#;
        let counts: CategoryCounts = serde_json::from_str(json).unwrap();
        let order: Vec<&str> = counts.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec!["technical", "defi-dex", "academic"]);
        assert_eq!(counts.get("defi-dex"), Some(3));
        assert_eq!(counts.get("cefi"), None);
        assert_eq!(
            serde_json::to_string(&counts).unwrap(),
            r#"{"technical":2,"defi-dex":3,"academic":1}"#
        );
    }

    #[test]
    fn test_metadata_article_minimal() {
        let json = r#"{"title": "Only a title"}"#;
        let article: MetadataArticle = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Only a title");
        assert!(article.platform.is_none());
    }
}
