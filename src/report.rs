//! Aggregations over a run index.
//!
//! Everything here is counting and grouping; members always keep the order
//! in which they appear in the index.

use crate::models::IndexEntry;
use std::collections::BTreeMap;

/// Overall counts for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

impl RunStats {
    pub fn from_index(index: &[IndexEntry]) -> Self {
        let success = index.iter().filter(|e| e.is_success()).count();
        Self {
            total: index.len(),
            success,
            failed: index.len() - success,
        }
    }
}

/// Category → members, categories in first-seen order.
pub fn group_by_category(index: &[IndexEntry]) -> Vec<(&str, Vec<&IndexEntry>)> {
    let mut groups: Vec<(&str, Vec<&IndexEntry>)> = Vec::new();
    for entry in index {
        let key = entry.descriptor.category.as_str();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(entry),
            None => groups.push((key, vec![entry])),
        }
    }
    groups
}

/// Platform → members, platforms sorted by name.
pub fn group_by_platform(index: &[IndexEntry]) -> BTreeMap<&str, Vec<&IndexEntry>> {
    let mut groups: BTreeMap<&str, Vec<&IndexEntry>> = BTreeMap::new();
    for entry in index {
        groups
            .entry(entry.descriptor.platform.as_str())
            .or_default()
            .push(entry);
    }
    groups
}

/// Number of entries referencing each topic, in first-encountered order.
pub fn topic_frequency(index: &[IndexEntry]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for topic in index.iter().flat_map(|e| e.descriptor.topics.iter()) {
        match counts.iter_mut().find(|(t, _)| *t == topic.as_str()) {
            Some((_, n)) => *n += 1,
            None => counts.push((topic.as_str(), 1)),
        }
    }
    counts
}

/// The `n` most frequent topics, by descending count. Ties keep
/// first-encountered order (the sort is stable).
pub fn top_topics(index: &[IndexEntry], n: usize) -> Vec<(&str, usize)> {
    let mut counts = topic_frequency(index);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleDescriptor, FetchStatus};

    fn entry(id: &str, category: &str, platform: &str, topics: &[&str], ok: bool) -> IndexEntry {
        let descriptor = ArticleDescriptor {
            id: id.to_string(),
            title: id.to_uppercase(),
            url: format!("https://example.com/{id}"),
            category: category.to_string(),
            date: "2025-01-01".to_string(),
            platform: platform.to_string(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
        };
        let mut e = IndexEntry::failed(descriptor);
        if ok {
            e.status = FetchStatus::Success;
        }
        e
    }

    fn synthetic() -> Vec<IndexEntry> {
        vec![
            entry("a", "defi-dex", "Hyperliquid", &["order book", "L1 chain", "leverage"], true),
            entry("b", "academic", "Academic", &["funding rates", "leverage"], false),
            entry("c", "defi-dex", "Aster", &["leverage", "order book", "24/7 trading"], true),
        ]
    }

    #[test]
    fn test_run_stats() {
        let stats = RunStats::from_index(&synthetic());
        assert_eq!(stats, RunStats { total: 3, success: 2, failed: 1 });
        assert_eq!(RunStats::from_index(&[]), RunStats::default());
    }

    #[test]
    fn test_group_by_category_first_seen_order() {
        let index = synthetic();
        let groups = group_by_category(&index);
        let keys: Vec<&str> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["defi-dex", "academic"]);
        let ids: Vec<&str> = groups[0].1.iter().map(|e| e.descriptor.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_group_by_platform_sorted() {
        let index = synthetic();
        let groups = group_by_platform(&index);
        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["Academic", "Aster", "Hyperliquid"]);
    }

    #[test]
    fn test_topic_frequency_sums_to_occurrences() {
        let index = synthetic();
        let freq = topic_frequency(&index);
        let occurrences: usize = index.iter().map(|e| e.descriptor.topics.len()).sum();
        assert_eq!(freq.iter().map(|(_, n)| n).sum::<usize>(), occurrences);
        assert_eq!(occurrences, 8);
    }

    #[test]
    fn test_top_topics_descending_with_stable_ties() {
        let index = synthetic();
        let top = top_topics(&index, 10);
        assert_eq!(
            top,
            vec![
                ("leverage", 3),
                ("order book", 2),
                ("L1 chain", 1),
                ("funding rates", 1),
                ("24/7 trading", 1),
            ]
        );
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_top_topics_limit() {
        let topics: Vec<String> = (0..15).map(|i| format!("t{i}")).collect();
        let refs: Vec<&str> = topics.iter().map(String::as_str).collect();
        let index = vec![entry("x", "c", "p", &refs, true)];
        let top = top_topics(&index, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0], ("t0", 1));
        assert_eq!(top[9], ("t9", 1));
    }
}
