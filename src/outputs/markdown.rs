//! Markdown reports.
//!
//! - [`render_run_summary`]: `docs/SUMMARY.md`, built from the run index
//! - [`render_key_insights`]: `docs/KEY_INSIGHTS.md`, curated findings
//! - [`render_executive_summary`]: `docs/EXECUTIVE_SUMMARY.md`, from the metadata file
//! - [`render_quick_reference`]: `data/quick_reference.md`, platform tables
//!
//! Timestamps are passed in so output is reproducible.

use crate::models::{IndexEntry, ResearchMetadata};
use crate::report::{group_by_category, group_by_platform, top_topics, RunStats};
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::{debug, instrument};

/// Number of topics listed under "Top Topics".
pub const TOP_TOPICS: usize = 10;

/// Render the per-run summary.
#[instrument(level = "debug", skip_all, fields(entries = index.len()))]
pub fn render_run_summary(index: &[IndexEntry], generated_at: &str) -> String {
    let mut md = String::new();
    let stats = RunStats::from_index(index);

    writeln!(md, "# Equity Perpetuals Research Summary\n").unwrap();
    writeln!(md, "Generated: {}\n", generated_at).unwrap();

    writeln!(md, "## Statistics\n").unwrap();
    writeln!(md, "- Total Articles: {}", stats.total).unwrap();
    writeln!(md, "- Successfully Fetched: {}", stats.success).unwrap();
    writeln!(md, "- Failed: {}", stats.failed).unwrap();
    let categories: Vec<&str> = group_by_category(index).into_iter().map(|(c, _)| c).collect();
    writeln!(md, "- Categories: {}\n", categories.join(", ")).unwrap();

    writeln!(md, "## Articles by Platform").unwrap();
    for (platform, entries) in group_by_platform(index) {
        writeln!(md, "\n### {} ({} articles)\n", platform, entries.len()).unwrap();
        for entry in entries {
            let mark = if entry.is_success() { "✓" } else { "✗" };
            writeln!(md, "- [{}] {}", mark, entry.descriptor.title).unwrap();
        }
    }

    writeln!(md, "\n## Top Topics\n").unwrap();
    for (topic, count) in top_topics(index, TOP_TOPICS) {
        writeln!(md, "- {}: {} articles", topic, count).unwrap();
    }

    debug!(chars = md.len(), "Rendered run summary");
    md
}

/// Render the curated insights document.
pub fn render_key_insights(generated_on: &str) -> String {
    let mut md = String::new();

    writeln!(md, "# Key Insights from Equity Perpetuals Research\n").unwrap();
    writeln!(md, "*Generated: {}*\n", generated_on).unwrap();

    md.push_str(concat!(
        "## 🏛️ Platform Landscape\n\n",
        "### DeFi Leaders\n",
        "- **Hyperliquid**: Dominates with ~80% of decentralized perps market ($357B monthly volume)\n",
        "- **Aster**: Pioneer in 24/7 US stock perps with 50× leverage via Pyth Network\n",
        "- **PancakeSwap**: BNB Chain stock perps respecting US market hours (regulatory-conscious)\n\n",
        "### CeFi Innovations\n",
        "- **Bitget**: First RWA Index perpetuals (Tesla/Nvidia indexes with 10× leverage)\n",
        "- Movement toward 24/5 trading schedules (bridging crypto and TradFi)\n\n",
        "## 🔧 Technical Architecture Patterns\n\n",
        "### Core Components\n",
        "1. **Order Book Models**: Hyperliquid's on-chain order book achieves CEX-like performance\n",
        "2. **Oracle Integration**: Pyth Network emerging as standard for real-time equity pricing\n",
        "3. **Hybrid Infrastructure**: L1-EVM architectures balancing speed and composability\n",
        "4. **Funding Rate Mechanisms**: Path-dependent rates ensuring price alignment\n\n",
        "## ⚖️ Leverage & Risk Parameters\n\n",
        "| Platform | Max Leverage | Asset Type | Trading Hours |\n",
        "|----------|-------------|------------|---------------|\n",
        "| Aster | 50× | US Stocks | 24/7 |\n",
        "| PancakeSwap | 25× | Synthetic Stocks | US Market Hours |\n",
        "| Hyperliquid | 50× | Crypto (mainly) | 24/7 |\n",
        "| Bitget | 10× | RWA Indexes | 24/5 |\n",
        "| Ostium | 100-200× | RWAs | 24/7 |\n\n",
        "## 📋 Regulatory Strategies\n\n",
        "- **Synthetic vs Tokenized**: PancakeSwap avoids tokenization to sidestep securities laws\n",
        "- **Market Hours Compliance**: Some platforms mirror traditional hours for regulatory alignment\n",
        "- **Non-Custodial Design**: DeFi platforms emphasize permissionless, self-custody models\n",
        "- **US Market Entry**: Bloomberg reports growing institutional interest despite regulatory uncertainty\n\n",
        "## 💰 Market Disruption Potential\n\n",
        "### Revenue Shift Estimates\n",
        "- **$25-70B annually** could shift from prime brokers to DeFi (stock lending disruption)\n",
        "- **$120T global equity market** potential for tokenization\n",
        "- **$2.6T** in decentralized perps volume in 2025 alone\n\n",
        "## 🚀 Innovation Trends\n\n",
        "1. **24/7 Trading**: Breaking traditional market hour constraints\n",
        "2. **Cross-Chain Perps**: Multi-chain deployment strategies emerging\n",
        "3. **RWA Integration**: Bridging traditional assets (stocks, commodities, forex)\n",
        "4. **Fee Burning Models**: Hyperliquid's 97% fee burn creating deflationary pressure\n",
        "5. **Reverse Auction Listings**: Novel token distribution mechanisms\n\n",
        "## 📚 Academic Research Highlights\n\n",
        "- **PDLPs (Perpetual Demand Lending Pools)**: Optimizing capital efficiency\n",
        "- **Funding Rate Theory**: Mathematical models for price stability\n",
        "- **Replication Strategies**: Connecting perps to traditional derivatives theory\n\n",
    ));

    writeln!(md, "## ✅ Implementation Checklist (from guides)\n").unwrap();
    writeln!(md, "For teams building equity perps platforms:\n").unwrap();
    for item in [
        "Chain selection (L1 vs L2 tradeoffs)",
        "On-chain order book implementation",
        "Matching engine optimization",
        "Oracle integration (Pyth, Chainlink)",
        "Risk management systems",
        "Funding rate calculations",
        "Liquidation mechanisms",
        "Front-end trading interface",
        "Security audits",
        "Liquidity incentives",
    ] {
        writeln!(md, "- [ ] {}", item).unwrap();
    }
    writeln!(md).unwrap();

    md.push_str(concat!(
        "## 🔮 Future Outlook\n\n",
        "### Near-term (2025)\n",
        "- Hyperliquid L1 launch solidifying market position\n",
        "- More DEXs adding stock perps following Aster/PancakeSwap\n",
        "- Potential US regulatory clarity enabling broader adoption\n\n",
        "### Long-term\n",
        "- Convergence of TradFi and DeFi through perps infrastructure\n",
        "- Global 24/7 markets becoming the norm\n",
        "- Tokenized equity perps potentially replacing traditional short-selling\n\n",
        "## 📖 Key References\n\n",
        "See [SUMMARY.md](SUMMARY.md) for the latest fetch results and [index.json](../data/index.json) for every URL\n",
    ));

    md
}

const THEMES: &[(&str, &str)] = &[
    ("24/7 Trading", "Breaking traditional market hours with continuous trading"),
    ("High Leverage", "Platforms offering 25×-200× leverage on equity positions"),
    ("Regulatory Navigation", "Synthetic vs tokenized approaches to avoid securities laws"),
    ("Market Dominance", "Hyperliquid capturing 80% of decentralized perps volume"),
    ("Oracle Integration", "Pyth Network emerging as standard for equity price feeds"),
    ("TradFi Bridge", "Connecting traditional assets to DeFi infrastructure"),
];

const CATEGORY_DETAILS: &[(&str, &str)] = &[
    ("defi-dex", "Decentralized exchange implementations and platform analyses"),
    ("cefi", "Centralized exchange offerings and institutional approaches"),
    ("academic", "Theoretical models, funding rates, and mathematical frameworks"),
    ("technical", "Implementation guides and architectural patterns"),
    ("analysis", "Market impact studies and disruption potential"),
];

/// Titles listed per platform before collapsing the rest into a count.
const TITLES_PER_PLATFORM: usize = 3;

/// Render the executive summary from the collection metadata.
#[instrument(level = "debug", skip_all, fields(articles = data.articles.len()))]
pub fn render_executive_summary(data: &ResearchMetadata, generated_at: &str) -> String {
    let mut md = String::new();
    let stats = &data.metadata;

    writeln!(md, "# Equity Perpetuals Research Summary\n").unwrap();
    writeln!(md, "*Generated: {}*\n", generated_at).unwrap();

    writeln!(md, "## Executive Summary\n").unwrap();
    writeln!(
        md,
        "This research collection covers the emerging landscape of blockchain-based equity perpetual \
         futures, examining {} key articles from {} to {}. The materials span DeFi platforms \
         (Hyperliquid, Aster, PancakeSwap), centralized exchanges (Bitget), and academic research.\n",
        stats.total_articles, stats.date_range.earliest, stats.date_range.latest
    )
    .unwrap();

    writeln!(md, "## Collection Statistics\n").unwrap();
    writeln!(md, "- **Total Articles**: {}", stats.total_articles).unwrap();
    writeln!(
        md,
        "- **Date Range**: {} to {}",
        stats.date_range.earliest, stats.date_range.latest
    )
    .unwrap();
    writeln!(md, "- **Categories**:").unwrap();
    for (category, count) in stats.categories.iter() {
        writeln!(md, "  - {}: {} articles", category, count).unwrap();
    }
    writeln!(md).unwrap();

    writeln!(md, "## Platform Coverage\n").unwrap();
    let mut platforms: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for article in &data.articles {
        if let Some(platform) = article.platform.as_deref() {
            platforms.entry(platform).or_default().push(&article.title);
        }
    }
    for (platform, titles) in platforms.iter().filter(|(p, _)| **p != "Multiple") {
        writeln!(md, "### {}", platform).unwrap();
        for title in titles.iter().take(TITLES_PER_PLATFORM) {
            writeln!(md, "- {}", title).unwrap();
        }
        if titles.len() > TITLES_PER_PLATFORM {
            writeln!(md, "- *...and {} more*", titles.len() - TITLES_PER_PLATFORM).unwrap();
        }
        writeln!(md).unwrap();
    }

    writeln!(md, "## Dominant Themes\n").unwrap();
    for (theme, description) in THEMES {
        writeln!(md, "**{}**: {}\n", theme, description).unwrap();
    }

    md.push_str(concat!(
        "## Recent Developments (2025)\n\n",
        "1. **Aster Launch (July)**: First major 24/7 US stock perps platform with 50× leverage\n",
        "2. **PancakeSwap Stock Perps (August)**: BNB Chain entry with regulatory-conscious design\n",
        "3. **Bitget RWA Indexes (August)**: CeFi innovation with tokenized equity index perps\n",
        "4. **Hyperliquid Growth**: Achieving $357B monthly volume and 80% market share\n\n",
    ));

    writeln!(md, "## Research by Category\n").unwrap();
    for (category, description) in CATEGORY_DETAILS {
        if let Some(count) = stats.categories.get(category) {
            writeln!(md, "### {} ({} articles)", category.to_uppercase(), count).unwrap();
            writeln!(md, "{}\n", description).unwrap();
        }
    }

    md.push_str(concat!(
        "## Key Market Metrics\n\n",
        "| Metric | Value | Source |\n",
        "|--------|-------|--------|\n",
        "| Hyperliquid Market Share | ~80% | Multiple sources |\n",
        "| Monthly Volume (Hyperliquid) | $357B | BlockByte |\n",
        "| 2025 DeFi Perps Volume | $2.6T | 21Shares |\n",
        "| Potential Revenue Shift | $25-70B/year | Sentora |\n",
        "| Global Equity Market Size | $120T | Market estimates |\n\n",
        "## Recommended Reading Order\n\n",
        "1. Start with **SUMMARY.md** for the latest fetch results\n",
        "2. Review **KEY_INSIGHTS.md** for extracted insights\n",
        "3. Deep dive into specific platforms via category folders\n",
        "4. Explore academic papers for theoretical foundations\n\n",
        "---\n\n",
        "*This summary is part of the Equity Perpetuals Research collection.*\n",
        "*Regenerate it with `perps_research organize`.*\n",
    ));

    debug!(chars = md.len(), "Rendered executive summary");
    md
}

/// Render the platform comparison tables.
pub fn render_quick_reference() -> String {
    concat!(
        "# Quick Reference: Equity Perps Platforms\n\n",
        "## DeFi Platforms\n\n",
        "| Platform | Leverage | Assets | Chain | Special Features |\n",
        "|----------|----------|--------|-------|------------------|\n",
        "| Aster | 50× | US Stocks | - | 24/7, Pyth oracles |\n",
        "| PancakeSwap | 25× | AAPL, AMZN, TSLA | BNB | US hours, synthetic |\n",
        "| Hyperliquid | 50× | Crypto | L1 | 80% market share |\n",
        "| Ostium | 100-200× | RWAs | Arbitrum | Extreme leverage |\n\n",
        "## CeFi Platforms\n\n",
        "| Platform | Type | Leverage | Trading Hours |\n",
        "|----------|------|----------|---------------|\n",
        "| Bitget | RWA Indexes | 10× | 24/5 |\n\n",
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::models::{FetchStatus, MetadataArticle};

    fn run_index() -> Vec<IndexEntry> {
        catalog::articles()
            .into_iter()
            .enumerate()
            .map(|(i, d)| {
                let mut e = IndexEntry::failed(d);
                if i % 2 == 0 {
                    e.status = FetchStatus::Success;
                }
                e
            })
            .collect()
    }

    #[test]
    fn test_run_summary_sections() {
        let md = render_run_summary(&run_index(), "2025-09-01 12:00");
        assert!(md.starts_with("# Equity Perpetuals Research Summary\n"));
        assert!(md.contains("Generated: 2025-09-01 12:00"));
        assert!(md.contains("- Total Articles: 9"));
        assert!(md.contains("- Successfully Fetched: 5"));
        assert!(md.contains("- Failed: 4"));
        assert!(md.contains("- Categories: defi-dex, technical, cefi, academic"));
        assert!(md.contains("### Academic (3 articles)"));
        assert!(md.contains("### Hyperliquid (2 articles)"));
        assert!(md.contains("- [✓] Aster Launches 24/7 Stock Perpetual Contracts Trading"));
        assert!(md.contains("- [✗] PancakeSwap On-Chain Stock Perpetuals"));
        assert!(md.contains("## Top Topics"));
    }

    #[test]
    fn test_run_summary_platforms_alphabetical() {
        let md = render_run_summary(&run_index(), "now");
        let academic = md.find("### Academic").unwrap();
        let aster = md.find("### Aster").unwrap();
        let pancake = md.find("### PancakeSwap").unwrap();
        assert!(academic < aster && aster < pancake);
    }

    #[test]
    fn test_run_summary_top_topics_capped() {
        let md = render_run_summary(&run_index(), "now");
        let topics = md.split("## Top Topics\n\n").nth(1).unwrap();
        assert_eq!(topics.lines().filter(|l| l.starts_with("- ")).count(), TOP_TOPICS);
    }

    #[test]
    fn test_empty_run_summary() {
        let md = render_run_summary(&[], "now");
        assert!(md.contains("- Total Articles: 0"));
        assert!(md.contains("- Categories: \n"));
    }

    #[test]
    fn test_key_insights_date_and_sections() {
        let md = render_key_insights("2025-09-01");
        assert!(md.contains("*Generated: 2025-09-01*"));
        assert!(md.contains("## ⚖️ Leverage & Risk Parameters"));
        assert!(md.contains("- [ ] Liquidity incentives"));
    }

    #[test]
    fn test_executive_summary_platform_coverage() {
        let mut data = ResearchMetadata::from_catalog(&catalog::articles());
        for i in 0..2 {
            data.articles.push(MetadataArticle {
                title: format!("Extra academic paper {i}"),
                id: None,
                url: None,
                category: None,
                date: None,
                platform: Some("Academic".to_string()),
            });
        }
        data.articles.push(MetadataArticle {
            title: "Cross-platform overview".to_string(),
            id: None,
            url: None,
            category: None,
            date: None,
            platform: Some("Multiple".to_string()),
        });

        let md = render_executive_summary(&data, "2025-09-01 12:00");
        assert!(md.contains("examining 9 key articles from 2022-09-01 to 2025-08-20"));
        assert!(md.contains("### Academic\n- Perpetual Demand Lending Pools\n"));
        assert!(md.contains("- *...and 2 more*"));
        assert!(!md.contains("### Multiple"));
        assert!(md.contains("### DEFI-DEX (4 articles)"));
        assert!(!md.contains("### ANALYSIS"));
        assert!(md.contains("  - academic: 3 articles"));
        let listed = md.find("  - defi-dex: 4 articles").unwrap();
        assert!(listed < md.find("  - academic: 3 articles").unwrap());
    }

    #[test]
    fn test_quick_reference_tables() {
        let md = render_quick_reference();
        assert!(md.contains("| Bitget | RWA Indexes | 10× | 24/5 |"));
        assert!(md.contains("## DeFi Platforms"));
    }
}
