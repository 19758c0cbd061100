//! The fixed list of articles the scraper processes, in processing order.

use crate::models::ArticleDescriptor;

struct Entry {
    id: &'static str,
    title: &'static str,
    url: &'static str,
    category: &'static str,
    date: &'static str,
    platform: &'static str,
    topics: &'static [&'static str],
}

const ARTICLES: &[Entry] = &[
    Entry {
        id: "aster-etf-2025",
        title: "Aster Launches 24/7 Stock Perpetual Contracts Trading",
        url: "https://www.etf.com/sections/news/aster-launches-247-stock-perpetual-contracts-trading-exposure-us-equities",
        category: "defi-dex",
        date: "2025-07-16",
        platform: "Aster",
        topics: &["stock perps", "24/7 trading", "50x leverage", "Pyth Network"],
    },
    Entry {
        id: "pancakeswap-stocks-2025",
        title: "PancakeSwap On-Chain Stock Perpetuals",
        url: "https://www.cryptopolitan.com/pancakeswap-tokenized-stocks-perp-contracts/",
        category: "defi-dex",
        date: "2025-08-06",
        platform: "PancakeSwap",
        topics: &["BNB Chain", "synthetic stocks", "25x leverage", "US market hours"],
    },
    Entry {
        id: "hyperliquid-craze-2025",
        title: "Understanding Hyperliquid Craze",
        url: "https://medium.com/@nefture/understanding-crypto-perpetual-futures-and-the-hyperliquid-craze-7d1c8b413444",
        category: "defi-dex",
        date: "2025-01-01",
        platform: "Hyperliquid",
        topics: &["80% market share", "CEX-like performance", "L1 chain"],
    },
    Entry {
        id: "hyperliquid-tokenmetrics-2025",
        title: "Hyperliquid Redefining Decentralized Perpetuals",
        url: "https://www.tokenmetrics.com/blog/how-hyperliquid-is-redefining-decentralized-perpetuals-in-2025",
        category: "defi-dex",
        date: "2025-01-01",
        platform: "Hyperliquid",
        topics: &["reverse auction", "sustainable revenue", "L1 development"],
    },
    Entry {
        id: "build-hyperliquid-2025",
        title: "Building Hyperliquid-like Platform Guide",
        url: "https://www.antiersolutions.com/blogs/how-to-build-your-perpetual-futures-trading-platform-like-hyperliquid-in-2025/",
        category: "technical",
        date: "2025-08-01",
        platform: "Guide",
        topics: &["architecture", "order book", "matching engine", "implementation"],
    },
    Entry {
        id: "bitget-rwa-2025",
        title: "Bitget RWA Index Perpetuals",
        url: "https://www.financemagnates.com/cryptocurrency/bitget-rwa-index-perpetuals",
        category: "cefi",
        date: "2025-08-20",
        platform: "Bitget",
        topics: &["RWA index", "Tesla/Nvidia", "24/5 trading", "10x leverage"],
    },
    Entry {
        id: "pdlp-arxiv-2025",
        title: "Perpetual Demand Lending Pools",
        url: "https://arxiv.org/abs/2502.06028",
        category: "academic",
        date: "2025-02-01",
        platform: "Academic",
        topics: &["capital efficiency", "arbitrage", "theoretical models"],
    },
    Entry {
        id: "funding-rates-arxiv-2025",
        title: "Designing Funding Rates for Perpetual Futures",
        url: "https://arxiv.org/abs/2506.08573",
        category: "academic",
        date: "2025-06-01",
        platform: "Academic",
        topics: &["funding rates", "price stability", "replication"],
    },
    Entry {
        id: "perps-primer-arxiv-2022",
        title: "A Primer on Perpetuals",
        url: "https://arxiv.org/abs/2209.03307",
        category: "academic",
        date: "2022-09-01",
        platform: "Academic",
        topics: &["continuous models", "derivatives theory", "foundations"],
    },
];

/// Build the catalog. A fresh copy per call; descriptors are never mutated.
pub fn articles() -> Vec<ArticleDescriptor> {
    ARTICLES
        .iter()
        .map(|e| ArticleDescriptor {
            id: e.id.to_string(),
            title: e.title.to_string(),
            url: e.url.to_string(),
            category: e.category.to_string(),
            date: e.date.to_string(),
            platform: e.platform.to_string(),
            topics: e.topics.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}
