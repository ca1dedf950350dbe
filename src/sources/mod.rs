//! Source adapters for fetching trending listings.
//!
//! Each adapter targets one origin and extracts normalized feed items:
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | GitHub Trending | [`github`] | HTML scraping |
//! | InfoQ hotlist | [`infoq`] | Headless browser rendering |
//! | Hacker News | [`hackernews`] | HTML scraping |
//!
//! Extraction is defensive: entries missing a title or link are skipped,
//! optional fields fall back to empty strings, and unparseable dates fall
//! back to the extraction time. Only transport or navigation problems fail a
//! whole fetch.

pub mod github;
pub mod hackernews;
pub mod infoq;
pub mod registry;

pub use github::GitHubTrending;
pub use hackernews::HackerNews;
pub use infoq::InfoQTrending;
pub use registry::{RegisteredSource, SourceRegistry};

use async_trait::async_trait;
use scraper::Selector;

use crate::error::{AppError, Result};
use crate::models::FeedItem;

/// A single scrapeable origin.
///
/// Implementations hold only construction-time configuration and are
/// stateless across calls. `fetch` returns items in document order; an empty
/// list is a valid, non-error outcome.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Identifier used in logs and fetch errors.
    fn name(&self) -> &'static str;

    /// Fetch the source page and extract its entries.
    async fn fetch(&self) -> Result<Vec<FeedItem>>;
}

/// Parse a CSS selector string.
pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector_valid() {
        assert!(parse_selector("article.Box-row").is_ok());
        assert!(parse_selector("h2.h3 a[href]").is_ok());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
    }
}
