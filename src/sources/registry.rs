//! Source registry: id → (adapter, channel metadata).
//!
//! Pure configuration; no extraction or network logic. Adapters are
//! constructed fresh on resolution from the shared [`Config`].

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Config, FeedMetadata};
use crate::sources::{DataSource, GitHubTrending, HackerNews, InfoQTrending};

/// Identifier that selects every registered source.
pub const ALL_SOURCES: &str = "all";

/// Registered source ids, in declared order.
const SOURCE_IDS: [&str; 3] = ["github", "infoq", "hacknews"];

/// One resolved source: adapter plus its channel metadata.
pub struct RegisteredSource {
    pub adapter: Box<dyn DataSource>,
    pub metadata: FeedMetadata,
}

impl std::fmt::Debug for RegisteredSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredSource")
            .field("adapter", &self.adapter.name())
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Maps source identifiers to adapter/metadata pairs.
pub struct SourceRegistry {
    config: Arc<Config>,
}

impl SourceRegistry {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Registered source ids, in declared order.
    pub fn source_ids() -> &'static [&'static str] {
        &SOURCE_IDS
    }

    /// Resolve a source identifier.
    ///
    /// `"all"` resolves to every registered source in declared order; an
    /// unrecognized id is an [`AppError::UnknownSource`].
    pub fn resolve(&self, source_id: &str) -> Result<Vec<RegisteredSource>> {
        if source_id == ALL_SOURCES {
            return SOURCE_IDS.iter().map(|id| self.build(id)).collect();
        }
        if SOURCE_IDS.contains(&source_id) {
            return Ok(vec![self.build(source_id)?]);
        }
        Err(AppError::UnknownSource(source_id.to_string()))
    }

    fn build(&self, id: &str) -> Result<RegisteredSource> {
        match id {
            "github" => Ok(RegisteredSource {
                adapter: Box::new(GitHubTrending::new(
                    &self.config.fetch,
                    &self.config.github,
                )?),
                metadata: FeedMetadata::new(
                    "GitHub Trending",
                    "Daily trending repositories on GitHub",
                    "https://github.com/trending",
                ),
            }),
            "infoq" => Ok(RegisteredSource {
                adapter: Box::new(InfoQTrending::new(&self.config.browser)),
                metadata: FeedMetadata::new(
                    "InfoQ Trending",
                    "Trending news from InfoQ",
                    "https://www.infoq.cn/hotlist",
                ),
            }),
            "hacknews" => Ok(RegisteredSource {
                adapter: Box::new(HackerNews::new(&self.config.fetch)?),
                metadata: FeedMetadata::new(
                    "Hacker News",
                    "Front page stories from Hacker News",
                    "https://news.ycombinator.com",
                ),
            }),
            other => Err(AppError::UnknownSource(other.to_string())),
        }
    }
}
