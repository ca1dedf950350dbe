//! Static per-source channel metadata.

use serde::{Deserialize, Serialize};

/// Channel-level metadata for one source's feed.
///
/// Constructed once by the registry and read-only afterwards; the feed
/// generator copies these values into the channel block verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedMetadata {
    /// Channel title
    pub title: String,

    /// Channel description
    pub description: String,

    /// Canonical link to the scraped listing
    pub link: String,
}

impl FeedMetadata {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            link: link.into(),
        }
    }

    /// Deterministic output file name derived from the channel title.
    pub fn output_filename(&self) -> String {
        format!(
            "{}_rss_feed.xml",
            self.title.to_lowercase().replace(' ', "_")
        )
    }
}
