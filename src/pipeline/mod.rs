// src/pipeline/mod.rs

//! Per-run driver: fetch each selected source, generate its feed, write it.
//!
//! Sources run concurrently up to the configured bound. Failures are
//! isolated per source: one broken adapter is reported and the rest of the
//! batch continues. Only an unknown source id aborts the whole run, since it
//! happens before any work starts.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::time::{Duration, timeout};

use crate::error::Result;
use crate::feed::RssGenerator;
use crate::models::Config;
use crate::sources::{RegisteredSource, SourceRegistry};
use crate::storage::FeedSink;

/// Outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    /// True when sources were selected and none produced output.
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.succeeded == 0
    }
}

/// Resolve `source_id` and process every resolved source.
pub async fn run_pipeline(
    registry: &SourceRegistry,
    source_id: &str,
    sink: &dyn FeedSink,
    config: Arc<Config>,
) -> Result<RunSummary> {
    let selected = registry.resolve(source_id)?;
    Ok(run_sources(selected, sink, &config).await)
}

/// Process resolved sources with bounded concurrency and per-source
/// failure isolation.
pub async fn run_sources(
    sources: Vec<RegisteredSource>,
    sink: &dyn FeedSink,
    config: &Config,
) -> RunSummary {
    let attempted = sources.len();
    let deadline = Duration::from_secs(config.fetch.source_deadline_secs);
    let concurrency = config.fetch.max_concurrent.max(1);

    let results: Vec<bool> = stream::iter(sources)
        .map(|source| async move {
            let label = source.metadata.title.clone();
            match timeout(deadline, process_source(source, sink)).await {
                Ok(Ok(filename)) => {
                    log::info!("Successfully generated {filename}");
                    true
                }
                Ok(Err(error)) => {
                    log::error!("Error processing {label}: {error}");
                    false
                }
                Err(_) => {
                    log::error!(
                        "Error processing {label}: exceeded the {}s source deadline",
                        deadline.as_secs()
                    );
                    false
                }
            }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let succeeded = results.iter().filter(|ok| **ok).count();
    RunSummary {
        attempted,
        succeeded,
        failed: attempted - succeeded,
    }
}

/// One source's chain: fetch → generate → write. Returns the output name.
async fn process_source(source: RegisteredSource, sink: &dyn FeedSink) -> Result<String> {
    let items = source.adapter.fetch().await?;
    log::info!("{}: extracted {} items", source.metadata.title, items.len());

    let filename = source.metadata.output_filename();
    let generator = RssGenerator::new(source.metadata);
    let document = generator.generate(&items)?;

    sink.write_feed(&filename, &document).await?;
    Ok(filename)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;
    use crate::models::{FeedItem, FeedMetadata};
    use crate::sources::DataSource;
    use crate::storage::LocalStorage;

    struct StaticSource {
        items: Vec<FeedItem>,
    }

    #[async_trait]
    impl DataSource for StaticSource {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn fetch(&self) -> Result<Vec<FeedItem>> {
            Ok(self.items.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl DataSource for BrokenSource {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn fetch(&self) -> Result<Vec<FeedItem>> {
            Err(AppError::fetch(self.name(), "connection refused"))
        }
    }

    fn item(title: &str) -> FeedItem {
        FeedItem {
            title: title.to_string(),
            link: format!("https://example.com/{title}"),
            description: String::new(),
            pub_date: "Thu, 01 Jan 1970 00:00:00 GMT".to_string(),
        }
    }

    fn registered(adapter: Box<dyn DataSource>, title: &str) -> RegisteredSource {
        RegisteredSource {
            adapter,
            metadata: FeedMetadata::new(title, "test feed", "https://example.com"),
        }
    }

    #[tokio::test]
    async fn test_failing_source_does_not_block_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LocalStorage::new(dir.path());
        let sources = vec![
            registered(Box::new(StaticSource { items: vec![item("one")] }), "Alpha Feed"),
            registered(Box::new(BrokenSource), "Broken Feed"),
            registered(Box::new(StaticSource { items: vec![] }), "Gamma Feed"),
        ];

        let summary = run_sources(sources, &sink, &Config::default()).await;

        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.all_failed());

        assert!(dir.path().join("alpha_feed_rss_feed.xml").exists());
        assert!(dir.path().join("gamma_feed_rss_feed.xml").exists());
        assert!(!dir.path().join("broken_feed_rss_feed.xml").exists());
    }

    #[tokio::test]
    async fn test_empty_source_still_produces_a_feed() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LocalStorage::new(dir.path());
        let sources = vec![registered(
            Box::new(StaticSource { items: vec![] }),
            "Empty Feed",
        )];

        let summary = run_sources(sources, &sink, &Config::default()).await;
        assert_eq!(summary.succeeded, 1);

        let document =
            std::fs::read_to_string(dir.path().join("empty_feed_rss_feed.xml")).unwrap();
        assert!(document.contains("<channel>"));
        assert!(!document.contains("<item>"));
    }

    #[tokio::test]
    async fn test_all_failed_summary() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LocalStorage::new(dir.path());
        let sources = vec![registered(Box::new(BrokenSource), "Only Feed")];

        let summary = run_sources(sources, &sink, &Config::default()).await;
        assert!(summary.all_failed());
    }
}
