//! Output sinks for generated feed documents.
//!
//! Writes go to a temp file first and are renamed into place, so a failure
//! mid-write never leaves a truncated feed at the final path.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;

/// Trait for feed document sinks.
#[async_trait]
pub trait FeedSink: Send + Sync {
    /// Persist one serialized feed document under the given file name.
    async fn write_feed(&self, filename: &str, document: &str) -> Result<()>;
}

/// Local filesystem sink rooted at an output directory.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, filename: &str, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.root_dir).await?;
        let path = self.root_dir.join(filename);

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl FeedSink for LocalStorage {
    async fn write_feed(&self, filename: &str, document: &str) -> Result<()> {
        self.write_bytes(filename, document.as_bytes()).await
    }
}
