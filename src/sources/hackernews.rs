//! Hacker News front page adapter.

use async_trait::async_trait;
use scraper::Html;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{FeedItem, FetchConfig};
use crate::sources::{DataSource, parse_selector};
use crate::utils::http::{create_async_client, fetch_html};
use crate::utils::resolve_url;
use crate::utils::text::collapse_whitespace;
use crate::utils::time::feed_date_now;

const FRONT_PAGE_URL: &str = "https://news.ycombinator.com";

/// Scrapes the Hacker News front page.
///
/// One `.athing` row per story. The page carries no usable timestamps or
/// summaries, so the description mirrors the title and the publication date
/// is the extraction time.
pub struct HackerNews {
    client: reqwest::Client,
}

impl HackerNews {
    pub fn new(fetch_config: &FetchConfig) -> Result<Self> {
        let client = create_async_client(fetch_config)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DataSource for HackerNews {
    fn name(&self) -> &'static str {
        "hacknews"
    }

    async fn fetch(&self) -> Result<Vec<FeedItem>> {
        let html = fetch_html(&self.client, FRONT_PAGE_URL)
            .await
            .map_err(|e| AppError::fetch(self.name(), e))?;
        parse_document(&html)
    }
}

/// Extract story entries from front page markup.
fn parse_document(html: &str) -> Result<Vec<FeedItem>> {
    let document = Html::parse_document(html);
    let row_sel = parse_selector(".athing")?;
    let title_sel = parse_selector(".titleline a")?;
    let base = Url::parse(FRONT_PAGE_URL)?;

    let mut items = Vec::new();
    for row in document.select(&row_sel) {
        let Some(anchor) = row.select(&title_sel).next() else {
            continue;
        };

        let title = collapse_whitespace(&anchor.text().collect::<String>());
        if title.is_empty() {
            continue;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        // Self posts link relative ("item?id=...").
        let link = resolve_url(&base, href);

        items.push(FeedItem {
            description: title.clone(),
            title,
            link,
            pub_date: feed_date_now(),
        });
    }
    Ok(items)
}
