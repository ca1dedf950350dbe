//! GitHub Trending adapter.

use async_trait::async_trait;
use scraper::Html;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{FeedItem, FetchConfig, GithubConfig, TrendingPeriod};
use crate::sources::{DataSource, parse_selector};
use crate::utils::http::{create_async_client, fetch_html};
use crate::utils::resolve_url;
use crate::utils::text::{collapse_whitespace, strip_whitespace};
use crate::utils::time::{feed_date_from_rfc3339, feed_date_now};

const ORIGIN: &str = "https://github.com";
const TRENDING_URL: &str = "https://github.com/trending";

/// Scrapes the GitHub Trending page.
///
/// The page is static HTML; one `article.Box-row` per repository. The
/// language filter becomes an escaped path segment and the period the
/// mandatory `since` query parameter.
pub struct GitHubTrending {
    language: String,
    period: TrendingPeriod,
    client: reqwest::Client,
}

impl GitHubTrending {
    pub fn new(fetch_config: &FetchConfig, github_config: &GithubConfig) -> Result<Self> {
        let client = create_async_client(fetch_config)?;
        Ok(Self {
            language: github_config.language.clone(),
            period: github_config.period,
            client,
        })
    }

    /// Build the trending page URL for the configured language and period.
    fn build_url(&self) -> String {
        let mut url = String::from(TRENDING_URL);
        if !self.language.is_empty() {
            url.push('/');
            url.push_str(&urlencoding::encode(&self.language));
        }
        url.push_str("?since=");
        url.push_str(self.period.as_str());
        url
    }
}

#[async_trait]
impl DataSource for GitHubTrending {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn fetch(&self) -> Result<Vec<FeedItem>> {
        let url = self.build_url();
        log::debug!("Fetching {url}");
        let html = fetch_html(&self.client, &url)
            .await
            .map_err(|e| AppError::fetch(self.name(), e))?;
        parse_document(&html)
    }
}

/// Extract repository entries from trending page markup.
fn parse_document(html: &str) -> Result<Vec<FeedItem>> {
    let document = Html::parse_document(html);
    let row_sel = parse_selector("article.Box-row")?;
    let heading_sel = parse_selector("h2.h3")?;
    let anchor_sel = parse_selector("a")?;
    let desc_sel = parse_selector("p.col-9")?;
    let time_sel = parse_selector("relative-time")?;
    let base = Url::parse(ORIGIN)?;

    let mut items = Vec::new();
    for row in document.select(&row_sel) {
        // The heading gates the entry: it carries both title and link.
        let Some(heading) = row.select(&heading_sel).next() else {
            continue;
        };

        // "owner / repo" spans several lines; joined without separators.
        let title = strip_whitespace(&heading.text().collect::<String>());
        if title.is_empty() {
            continue;
        }

        let Some(href) = heading
            .select(&anchor_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        let link = resolve_url(&base, href);

        let description = row
            .select(&desc_sel)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .unwrap_or_default();

        let pub_date = row
            .select(&time_sel)
            .next()
            .and_then(|el| el.value().attr("datetime"))
            .and_then(feed_date_from_rfc3339)
            .unwrap_or_else(feed_date_now);

        items.push(FeedItem {
            title,
            link,
            description,
            pub_date,
        });
    }
    Ok(items)
}
