//! InfoQ hotlist adapter.

use async_trait::async_trait;
use scraper::Html;
use url::Url;

use crate::browser::BrowserSession;
use crate::error::{AppError, Result};
use crate::models::{FeedItem, RenderConfig};
use crate::sources::{DataSource, parse_selector};
use crate::utils::resolve_url;
use crate::utils::text::collapse_whitespace;
use crate::utils::time::{feed_date_from_ymd, feed_date_now};

const ORIGIN: &str = "https://www.infoq.cn";
const HOTLIST_URL: &str = "https://www.infoq.cn/hotlist";

/// Element that signals the hotlist has finished loading.
const CONTENT_MARKER: &str = ".item-main";

/// Scrapes the InfoQ hotlist.
///
/// The listing is populated by script, so this adapter renders the page in a
/// headless browser before running the same structural extraction as the
/// static sources. The browser session lives for exactly one fetch.
pub struct InfoQTrending {
    config: RenderConfig,
}

impl InfoQTrending {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait]
impl DataSource for InfoQTrending {
    fn name(&self) -> &'static str {
        "infoq"
    }

    async fn fetch(&self) -> Result<Vec<FeedItem>> {
        let session = BrowserSession::launch(&self.config)
            .await
            .map_err(|e| AppError::fetch(self.name(), e))?;

        // Hold the render result until the session is torn down; teardown
        // must run on the failure path too.
        let rendered = session.render(HOTLIST_URL, CONTENT_MARKER).await;
        session.shutdown().await;

        let html = rendered.map_err(|e| AppError::fetch(self.name(), e))?;
        parse_document(&html)
    }
}

/// Extract article entries from rendered hotlist markup.
fn parse_document(html: &str) -> Result<Vec<FeedItem>> {
    let document = Html::parse_document(html);
    let entry_sel = parse_selector(".item-main")?;
    let title_sel = parse_selector(".com-article-title span")?;
    let link_sel = parse_selector(".com-article-title")?;
    let summary_sel = parse_selector(".summary")?;
    let date_sel = parse_selector(".date")?;
    let base = Url::parse(ORIGIN)?;

    let mut items = Vec::new();
    for entry in document.select(&entry_sel) {
        let Some(title_elem) = entry.select(&title_sel).next() else {
            continue;
        };
        let title = collapse_whitespace(&title_elem.text().collect::<String>());
        if title.is_empty() {
            continue;
        }

        let Some(href) = entry
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        let link = resolve_url(&base, href);

        let description = entry
            .select(&summary_sel)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .unwrap_or_default();

        // Dates come as bare `YYYY-MM-DD`; anything else gets the
        // extraction time.
        let pub_date = entry
            .select(&date_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .and_then(|raw| feed_date_from_ymd(&raw))
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

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::utils::time::FEED_DATE_FORMAT;

    const FIXTURE: &str = r#"
        <div class="list">
          <div class="item-main">
            <a class="com-article-title" href="/article/abc123">
              <span>Large  model
                inference in production</span>
            </a>
            <p class="summary">  How teams ship it.  </p>
            <span class="date">2024-05-06</span>
          </div>
          <div class="item-main">
            <a class="com-article-title" href="https://www.infoq.cn/article/def456">
              <span>Second article</span>
            </a>
            <span class="date">last Tuesday</span>
          </div>
          <div class="item-main">
            <a class="com-article-title" href="/article/notitle"></a>
            <p class="summary">title span missing entirely</p>
          </div>
        </div>
    "#;

    #[test]
    fn test_parse_hotlist() {
        let items = parse_document(FIXTURE).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].title, "Large model inference in production");
        assert_eq!(items[0].link, "https://www.infoq.cn/article/abc123");
        assert_eq!(items[0].description, "How teams ship it.");
        assert_eq!(items[0].pub_date, "Mon, 06 May 2024 00:00:00 GMT");
    }

    #[test]
    fn test_unparseable_date_falls_back() {
        let items = parse_document(FIXTURE).unwrap();
        // "last Tuesday" is not a date; the record still carries a valid stamp.
        assert!(NaiveDateTime::parse_from_str(&items[1].pub_date, FEED_DATE_FORMAT).is_ok());
    }

    #[test]
    fn test_missing_summary_defaults_to_empty() {
        let items = parse_document(FIXTURE).unwrap();
        assert_eq!(items[1].description, "");
    }

    #[test]
    fn test_entry_without_title_span_is_skipped() {
        let items = parse_document(FIXTURE).unwrap();
        assert!(items.iter().all(|i| !i.title.is_empty()));
        assert_eq!(items.len(), 2);
    }
}
