//! Headless browser session for script-rendered sources.
//!
//! Wraps a dedicated Chromium instance launched per fetch: isolated profile,
//! automation hints disabled, realistic desktop viewport and user agent.
//! [`BrowserSession::render`] navigates, scrolls to trigger lazy loading, and
//! waits for a content marker element, retrying the full navigation with a
//! backoff pause. Callers must finish with [`BrowserSession::shutdown`] on
//! every exit path; the underlying process is additionally killed on drop if
//! a caller is cancelled mid-render.

use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, sleep, timeout};

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;

use crate::error::{AppError, Result};
use crate::models::RenderConfig;

/// How far one scroll step moves, in pixels.
const SCROLL_STEP_PX: u32 = 500;

/// Poll interval while waiting for the marker element.
const MARKER_POLL_MS: u64 = 500;

/// One live browser instance and its CDP event loop.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    config: RenderConfig,
}

impl BrowserSession {
    /// Launch an isolated headless browser.
    ///
    /// No persistent profile is used and the automation-controlled blink
    /// feature is disabled so the rendered page matches a plain desktop
    /// visit.
    pub async fn launch(config: &RenderConfig) -> Result<Self> {
        let browser_config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(config.viewport_width, config.viewport_height)
            .args(vec![
                "--disable-blink-features=AutomationControlled",
                "--disable-dev-shm-usage",
            ])
            .build()
            .map_err(AppError::Browser)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| AppError::browser(e))?;

        // Drive CDP events until the connection closes.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            config: config.clone(),
        })
    }

    /// Render a page and return its full markup once `marker` is present.
    ///
    /// Retries the whole navigate/scroll/wait sequence up to the configured
    /// attempt count, pausing between attempts. The error of the last
    /// attempt is returned once every attempt has failed.
    pub async fn render(&self, url: &str, marker: &str) -> Result<String> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| AppError::browser(e))?;
        page.set_user_agent(self.config.user_agent.as_str())
            .await
            .map_err(|e| AppError::browser(e))?;

        let attempts = self.config.retry_attempts;
        let mut last_error = AppError::browser("no navigation attempted");
        for attempt in 1..=attempts {
            match self.attempt_render(&page, url, marker).await {
                Ok(html) => return Ok(html),
                Err(error) => {
                    log::warn!("Render attempt {attempt}/{attempts} for {url} failed: {error}");
                    last_error = error;
                    if attempt < attempts {
                        sleep(Duration::from_secs(self.config.retry_backoff_secs)).await;
                    }
                }
            }
        }
        Err(last_error)
    }

    async fn attempt_render(&self, page: &Page, url: &str, marker: &str) -> Result<String> {
        let nav_timeout = Duration::from_secs(self.config.nav_timeout_secs);
        match timeout(nav_timeout, page.goto(url)).await {
            Ok(result) => {
                result.map_err(|e| AppError::browser(e))?;
            }
            Err(_) => {
                return Err(AppError::browser(format!(
                    "navigation to {url} timed out after {}s",
                    self.config.nav_timeout_secs
                )));
            }
        }

        // Initial content may be lazily loaded; nudge it in before waiting.
        for _ in 0..self.config.scroll_steps {
            page.evaluate(format!("window.scrollBy(0, {SCROLL_STEP_PX})"))
                .await
                .map_err(|e| AppError::browser(e))?;
            sleep(Duration::from_millis(self.config.scroll_pause_ms)).await;
        }

        self.wait_for_marker(page, marker).await?;
        page.content().await.map_err(|e| AppError::browser(e))
    }

    /// Poll until `marker` matches an element or the configured wait expires.
    async fn wait_for_marker(&self, page: &Page, marker: &str) -> Result<()> {
        let deadline = Instant::now() + Duration::from_secs(self.config.marker_timeout_secs);
        loop {
            if page.find_element(marker).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(AppError::browser(format!(
                    "marker '{marker}' did not appear within {}s",
                    self.config.marker_timeout_secs
                )));
            }
            sleep(Duration::from_millis(MARKER_POLL_MS)).await;
        }
    }

    /// Tear the session down. Consumes the session; safe to call after a
    /// failed render.
    pub async fn shutdown(mut self) {
        if self.browser.close().await.is_err() {
            // Connection already gone; stop the event loop directly.
            self.handler_task.abort();
        }
        let _ = self.handler_task.await;
    }
}
