//! Application configuration structures.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP fetching behavior settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Headless browser settings for script-rendered sources
    #[serde(default)]
    pub browser: RenderConfig,

    /// GitHub Trending adapter settings
    #[serde(default)]
    pub github: GithubConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::config("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::config("fetch.timeout_secs must be > 0"));
        }
        if self.fetch.max_concurrent == 0 {
            return Err(AppError::config("fetch.max_concurrent must be > 0"));
        }
        if self.fetch.source_deadline_secs == 0 {
            return Err(AppError::config("fetch.source_deadline_secs must be > 0"));
        }
        if self.browser.user_agent.trim().is_empty() {
            return Err(AppError::config("browser.user_agent is empty"));
        }
        if self.browser.retry_attempts == 0 {
            return Err(AppError::config("browser.retry_attempts must be > 0"));
        }
        if self.browser.marker_timeout_secs == 0 {
            return Err(AppError::config("browser.marker_timeout_secs must be > 0"));
        }
        if self.browser.nav_timeout_secs == 0 {
            return Err(AppError::config("browser.nav_timeout_secs must be > 0"));
        }
        if self.browser.scroll_steps < 2 {
            return Err(AppError::config("browser.scroll_steps must be >= 2"));
        }
        Ok(())
    }
}

/// HTTP client behavior for the static-page sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum sources processed concurrently
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Ceiling on one source's whole fetch/generate/write chain, in seconds
    #[serde(default = "defaults::source_deadline")]
    pub source_deadline_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            source_deadline_secs: defaults::source_deadline(),
        }
    }
}

/// Headless browser behavior for script-rendered sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// User-Agent override applied to browser pages
    #[serde(default = "defaults::browser_user_agent")]
    pub user_agent: String,

    /// Page navigation timeout in seconds
    #[serde(default = "defaults::nav_timeout")]
    pub nav_timeout_secs: u64,

    /// How long to wait for the content marker element, in seconds
    #[serde(default = "defaults::marker_timeout")]
    pub marker_timeout_secs: u64,

    /// Full-navigation attempts before giving up
    #[serde(default = "defaults::retry_attempts")]
    pub retry_attempts: u32,

    /// Pause between navigation attempts, in seconds
    #[serde(default = "defaults::retry_backoff")]
    pub retry_backoff_secs: u64,

    /// Number of scroll-and-wait steps to trigger lazy loading
    #[serde(default = "defaults::scroll_steps")]
    pub scroll_steps: u32,

    /// Pause after each scroll step, in milliseconds
    #[serde(default = "defaults::scroll_pause")]
    pub scroll_pause_ms: u64,

    /// Viewport width in pixels
    #[serde(default = "defaults::viewport_width")]
    pub viewport_width: u32,

    /// Viewport height in pixels
    #[serde(default = "defaults::viewport_height")]
    pub viewport_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::browser_user_agent(),
            nav_timeout_secs: defaults::nav_timeout(),
            marker_timeout_secs: defaults::marker_timeout(),
            retry_attempts: defaults::retry_attempts(),
            retry_backoff_secs: defaults::retry_backoff(),
            scroll_steps: defaults::scroll_steps(),
            scroll_pause_ms: defaults::scroll_pause(),
            viewport_width: defaults::viewport_width(),
            viewport_height: defaults::viewport_height(),
        }
    }
}

/// GitHub Trending adapter settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Language filter for the trending page (empty = all languages)
    #[serde(default)]
    pub language: String,

    /// Trending window
    #[serde(default)]
    pub period: TrendingPeriod,
}

/// Trending window accepted by the GitHub Trending page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl TrendingPeriod {
    /// Value of the `since` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            TrendingPeriod::Daily => "daily",
            TrendingPeriod::Weekly => "weekly",
            TrendingPeriod::Monthly => "monthly",
        }
    }
}

impl fmt::Display for TrendingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrendingPeriod {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.to_lowercase().as_str() {
            "daily" => Ok(TrendingPeriod::Daily),
            "weekly" => Ok(TrendingPeriod::Weekly),
            "monthly" => Ok(TrendingPeriod::Monthly),
            other => Err(format!(
                "invalid period '{other}' (expected daily, weekly, or monthly)"
            )),
        }
    }
}

/// Default values for configuration fields.
mod defaults {
    pub fn user_agent() -> String {
        // Desktop Chrome; some origins throttle obvious bot agents.
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3"
            .to_string()
    }

    pub fn browser_user_agent() -> String {
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36"
            .to_string()
    }

    pub fn timeout() -> u64 {
        10
    }

    pub fn max_concurrent() -> usize {
        4
    }

    pub fn source_deadline() -> u64 {
        120
    }

    pub fn nav_timeout() -> u64 {
        30
    }

    pub fn marker_timeout() -> u64 {
        30
    }

    pub fn retry_attempts() -> u32 {
        3
    }

    pub fn retry_backoff() -> u64 {
        5
    }

    pub fn scroll_steps() -> u32 {
        2
    }

    pub fn scroll_pause() -> u64 {
        1000
    }

    pub fn viewport_width() -> u32 {
        1280
    }

    pub fn viewport_height() -> u32 {
        800
    }
}
