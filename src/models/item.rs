//! Normalized feed entry.

use serde::{Deserialize, Serialize};

/// One syndicated entry extracted from a source page.
///
/// Adapters only emit fully populated records: `title` and `link` are
/// non-empty (entries missing either are dropped during extraction), while
/// `description` may be an empty string and `pub_date` always carries an
/// RFC-822 style feed date, falling back to the extraction time when the
/// source supplies no usable date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedItem {
    /// Entry title, whitespace-normalized, never empty
    pub title: String,

    /// Absolute URL of the entry
    pub link: String,

    /// Entry summary (empty string when the source provides none)
    pub description: String,

    /// Publication date in `%a, %d %b %Y %H:%M:%S GMT` form
    pub pub_date: String,
}
