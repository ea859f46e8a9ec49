use serde::{Deserialize, Serialize};

use crate::core::conversions::{parse_publish_date, source_domain};

/// A news item as received from the feed.
///
/// Identity is `id`; everything else is carried through to the persisted files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    /// Publish time exactly as the feed wrote it.
    pub published_date: String,
    pub title: String,
    pub summary: String,
    pub media_url: String,
}

impl Article {
    /// Text used for company matching and scoring: title and summary only.
    ///
    /// The media URL is deliberately left out.
    pub fn match_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }

    /// Host of the media URL, `"unknown"` if absent.
    pub fn source_domain(&self) -> String {
        source_domain(&self.media_url)
    }

    /// Parsed publish time, `None` if the layout is not recognised.
    pub fn published_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        parse_publish_date(&self.published_date)
    }
}

/// One page of the feed plus the cursor to request the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsPage {
    pub articles: Vec<Article>,
    /// Number of raw items the server returned, including ones dropped for a missing id.
    pub raw_len: usize,
    /// Id of the last raw item; pass it back as `LastPostId`.
    pub next_cursor: Option<String>,
}
