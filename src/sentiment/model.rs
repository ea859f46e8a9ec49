use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::conversions::{parse_publish_date, source_domain};

/// One scored article, a row of `<SYMBOL>_share_sentiment.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    #[serde(rename = "articleId")]
    pub article_id: String,
    #[serde(rename = "matchedCompany")]
    pub matched_company: String,
    #[serde(rename = "publishedDate")]
    pub published_date: String,
    #[serde(rename = "mediaUrl", default)]
    pub media_url: String,
    /// Compound polarity in `[-1, 1]`.
    pub sentiment_score: f64,
}

impl SentimentRecord {
    pub fn source_domain(&self) -> String {
        source_domain(&self.media_url)
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_publish_date(&self.published_date)
    }
}
