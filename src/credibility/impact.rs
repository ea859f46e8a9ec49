use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use super::Direction;
use crate::history::Candle;
use crate::sentiment::SentimentRecord;

/// Knobs of the news → price impact comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactParams {
    /// Candles between the publish-day candle and the one the move is measured at.
    pub lookahead: usize,
    /// Maximum distance between publish time and the anchoring candle (exclusive).
    pub tolerance: TimeDelta,
    /// Moves within `±deadband_pct` percent are neutral.
    pub deadband_pct: f64,
}

impl Default for ImpactParams {
    fn default() -> Self {
        Self {
            lookahead: 2,
            tolerance: TimeDelta::days(3),
            deadband_pct: 0.1,
        }
    }
}

/// One audited article, a row of `share_weightage.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactRecord {
    #[serde(rename = "articleId")]
    pub article_id: String,
    pub symbol: String,
    #[serde(rename = "publishDate")]
    pub publish_date: String,
    #[serde(rename = "mediaUrl")]
    pub media_url: String,
    pub sentiment_score: f64,
    pub price_change_pct: f64,
    pub predicted_dir: Direction,
    pub actual_dir: Direction,
    /// Filled in once the whole pass has been aggregated.
    pub media_weight: f64,
}

/// Compares one sentiment record with the price move that followed it.
///
/// The anchor is the first candle (in time order) within `tolerance` of the publish
/// time. `None` when the date does not parse, no candle is close enough, the
/// lookahead runs past the data, or the anchor close is zero.
pub fn evaluate(
    record: &SentimentRecord,
    symbol: &str,
    candles: &[Candle],
    params: &ImpactParams,
) -> Option<ImpactRecord> {
    let Some(published) = record.published_at() else {
        tracing::warn!(article_id = %record.article_id, date = %record.published_date, "unparseable publish date");
        return None;
    };
    let at = published.timestamp_millis();
    let tol = params.tolerance.num_milliseconds();

    let Some(i) = candles.iter().position(|c| (c.time_ms - at).abs() < tol) else {
        tracing::warn!(symbol, article_id = %record.article_id, date = %record.published_date, "no candle near publish date");
        return None;
    };
    let later = candles.get(i + params.lookahead)?;
    let now = candles[i].close;
    if now == 0.0 {
        return None;
    }

    let pct = (later.close - now) / now * 100.0;
    Some(ImpactRecord {
        article_id: record.article_id.clone(),
        symbol: symbol.to_string(),
        publish_date: record.published_date.clone(),
        media_url: record.media_url.clone(),
        sentiment_score: record.sentiment_score,
        price_change_pct: pct,
        predicted_dir: Direction::from_sentiment(record.sentiment_score),
        actual_dir: Direction::from_price_change(pct, params.deadband_pct),
        media_weight: 0.0,
    })
}
