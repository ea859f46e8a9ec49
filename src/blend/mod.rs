//! Sentiment-weighted adjustment of trend forecasts.

use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentRecord;
use crate::trend::TrendForecast;
use crate::credibility::CredibilityStore;

/// Share of the raw sentiment impact that moves the price.
pub const DAMPENING: f64 = 0.5;

/// Weight assumed for a domain the credibility store has never seen.
pub const DEFAULT_UNKNOWN_SOURCE_WEIGHT: f64 = 0.5;

/// Adjusts `historical_price` by `sentiment_score * source_weight`, dampened.
///
/// Returns `(price, confidence)`. A zero score or a zero weight leaves the price
/// untouched with confidence `0.0`.
///
/// ```
/// let (p, c) = nepse_sentiment::blend::blend(500.0, 0.6, 0.8);
/// assert!((p - 620.0).abs() < 1e-9 && (c - 0.48).abs() < 1e-9);
/// ```
pub fn blend(historical_price: f64, sentiment_score: f64, source_weight: f64) -> (f64, f64) {
    if sentiment_score == 0.0 || source_weight == 0.0 {
        return (historical_price, 0.0);
    }
    let impact = sentiment_score * source_weight;
    let adjusted = historical_price * (1.0 + impact * DAMPENING);
    let confidence = (source_weight * sentiment_score.abs()).clamp(0.0, 1.0);
    (adjusted, confidence)
}

/// Where a symbol ended up in the blending pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendState {
    /// Not yet looked at sentiment.
    NoSentiment,
    /// A latest sentiment row is available.
    SentimentLoaded,
    /// Prices went through [`blend`] (possibly as a no-op on zero signal).
    Adjusted,
    /// No usable sentiment; historical values and confidence copied verbatim.
    HistoricalFallback,
}

impl BlendState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Adjusted | Self::HistoricalFallback)
    }
}

/// One final prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalPrediction {
    pub symbol: String,
    /// Local (Nepal) time of the run, `%Y-%m-%d %H:%M:%S`.
    pub date: String,
    pub historical_open: f64,
    pub final_open: f64,
    pub historical_close: f64,
    pub final_close: f64,
    pub historical_average: f64,
    pub final_average: f64,
    pub confidence: f64,
    #[serde(skip)]
    pub state: Option<BlendState>,
}

/// Applies [`blend`] to the open, close and average of a forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBlender {
    pub unknown_source_weight: f64,
}

impl Default for PriceBlender {
    fn default() -> Self {
        Self {
            unknown_source_weight: DEFAULT_UNKNOWN_SOURCE_WEIGHT,
        }
    }
}

impl PriceBlender {
    pub const fn new(unknown_source_weight: f64) -> Self {
        Self { unknown_source_weight }
    }

    /// The row that drives the adjustment: the last of the rows sharing the
    /// latest publish date. Rows whose date does not parse are ignored.
    pub fn latest_sentiment(records: &[SentimentRecord]) -> Option<&SentimentRecord> {
        let dated: Vec<_> = records
            .iter()
            .filter_map(|r| r.published_at().map(|t| (t, r)))
            .collect();
        let max = dated.iter().map(|(t, _)| *t).max()?;
        dated.into_iter().filter(|(t, _)| *t == max).map(|(_, r)| r).next_back()
    }

    /// Blends `forecast` with `sentiment` (`None` when the symbol has no usable
    /// sentiment file). Overall confidence is the max of the three field confidences.
    pub fn blend_forecast(
        &self,
        forecast: &TrendForecast,
        sentiment: Option<&[SentimentRecord]>,
        store: &CredibilityStore,
        date: String,
    ) -> FinalPrediction {
        let mut state = BlendState::NoSentiment;

        let latest = sentiment.and_then(Self::latest_sentiment);
        if latest.is_some() {
            state = BlendState::SentimentLoaded;
        }

        let Some(row) = latest.filter(|r| r.sentiment_score.is_finite()) else {
            tracing::info!(symbol = %forecast.symbol, ?state, "no usable sentiment, keeping historical prices");
            return FinalPrediction {
                symbol: forecast.symbol.clone(),
                date,
                historical_open: forecast.predicted_open,
                final_open: forecast.predicted_open,
                historical_close: forecast.predicted_close,
                final_close: forecast.predicted_close,
                historical_average: forecast.predicted_average,
                final_average: forecast.predicted_average,
                confidence: forecast.confidence,
                state: Some(BlendState::HistoricalFallback),
            };
        };

        let domain = row.source_domain();
        let weight = store.weight_or(&domain, self.unknown_source_weight);
        let s = row.sentiment_score.clamp(-1.0, 1.0);

        let (final_open, c_open) = blend(forecast.predicted_open, s, weight);
        let (final_close, c_close) = blend(forecast.predicted_close, s, weight);
        let (final_average, c_avg) = blend(forecast.predicted_average, s, weight);
        state = BlendState::Adjusted;

        let confidence = c_open.max(c_close).max(c_avg);
        tracing::info!(
            symbol = %forecast.symbol,
            domain = %domain,
            sentiment = s,
            weight,
            final_close,
            confidence,
            "blended"
        );

        FinalPrediction {
            symbol: forecast.symbol.clone(),
            date,
            historical_open: forecast.predicted_open,
            final_open,
            historical_close: forecast.predicted_close,
            final_close,
            historical_average: forecast.predicted_average,
            final_average,
            confidence,
            state: Some(state),
        }
    }
}
