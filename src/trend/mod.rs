//! Sentiment-free price forecasts from daily candles.
//!
//! The estimator is a seam: the pipeline only needs something that turns a candle
//! history into a [`TrendForecast`].

mod regression;

pub use regression::MovingAverageRegression;

use serde::{Deserialize, Serialize};

use crate::history::Candle;

/// Next-session price estimate for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendForecast {
    pub symbol: String,
    pub predicted_open: f64,
    pub predicted_close: f64,
    pub predicted_average: f64,
    /// Stability of recent moves, `[0, 1]`.
    pub confidence: f64,
}

/// Row layout of the historical predictions file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPredictionRow {
    pub symbol: String,
    /// Local (Nepal) time the forecast was made, `%Y-%m-%d %H:%M:%S`.
    pub date: String,
    pub predicted_open: f64,
    pub predicted_close: f64,
    pub predicted_average: f64,
    pub confidence: f64,
}

impl HistoricalPredictionRow {
    pub fn new(forecast: &TrendForecast, date: String) -> Self {
        Self {
            symbol: forecast.symbol.clone(),
            date,
            predicted_open: forecast.predicted_open,
            predicted_close: forecast.predicted_close,
            predicted_average: forecast.predicted_average,
            confidence: forecast.confidence,
        }
    }

    pub fn forecast(&self) -> TrendForecast {
        TrendForecast {
            symbol: self.symbol.clone(),
            predicted_open: self.predicted_open,
            predicted_close: self.predicted_close,
            predicted_average: self.predicted_average,
            confidence: self.confidence,
        }
    }
}

/// Produces a forecast from a time-ordered candle history.
pub trait TrendEstimator: Send + Sync {
    /// `None` when the history is too short or degenerate.
    fn forecast(&self, symbol: &str, candles: &[Candle]) -> Option<TrendForecast>;
}
