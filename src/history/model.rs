use chrono::{DateTime, Utc};
use serde::Serialize;

/// One daily OHLC bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    /// Bar open time as served by the API (unix milliseconds, UTC).
    pub time_ms: i64,
    pub open: f64,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
}

impl Candle {
    pub fn datetime_utc(&self) -> Option<DateTime<Utc>> {
        crate::core::conversions::ms_to_utc(self.time_ms)
    }
}
