use std::collections::{BTreeMap, HashMap};

use crate::blend::{FinalPrediction, PriceBlender};
use crate::core::conversions::kathmandu_now;
use crate::credibility::CredibilityStore;
use crate::history::HistoryBuilder;
use crate::sentiment::SentimentRecord;
use crate::store;
use crate::trend::{HistoricalPredictionRow, TrendForecast};

use super::Pipeline;

const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl Pipeline {
    /// Forecasts each symbol from its full adjusted daily history and appends the
    /// result to the historical predictions file.
    ///
    /// Symbols without candles or with too short a history are skipped.
    #[tracing::instrument(skip(self, symbols), fields(symbols = symbols.len()))]
    pub async fn forecast_trends(&self, symbols: &[String]) -> Vec<TrendForecast> {
        let path = self.config.layout.historical_predictions_file();
        let mut out = Vec::new();

        for symbol in symbols {
            let candles = match HistoryBuilder::new(&self.client, symbol).fetch().await {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(symbol = %symbol, error = %e, "no history fetched");
                    continue;
                }
            };
            let Some(forecast) = self.estimator.forecast(symbol, &candles) else {
                tracing::warn!(symbol = %symbol, "no valid forecast");
                continue;
            };

            let row = HistoricalPredictionRow::new(&forecast, kathmandu_now().format(STAMP_FORMAT).to_string());
            if let Err(e) = store::append_rows(&path, &[row]) {
                tracing::error!(symbol = %symbol, error = %e, "cannot save forecast");
            }
            tracing::info!(
                symbol = %symbol,
                open = forecast.predicted_open,
                close = forecast.predicted_close,
                confidence = forecast.confidence,
                "forecast"
            );
            out.push(forecast);
        }
        out
    }

    /// Blends the latest forecast of every symbol with its latest sentiment and
    /// appends the results to the final predictions file.
    ///
    /// Without historical predictions the result is empty. A symbol whose
    /// sentiment is missing, unreadable or has no valid row keeps its historical
    /// values. Rows that do not decode are skipped, in both files.
    #[tracing::instrument(skip(self))]
    pub fn predict_final(&self) -> BTreeMap<String, FinalPrediction> {
        let layout = &self.config.layout;

        let weights = CredibilityStore::load(&layout.credibility_file()).unwrap_or_else(|e| {
            tracing::error!(error = %e, "credibility store unreadable, using unknown-source weight");
            CredibilityStore::default()
        });

        let hist_path = layout.historical_predictions_file();
        let rows: Vec<HistoricalPredictionRow> = if hist_path.exists() {
            store::read_rows_lenient(&hist_path).unwrap_or_else(|e| {
                tracing::error!(path = %hist_path.display(), error = %e, "historical predictions unreadable");
                Vec::new()
            })
        } else {
            tracing::warn!(path = %hist_path.display(), "no historical predictions");
            Vec::new()
        };
        if rows.is_empty() {
            tracing::error!("insufficient historical data for prediction");
            return BTreeMap::new();
        }

        // Latest row per symbol, symbols in order of first appearance.
        let mut order: Vec<String> = Vec::new();
        let mut latest: HashMap<String, HistoricalPredictionRow> = HashMap::new();
        for row in rows {
            if !latest.contains_key(&row.symbol) {
                order.push(row.symbol.clone());
            }
            latest.insert(row.symbol.clone(), row);
        }

        let blender = PriceBlender::new(self.config.unknown_source_weight);
        let date = kathmandu_now().format(STAMP_FORMAT).to_string();
        let mut finals = Vec::with_capacity(order.len());

        for symbol in &order {
            let Some(row) = latest.get(symbol) else {
                continue;
            };
            let sentiment = self.load_sentiment(symbol);
            finals.push(blender.blend_forecast(&row.forecast(), sentiment.as_deref(), &weights, date.clone()));
        }

        if let Err(e) = store::append_rows(&layout.final_predictions_file(), &finals) {
            tracing::error!(error = %e, "cannot save final predictions");
        }
        tracing::info!(symbols = finals.len(), "final predictions ready");

        finals.into_iter().map(|p| (p.symbol.clone(), p)).collect()
    }

    fn load_sentiment(&self, symbol: &str) -> Option<Vec<SentimentRecord>> {
        let path = self.config.layout.sentiment_file(symbol);
        if !path.exists() {
            tracing::debug!(symbol, "no sentiment file");
            return None;
        }
        match store::read_rows_lenient(&path) {
            Ok(rows) => Some(rows),
            Err(e) => {
                tracing::warn!(symbol, error = %e, "unreadable sentiment file");
                None
            }
        }
    }
}
