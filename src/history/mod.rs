mod api;
mod model;
mod wire;

pub use model::Candle;

use crate::core::{NepseClient, NepseError, RetryConfig};

/// A builder for fetching daily price candles of a single symbol.
#[derive(Clone)]
pub struct HistoryBuilder {
    client: NepseClient,
    symbol: String,
    resolution: String,
    countback: Option<u32>,
    adjusted: bool,
    retry_override: Option<RetryConfig>,
}

impl HistoryBuilder {
    /// Creates a new `HistoryBuilder` for the full adjusted daily history of `symbol`.
    pub fn new(client: &NepseClient, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            symbol: symbol.into(),
            resolution: "1D".to_string(),
            countback: None,
            adjusted: true,
            retry_override: None,
        }
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Limits the response to the latest `n` bars. Default: all available.
    #[must_use]
    pub const fn countback(mut self, n: u32) -> Self {
        self.countback = Some(n);
        self
    }

    /// Requests corporate-action adjusted prices (default `true`).
    #[must_use]
    pub const fn adjusted(mut self, yes: bool) -> Self {
        self.adjusted = yes;
        self
    }

    /// Sets the bar resolution (default `1D`).
    #[must_use]
    pub fn resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = resolution.into();
        self
    }

    /// Executes the request. Candles are returned oldest first.
    ///
    /// # Errors
    ///
    /// Returns `NepseError::Status` for a non-2xx answer, `NepseError::Api` when the
    /// server reports `success: false` or no bars, and `NepseError::Json` for a
    /// malformed body.
    #[tracing::instrument(skip(self), err, fields(symbol = %self.symbol))]
    pub async fn fetch(self) -> Result<Vec<Candle>, NepseError> {
        api::fetch_candles(
            &self.client,
            &self.symbol,
            &self.resolution,
            self.countback,
            self.adjusted,
            self.retry_override.as_ref(),
        )
        .await
    }
}
