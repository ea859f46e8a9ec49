use std::time::Duration;

use crate::blend::DEFAULT_UNKNOWN_SOURCE_WEIGHT;
use crate::credibility::ImpactParams;
use crate::news::DEFAULT_PAGE_SIZE;
use crate::store::DataLayout;

/// Tunables of a pipeline run. `Default` matches the production schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub layout: DataLayout,
    /// Concurrent classification workers.
    pub workers: usize,
    /// Classified articles buffered before a flush to disk.
    pub batch_size: usize,
    pub page_size: u32,
    /// Ingestion stops once this many articles were classified in a run.
    pub target_articles: usize,
    /// Pause before the single retry of an empty page.
    pub empty_page_pause: Duration,
    pub schedule_every: Duration,
    pub lookahead_candles: usize,
    pub candle_match_tolerance: chrono::TimeDelta,
    pub direction_deadband_pct: f64,
    /// Candles requested per symbol for impact analysis.
    pub impact_countback: u32,
    pub unknown_source_weight: f64,
    pub trend_window: usize,
    /// Symbols to forecast in [`run_once`](super::Pipeline::run_once); `None` means
    /// every symbol of the dictionary.
    pub symbols: Option<Vec<String>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let impact = ImpactParams::default();
        Self {
            layout: DataLayout::default(),
            workers: 10,
            batch_size: 200,
            page_size: DEFAULT_PAGE_SIZE,
            target_articles: 10_000,
            empty_page_pause: Duration::from_secs(5),
            schedule_every: Duration::from_secs(6 * 60 * 60),
            lookahead_candles: impact.lookahead,
            candle_match_tolerance: impact.tolerance,
            direction_deadband_pct: impact.deadband_pct,
            impact_countback: 60,
            unknown_source_weight: DEFAULT_UNKNOWN_SOURCE_WEIGHT,
            trend_window: 5,
            symbols: None,
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn layout(mut self, layout: DataLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub const fn workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    #[must_use]
    pub const fn batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    #[must_use]
    pub const fn page_size(mut self, n: u32) -> Self {
        self.page_size = n;
        self
    }

    #[must_use]
    pub const fn target_articles(mut self, n: usize) -> Self {
        self.target_articles = n;
        self
    }

    #[must_use]
    pub const fn empty_page_pause(mut self, d: Duration) -> Self {
        self.empty_page_pause = d;
        self
    }

    #[must_use]
    pub const fn schedule_every(mut self, d: Duration) -> Self {
        self.schedule_every = d;
        self
    }

    #[must_use]
    pub const fn lookahead_candles(mut self, n: usize) -> Self {
        self.lookahead_candles = n;
        self
    }

    #[must_use]
    pub const fn candle_match_tolerance(mut self, d: chrono::TimeDelta) -> Self {
        self.candle_match_tolerance = d;
        self
    }

    #[must_use]
    pub const fn direction_deadband_pct(mut self, pct: f64) -> Self {
        self.direction_deadband_pct = pct;
        self
    }

    #[must_use]
    pub const fn impact_countback(mut self, n: u32) -> Self {
        self.impact_countback = n;
        self
    }

    #[must_use]
    pub const fn unknown_source_weight(mut self, w: f64) -> Self {
        self.unknown_source_weight = w;
        self
    }

    #[must_use]
    pub const fn trend_window(mut self, n: usize) -> Self {
        self.trend_window = n;
        self
    }

    #[must_use]
    pub fn symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = Some(symbols.into_iter().map(Into::into).collect());
        self
    }

    /// Impact-analysis parameters derived from this config.
    pub const fn impact_params(&self) -> ImpactParams {
        ImpactParams {
            lookahead: self.lookahead_candles,
            tolerance: self.candle_match_tolerance,
            deadband_pct: self.direction_deadband_pct,
        }
    }
}
