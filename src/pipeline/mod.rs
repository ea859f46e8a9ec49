//! End-to-end orchestration: news ingestion, sentiment scoring, source
//! credibility, trend forecasts and the final blended predictions.
//!
//! Every stage degrades instead of failing: errors are logged and the stage
//! returns what it managed to produce.

mod analysis;
mod config;
mod ingest;
mod predict;

pub use config::PipelineConfig;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::blend::FinalPrediction;
use crate::classify::{Classifier, SeenStore};
use crate::core::{NepseClient, NepseError};
use crate::entities::EntityDictionary;
use crate::matcher::CompanyMatcher;
use crate::sentiment::{GoogleTranslator, SentimentScorer};
use crate::trend::{MovingAverageRegression, TrendEstimator};

/// Owns the collaborators of every stage.
///
/// The classifier's seen set lives as long as the pipeline, so repeated
/// ingestion runs never emit the same article twice.
pub struct Pipeline {
    client: NepseClient,
    config: PipelineConfig,
    dictionary: Arc<EntityDictionary>,
    classifier: Classifier,
    scorer: Arc<SentimentScorer>,
    estimator: Arc<dyn TrendEstimator>,
}

impl Pipeline {
    /// A pipeline over the bundled NEPSE dictionary, translating Nepali text
    /// through the client's translation endpoint.
    ///
    /// # Errors
    ///
    /// Fails only if the dictionary cannot be compiled into a matcher.
    pub fn new(client: NepseClient, config: PipelineConfig) -> Result<Self, NepseError> {
        let dictionary = EntityDictionary::nepse();
        let matcher = Arc::new(CompanyMatcher::new(&dictionary)?);
        report_shadowed(&matcher);
        let classifier = Classifier::with_memory(matcher);
        let scorer = SentimentScorer::new()
            .with_translator(Arc::new(GoogleTranslator::new(&client)))
            .retry_policy(client.retry_config().clone());
        let estimator = Arc::new(MovingAverageRegression::new(config.trend_window));

        Ok(Self {
            client,
            config,
            dictionary,
            classifier,
            scorer: Arc::new(scorer),
            estimator,
        })
    }

    /// Matches against `dictionary` instead of the bundled one. Seen ids are kept.
    ///
    /// # Errors
    ///
    /// See [`CompanyMatcher::new`].
    pub fn with_dictionary(mut self, dictionary: Arc<EntityDictionary>) -> Result<Self, NepseError> {
        let matcher = Arc::new(CompanyMatcher::new(&dictionary)?);
        report_shadowed(&matcher);
        self.classifier = Classifier::new(matcher, Arc::clone(self.classifier.seen()));
        self.dictionary = dictionary;
        Ok(self)
    }

    /// Replaces the seen-id store (e.g. one seeded from a checkpoint).
    #[must_use]
    pub fn with_seen_store(mut self, seen: Arc<dyn SeenStore>) -> Self {
        self.classifier = Classifier::new(Arc::clone(self.classifier.matcher()), seen);
        self
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: SentimentScorer) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    #[must_use]
    pub fn with_estimator(mut self, estimator: Arc<dyn TrendEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Symbols [`run_once`](Self::run_once) forecasts.
    pub fn forecast_symbols(&self) -> Vec<String> {
        self.config
            .symbols
            .clone()
            .unwrap_or_else(|| self.dictionary.symbols())
    }

    /// Runs every stage once, in data-flow order.
    #[tracing::instrument(skip(self))]
    pub async fn run_once(&self) -> BTreeMap<String, FinalPrediction> {
        let ingested = self.ingest().await;
        let scored = self.score_sentiment().await;
        let audited = self.analyze_impact().await.len();
        let forecasts = self.forecast_trends(&self.forecast_symbols()).await.len();
        let finals = self.predict_final();
        tracing::info!(ingested, scored, audited, forecasts, finals = finals.len(), "pipeline run complete");
        finals
    }

    /// Re-runs ingestion every `schedule_every`, starting immediately, until the
    /// process ends.
    pub async fn run_every(&self) {
        let mut ticker = tokio::time::interval(self.config.schedule_every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let n = self.ingest().await;
            tracing::info!(classified = n, next_in = ?self.config.schedule_every, "scheduled ingestion done");
        }
    }
}

/// Warns once about dictionary variants that can never be reported.
fn report_shadowed(matcher: &CompanyMatcher) {
    let shadowed = matcher.shadowed_variants();
    let Some(first) = shadowed.first() else {
        return;
    };
    tracing::warn!(
        count = shadowed.len(),
        example_symbol = %first.symbol,
        example_variant = %first.variant,
        shadowed_by = %first.shadowed_by_symbol,
        "dictionary variants shadowed by an earlier entity"
    );
    for v in &shadowed {
        tracing::debug!(
            symbol = %v.symbol,
            variant = %v.variant,
            shadowed_by_symbol = %v.shadowed_by_symbol,
            shadowed_by_variant = %v.shadowed_by_variant,
            "shadowed variant"
        );
    }
}
