//! Sentiment scoring: whitespace normalization, optional translation to English,
//! then the VADER compound polarity.

mod model;
mod social;
mod translate;

pub use model::SentimentRecord;
pub use social::{clean_social_text, is_retransmission, normalize_whitespace};
pub use translate::{GoogleTranslator, TranslateFuture, Translator};

use std::sync::Arc;

use vader_sentiment::SentimentIntensityAnalyzer;

use crate::core::{RetryConfig, client::with_retry};
use crate::matcher::{Script, detect_script};

/// Scores text on `[-1, 1]`. Failures never escape: they score neutral.
pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
    translator: Option<Arc<dyn Translator>>,
    retry: RetryConfig,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer {
    /// A scorer that runs the lexicon on the text as given.
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
            translator: None,
            retry: RetryConfig::default(),
        }
    }

    /// Translate non-Latin text before scoring.
    #[must_use]
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Retry budget for the translation step (default: 3 attempts, 1 s apart).
    #[must_use]
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.retry = cfg;
        self
    }

    /// Compound polarity of English text, no translation.
    pub fn polarity(&self, text: &str) -> f64 {
        let scores = self.analyzer.polarity_scores(text);
        scores.get("compound").copied().unwrap_or(0.0).clamp(-1.0, 1.0)
    }

    /// Scores `text`; `None`, blank text, a blank translation or a translation
    /// that fails on every attempt all give `0.0`.
    pub async fn score(&self, text: Option<&str>) -> f64 {
        let Some(raw) = text else {
            return 0.0;
        };
        let text = normalize_whitespace(raw);
        if text.is_empty() {
            return 0.0;
        }

        let translated = match &self.translator {
            Some(translator) if detect_script(&text) != Script::Latin => {
                let t = translator.as_ref();
                let input = text.as_str();
                match with_retry(&self.retry, "translate", |_| t.translate(input)).await {
                    Ok(out) => out,
                    Err(e) => {
                        tracing::error!(error = %e, text = %preview(&text), "translation gave up, scoring neutral");
                        return 0.0;
                    }
                }
            }
            _ => text,
        };

        if translated.trim().is_empty() {
            tracing::warn!("empty translation, scoring neutral");
            return 0.0;
        }

        let polarity = self.polarity(&translated);
        tracing::debug!(text = %preview(&translated), polarity, "scored");
        polarity
    }

    /// Scores `"title summary"`.
    pub async fn score_article(&self, title: &str, summary: &str) -> f64 {
        if title.trim().is_empty() && summary.trim().is_empty() {
            tracing::warn!("article has neither title nor summary");
            return 0.0;
        }
        self.score(Some(&format!("{title} {summary}"))).await
    }

    /// Scores a short-form post after stripping links, mentions and hashtags.
    /// Reposts are skipped (`None`).
    pub async fn score_social(&self, text: &str) -> Option<f64> {
        if is_retransmission(text) {
            return None;
        }
        Some(self.score(Some(&clean_social_text(text))).await)
    }
}

fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}
