use crate::classify::NewsRow;
use crate::core::conversions::source_domain;
use crate::credibility::{CredibilityStore, CredibilityTracker, ImpactRecord, evaluate};
use crate::history::HistoryBuilder;
use crate::sentiment::SentimentRecord;
use crate::store::{self, NEWS_SUFFIX, SENTIMENT_SUFFIX};

use super::Pipeline;

impl Pipeline {
    /// Scores every per-entity news file and rewrites its sentiment file.
    ///
    /// Unreadable files are logged and skipped. Returns the number of articles scored.
    #[tracing::instrument(skip(self))]
    pub async fn score_sentiment(&self) -> usize {
        let layout = &self.config.layout;
        let files = match store::files_with_suffix(&layout.news_dir(), NEWS_SUFFIX) {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(error = %e, "cannot list news files");
                return 0;
            }
        };

        let mut scored = 0;
        for (symbol, path) in files {
            let rows: Vec<NewsRow> = match store::read_rows_lenient(&path) {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!(symbol = %symbol, error = %e, "cannot read news file");
                    continue;
                }
            };
            if rows.is_empty() {
                tracing::info!(symbol = %symbol, "no news rows");
                continue;
            }

            let mut records = Vec::with_capacity(rows.len());
            for row in rows {
                let sentiment_score = self.scorer.score_article(&row.title, &row.summary).await;
                records.push(SentimentRecord {
                    article_id: row.article_id,
                    matched_company: row.matched_company,
                    published_date: row.published_date,
                    media_url: row.media_url,
                    sentiment_score,
                });
            }

            match store::write_rows(&layout.sentiment_file(&symbol), &records) {
                Ok(n) => {
                    scored += n;
                    tracing::info!(symbol = %symbol, articles = n, "sentiment written");
                }
                Err(e) => tracing::error!(symbol = %symbol, error = %e, "cannot write sentiment file"),
            }
        }
        scored
    }

    /// Compares each scored article with the price move that followed it and
    /// updates the source credibility store.
    ///
    /// The store is loaded once and saved once. Domains seen in this pass get
    /// their counts recomputed from the current sentiment files; other domains
    /// keep their stored counts. A store that exists but cannot be parsed aborts
    /// the stage without touching it. Returns the audited records,
    /// which are also written to the impact file.
    #[tracing::instrument(skip(self))]
    pub async fn analyze_impact(&self) -> Vec<ImpactRecord> {
        let layout = &self.config.layout;
        let store_path = layout.credibility_file();
        let mut weights = match CredibilityStore::load(&store_path) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(path = %store_path.display(), error = %e, "credibility store unreadable, skipping impact analysis");
                return Vec::new();
            }
        };

        let files = match store::files_with_suffix(&layout.sentiment_dir(), SENTIMENT_SUFFIX) {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(error = %e, "cannot list sentiment files");
                return Vec::new();
            }
        };
        if files.is_empty() {
            tracing::warn!(dir = %layout.sentiment_dir().display(), "no sentiment files to analyze");
            return Vec::new();
        }

        let params = self.config.impact_params();
        // Counts start from zero; only domains seen in this pass are overwritten.
        let mut tracker = CredibilityTracker::default();
        let mut audited = Vec::new();

        for (symbol, path) in files {
            let records: Vec<SentimentRecord> = match store::read_rows_lenient(&path) {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!(symbol = %symbol, error = %e, "cannot read sentiment file");
                    continue;
                }
            };
            if records.is_empty() {
                continue;
            }

            let candles = match HistoryBuilder::new(&self.client, &symbol)
                .countback(self.config.impact_countback)
                .fetch()
                .await
            {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!(symbol = %symbol, error = %e, "no candles, skipping symbol");
                    continue;
                }
            };

            for record in &records {
                let Some(audit) = evaluate(record, &symbol, &candles, &params) else {
                    continue;
                };
                tracker.update(&record.source_domain(), audit.predicted_dir, audit.actual_dir);
                audited.push(audit);
            }
        }

        weights.merge(tracker.finish());
        for audit in &mut audited {
            audit.media_weight = weights.weight(&source_domain(&audit.media_url));
        }

        if audited.is_empty() {
            tracing::warn!("no article could be matched to a price move");
        } else if let Err(e) = store::write_rows(&layout.impact_file(), &audited) {
            tracing::error!(error = %e, "cannot write impact audit");
        }

        if let Err(e) = weights.save(&store_path) {
            tracing::error!(error = %e, "cannot save credibility store");
        }
        audited
    }
}
