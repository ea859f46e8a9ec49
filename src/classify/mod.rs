//! Deduplicating classifier: turns feed articles into company-linked records.

mod seen;

pub use seen::{SeenIds, SeenStore};

use std::sync::Arc;

use futures::{StreamExt, stream};
use serde::{Deserialize, Serialize};

use crate::matcher::CompanyMatcher;
use crate::news::Article;

/// Source label written to every classified news row.
pub const SOURCE_LABEL: &str = "ShareHub";

/// An article that matched a listed entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedArticle {
    pub article: Article,
    pub symbol: String,
    /// Display name of the matched entity.
    pub matched_company: String,
    pub match_score: u8,
    pub source: String,
}

/// Row layout of a per-entity `<SYMBOL>_news.csv` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRow {
    #[serde(rename = "articleId")]
    pub article_id: String,
    #[serde(rename = "publishedDate")]
    pub published_date: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "mediaUrl", default)]
    pub media_url: String,
    #[serde(rename = "matchedCompany")]
    pub matched_company: String,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(default)]
    pub source: String,
}

impl From<&ClassifiedArticle> for NewsRow {
    fn from(c: &ClassifiedArticle) -> Self {
        Self {
            article_id: c.article.id.clone(),
            published_date: c.article.published_date.clone(),
            title: c.article.title.clone(),
            summary: c.article.summary.clone(),
            media_url: c.article.media_url.clone(),
            matched_company: c.matched_company.clone(),
            match_score: c.match_score,
            source: c.source.clone(),
        }
    }
}

/// Matches articles against the dictionary, emitting each article id at most once.
#[derive(Clone)]
pub struct Classifier {
    matcher: Arc<CompanyMatcher>,
    seen: Arc<dyn SeenStore>,
}

impl Classifier {
    pub fn new(matcher: Arc<CompanyMatcher>, seen: Arc<dyn SeenStore>) -> Self {
        Self { matcher, seen }
    }

    /// Classifier with a fresh in-memory seen set.
    pub fn with_memory(matcher: Arc<CompanyMatcher>) -> Self {
        Self::new(matcher, Arc::new(SeenIds::default()))
    }

    pub fn matcher(&self) -> &Arc<CompanyMatcher> {
        &self.matcher
    }

    pub fn seen(&self) -> &Arc<dyn SeenStore> {
        &self.seen
    }

    /// Classifies one article.
    ///
    /// Returns `None` for an empty id, an id already emitted, or text that names no
    /// entity. Only matched articles are recorded as seen, so an unmatched id can be
    /// retried on a later poll.
    pub fn classify(&self, article: &Article) -> Option<ClassifiedArticle> {
        let id = article.id.trim();
        if id.is_empty() || self.seen.contains(id) {
            return None;
        }

        let found = self.matcher.find(&article.match_text())?;

        // Two workers can match the same id concurrently; only the one whose
        // insert lands emits it.
        if !self.seen.insert(id) {
            return None;
        }

        tracing::debug!(
            article_id = id,
            symbol = %found.symbol,
            variant = %found.variant,
            kind = ?found.kind,
            "article classified"
        );

        Some(ClassifiedArticle {
            article: article.clone(),
            symbol: found.symbol,
            matched_company: found.display_name,
            match_score: found.confidence,
            source: SOURCE_LABEL.to_string(),
        })
    }

    /// Classifies a batch on a bounded pool of blocking workers.
    ///
    /// Output keeps the input order of the matched articles. A worker that panics
    /// loses only its own article.
    pub async fn classify_all(&self, articles: Vec<Article>, workers: usize) -> Vec<ClassifiedArticle> {
        let workers = workers.max(1);
        stream::iter(articles.into_iter().map(|article| {
            let this = self.clone();
            async move {
                let id = article.id.clone();
                match tokio::task::spawn_blocking(move || this.classify(&article)).await {
                    Ok(res) => res,
                    Err(e) => {
                        tracing::error!(article_id = %id, error = %e, "classification worker failed");
                        None
                    }
                }
            }
        }))
        .buffered(workers)
        .filter_map(|res| async move { res })
        .collect()
        .await
    }
}
