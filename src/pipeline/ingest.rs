use std::collections::BTreeMap;

use crate::classify::{ClassifiedArticle, NewsRow};
use crate::news::{NewsBuilder, NewsPage};
use crate::store;

use super::Pipeline;

impl Pipeline {
    /// Pages through the news feed, classifies every page and appends matches to
    /// the per-entity news files.
    ///
    /// Stops at `target_articles`, at a short page, or at an empty page that stays
    /// empty after one paused retry. A page that cannot be fetched ends the walk;
    /// everything classified before it is still written. Returns the number of
    /// articles classified.
    #[tracing::instrument(skip(self))]
    pub async fn ingest(&self) -> usize {
        let cfg = &self.config;
        let mut cursor: Option<String> = None;
        let mut buffer: Vec<ClassifiedArticle> = Vec::new();
        let mut total = 0usize;

        while total < cfg.target_articles {
            let mut page = self.fetch_page(cursor.clone()).await;
            if page.raw_len == 0 {
                tracing::warn!(pause = ?cfg.empty_page_pause, "empty news page, retrying once");
                tokio::time::sleep(cfg.empty_page_pause).await;
                page = self.fetch_page(cursor.clone()).await;
                if page.raw_len == 0 {
                    break;
                }
            }

            let classified = self.classifier.classify_all(page.articles, cfg.workers).await;
            for item in classified {
                buffer.push(item);
                total += 1;
                if buffer.len() >= cfg.batch_size.max(1) {
                    self.flush_news(&mut buffer);
                }
            }
            tracing::info!(total, "classified news so far");

            if page.raw_len < cfg.page_size as usize {
                break;
            }
            match page.next_cursor {
                Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
                _ => {
                    tracing::warn!("news cursor did not advance, stopping");
                    break;
                }
            }
        }

        self.flush_news(&mut buffer);
        tracing::info!(total, "news ingestion finished");
        total
    }

    async fn fetch_page(&self, cursor: Option<String>) -> NewsPage {
        let res = NewsBuilder::new(&self.client)
            .size(self.config.page_size)
            .after(cursor)
            .fetch()
            .await;
        res.unwrap_or_else(|e| {
            tracing::error!(error = %e, "news page unavailable");
            NewsPage::default()
        })
    }

    /// Writes and empties `buffer`, grouped by symbol in first-seen order per file.
    fn flush_news(&self, buffer: &mut Vec<ClassifiedArticle>) {
        if buffer.is_empty() {
            return;
        }
        let mut by_symbol: BTreeMap<&str, Vec<NewsRow>> = BTreeMap::new();
        for item in buffer.iter() {
            by_symbol.entry(&item.symbol).or_default().push(NewsRow::from(item));
        }
        for (symbol, rows) in by_symbol {
            let path = self.config.layout.news_file(symbol);
            match store::append_rows(&path, &rows) {
                Ok(n) => tracing::debug!(symbol, rows = n, path = %path.display(), "news rows appended"),
                Err(e) => tracing::error!(symbol, error = %e, "could not write news rows"),
            }
        }
        buffer.clear();
    }
}
