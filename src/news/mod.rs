mod api;
mod model;
mod wire;

pub use model::{Article, NewsPage};

use crate::core::{NepseClient, NepseError, RetryConfig};

/// Page size the feed serves at most.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// A builder for fetching one page of the news feed.
///
/// Pages are walked backwards in time by passing the last id of a page as the
/// cursor of the next request.
#[derive(Clone)]
pub struct NewsBuilder {
    client: NepseClient,
    media_type: String,
    size: u32,
    last_post_id: Option<String>,
    retry_override: Option<RetryConfig>,
}

impl NewsBuilder {
    /// Creates a new `NewsBuilder` for the first page of news posts.
    pub fn new(client: &NepseClient) -> Self {
        Self {
            client: client.clone(),
            media_type: "News".to_string(),
            size: DEFAULT_PAGE_SIZE,
            last_post_id: None,
            retry_override: None,
        }
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Sets the number of posts requested per page.
    #[must_use]
    pub const fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Continues after the post with this id.
    #[must_use]
    pub fn after(mut self, last_post_id: Option<String>) -> Self {
        self.last_post_id = last_post_id;
        self
    }

    /// Sets the feed media type (`News` by default).
    #[must_use]
    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    /// Executes the request and decodes the page.
    ///
    /// # Errors
    ///
    /// Returns a `NepseError` if the request fails after the retry budget,
    /// the server answers with a non-2xx status, or the body cannot be parsed.
    #[tracing::instrument(skip(self), err, fields(cursor = ?self.last_post_id))]
    pub async fn fetch(self) -> Result<NewsPage, NepseError> {
        api::fetch_news_page(
            &self.client,
            &self.media_type,
            self.size,
            self.last_post_id.as_deref(),
            self.retry_override.as_ref(),
        )
        .await
    }
}
