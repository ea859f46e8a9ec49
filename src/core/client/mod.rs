//! Public client surface + builder.
//! Internals are split into `retry` (policy + helpers) and `constants` (UA + defaults).

mod constants;
pub mod retry;

pub use retry::{Backoff, RetryConfig, with_retry};

use crate::core::NepseError;
use constants::{
    DEFAULT_BASE_CANDLES, DEFAULT_BASE_NEWS, DEFAULT_BASE_TRANSLATE, DEFAULT_TIMEOUT_SECS,
    USER_AGENT,
};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use url::Url;

/// HTTP client shared by the news, candle and translation fetchers.
///
/// Cloning is cheap: the underlying connection pool is reference counted.
#[derive(Debug, Clone)]
pub struct NepseClient {
    http: Client,
    base_news: Url,
    base_candles: Url,
    base_translate: Url,
    retry: RetryConfig,
}

impl Default for NepseClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl NepseClient {
    /// Create a new builder.
    pub fn builder() -> NepseClientBuilder {
        NepseClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_news(&self) -> &Url {
        &self.base_news
    }
    pub(crate) fn base_candles(&self) -> &Url {
        &self.base_candles
    }
    pub(crate) fn base_translate(&self) -> &Url {
        &self.base_translate
    }

    /// The client-wide retry policy.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Sends `req`, retrying on the statuses and transport failures named by the policy.
    ///
    /// A response whose status is not retryable (or that arrives on the last attempt)
    /// is returned as-is; callers decide whether it is a success.
    pub(crate) async fn send_with_retry(
        &self,
        req: RequestBuilder,
        retry_override: Option<&RetryConfig>,
    ) -> Result<Response, NepseError> {
        let cfg = retry_override.unwrap_or(&self.retry);
        let attempts = cfg.attempts();
        let mut attempt = 0;

        loop {
            let this = req
                .try_clone()
                .ok_or_else(|| NepseError::InvalidParams("request is not cloneable".into()))?;
            let last = attempt + 1 >= attempts;

            match this.send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if last || !cfg.retry_on_status.contains(&status) {
                        return Ok(resp);
                    }
                    tracing::warn!(status, attempt = attempt + 1, url = %resp.url(), "retryable status");
                }
                Err(e) => {
                    let retryable = (e.is_timeout() && cfg.retry_on_timeout)
                        || (e.is_connect() && cfg.retry_on_connect);
                    if last || !retryable {
                        return Err(e.into());
                    }
                    tracing::warn!(attempt = attempt + 1, error = %e, "request failed, retrying");
                }
            }

            tokio::time::sleep(cfg.backoff.delay(attempt)).await;
            attempt += 1;
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct NepseClientBuilder {
    user_agent: Option<String>,
    base_news: Option<Url>,
    base_candles: Option<Url>,
    base_translate: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
}

impl NepseClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the news feed endpoint (e.g., `https://sharehubnepal.com/account/api/v1/khula-manch/post`).
    pub fn base_news(mut self, url: Url) -> Self {
        self.base_news = Some(url);
        self
    }

    /// Override the candle history endpoint (e.g., `https://sharehubnepal.com/data/api/v1/candle-chart/history`).
    pub fn base_candles(mut self, url: Url) -> Self {
        self.base_candles = Some(url);
        self
    }

    /// Override the translation endpoint.
    pub fn base_translate(mut self, url: Url) -> Self {
        self.base_translate = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: 10 seconds.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Replace the client-wide retry policy. Default: [`RetryConfig::default`].
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    pub fn build(self) -> Result<NepseClient, NepseError> {
        let base_news = match self.base_news {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_NEWS)?,
        };
        let base_candles = match self.base_candles {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_CANDLES)?,
        };
        let base_translate = match self.base_translate {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_TRANSLATE)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .timeout(
                self.timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            );
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(NepseClient {
            http,
            base_news,
            base_candles,
            base_translate,
            retry: self.retry.unwrap_or_default(),
        })
    }
}
