use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::core::{NepseClient, NepseError, RetryConfig, net};

/// Boxed future returned by [`Translator::translate`].
pub type TranslateFuture<'a> = Pin<Box<dyn Future<Output = Result<String, NepseError>> + Send + 'a>>;

/// Turns text into the pivot language of the polarity lexicon (English).
///
/// Implemented by [`GoogleTranslator`]; tests and offline runs can plug in their own.
pub trait Translator: Send + Sync {
    /// Translates `text`. An empty result is returned as `Ok("")`; callers decide
    /// what that means.
    fn translate<'a>(&'a self, text: &'a str) -> TranslateFuture<'a>;
}

/// Nepali → English through the public `translate_a/single` endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: NepseClient,
    source: String,
    target: String,
}

impl GoogleTranslator {
    pub fn new(client: &NepseClient) -> Self {
        Self {
            client: client.clone(),
            source: "ne".to_string(),
            target: "en".to_string(),
        }
    }

    #[must_use]
    pub fn languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source = source.into();
        self.target = target.into();
        self
    }

    async fn request(&self, text: &str) -> Result<String, NepseError> {
        let mut url = self.client.base_translate().clone();
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", &self.source)
            .append_pair("tl", &self.target)
            .append_pair("dt", "t")
            .append_pair("q", text);

        // The scorer owns the retry budget for translation.
        let resp = self
            .client
            .send_with_retry(self.client.http().get(url), Some(&RetryConfig::disabled()))
            .await?;
        let body = net::get_text(resp, "translate", &self.target).await?;
        parse_segments(&body)
    }
}

impl Translator for GoogleTranslator {
    fn translate<'a>(&'a self, text: &'a str) -> TranslateFuture<'a> {
        Box::pin(self.request(text))
    }
}

/// Concatenates `body[0][i][0]` over all translated segments.
fn parse_segments(body: &str) -> Result<String, NepseError> {
    let root: Value = serde_json::from_str(body)?;
    let segments = root
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| NepseError::Translation("response has no segment list".into()))?;

    Ok(segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(Value::as_str))
        .collect::<String>())
}
