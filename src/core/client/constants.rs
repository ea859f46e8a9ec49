//! Centralized constants for default endpoints and UA.

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// ShareHub "khula manch" post feed (news items are a media type of it).
pub(crate) const DEFAULT_BASE_NEWS: &str =
    "https://sharehubnepal.com/account/api/v1/khula-manch/post";

/// ShareHub candle chart history endpoint.
pub(crate) const DEFAULT_BASE_CANDLES: &str =
    "https://sharehubnepal.com/data/api/v1/candle-chart/history";

/// Google translate "gtx" endpoint used for Nepali → English pivoting.
pub(crate) const DEFAULT_BASE_TRANSLATE: &str = "https://translate.googleapis.com/translate_a/single";

/// Per-request timeout applied unless the builder overrides it.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;
