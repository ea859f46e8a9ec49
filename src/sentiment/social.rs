use std::sync::LazyLock;

use regex::Regex;

static URLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+").expect("static pattern"));
static HANDLES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[@#]\S+").expect("static pattern"));

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strips links and `@`/`#` tokens from a short-form post.
pub fn clean_social_text(text: &str) -> String {
    let no_urls = URLS.replace_all(text, " ");
    let no_handles = HANDLES.replace_all(&no_urls, " ");
    normalize_whitespace(&no_handles)
}

/// True for reposts (`RT ` prefix), which carry no opinion of their own.
pub fn is_retransmission(text: &str) -> bool {
    text.trim_start().starts_with("RT ")
}
