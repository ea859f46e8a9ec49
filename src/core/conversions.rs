//! Small conversions shared by the fetchers, the stores and the pipeline stages.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Asia::Kathmandu;
use chrono_tz::Tz;
use url::Url;

/// Domain label used when an article carries no usable media URL.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Date-time layouts seen in the news feed and in hand-edited CSV files.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Date-only layouts; these resolve to local midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%B %d, %Y"];

/// Host portion of a media URL, the key used for source credibility.
///
/// Empty or unparseable URLs map to [`UNKNOWN_DOMAIN`].
pub fn source_domain(media_url: &str) -> String {
    let trimmed = media_url.trim();
    if trimmed.is_empty() {
        return UNKNOWN_DOMAIN.to_string();
    }
    Url::parse(trimmed)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_DOMAIN.to_string())
}

/// Parses a publish date in any of the accepted layouts.
///
/// Zoned values (RFC 3339, including a trailing `Z`) keep their offset. Naive values are
/// Nepal local time, the zone the feed publishes in.
pub fn parse_publish_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    match Kathmandu.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// Converts a unix timestamp in milliseconds (the candle API's unit) to UTC.
pub fn ms_to_utc(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

/// Current wall-clock time in Nepal (+05:45), used to stamp prediction rows.
pub fn kathmandu_now() -> DateTime<Tz> {
    Utc::now().with_timezone(&Kathmandu)
}
