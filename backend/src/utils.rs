use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO8601_DURATION: Regex = Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").unwrap();
}

/// Parse an ISO8601 duration token (PT1H2M3S) to total seconds.
///
/// Every unit is optional and defaults to 0. A token that does not match
/// the PT shape at all counts as zero-length instead of failing, so a
/// single malformed record cannot take down a whole result page.
pub fn parse_duration_seconds(token: &str) -> i64 {
    let Some(caps) = ISO8601_DURATION.captures(token) else {
        return 0;
    };

    let unit = |index: usize| {
        caps.get(index)
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .unwrap_or(0)
    };

    unit(1) * 3600 + unit(2) * 60 + unit(3)
}

/// Parse an RFC3339 publish timestamp. Unparseable input degrades to the
/// Unix epoch rather than erroring out.
pub fn parse_published_at(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>().unwrap_or(DateTime::UNIX_EPOCH)
}
