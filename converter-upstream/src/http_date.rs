//! HTTP-date (RFC 7231 IMF-fixdate) helpers for `Date` and `If-Modified-Since`.

use chrono::{DateTime, Utc};

/// Formats a timestamp as an IMF-fixdate, e.g. `Wed, 21 Oct 2015 07:28:00 GMT`.
pub fn format(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parses an HTTP `Date` header value.
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|at| at.with_timezone(&Utc))
}
