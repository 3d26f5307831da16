//! Supported symbols and the validators used to revalidate them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// Currency code to display name, e.g. `USD -> United States Dollar`.
pub type SymbolMap = HashMap<String, String>;

/// HTTP validators remembered from the last modified symbols response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validators {
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl Validators {
    pub fn new(etag: Option<String>, last_modified: Option<DateTime<Utc>>) -> Self {
        Self {
            etag,
            last_modified,
        }
    }

    /// Returns the `(If-None-Match, If-Modified-Since)` pair for a conditional request.
    ///
    /// Both an ETag and a timestamp after the Unix epoch are required; with
    /// either missing the next fetch is unconditional.
    pub fn conditional(&self) -> Option<(&str, DateTime<Utc>)> {
        match (&self.etag, self.last_modified) {
            (Some(etag), Some(since)) if since.timestamp_millis() > 0 => Some((etag.as_str(), since)),
            _ => None,
        }
    }

    pub fn is_conditional(&self) -> bool {
        self.conditional().is_some()
    }
}

/// Outcome of a successful (non-error) symbols request.
///
/// A `304 Not Modified` response legitimately carries no symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolsFetch {
    /// Transport status returned by the provider.
    pub status: u16,
    /// `ETag` response header, if any.
    pub etag: Option<String>,
    /// `Date` response header, if any.
    pub date: Option<DateTime<Utc>>,
    /// Decoded symbol list, absent for empty bodies.
    pub symbols: Option<SymbolMap>,
}

impl SymbolsFetch {
    pub fn is_not_modified(&self) -> bool {
        self.status == 304
    }
}
