//! Error types for the conversion service.

use crate::ports::UpstreamError;

/// Application-level errors (for HTTP responses).
///
/// Each variant carries the numeric code reported in the error body.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("Either source currency or target currency is not supported")]
    InvalidCurrency,

    #[error("No such Locale {0} supported yet")]
    UnsupportedLocale(String),

    #[error("{description}")]
    UpstreamSymbols { code: u16, description: String },

    #[error("{description}")]
    UpstreamRates { code: u16, description: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Code reported in the `statusCode` field of the error body.
    ///
    /// Upstream errors report the provider code verbatim.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::InvalidCurrency | AppError::BadRequest(_) => 400,
            AppError::UnsupportedLocale(_) => 406,
            AppError::UpstreamSymbols { code, .. } | AppError::UpstreamRates { code, .. } => *code,
            AppError::Internal(_) => 500,
        }
    }

    /// Transport status for the HTTP response.
    ///
    /// Provider codes outside the 4xx/5xx range (e.g. `202`, `101`) are not
    /// usable as error statuses and map to `502 Bad Gateway`.
    pub fn http_status(&self) -> u16 {
        match self.status_code() {
            code @ 400..=599 => code,
            _ => 502,
        }
    }

    /// Maps a symbols fetch failure onto the taxonomy.
    pub fn from_symbols(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Provider { code, description } => {
                AppError::UpstreamSymbols { code, description }
            }
            other => AppError::Internal(other.to_string()),
        }
    }

    /// Maps a rates fetch failure onto the taxonomy.
    pub fn from_rates(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Provider { code, description } => {
                AppError::UpstreamRates { code, description }
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
