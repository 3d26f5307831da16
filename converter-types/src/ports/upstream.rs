//! Error type shared by the provider ports.

/// Error type for exchange rate provider calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpstreamError {
    /// Response classified as failed by the provider code table.
    #[error("{description}")]
    Provider { code: u16, description: String },

    #[error("Upstream request failed: {0}")]
    Transport(String),

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    #[error("Upstream returned an empty response")]
    EmptyResponse,
}
