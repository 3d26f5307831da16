//! Supported symbols provider port.

use crate::domain::{SymbolsFetch, Validators};

use super::UpstreamError;

/// Port trait for the provider's "supported symbols" endpoint.
#[async_trait::async_trait]
pub trait SymbolProvider: Send + Sync + 'static {
    /// Fetches the supported currencies.
    ///
    /// When `validators` allow it the request is conditional
    /// (`If-None-Match` / `If-Modified-Since`), and a `304` comes back as a
    /// `SymbolsFetch` without symbols. Classified provider errors are
    /// returned as `UpstreamError::Provider`.
    async fn fetch_supported_symbols(
        &self,
        validators: &Validators,
    ) -> Result<SymbolsFetch, UpstreamError>;
}
