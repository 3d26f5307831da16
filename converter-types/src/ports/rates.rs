//! Exchange rate provider port.

use crate::domain::ExchangeQuote;

use super::UpstreamError;

/// Port trait for the provider's "latest rates" endpoint.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Fetches the latest rate of `target` relative to `base`.
    async fn fetch_rates(&self, base: &str, target: &str) -> Result<ExchangeQuote, UpstreamError>;
}
