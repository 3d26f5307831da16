//! # Converter Upstream
//!
//! Outbound adapters for the currency converter.
//! This crate provides reqwest-based clients that implement the
//! `SymbolProvider` and `RateProvider` ports against an
//! exchangeratesapi.io-compatible provider.

use std::time::Duration;

use reqwest::Client;

mod endpoint;
pub mod http_date;
mod rates;
mod response;
pub mod security;
mod symbols;

pub use endpoint::ProviderUrl;
pub use rates::HttpRateFetcher;
pub use reqwest::Url;
pub use symbols::HttpSymbolFetcher;

/// Where and how to reach the exchange rate provider.
#[derive(Clone)]
pub struct ProviderConfig {
    pub symbols_url: Url,
    pub rates_url: Url,
    /// Decoded access credential appended as `access_key`.
    pub access_key: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("symbols_url", &self.symbols_url.as_str())
            .field("rates_url", &self.rates_url.as_str())
            .field("access_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builds both provider adapters sharing one HTTP client.
///
/// # Examples
///
/// ```ignore
/// let (symbols, rates) = build_providers(&config)?;
/// let service = ConversionService::new(symbols, rates, Arc::new(SymbolCache::new()));
/// ```
pub fn build_providers(
    config: &ProviderConfig,
) -> anyhow::Result<(HttpSymbolFetcher, HttpRateFetcher)> {
    let client = Client::builder().timeout(config.timeout).build()?;

    let symbols = HttpSymbolFetcher::new(
        client.clone(),
        config.symbols_url.clone(),
        &config.access_key,
    );
    let rates = HttpRateFetcher::new(client, config.rates_url.clone(), &config.access_key);

    tracing::debug!(
        symbols_host = config.symbols_url.host_str().unwrap_or_default(),
        rates_host = config.rates_url.host_str().unwrap_or_default(),
        timeout_secs = config.timeout.as_secs(),
        "Provider adapters built"
    );

    Ok((symbols, rates))
}
