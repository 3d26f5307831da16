//! HTTP adapter for the provider's latest rates endpoint.

use async_trait::async_trait;
use chrono::NaiveDate;
use converter_types::{ExchangeQuote, LatestRates, RateProvider, UpstreamError};
use reqwest::{Client, Url};
use tracing::instrument;

use crate::endpoint::ProviderUrl;
use crate::response::send_classified;

/// Fetches the latest rate for one base/target pair.
#[derive(Clone)]
pub struct HttpRateFetcher {
    client: Client,
    endpoint: Url,
    access_key: String,
}

impl HttpRateFetcher {
    pub fn new(client: Client, endpoint: Url, access_key: &str) -> Self {
        Self {
            client,
            endpoint,
            access_key: access_key.to_string(),
        }
    }

    fn url_for(&self, base: &str, target: &str) -> Url {
        ProviderUrl::new(self.endpoint.clone())
            .with_access_key(&self.access_key)
            .with_param("base", base)
            .with_param("symbols", target)
            .build()
    }
}

#[async_trait]
impl RateProvider for HttpRateFetcher {
    #[instrument(skip(self))]
    async fn fetch_rates(&self, base: &str, target: &str) -> Result<ExchangeQuote, UpstreamError> {
        let response = send_classified(self.client.get(self.url_for(base, target))).await?;
        if !response.has_body() {
            return Err(UpstreamError::EmptyResponse);
        }

        let latest: LatestRates = serde_json::from_str(&response.body)
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        Ok(ExchangeQuote {
            base: latest.base,
            timestamp: latest.timestamp,
            date: latest
                .date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
            rates: latest.rates,
        })
    }
}
