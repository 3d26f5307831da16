//! HTTP adapter for the provider's supported symbols endpoint.

use async_trait::async_trait;
use converter_types::{SupportedSymbols, SymbolProvider, SymbolsFetch, UpstreamError, Validators};
use reqwest::header::{DATE, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH};
use reqwest::{Client, StatusCode, Url};
use tracing::instrument;

use crate::endpoint::ProviderUrl;
use crate::http_date;
use crate::response::send_classified;

/// Fetches supported symbols, conditionally when validators are known.
#[derive(Clone)]
pub struct HttpSymbolFetcher {
    client: Client,
    url: Url,
}

impl HttpSymbolFetcher {
    pub fn new(client: Client, endpoint: Url, access_key: &str) -> Self {
        let url = ProviderUrl::new(endpoint).with_access_key(access_key).build();
        Self { client, url }
    }
}

#[async_trait]
impl SymbolProvider for HttpSymbolFetcher {
    #[instrument(skip(self, validators), fields(conditional = validators.is_conditional()))]
    async fn fetch_supported_symbols(
        &self,
        validators: &Validators,
    ) -> Result<SymbolsFetch, UpstreamError> {
        tracing::info!("Invoking symbols API");

        let mut request = self.client.get(self.url.clone());
        if let Some((etag, since)) = validators.conditional() {
            request = request
                .header(IF_NONE_MATCH, etag)
                .header(IF_MODIFIED_SINCE, http_date::format(since));
        }

        let response = send_classified(request).await?;

        let symbols = if response.status == StatusCode::NOT_MODIFIED || !response.has_body() {
            None
        } else {
            let payload: SupportedSymbols = serde_json::from_str(&response.body)
                .map_err(|e| UpstreamError::Decode(e.to_string()))?;
            Some(payload.symbols)
        };

        Ok(SymbolsFetch {
            status: response.status.as_u16(),
            etag: response.header(ETAG).map(str::to_string),
            date: response.header(DATE).and_then(http_date::parse),
            symbols,
        })
    }
}
