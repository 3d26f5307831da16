//! # Converter Client SDK
//!
//! A typed Rust client for the currency converter API.

use converter_types::{ConversionResponse, ErrorResponse, SupportedSymbols, SymbolMap};
use reqwest::header::{ACCEPT_LANGUAGE, ETAG, IF_NONE_MATCH};
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// `status` is the `statusCode` reported by the API, which for provider
    /// failures is the provider's own code rather than the HTTP status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of a conditional symbols request.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolsFetchOutcome {
    /// The server sent a (new) symbol list.
    Fresh {
        etag: Option<String>,
        symbols: SymbolMap,
    },
    /// The caller's ETag is still current.
    NotModified,
}

/// Currency converter API client.
pub struct ConverterClient {
    base_url: String,
    http: Client,
}

impl ConverterClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Converts `amount` from `source` to `target`.
    ///
    /// `language` is sent as `Accept-Language`; the server defaults to `en`.
    pub async fn convert(
        &self,
        source: &str,
        target: &str,
        amount: Decimal,
        language: Option<&str>,
    ) -> Result<ConversionResponse, ClientError> {
        let amount = amount.to_string();
        let mut req = self
            .http
            .get(format!("{}/v1/currency-converter/convert", self.base_url))
            .query(&[
                ("sourceCurrency", source),
                ("targetCurrency", target),
                ("monetaryValue", amount.as_str()),
            ]);
        if let Some(language) = language {
            req = req.header(ACCEPT_LANGUAGE, language);
        }
        let resp = req.send().await?;
        handle_response(resp).await
    }

    /// Lists the supported currencies, revalidating against `if_none_match`.
    pub async fn supported_symbols(
        &self,
        if_none_match: Option<&str>,
    ) -> Result<SymbolsFetchOutcome, ClientError> {
        let mut req = self
            .http
            .get(format!("{}/v1/currency-converter/symbols", self.base_url));
        if let Some(etag) = if_none_match {
            req = req.header(IF_NONE_MATCH, etag);
        }
        let resp = req.send().await?;

        if resp.status() == StatusCode::NOT_MODIFIED {
            return Ok(SymbolsFetchOutcome::NotModified);
        }

        let etag = resp
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body: SupportedSymbols = handle_response(resp).await?;

        Ok(SymbolsFetchOutcome::Fresh {
            etag,
            symbols: body.symbols,
        })
    }
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(api_error(status, body))
    }
}

fn api_error(status: StatusCode, body: String) -> ClientError {
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error) => ClientError::Api {
            status: error.status_code,
            message: error.message,
        },
        Err(_) => ClientError::Api {
            status: status.as_u16(),
            message: body,
        },
    }
}
