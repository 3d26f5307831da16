//! Integration tests for the HTTP API.
//!
//! The router is driven in-process with stub provider ports.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use converter_hex::{ConversionService, SymbolCache, inbound::HttpServer};
use converter_types::{
    ExchangeQuote, RateProvider, SymbolMap, SymbolProvider, SymbolsFetch, UpstreamError,
    Validators,
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

struct StubSymbols {
    result: Result<SymbolMap, UpstreamError>,
}

#[async_trait]
impl SymbolProvider for StubSymbols {
    async fn fetch_supported_symbols(
        &self,
        _validators: &Validators,
    ) -> Result<SymbolsFetch, UpstreamError> {
        let symbols = self.result.clone()?;
        Ok(SymbolsFetch {
            status: 200,
            etag: Some("\"upstream-v1\"".into()),
            date: None,
            symbols: Some(symbols),
        })
    }
}

struct StubRates {
    rates: HashMap<String, Decimal>,
}

#[async_trait]
impl RateProvider for StubRates {
    async fn fetch_rates(&self, base: &str, _target: &str) -> Result<ExchangeQuote, UpstreamError> {
        Ok(ExchangeQuote {
            base: base.to_string(),
            timestamp: 1519296206,
            date: None,
            rates: self.rates.clone(),
        })
    }
}

fn symbols() -> SymbolMap {
    [("EUR", "Euro"), ("USD", "United States Dollar"), ("AUD", "Australian Dollar")]
        .into_iter()
        .map(|(c, n)| (c.to_string(), n.to_string()))
        .collect()
}

fn server_with(
    symbols: Result<SymbolMap, UpstreamError>,
    cache: Arc<SymbolCache>,
) -> HttpServer<StubSymbols, StubRates> {
    let rates = StubRates {
        rates: HashMap::from([("USD".to_string(), dec!(1.168637))]),
    };
    let service = ConversionService::new(StubSymbols { result: symbols }, rates, cache);
    HttpServer::new(service)
}

fn server() -> HttpServer<StubSymbols, StubRates> {
    server_with(Ok(symbols()), Arc::new(SymbolCache::new()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn convert_uri(source: &str, target: &str, value: &str) -> String {
    format!(
        "/v1/currency-converter/convert?sourceCurrency={}&targetCurrency={}&monetaryValue={}",
        source, target, value
    )
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = server().router().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_convert_defaults_to_english() {
    let response = server()
        .router()
        .oneshot(get(&convert_uri("EUR", "USD", "1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["sourceCurrency"], "EUR");
    assert_eq!(json["targetCurrency"]["targetCurrency"], "USD");
    assert_eq!(json["targetCurrency"]["exchangeRate"].as_f64(), Some(1.168637));
    assert_eq!(json["monetaryValue"].as_f64(), Some(1.0));
    assert_eq!(json["convertedAmount"], "1.168637");
}

#[tokio::test]
async fn test_convert_uses_accept_language() {
    let request = Request::builder()
        .uri(convert_uri("EUR", "USD", "1e3"))
        .header(header::ACCEPT_LANGUAGE, "de-AT;q=0.9, xx")
        .body(Body::empty())
        .unwrap();

    let response = server().router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["convertedAmount"], "1.168,637000");
}

#[tokio::test]
async fn test_convert_empty_accept_language_defaults_to_english() {
    let request = Request::builder()
        .uri(convert_uri("EUR", "USD", "1"))
        .header(header::ACCEPT_LANGUAGE, "")
        .body(Body::empty())
        .unwrap();

    let response = server().router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["convertedAmount"], "1.168637");
}

#[tokio::test]
async fn test_convert_unknown_currency() {
    let response = server()
        .router()
        .oneshot(get(&convert_uri("EUR", "XXX", "1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["statusCode"], 400);
    assert_eq!(
        json["message"],
        "Either source currency or target currency is not supported"
    );
}

#[tokio::test]
async fn test_convert_unsupported_locale() {
    let request = Request::builder()
        .uri(convert_uri("EUR", "USD", "1"))
        .header(header::ACCEPT_LANGUAGE, "xx")
        .body(Body::empty())
        .unwrap();

    let response = server().router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    let json = json_body(response).await;
    assert_eq!(json["statusCode"], 406);
    assert_eq!(json["message"], "No such Locale xx supported yet");
}

#[tokio::test]
async fn test_convert_missing_and_invalid_amount() {
    let missing = server()
        .router()
        .oneshot(get(
            "/v1/currency-converter/convert?sourceCurrency=EUR&targetCurrency=USD",
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    let json = json_body(missing).await;
    assert!(json["message"].as_str().unwrap().contains("monetaryValue"));

    let invalid = server()
        .router()
        .oneshot(get(&convert_uri("EUR", "USD", "abc")))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(invalid).await["statusCode"], 400);
}

#[tokio::test]
async fn test_convert_missing_rate_reports_provider_code() {
    let response = server()
        .router()
        .oneshot(get(&convert_uri("EUR", "AUD", "1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["statusCode"], 202);
    assert_eq!(
        json["message"],
        "One or more invalid symbols have been specified."
    );
}

#[tokio::test]
async fn test_convert_symbols_failure_keeps_provider_status() {
    let failure = UpstreamError::Provider {
        code: 429,
        description: "Your monthly usage limit has been reached. Please upgrade your Subscription Plan.".into(),
    };
    let server = server_with(Err(failure), Arc::new(SymbolCache::new()));

    let response = server
        .router()
        .oneshot(get(&convert_uri("EUR", "USD", "1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json_body(response).await["statusCode"], 429);
}

// ─────────────────────────────────────────────────────────────────────────────
// Supported Symbols
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_symbols_carries_validators() {
    let cache = Arc::new(SymbolCache::new());
    let response = server_with(Ok(symbols()), cache.clone())
        .router()
        .oneshot(get("/v1/currency-converter/symbols"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let etag = response.headers().get(header::ETAG).unwrap().to_str().unwrap();
    assert!(etag.starts_with('"') && etag.ends_with('"'));
    assert!(response.headers().contains_key(header::DATE));

    let json = json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["symbols"]["EUR"], "Euro");
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_symbols_not_modified_for_matching_etag() {
    let app = server().router();

    let first = app
        .clone()
        .oneshot(get("/v1/currency-converter/symbols"))
        .await
        .unwrap();
    let etag = first.headers().get(header::ETAG).unwrap().clone();

    let request = Request::builder()
        .uri("/v1/currency-converter/symbols")
        .header(header::IF_NONE_MATCH, etag.clone())
        .body(Body::empty())
        .unwrap();
    let second = app.oneshot(request).await.unwrap();

    assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(second.headers().get(header::ETAG), Some(&etag));
    let body = second.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_symbols_upstream_failure() {
    let failure = UpstreamError::Provider {
        code: 101,
        description: "No API Key was specified or an invalid API Key was specified.".into(),
    };
    let response = server_with(Err(failure), Arc::new(SymbolCache::new()))
        .router()
        .oneshot(get("/v1/currency-converter/symbols"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["statusCode"], 101);
}
