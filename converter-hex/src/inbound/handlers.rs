//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{
        HeaderMap, StatusCode,
        header::{ACCEPT_LANGUAGE, CONTENT_TYPE, DATE, ETAG, IF_NONE_MATCH},
    },
    response::{IntoResponse, Response},
};
use chrono::Utc;

use converter_types::{
    AppError, ConversionQuery, ConversionResponse, ErrorResponse, RateProvider, SupportedSymbols,
    SymbolProvider,
};
use converter_upstream::{http_date, security};

use crate::ConversionService;

/// Application state shared across handlers.
pub struct AppState<S: SymbolProvider, R: RateProvider> {
    pub service: ConversionService<S, R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(status_code = self.0.status_code(), error = %self.0, "Request failed");
        }

        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Convert an amount between two currencies.
///
/// The language preference comes from `Accept-Language` and defaults to `en`.
#[tracing::instrument(skip_all)]
pub async fn convert<S: SymbolProvider, R: RateProvider>(
    State(state): State<Arc<AppState<S, R>>>,
    headers: HeaderMap,
    query: Result<Query<ConversionQuery>, QueryRejection>,
) -> Result<Json<ConversionResponse>, ApiError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let language = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let request = query.into_request(language)?;
    tracing::debug!(
        source = %request.source_currency,
        target = %request.target_currency,
        language = %request.language,
        "Conversion requested"
    );

    let result = state.service.convert(request).await?;
    Ok(Json(result.into()))
}

/// Proxy of the provider's supported symbols.
///
/// Answers with a shallow ETag of the body, and with `304 Not Modified` when
/// the client's `If-None-Match` already matches it.
#[tracing::instrument(skip_all)]
pub async fn supported_symbols<S: SymbolProvider, R: RateProvider>(
    State(state): State<Arc<AppState<S, R>>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let symbols = state.service.supported_symbols().await?;

    // Value objects are key-sorted, so equal symbol sets hash to the same ETag.
    let body = serde_json::to_value(SupportedSymbols::new(symbols))
        .and_then(|value| serde_json::to_vec(&value))
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let etag = security::shallow_etag(&body);
    let date = http_date::format(Utc::now());

    let not_modified = headers
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|candidates| security::etag_matches(candidates, &etag));
    if not_modified {
        tracing::debug!(%etag, "Symbols not modified for client");
        return Ok((StatusCode::NOT_MODIFIED, [(ETAG, etag), (DATE, date)]).into_response());
    }

    Ok((
        [
            (CONTENT_TYPE, "application/json".to_string()),
            (ETAG, etag),
            (DATE, date),
        ],
        body,
    )
        .into_response())
}
