//! Sending provider requests and classifying their responses.

use converter_types::provider_codes::{self, UNSUCCESSFUL_RESPONSE};
use converter_types::{ProviderEnvelope, UpstreamError};
use reqwest::header::{HeaderMap, HeaderName};
use reqwest::{RequestBuilder, StatusCode};

/// Request URLs carry the access key, so they are stripped from the message.
fn transport_error(err: reqwest::Error) -> UpstreamError {
    UpstreamError::Transport(err.without_url().to_string())
}

/// A provider response that passed classification.
pub(crate) struct ProviderResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ProviderResponse {
    pub fn header(&self, name: HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }
}

/// Sends `request` and classifies the result against the provider code table.
///
/// Table matches fail regardless of the transport status. Any other
/// unsuccessful status except `304 Not Modified` fails with that status.
pub(crate) async fn send_classified(
    request: RequestBuilder,
) -> Result<ProviderResponse, UpstreamError> {
    let response = request
        .send()
        .await
        .map_err(transport_error)?;

    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .text()
        .await
        .map_err(transport_error)?;

    tracing::debug!(status = status.as_u16(), bytes = body.len(), "Provider response received");

    let embedded = ProviderEnvelope::embedded_code(&body);
    if let Some(failure) = provider_codes::classify(status.as_u16(), embedded) {
        tracing::warn!(code = failure.code, "Provider reported an error");
        return Err(UpstreamError::Provider {
            code: failure.code,
            description: failure.description.to_string(),
        });
    }

    if !status.is_success() && status != StatusCode::NOT_MODIFIED {
        tracing::warn!(status = status.as_u16(), "Provider returned an unsuccessful status");
        return Err(UpstreamError::Provider {
            code: status.as_u16(),
            description: UNSUCCESSFUL_RESPONSE.to_string(),
        });
    }

    Ok(ProviderResponse {
        status,
        headers,
        body,
    })
}
