//! Data Transfer Objects (DTOs) for the HTTP API and the provider wire format.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{ConversionRequest, ConversionResult, SymbolMap};
use crate::error::AppError;

/// Language used when the caller sends no `Accept-Language` header.
pub const DEFAULT_LANGUAGE: &str = "en";

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters of the conversion endpoint.
///
/// Fields are optional so that missing parameters surface as a structured
/// `400` rather than an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionQuery {
    pub source_currency: Option<String>,
    pub target_currency: Option<String>,
    pub monetary_value: Option<String>,
}

impl ConversionQuery {
    /// Validates the parameters and builds a domain request.
    pub fn into_request(self, language: Option<&str>) -> Result<ConversionRequest, AppError> {
        let source = required(self.source_currency, "sourceCurrency")?;
        let target = required(self.target_currency, "targetCurrency")?;
        let raw_value = required(self.monetary_value, "monetaryValue")?;
        let monetary_value = parse_decimal(&raw_value).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid monetaryValue: {}", raw_value))
        })?;

        Ok(ConversionRequest::new(
            source,
            target,
            monetary_value,
            language.unwrap_or(DEFAULT_LANGUAGE),
        ))
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing required parameter: {}", name)))
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Target currency together with the rate applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRate {
    pub target_currency: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub exchange_rate: Decimal,
}

/// Response of the conversion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    pub source_currency: String,
    pub target_currency: TargetRate,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub monetary_value: Decimal,
    pub converted_amount: String,
}

impl From<ConversionResult> for ConversionResponse {
    fn from(result: ConversionResult) -> Self {
        Self {
            source_currency: result.source_currency,
            target_currency: TargetRate {
                target_currency: result.target_currency,
                exchange_rate: result.exchange_rate,
            },
            monetary_value: result.monetary_value,
            converted_amount: result.converted_amount,
        }
    }
}

/// Structured error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            status_code: err.status_code(),
            message: err.to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider Wire Format
// ─────────────────────────────────────────────────────────────────────────────

/// Error object embedded in provider bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
}

/// Minimal view of any provider body, used to find an embedded error code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderEnvelope {
    #[serde(default)]
    pub error: Option<ProviderErrorBody>,
}

impl ProviderEnvelope {
    /// Extracts the embedded error code from a raw body, if the body has one.
    pub fn embedded_code(body: &str) -> Option<u16> {
        serde_json::from_str::<ProviderEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error)
            .and_then(|error| error.code)
    }
}

/// Body of the supported symbols endpoint, both upstream and our own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedSymbols {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub symbols: SymbolMap,
}

impl SupportedSymbols {
    pub fn new(symbols: SymbolMap) -> Self {
        Self {
            success: true,
            symbols,
        }
    }
}

/// Body of the provider's latest rates endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LatestRates {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub rates: HashMap<String, Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn query(source: &str, target: &str, value: &str) -> ConversionQuery {
        ConversionQuery {
            source_currency: Some(source.into()),
            target_currency: Some(target.into()),
            monetary_value: Some(value.into()),
        }
    }

    #[test]
    fn test_query_into_request() {
        let req = query("EUR", "USD", "12.50").into_request(None).unwrap();
        assert_eq!(req.source_currency, "EUR");
        assert_eq!(req.target_currency, "USD");
        assert_eq!(req.monetary_value, dec!(12.50));
        assert_eq!(req.language, "en");
    }

    #[test]
    fn test_query_accepts_scientific_notation() {
        let req = query("EUR", "USD", "1e3").into_request(Some("de")).unwrap();
        assert_eq!(req.monetary_value, dec!(1000));
        assert_eq!(req.language, "de");
    }

    #[test]
    fn test_query_missing_parameter() {
        let mut q = query("EUR", "USD", "1");
        q.target_currency = None;
        let err = q.into_request(None).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("targetCurrency")));
    }

    #[test]
    fn test_query_invalid_amount() {
        let err = query("EUR", "USD", "ten").into_request(None).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_response_serializes_camel_case_numbers() {
        let response = ConversionResponse {
            source_currency: "EUR".into(),
            target_currency: TargetRate {
                target_currency: "USD".into(),
                exchange_rate: dec!(1.168637),
            },
            monetary_value: dec!(1),
            converted_amount: "1.168637".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["sourceCurrency"], "EUR");
        assert_eq!(json["targetCurrency"]["targetCurrency"], "USD");
        assert_eq!(json["targetCurrency"]["exchangeRate"], 1.168637);
        assert_eq!(json["monetaryValue"], 1.0);
        assert_eq!(json["convertedAmount"], "1.168637");
    }

    #[test]
    fn test_response_keeps_all_significant_digits() {
        let response = ConversionResponse {
            source_currency: "EUR".into(),
            target_currency: TargetRate {
                target_currency: "USD".into(),
                exchange_rate: dec!(1.2345678901234567890123456),
            },
            monetary_value: dec!(98765432109876543.21),
            converted_amount: String::new(),
        };
        let body = serde_json::to_string(&response).unwrap();
        assert!(body.contains(r#""exchangeRate":1.2345678901234567890123456"#));
        assert!(body.contains(r#""monetaryValue":98765432109876543.21"#));

        let decoded: ConversionResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn test_embedded_code_extraction() {
        let body = r#"{"success":false,"error":{"code":101,"type":"invalid_access_key"}}"#;
        assert_eq!(ProviderEnvelope::embedded_code(body), Some(101));
        assert_eq!(ProviderEnvelope::embedded_code(r#"{"success":true}"#), None);
        assert_eq!(ProviderEnvelope::embedded_code("not json"), None);
    }

    #[test]
    fn test_latest_rates_decode_keeps_precision() {
        let body = r#"{"success":true,"timestamp":1519296206,"base":"EUR","date":"2021-03-17",
            "rates":{"AUD":1.607026,"USD":1.168637}}"#;
        let rates: LatestRates = serde_json::from_str(body).unwrap();
        assert_eq!(rates.base, "EUR");
        assert_eq!(rates.rates["USD"], dec!(1.168637));
    }

    #[test]
    fn test_latest_rates_decode_beyond_float_precision() {
        let body = r#"{"success":true,"base":"EUR","rates":{"BTC":0.0000215432109876543210987}}"#;
        let rates: LatestRates = serde_json::from_str(body).unwrap();
        assert_eq!(rates.rates["BTC"], dec!(0.0000215432109876543210987));
    }
}
