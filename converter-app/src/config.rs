//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::Context;
use converter_upstream::{ProviderConfig, Url, security};

const DEFAULT_PORT: u16 = 8092;
const DEFAULT_SYMBOLS_URL: &str = "http://api.exchangeratesapi.io/v1/symbols";
const DEFAULT_RATES_URL: &str = "http://api.exchangeratesapi.io/v1/latest";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub provider: ProviderConfig,
    /// OTLP collector endpoint. Trace export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().with_context(|| format!("Invalid PORT: {}", raw))?,
            None => DEFAULT_PORT,
        };

        let encoded_key = lookup("EXCHANGE_ACCESS_KEY")
            .ok_or_else(|| anyhow::anyhow!("EXCHANGE_ACCESS_KEY environment variable is required"))?;
        let access_key = security::decode_access_key(&encoded_key)
            .context("EXCHANGE_ACCESS_KEY must be a base64-encoded access key")?;

        let symbols_url = parse_url(lookup("SYMBOLS_URL"), DEFAULT_SYMBOLS_URL, "SYMBOLS_URL")?;
        let rates_url = parse_url(lookup("RATES_URL"), DEFAULT_RATES_URL, "RATES_URL")?;

        let timeout_secs = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid UPSTREAM_TIMEOUT_SECS: {}", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.trim().is_empty());

        Ok(Self {
            port,
            provider: ProviderConfig {
                symbols_url,
                rates_url,
                access_key,
                timeout: Duration::from_secs(timeout_secs),
            },
            otlp_endpoint,
        })
    }
}

fn parse_url(value: Option<String>, default: &str, name: &str) -> anyhow::Result<Url> {
    let raw = value.unwrap_or_else(|| default.to_string());
    Url::parse(&raw).with_context(|| format!("Invalid {}: {}", name, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        // "c2VjcmV0" is base64 for "secret"
        let config = load(&[("EXCHANGE_ACCESS_KEY", "c2VjcmV0")]).unwrap();

        assert_eq!(config.port, 8092);
        assert_eq!(config.provider.access_key, "secret");
        assert_eq!(config.provider.symbols_url.as_str(), DEFAULT_SYMBOLS_URL);
        assert_eq!(config.provider.rates_url.as_str(), DEFAULT_RATES_URL);
        assert_eq!(config.provider.timeout, Duration::from_secs(30));
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("EXCHANGE_ACCESS_KEY", "c2VjcmV0"),
            ("PORT", "9000"),
            ("SYMBOLS_URL", "http://localhost:8080/v1/symbols"),
            ("UPSTREAM_TIMEOUT_SECS", "5"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.provider.symbols_url.port(), Some(8080));
        assert_eq!(config.provider.timeout, Duration::from_secs(5));
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
    }

    #[test]
    fn test_access_key_is_required_and_decoded() {
        assert!(load(&[]).is_err());
        assert!(load(&[("EXCHANGE_ACCESS_KEY", "not base64!")]).is_err());
    }

    #[test]
    fn test_invalid_values_fail_fast() {
        assert!(load(&[("EXCHANGE_ACCESS_KEY", "c2VjcmV0"), ("PORT", "http")]).is_err());
        assert!(load(&[("EXCHANGE_ACCESS_KEY", "c2VjcmV0"), ("RATES_URL", "not a url")]).is_err());
    }
}
