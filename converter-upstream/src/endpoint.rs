//! Provider URL composition.

use reqwest::Url;

/// Builds a provider request URL from an endpoint and query parameters.
///
/// Values are percent-encoded.
#[derive(Debug, Clone)]
pub struct ProviderUrl {
    url: Url,
}

impl ProviderUrl {
    pub fn new(endpoint: Url) -> Self {
        Self { url: endpoint }
    }

    pub fn with_access_key(self, access_key: &str) -> Self {
        self.with_param("access_key", access_key)
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(key, value);
        self
    }

    pub fn build(self) -> Url {
        self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_rates_url() {
        let url = ProviderUrl::new(Url::parse("http://api.example.com/v1/latest").unwrap())
            .with_access_key("secret")
            .with_param("base", "EUR")
            .with_param("symbols", "USD")
            .build();

        assert_eq!(
            url.as_str(),
            "http://api.example.com/v1/latest?access_key=secret&base=EUR&symbols=USD"
        );
    }

    #[test]
    fn test_encodes_values() {
        let url = ProviderUrl::new(Url::parse("http://api.example.com/v1/latest").unwrap())
            .with_param("symbols", "US D&x=1")
            .build();

        assert_eq!(url.query(), Some("symbols=US+D%26x%3D1"));
    }
}
