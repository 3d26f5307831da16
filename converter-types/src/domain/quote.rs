//! Exchange rate quote returned by the provider for a single request.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Latest rates relative to `base`. Owned by the request that fetched it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeQuote {
    pub base: String,
    pub timestamp: i64,
    pub date: Option<NaiveDate>,
    pub rates: HashMap<String, Decimal>,
}

impl ExchangeQuote {
    /// Finds the rate for `code`, matching the currency code case-insensitively.
    pub fn rate_for(&self, code: &str) -> Option<Decimal> {
        self.rates
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(code))
            .map(|(_, rate)| *rate)
    }
}
