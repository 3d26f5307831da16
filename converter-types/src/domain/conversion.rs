//! Conversion request, result and pipeline stages.

use std::fmt;

use rust_decimal::Decimal;

use crate::Locale;

/// Number of fractional digits in a converted amount.
pub const CONVERTED_AMOUNT_SCALE: u32 = 6;

/// A parsed conversion request. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub source_currency: String,
    pub target_currency: String,
    pub monetary_value: Decimal,
    /// Raw language preference list, e.g. `de-CH, en;q=0.8`.
    pub language: String,
}

impl ConversionRequest {
    pub fn new(
        source_currency: impl Into<String>,
        target_currency: impl Into<String>,
        monetary_value: Decimal,
        language: impl Into<String>,
    ) -> Self {
        Self {
            source_currency: source_currency.into(),
            target_currency: target_currency.into(),
            monetary_value,
            language: language.into(),
        }
    }
}

/// The outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub source_currency: String,
    pub target_currency: String,
    pub exchange_rate: Decimal,
    pub monetary_value: Decimal,
    /// Rounded amount before formatting.
    pub converted_value: Decimal,
    /// Locale-formatted amount with exactly six fractional digits.
    pub converted_amount: String,
    pub locale: Locale,
}

/// Stages of the conversion pipeline, in order.
///
/// Each stage either advances to the next or aborts the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConversionStage {
    Start,
    SymbolsValidated,
    RatesFetched,
    RateSelected,
    LocaleResolved,
    Computed,
    Formatted,
    Done,
}

impl fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConversionStage::Start => "start",
            ConversionStage::SymbolsValidated => "symbols_validated",
            ConversionStage::RatesFetched => "rates_fetched",
            ConversionStage::RateSelected => "rate_selected",
            ConversionStage::LocaleResolved => "locale_resolved",
            ConversionStage::Computed => "computed",
            ConversionStage::Formatted => "formatted",
            ConversionStage::Done => "done",
        };
        f.write_str(name)
    }
}
