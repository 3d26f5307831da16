//! Currency Conversion Application Service
//!
//! Orchestrates the conversion pipeline through the provider ports and the
//! symbol cache. Contains NO infrastructure logic - pure business orchestration.

use std::sync::Arc;
use std::time::Instant;

use converter_types::provider_codes::{self, INVALID_SYMBOLS};
use converter_types::{
    AppError, BuiltinLocales, CONVERTED_AMOUNT_SCALE, ConversionRequest, ConversionResult,
    ConversionStage, Locale, LocaleCatalog, RateProvider, SymbolMap, SymbolProvider,
};
use rust_decimal::Decimal;

use crate::cache::SymbolCache;

/// Application service for currency conversion.
///
/// Generic over the two provider ports - adapters are injected at compile time.
/// The symbol cache is shared, so several services (or a restarted one) can
/// reuse the same validators and content.
pub struct ConversionService<S: SymbolProvider, R: RateProvider> {
    symbols: S,
    rates: R,
    cache: Arc<SymbolCache>,
    locales: Arc<dyn LocaleCatalog>,
}

impl<S: SymbolProvider, R: RateProvider> ConversionService<S, R> {
    /// Creates a service backed by the built-in locale table.
    pub fn new(symbols: S, rates: R, cache: Arc<SymbolCache>) -> Self {
        Self {
            symbols,
            rates,
            cache,
            locales: Arc::new(BuiltinLocales),
        }
    }

    /// Replaces the locale catalog.
    pub fn with_locales(mut self, locales: Arc<dyn LocaleCatalog>) -> Self {
        self.locales = locales;
        self
    }

    pub fn cache(&self) -> &SymbolCache {
        &self.cache
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `monetary_value` from the source to the target currency.
    ///
    /// Each stage fails fast; nothing is retried and cache updates made before
    /// a failure are kept.
    #[tracing::instrument(
        skip(self, req),
        fields(source = %req.source_currency, target = %req.target_currency)
    )]
    pub async fn convert(&self, req: ConversionRequest) -> Result<ConversionResult, AppError> {
        let started = Instant::now();
        let mut stage = ConversionStage::Start;

        let outcome = self.run(&req, &mut stage).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            Ok(result) => tracing::info!(
                elapsed_ms,
                converted_amount = %result.converted_amount,
                locale = %result.locale,
                "Conversion completed"
            ),
            Err(err) => tracing::warn!(
                elapsed_ms,
                %stage,
                status_code = err.status_code(),
                error = %err,
                "Conversion aborted"
            ),
        }

        outcome
    }

    async fn run(
        &self,
        req: &ConversionRequest,
        stage: &mut ConversionStage,
    ) -> Result<ConversionResult, AppError> {
        let fresh = self.revalidate_symbols().await?;
        // A code is supported when the cache or the body just fetched lists it.
        // Bodies without an ETag are never merged, so both are consulted.
        let supported = |code: &str| {
            self.cache.contains_ignore_case(code)
                || fresh
                    .as_ref()
                    .is_some_and(|s| s.keys().any(|k| k.eq_ignore_ascii_case(code)))
        };
        if !supported(&req.source_currency) || !supported(&req.target_currency) {
            return Err(AppError::InvalidCurrency);
        }
        *stage = ConversionStage::SymbolsValidated;

        let quote = self
            .rates
            .fetch_rates(&req.source_currency, &req.target_currency)
            .await
            .map_err(AppError::from_rates)?;
        *stage = ConversionStage::RatesFetched;

        let exchange_rate = quote
            .rate_for(&req.target_currency)
            .ok_or_else(invalid_symbols)?;
        *stage = ConversionStage::RateSelected;

        let locale = self.resolve_locale(&req.language)?;
        *stage = ConversionStage::LocaleResolved;

        let converted_value = compute(exchange_rate, req.monetary_value)?;
        *stage = ConversionStage::Computed;

        let converted_amount = self
            .locales
            .format(converted_value, locale, CONVERTED_AMOUNT_SCALE);
        *stage = ConversionStage::Formatted;

        let result = ConversionResult {
            source_currency: req.source_currency.clone(),
            target_currency: req.target_currency.clone(),
            exchange_rate,
            monetary_value: req.monetary_value,
            converted_value,
            converted_amount,
            locale,
        };
        *stage = ConversionStage::Done;
        Ok(result)
    }

    /// Revalidates the symbol cache against the provider.
    ///
    /// Returns the symbols carried by the response body, if any, so that
    /// validation also works with providers that send no `ETag`.
    async fn revalidate_symbols(&self) -> Result<Option<SymbolMap>, AppError> {
        let validators = self.cache.validators();
        let fetch = self
            .symbols
            .fetch_supported_symbols(&validators)
            .await
            .map_err(AppError::from_symbols)?;

        if fetch.is_not_modified() {
            tracing::debug!("Supported currencies not modified");
        }
        self.cache.merge(&fetch);
        Ok(fetch.symbols)
    }

    fn resolve_locale(&self, language: &str) -> Result<Locale, AppError> {
        let unsupported = || AppError::UnsupportedLocale(language.to_string());
        let ranges = locale_format::parse_accept_language(language).map_err(|e| {
            tracing::debug!(error = %e, "Unparseable language preference");
            unsupported()
        })?;

        ranges
            .iter()
            .filter(|range| !range.is_wildcard())
            .find_map(|range| self.locales.resolve(range.primary_language()))
            .ok_or_else(unsupported)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Supported Symbols
    // ─────────────────────────────────────────────────────────────────────────────

    /// Fetches the provider's current symbol list without touching the cache.
    #[tracing::instrument(skip(self))]
    pub async fn supported_symbols(&self) -> Result<SymbolMap, AppError> {
        let fetch = self
            .symbols
            .fetch_supported_symbols(&Default::default())
            .await
            .map_err(AppError::from_symbols)?;

        fetch
            .symbols
            .ok_or_else(|| AppError::Internal("Provider returned no symbols".into()))
    }
}

fn invalid_symbols() -> AppError {
    AppError::UpstreamRates {
        code: INVALID_SYMBOLS,
        description: provider_codes::describe(INVALID_SYMBOLS)
            .unwrap_or_default()
            .to_string(),
    }
}

/// `rate * value`, rounded half-up to the converted amount scale.
fn compute(rate: Decimal, value: Decimal) -> Result<Decimal, AppError> {
    rate.checked_mul(value)
        .map(|amount| locale_format::round_half_up(amount, CONVERTED_AMOUNT_SCALE))
        .ok_or_else(|| AppError::Internal("Converted amount out of range".into()))
}
