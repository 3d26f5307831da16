//! Locale capability port.

use locale_format::Locale;
use rust_decimal::Decimal;

/// Resolves language tags to locales and formats decimals for them.
pub trait LocaleCatalog: Send + Sync + 'static {
    /// Returns the locale whose language subtag matches `tag`, ignoring region.
    fn resolve(&self, tag: &str) -> Option<Locale>;

    /// Formats `value` with exactly `fraction_digits` fractional digits.
    fn format(&self, value: Decimal, locale: Locale, fraction_digits: u32) -> String;
}

/// The locale table compiled into `locale-format`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLocales;

impl LocaleCatalog for BuiltinLocales {
    fn resolve(&self, tag: &str) -> Option<Locale> {
        locale_format::resolve(tag)
    }

    fn format(&self, value: Decimal, locale: Locale, fraction_digits: u32) -> String {
        locale_format::format_decimal(value, locale, fraction_digits)
    }
}
