//! Locale Table and Fixed-Scale Decimal Formatting
//!
//! This library provides the "format a decimal for a locale" capability used by
//! the conversion service. Locales are defined declaratively using a macro that
//! generates the `Locale` enum and its lookup tables.
//!
//! # Adding a New Locale
//! Add a line to the `define_locales!` macro invocation:
//! ```ignore
//! define_locales! {
//!     // ... existing locales ...
//!     Fi => ("fi", "fi-FI", "\u{a0}", ",", Standard),
//! }
//! ```
//!
//! # Example
//! ```
//! use locale_format::{Locale, format_decimal, resolve_preferred};
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let locale = resolve_preferred("de-CH, en;q=0.8").unwrap().unwrap();
//! assert_eq!(locale, Locale::De);
//!
//! let amount = Decimal::from_str("1234567.1234565").unwrap();
//! assert_eq!(format_decimal(amount, locale, 6), "1.234.567,123457");
//! ```

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised while parsing a language preference list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocaleError {
    #[error("Malformed language range: {0}")]
    MalformedRange(String),

    #[error("Invalid quality value in language range: {0}")]
    InvalidWeight(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Digit Grouping
// ─────────────────────────────────────────────────────────────────────────────

/// How the integer part of a number is split into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grouping {
    /// Groups of three: 1,234,567
    Standard,
    /// Three, then groups of two: 12,34,567
    Indian,
}

impl Grouping {
    fn group(&self, digits: &str, separator: &str) -> String {
        let len = digits.len();
        let mut cut_points = Vec::new();
        match self {
            Grouping::Standard => {
                let mut idx = len;
                while idx > 3 {
                    idx -= 3;
                    cut_points.push(idx);
                }
            }
            Grouping::Indian => {
                if len > 3 {
                    let mut idx = len - 3;
                    cut_points.push(idx);
                    while idx > 2 {
                        idx -= 2;
                        cut_points.push(idx);
                    }
                }
            }
        }
        cut_points.reverse();

        let mut out = String::with_capacity(len + cut_points.len() * separator.len());
        let mut start = 0;
        for cut in cut_points {
            out.push_str(&digits[start..cut]);
            out.push_str(separator);
            start = cut;
        }
        out.push_str(&digits[start..]);
        out
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines all locales and their runtime lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define locales with auto-generated enum and accessors.
///
/// # Syntax
/// ```ignore
/// define_locales! {
///     Name => ("language", "canonical-tag", "group separator", "decimal separator", Grouping),
/// }
/// ```
#[macro_export]
macro_rules! define_locales {
    (
        $(
            $name:ident => ($language:literal, $tag:literal, $group:literal, $decimal:literal, $grouping:ident)
        ),* $(,)?
    ) => {
        /// A locale known to the formatter, identified by its language subtag.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Locale {
            $($name),*
        }

        impl Locale {
            /// Lowercase ISO 639 language subtag.
            pub fn language(&self) -> &'static str {
                match self {
                    $(Locale::$name => $language),*
                }
            }

            /// Canonical BCP 47 tag reported back to callers.
            pub fn tag(&self) -> &'static str {
                match self {
                    $(Locale::$name => $tag),*
                }
            }

            pub fn group_separator(&self) -> &'static str {
                match self {
                    $(Locale::$name => $group),*
                }
            }

            pub fn decimal_separator(&self) -> &'static str {
                match self {
                    $(Locale::$name => $decimal),*
                }
            }

            pub fn grouping(&self) -> Grouping {
                match self {
                    $(Locale::$name => Grouping::$grouping),*
                }
            }

            pub fn all() -> &'static [Locale] {
                &[$(Locale::$name),*]
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// LOCALE DEFINITIONS - Add new locales here!
// ─────────────────────────────────────────────────────────────────────────────

define_locales! {
    En => ("en", "en-US", ",", ".", Standard),
    De => ("de", "de-DE", ".", ",", Standard),
    Fr => ("fr", "fr-FR", "\u{202f}", ",", Standard),
    Es => ("es", "es-ES", ".", ",", Standard),
    It => ("it", "it-IT", ".", ",", Standard),
    Pt => ("pt", "pt-BR", ".", ",", Standard),
    Nl => ("nl", "nl-NL", ".", ",", Standard),
    Da => ("da", "da-DK", ".", ",", Standard),
    Sv => ("sv", "sv-SE", "\u{a0}", ",", Standard),
    Pl => ("pl", "pl-PL", "\u{a0}", ",", Standard),
    Ru => ("ru", "ru-RU", "\u{a0}", ",", Standard),
    Tr => ("tr", "tr-TR", ".", ",", Standard),
    Hi => ("hi", "hi-IN", ",", ".", Indian),
    Ja => ("ja", "ja-JP", ",", ".", Standard),
    Zh => ("zh", "zh-CN", ",", ".", Standard),
    Ko => ("ko", "ko-KR", ",", ".", Standard),
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Language Preference Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// One entry of a weighted language preference list (`de-CH;q=0.9`).
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    range: String,
    weight: f64,
}

impl LanguageRange {
    /// The lowercased range, e.g. `de-ch` or `*`.
    pub fn range(&self) -> &str {
        &self.range
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn is_wildcard(&self) -> bool {
        self.range == "*"
    }

    /// The primary language subtag (`de` for `de-ch`).
    pub fn primary_language(&self) -> &str {
        self.range.split('-').next().unwrap_or_default()
    }
}

fn is_valid_range(range: &str) -> bool {
    if range == "*" {
        return true;
    }
    let mut subtags = range.split('-');
    let valid_primary = subtags
        .next()
        .is_some_and(|s| (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphabetic()));
    valid_primary
        && subtags.all(|s| {
            s == "*" || ((1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()))
        })
}

fn parse_weight(element: &str, param: &str) -> Result<f64, LocaleError> {
    let (key, value) = param
        .split_once('=')
        .ok_or_else(|| LocaleError::MalformedRange(element.to_string()))?;
    if !key.trim().eq_ignore_ascii_case("q") {
        return Err(LocaleError::MalformedRange(element.to_string()));
    }
    let weight: f64 = value
        .trim()
        .parse()
        .map_err(|_| LocaleError::InvalidWeight(element.to_string()))?;
    if !(0.0..=1.0).contains(&weight) {
        return Err(LocaleError::InvalidWeight(element.to_string()));
    }
    Ok(weight)
}

/// Parses an `Accept-Language` style preference list.
///
/// Ranges are returned in descending weight order; ranges of equal weight keep
/// their header order. Ranges weighted `q=0` are dropped.
pub fn parse_accept_language(header: &str) -> Result<Vec<LanguageRange>, LocaleError> {
    let mut ranges = Vec::new();

    for element in header.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let mut parts = element.split(';');
        let range = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
        if !is_valid_range(&range) {
            return Err(LocaleError::MalformedRange(element.to_string()));
        }

        let mut weight = 1.0;
        for param in parts {
            weight = parse_weight(element, param)?;
        }

        if weight > 0.0 {
            ranges.push(LanguageRange { range, weight });
        }
    }

    ranges.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    Ok(ranges)
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Finds the known locale matching the primary language subtag of `tag`.
///
/// Region and script subtags are ignored: `de-CH` resolves to `Locale::De`.
pub fn resolve(tag: &str) -> Option<Locale> {
    let language = tag.split(['-', '_']).next()?.trim();
    if language.is_empty() || language == "*" {
        return None;
    }
    Locale::all()
        .iter()
        .copied()
        .find(|locale| locale.language().eq_ignore_ascii_case(language))
}

/// Picks the first range of a preference list that resolves to a known locale.
///
/// Wildcard ranges never match; an unmatched list yields `Ok(None)`.
pub fn resolve_preferred(header: &str) -> Result<Option<Locale>, LocaleError> {
    let ranges = parse_accept_language(header)?;
    Ok(ranges
        .iter()
        .filter(|r| !r.is_wildcard())
        .find_map(|r| resolve(r.primary_language())))
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting
// ─────────────────────────────────────────────────────────────────────────────

/// Rounds `value` half-up to `fraction_digits` places.
///
/// Half-up means ties move away from zero, so `-0.5` rounds to `-1`.
pub fn round_half_up(value: Decimal, fraction_digits: u32) -> Decimal {
    value.round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders `value` with exactly `fraction_digits` fractional digits using the
/// locale's grouping and decimal separators.
pub fn format_decimal(value: Decimal, locale: Locale, fraction_digits: u32) -> String {
    let mut scaled = round_half_up(value, fraction_digits);
    scaled.rescale(fraction_digits);

    let text = scaled.abs().to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut out = String::new();
    if scaled.is_sign_negative() && !scaled.is_zero() {
        out.push('-');
    }
    out.push_str(&locale.grouping().group(integer, locale.group_separator()));
    if fraction_digits > 0 {
        out.push_str(locale.decimal_separator());
        out.push_str(fraction);
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
