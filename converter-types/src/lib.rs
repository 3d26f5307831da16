//! # Converter Types
//!
//! Domain types and port traits for the currency conversion service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (symbols, quotes, conversions)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API and provider boundaries
//! - `error/` - Application error taxonomy
//! - `provider_codes/` - The provider error-code table used to classify responses

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod provider_codes;

// Re-export commonly used types
pub use domain::{
    CONVERTED_AMOUNT_SCALE, ConversionRequest, ConversionResult, ConversionStage, ExchangeQuote,
    SymbolMap, SymbolsFetch, Validators,
};
pub use dto::*;
pub use error::AppError;
pub use locale_format::Locale;
pub use ports::{BuiltinLocales, LocaleCatalog, RateProvider, SymbolProvider, UpstreamError};
