//! Domain models for the conversion service.

pub mod conversion;
pub mod quote;
pub mod symbols;

pub use conversion::{
    CONVERTED_AMOUNT_SCALE, ConversionRequest, ConversionResult, ConversionStage,
};
pub use quote::ExchangeQuote;
pub use symbols::{SymbolMap, SymbolsFetch, Validators};
