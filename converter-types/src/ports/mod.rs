//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod locale;
mod rates;
mod symbols;
mod upstream;

pub use locale::{BuiltinLocales, LocaleCatalog};
pub use rates::RateProvider;
pub use symbols::SymbolProvider;
pub use upstream::UpstreamError;
