//! # Converter Hex
//!
//! Application service layer, symbol cache and HTTP adapter for the
//! currency converter.
//!
//! ## Architecture
//!
//! - `cache/` - Conditional symbol cache shared by all requests
//! - `service/` - Application service (the conversion pipeline)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `S: SymbolProvider` and `R: RateProvider`,
//! allowing different provider adapters to be injected.

pub mod cache;
pub mod inbound;
pub mod service;


pub use cache::{MergeOutcome, SymbolCache};
pub use service::ConversionService;
