//! Conditional symbol cache.
//!
//! Process-wide store of currency code -> display name plus the validators
//! (`ETag`, `Date`) of the last modified symbols response. Symbols are
//! additive: codes are inserted if absent and never removed or renamed.
//! Only the validators are overwritten.

use std::sync::{PoisonError, RwLock};

use converter_types::{SymbolMap, SymbolsFetch, Validators};
use dashmap::DashMap;

/// What a merge did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No ETag, or the same ETag as cached. Nothing changed.
    NotModified,
    /// New validators stored, but the response had no body.
    ValidatorsOnly,
    /// New validators stored and `inserted` new codes added.
    Merged { inserted: usize },
}

/// Concurrency-safe symbol cache. Callers never need external locking.
#[derive(Debug, Default)]
pub struct SymbolCache {
    symbols: DashMap<String, String>,
    validators: RwLock<Validators>,
}

impl SymbolCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<String> {
        self.symbols.get(code).map(|entry| entry.value().clone())
    }

    /// Inserts or overwrites a display name.
    pub fn put(&self, code: impl Into<String>, name: impl Into<String>) {
        self.symbols.insert(code.into(), name.into());
    }

    /// Inserts a display name unless the code is already cached.
    ///
    /// Returns true if the entry was inserted.
    pub fn put_if_absent(&self, code: impl Into<String>, name: impl Into<String>) -> bool {
        let mut inserted = false;
        self.symbols.entry(code.into()).or_insert_with(|| {
            inserted = true;
            name.into()
        });
        inserted
    }

    pub fn contains(&self, code: &str) -> bool {
        self.symbols.contains_key(code)
    }

    /// Case-insensitive membership check used for request validation.
    pub fn contains_ignore_case(&self, code: &str) -> bool {
        self.contains(code)
            || self
                .symbols
                .iter()
                .any(|entry| entry.key().eq_ignore_ascii_case(code))
    }

    /// Copies the current symbols out of the cache.
    pub fn snapshot(&self) -> SymbolMap {
        self.symbols
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Validators to send with the next symbols request.
    pub fn validators(&self) -> Validators {
        self.validators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merges a symbols response into the cache.
    ///
    /// The response counts as modified when it carries an ETag and the cache
    /// has none or a different one. A modified response overwrites both
    /// validators (a missing `Date` clears the cached one) and then adds any
    /// codes not yet cached. Existing display names are kept.
    pub fn merge(&self, fetch: &SymbolsFetch) -> MergeOutcome {
        let Some(etag) = fetch.etag.as_deref() else {
            return MergeOutcome::NotModified;
        };

        {
            let mut validators = self
                .validators
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if validators.etag.as_deref() == Some(etag) {
                return MergeOutcome::NotModified;
            }
            *validators = Validators::new(Some(etag.to_string()), fetch.date);
        }
        tracing::info!(etag, "Symbol cache validators updated");

        match &fetch.symbols {
            Some(symbols) => {
                let inserted = symbols
                    .iter()
                    .filter(|(code, name)| self.put_if_absent(code.as_str(), name.as_str()))
                    .count();
                tracing::info!(inserted, total = self.len(), "Supported currencies cache updated");
                MergeOutcome::Merged { inserted }
            }
            None => {
                tracing::warn!("Supported currencies cache not updated since response body was null");
                MergeOutcome::ValidatorsOnly
            }
        }
    }
}
