//! Reference catalog port trait.

use crate::domain::error::GbceError;
use crate::domain::stock::{normalize_symbol, StockDefinition};

/// Read-only access to stock reference data.
pub trait CatalogPort {
    /// Exact lookup by canonical (upper case) symbol.
    fn get(&self, symbol: &str) -> Option<&StockDefinition>;

    /// All symbols in the catalog, sorted.
    fn symbols(&self) -> Vec<String>;

    /// Case-insensitive lookup, failing with `StockNotFound` when absent.
    fn lookup(&self, symbol: &str) -> Result<&StockDefinition, GbceError> {
        let key = normalize_symbol(symbol);
        self.get(&key)
            .ok_or(GbceError::StockNotFound { symbol: key })
    }
}
