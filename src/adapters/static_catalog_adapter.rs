//! In-memory reference catalog.

use std::collections::HashMap;

use crate::domain::stock::StockDefinition;
use crate::ports::catalog_port::CatalogPort;

/// Immutable symbol table loaded once at startup.
#[derive(Debug, Clone)]
pub struct StaticCatalogAdapter {
    stocks: HashMap<String, StockDefinition>,
}

impl StaticCatalogAdapter {
    /// The Global Beverage Corporation Exchange sample stocks.
    pub fn reference() -> Self {
        Self::from_definitions(vec![
            StockDefinition::common("TEA", 0.0, 100.0),
            StockDefinition::common("POP", 8.0, 100.0),
            StockDefinition::common("ALE", 23.0, 60.0),
            StockDefinition::preferred("GIN", 8.0, 0.02, 100.0),
            StockDefinition::common("JOE", 13.0, 250.0),
        ])
    }

    /// Later definitions replace earlier ones with the same symbol.
    pub fn from_definitions(definitions: Vec<StockDefinition>) -> Self {
        let stocks = definitions
            .into_iter()
            .map(|d| (d.symbol.clone(), d))
            .collect();
        Self { stocks }
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}

impl CatalogPort for StaticCatalogAdapter {
    fn get(&self, symbol: &str) -> Option<&StockDefinition> {
        self.stocks.get(symbol)
    }

    fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.stocks.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}
