//! Reference stock definitions.

use serde::Serialize;

/// Stock class. Preferred stocks pay a fixed dividend rate on par value;
/// common stocks pay their last declared dividend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "class")]
pub enum StockClass {
    Common,
    Preferred { fixed_dividend_rate: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockDefinition {
    pub symbol: String,
    #[serde(flatten)]
    pub class: StockClass,
    pub last_dividend: f64,
    pub par_value: f64,
}

impl StockDefinition {
    pub fn common(symbol: &str, last_dividend: f64, par_value: f64) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            class: StockClass::Common,
            last_dividend,
            par_value,
        }
    }

    pub fn preferred(
        symbol: &str,
        last_dividend: f64,
        fixed_dividend_rate: f64,
        par_value: f64,
    ) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            class: StockClass::Preferred {
                fixed_dividend_rate,
            },
            last_dividend,
            par_value,
        }
    }

    pub fn fixed_dividend_rate(&self) -> Option<f64> {
        match self.class {
            StockClass::Common => None,
            StockClass::Preferred {
                fixed_dividend_rate,
            } => Some(fixed_dividend_rate),
        }
    }
}

/// Symbols are matched case-insensitively; the canonical form is trimmed
/// upper case.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
