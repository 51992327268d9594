//! Trade records held by the ledger.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::error::GbceError;

/// Side of a trade. Recorded with every trade but not used by any of the
/// aggregate formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    Buy,
    Sell,
}

impl FromStr for TradeType {
    type Err = GbceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(TradeType::Buy),
            "sell" => Ok(TradeType::Sell),
            _ => Err(GbceError::InvalidTradeType {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Buy => write!(f, "buy"),
            TradeType::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub quantity: i64,
    pub trade_type: TradeType,
    pub price: f64,
}

impl TradeRecord {
    /// price * quantity
    pub fn notional(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_type_parses_case_insensitively() {
        assert_eq!("buy".parse::<TradeType>().unwrap(), TradeType::Buy);
        assert_eq!("SELL".parse::<TradeType>().unwrap(), TradeType::Sell);
        assert_eq!(" Buy ".parse::<TradeType>().unwrap(), TradeType::Buy);
    }

    #[test]
    fn trade_type_rejects_unknown() {
        let err = "hold".parse::<TradeType>().unwrap_err();
        assert!(matches!(err, GbceError::InvalidTradeType { ref value } if value == "hold"));
    }

    #[test]
    fn trade_type_display_round_trips() {
        for t in [TradeType::Buy, TradeType::Sell] {
            assert_eq!(t.to_string().parse::<TradeType>().unwrap(), t);
        }
    }

    #[test]
    fn notional_is_price_times_quantity() {
        let trade = TradeRecord {
            symbol: "JOE".into(),
            timestamp: Utc::now(),
            quantity: 30,
            trade_type: TradeType::Buy,
            price: 200.0,
        };
        assert!((trade.notional() - 6000.0).abs() < f64::EPSILON);
    }
}
