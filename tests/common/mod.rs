#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use gbce::adapters::clock_adapter::ManualClock;
use gbce::adapters::static_catalog_adapter::StaticCatalogAdapter;
use gbce::domain::market::{Market, MarketConfig};
pub use gbce::domain::trade::TradeType;
use std::sync::Arc;

pub fn market_open() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap()
}

/// Reference catalog, a clock pinned at `market_open()` and default config.
pub fn reference_market() -> (Arc<ManualClock>, Market) {
    reference_market_with(MarketConfig::default())
}

pub fn reference_market_with(config: MarketConfig) -> (Arc<ManualClock>, Market) {
    let clock = Arc::new(ManualClock::new(market_open()));
    let market = Market::new(
        Arc::new(StaticCatalogAdapter::reference()),
        clock.clone(),
        config,
    );
    (clock, market)
}

/// Records `(quantity, price)` legs for `symbol` at the current clock time.
pub fn trade_legs(market: &Market, symbol: &str, legs: &[(i64, f64)]) {
    for &(quantity, price) in legs {
        market
            .record_trade(symbol, quantity, TradeType::Buy, price)
            .unwrap();
    }
}
