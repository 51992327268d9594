//! Market service: the operations the request layer calls into.
//!
//! A [`Market`] is built once at startup and shared behind an `Arc`. It
//! resolves symbols through the catalog, records trades in the ledger and
//! runs the metric formulas over what it reads back.

use chrono::Duration;
use std::sync::Arc;

use super::error::GbceError;
use super::index;
use super::ledger::TradeLedger;
use super::metrics;
use super::stock::{normalize_symbol, StockDefinition};
use super::trade::{TradeRecord, TradeType};
use crate::ports::catalog_port::CatalogPort;
use crate::ports::clock_port::ClockPort;

pub const DEFAULT_WINDOW_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketConfig {
    /// Trailing window for VWSP when the caller gives none, and for the index.
    pub vwsp_window: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            vwsp_window: Duration::minutes(DEFAULT_WINDOW_MINUTES),
        }
    }
}

pub struct Market {
    catalog: Arc<dyn CatalogPort + Send + Sync>,
    ledger: TradeLedger,
    config: MarketConfig,
}

impl Market {
    pub fn new(
        catalog: Arc<dyn CatalogPort + Send + Sync>,
        clock: Arc<dyn ClockPort + Send + Sync>,
        config: MarketConfig,
    ) -> Self {
        let ledger = TradeLedger::new(&*catalog, clock);
        Self {
            catalog,
            ledger,
            config,
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }

    /// Catalog entries in symbol order.
    pub fn stocks(&self) -> Vec<StockDefinition> {
        self.catalog
            .symbols()
            .iter()
            .filter_map(|s| self.catalog.get(s).cloned())
            .collect()
    }

    pub fn dividend_yield(&self, symbol: &str, price: f64) -> Result<f64, GbceError> {
        let stock = self.catalog.lookup(symbol)?;
        metrics::dividend_yield(stock, price)
    }

    /// May be `f64::INFINITY` for a stock with no dividend.
    pub fn pe_ratio(&self, symbol: &str, price: f64) -> Result<f64, GbceError> {
        let stock = self.catalog.lookup(symbol)?;
        Ok(metrics::pe_ratio(stock, price))
    }

    pub fn record_trade(
        &self,
        symbol: &str,
        quantity: i64,
        trade_type: TradeType,
        price: f64,
    ) -> Result<TradeRecord, GbceError> {
        let (record, trade_count) = self.ledger.append(symbol, quantity, trade_type, price)?;
        tracing::info!(
            symbol = %record.symbol,
            trade_count,
            %trade_type,
            quantity,
            price,
            "trade recorded"
        );
        Ok(record)
    }

    /// VWSP over `window`, or the configured default window when `None`.
    pub fn volume_weighted_price(
        &self,
        symbol: &str,
        window: Option<Duration>,
    ) -> Result<f64, GbceError> {
        let window = window.unwrap_or(self.config.vwsp_window);
        let trades = self.ledger.window(symbol, window)?;
        let vwsp = metrics::volume_weighted_price(&trades);
        tracing::debug!(
            symbol = %normalize_symbol(symbol),
            window_minutes = window.num_minutes(),
            in_window = trades.len(),
            vwsp,
            "vwsp computed"
        );
        Ok(vwsp)
    }

    /// Geometric mean of every catalog symbol's VWSP over the default window.
    pub fn gbce_index(&self) -> f64 {
        let prices: Vec<f64> = self
            .catalog
            .symbols()
            .iter()
            .filter_map(|symbol| match self.volume_weighted_price(symbol, None) {
                Ok(vwsp) => Some(vwsp),
                Err(e) => {
                    tracing::warn!(%symbol, error = %e, "skipping symbol in index");
                    None
                }
            })
            .collect();

        let value = index::gbce_index(prices.iter().copied());
        tracing::debug!(
            contributing = prices.iter().filter(|p| **p > 0.0).count(),
            gbce_index = value,
            "index computed"
        );
        value
    }
}
