//! Append-only per-symbol trade history.
//!
//! Each catalog symbol owns one time-ordered sequence behind its own
//! `RwLock`. The set of sequences is fixed at construction, so the outer
//! map needs no lock: appends to different symbols never contend, and a
//! window read only blocks appends to the symbol being read.
//!
//! Timestamps are assigned inside the per-symbol write lock and clamped to
//! the previous record's timestamp, so every sequence stays sorted even if
//! the clock steps backwards. That ordering is what lets [`TradeLedger::window`]
//! walk back from the newest record and stop at the first one outside the
//! window instead of scanning the whole history.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::error::GbceError;
use super::stock::normalize_symbol;
use super::trade::{TradeRecord, TradeType};
use crate::ports::catalog_port::CatalogPort;
use crate::ports::clock_port::ClockPort;

pub struct TradeLedger {
    histories: HashMap<String, RwLock<Vec<TradeRecord>>>,
    clock: Arc<dyn ClockPort + Send + Sync>,
}

impl TradeLedger {
    /// Creates an empty history for every symbol in `catalog`.
    pub fn new(catalog: &dyn CatalogPort, clock: Arc<dyn ClockPort + Send + Sync>) -> Self {
        let histories = catalog
            .symbols()
            .into_iter()
            .map(|symbol| (symbol, RwLock::new(Vec::new())))
            .collect();
        Self { histories, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Records a trade stamped with the current time and returns it with
    /// the symbol's history length right after the push.
    ///
    /// Quantity and price are stored as given.
    pub fn append(
        &self,
        symbol: &str,
        quantity: i64,
        trade_type: TradeType,
        price: f64,
    ) -> Result<(TradeRecord, usize), GbceError> {
        let (symbol, history) = self.history(symbol)?;
        let mut trades = history.write().unwrap_or_else(PoisonError::into_inner);

        let now = self.clock.now();
        let timestamp = match trades.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };

        let record = TradeRecord {
            symbol: symbol.to_string(),
            timestamp,
            quantity,
            trade_type,
            price,
        };
        trades.push(record.clone());
        Ok((record, trades.len()))
    }

    /// Trades with `timestamp >= now - duration`, oldest first.
    ///
    /// A record exactly at the cutoff is inside the window. A symbol with no
    /// trades yields an empty vector. A window reaching past the earliest
    /// representable instant covers the whole history.
    pub fn window(&self, symbol: &str, duration: Duration) -> Result<Vec<TradeRecord>, GbceError> {
        let (_, history) = self.history(symbol)?;
        let cutoff = self
            .clock
            .now()
            .checked_sub_signed(duration)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let trades = history.read().unwrap_or_else(PoisonError::into_inner);

        let mut in_window: Vec<TradeRecord> = trades
            .iter()
            .rev()
            .take_while(|t| t.timestamp >= cutoff)
            .cloned()
            .collect();
        in_window.reverse();
        Ok(in_window)
    }

    /// Total number of trades ever recorded for `symbol`.
    pub fn trade_count(&self, symbol: &str) -> Result<usize, GbceError> {
        let (_, history) = self.history(symbol)?;
        let trades = history.read().unwrap_or_else(PoisonError::into_inner);
        Ok(trades.len())
    }

    /// Full history for `symbol`, oldest first.
    pub fn history_snapshot(&self, symbol: &str) -> Result<Vec<TradeRecord>, GbceError> {
        let (_, history) = self.history(symbol)?;
        let trades = history.read().unwrap_or_else(PoisonError::into_inner);
        Ok(trades.clone())
    }

    fn history(&self, symbol: &str) -> Result<(&str, &RwLock<Vec<TradeRecord>>), GbceError> {
        let key = normalize_symbol(symbol);
        self.histories
            .get_key_value(&key)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or(GbceError::StockNotFound { symbol: key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock_adapter::ManualClock;
    use crate::adapters::static_catalog_adapter::StaticCatalogAdapter;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    }

    fn setup() -> (Arc<ManualClock>, TradeLedger) {
        let clock = Arc::new(ManualClock::new(start()));
        let ledger = TradeLedger::new(&StaticCatalogAdapter::reference(), clock.clone());
        (clock, ledger)
    }

    #[test]
    fn append_grows_history_by_one() {
        let (_, ledger) = setup();
        assert_eq!(ledger.trade_count("POP").unwrap(), 0);

        ledger.append("POP", 50, TradeType::Buy, 120.0).unwrap();
        assert_eq!(ledger.trade_count("POP").unwrap(), 1);

        ledger.append("pop", 10, TradeType::Sell, 121.0).unwrap();
        assert_eq!(ledger.trade_count("POP").unwrap(), 2);
        assert_eq!(ledger.trade_count("TEA").unwrap(), 0);
    }

    #[test]
    fn append_stamps_current_time_and_canonical_symbol() {
        let (_, ledger) = setup();
        let (record, count) = ledger.append("joe", 30, TradeType::Buy, 200.0).unwrap();
        assert_eq!(count, 1);
        assert_eq!(record.symbol, "JOE");
        assert_eq!(record.timestamp, start());
        assert_eq!(record.quantity, 30);
        assert_eq!(record.trade_type, TradeType::Buy);
    }

    #[test]
    fn append_unknown_symbol_fails() {
        let (_, ledger) = setup();
        let err = ledger.append("XYZ", 1, TradeType::Buy, 1.0).unwrap_err();
        assert!(matches!(err, GbceError::StockNotFound { ref symbol } if symbol == "XYZ"));
    }

    #[test]
    fn append_stores_non_positive_values_as_given() {
        let (_, ledger) = setup();
        ledger.append("ALE", 0, TradeType::Buy, -5.0).unwrap();
        let history = ledger.history_snapshot("ALE").unwrap();
        assert_eq!(history[0].quantity, 0);
        assert_eq!(history[0].price, -5.0);
    }

    #[test]
    fn timestamps_stay_sorted_when_clock_steps_back() {
        let (clock, ledger) = setup();
        ledger.append("GIN", 1, TradeType::Buy, 1.0).unwrap();
        clock.set(start() - Duration::minutes(5));
        let (second, _) = ledger.append("GIN", 1, TradeType::Buy, 1.0).unwrap();
        assert_eq!(second.timestamp, start());

        let history = ledger.history_snapshot("GIN").unwrap();
        assert!(history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn window_of_empty_history_is_empty() {
        let (_, ledger) = setup();
        assert!(ledger.window("GIN", Duration::minutes(15)).unwrap().is_empty());
    }

    #[test]
    fn window_unknown_symbol_fails() {
        let (_, ledger) = setup();
        assert!(matches!(
            ledger.window("NOPE", Duration::minutes(15)),
            Err(GbceError::StockNotFound { .. })
        ));
    }

    #[test]
    fn window_excludes_trades_older_than_cutoff() {
        let (clock, ledger) = setup();
        ledger.append("TEA", 10, TradeType::Buy, 90.0).unwrap();
        clock.advance(Duration::minutes(10));
        ledger.append("TEA", 20, TradeType::Sell, 95.0).unwrap();
        clock.advance(Duration::minutes(10));
        ledger.append("TEA", 30, TradeType::Buy, 100.0).unwrap();

        // now = start + 20m, cutoff = start + 5m
        let window = ledger.window("TEA", Duration::minutes(15)).unwrap();
        let prices: Vec<f64> = window.iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![95.0, 100.0]);
    }

    #[test]
    fn window_includes_trade_exactly_at_cutoff() {
        let (clock, ledger) = setup();
        ledger.append("POP", 5, TradeType::Buy, 100.0).unwrap();
        clock.advance(Duration::minutes(15));

        let window = ledger.window("POP", Duration::minutes(15)).unwrap();
        assert_eq!(window.len(), 1);

        clock.advance(Duration::nanoseconds(1));
        assert!(ledger.window("POP", Duration::minutes(15)).unwrap().is_empty());
    }

    #[test]
    fn window_past_representable_range_covers_history() {
        let (clock, ledger) = setup();
        ledger.append("TEA", 5, TradeType::Buy, 80.0).unwrap();
        clock.advance(Duration::days(365));
        ledger.append("TEA", 5, TradeType::Sell, 120.0).unwrap();

        let huge = Duration::try_minutes(1_000_000_000_000).unwrap();
        assert_eq!(ledger.window("TEA", huge).unwrap().len(), 2);
        assert_eq!(ledger.window("TEA", Duration::MAX).unwrap().len(), 2);
    }

    #[test]
    fn append_reports_length_seen_under_lock() {
        let (_, ledger) = setup();
        let counts: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        (0..50)
                            .map(|_| ledger.append("POP", 1, TradeType::Buy, 1.0).unwrap().1)
                            .collect::<Vec<usize>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        let mut sorted = counts.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=400).collect::<Vec<usize>>());
    }

    #[test]
    fn window_is_chronological() {
        let (clock, ledger) = setup();
        for price in [1.0, 2.0, 3.0] {
            ledger.append("ALE", 1, TradeType::Buy, price).unwrap();
            clock.advance(Duration::seconds(1));
        }
        let window = ledger.window("ALE", Duration::minutes(1)).unwrap();
        let prices: Vec<f64> = window.iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn window_does_not_consume_history() {
        let (clock, ledger) = setup();
        ledger.append("JOE", 1, TradeType::Buy, 1.0).unwrap();
        clock.advance(Duration::hours(1));
        assert!(ledger.window("JOE", Duration::minutes(15)).unwrap().is_empty());
        assert_eq!(ledger.trade_count("JOE").unwrap(), 1);
    }

    #[test]
    fn concurrent_appends_are_not_lost() {
        let (_, ledger) = setup();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..250 {
                        ledger.append("POP", 1, TradeType::Buy, 100.0).unwrap();
                    }
                });
            }
        });
        assert_eq!(ledger.trade_count("POP").unwrap(), 2000);
    }
}
