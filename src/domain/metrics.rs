//! Equity metrics: dividend yield, P/E ratio, volume-weighted price and
//! the geometric mean used by the market index.

use super::error::GbceError;
use super::stock::{StockClass, StockDefinition};
use super::trade::TradeRecord;

/// Common: last_dividend / price. Preferred: fixed_rate * par_value / price.
pub fn dividend_yield(stock: &StockDefinition, price: f64) -> Result<f64, GbceError> {
    if price.is_nan() || price <= 0.0 {
        return Err(GbceError::InvalidPrice { price });
    }
    let dividend = match stock.class {
        StockClass::Common => stock.last_dividend,
        StockClass::Preferred {
            fixed_dividend_rate,
        } => fixed_dividend_rate * stock.par_value,
    };
    Ok(dividend / price)
}

/// price / last_dividend, or `f64::INFINITY` when the stock pays no dividend.
pub fn pe_ratio(stock: &StockDefinition, price: f64) -> f64 {
    if stock.last_dividend > 0.0 {
        price / stock.last_dividend
    } else {
        f64::INFINITY
    }
}

/// sum(price * quantity) / sum(quantity). Returns 0.0 when the total
/// quantity is not positive, which covers the empty window.
///
/// Quantities are summed as `i128`; totals past `i64::MAX` are expected.
pub fn volume_weighted_price(trades: &[TradeRecord]) -> f64 {
    let (notional, quantity) = trades
        .iter()
        .fold((0.0_f64, 0_i128), |(notional, quantity), t| {
            (notional + t.notional(), quantity + i128::from(t.quantity))
        });

    if quantity > 0 {
        notional / quantity as f64
    } else {
        0.0
    }
}

/// n-th root of the product of `values`, computed as exp(mean(ln x)).
/// Returns 0.0 for an empty slice. Callers pass strictly positive values.
pub fn geometric_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    (log_sum / values.len() as f64).exp()
}
