//! GBCE All Share Index.

use super::metrics::geometric_mean;

/// Geometric mean of the strictly positive prices. Symbols without a
/// positive price are left out rather than counted as zero factors, and
/// the index is 0.0 when nothing is left.
pub fn gbce_index<I>(prices: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let positive: Vec<f64> = prices.into_iter().filter(|p| *p > 0.0).collect();
    geometric_mean(&positive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn index_of_two_prices() {
        assert_relative_eq!(gbce_index([100.0, 200.0]), 141.421_356_237, epsilon = 1e-6);
    }

    #[test]
    fn index_skips_zero_prices() {
        assert_relative_eq!(
            gbce_index([0.0, 100.0, 0.0, 200.0, 0.0]),
            gbce_index([100.0, 200.0])
        );
    }

    #[test]
    fn index_with_no_positive_prices_is_zero() {
        assert_eq!(gbce_index([0.0, 0.0, 0.0]), 0.0);
        assert_eq!(gbce_index(Vec::new()), 0.0);
    }

    #[test]
    fn index_of_single_price_is_that_price() {
        assert_relative_eq!(gbce_index([270.0]), 270.0, max_relative = 1e-12);
    }

    #[test]
    fn index_skips_nan_and_negative() {
        assert_relative_eq!(gbce_index([f64::NAN, -5.0, 50.0]), 50.0, max_relative = 1e-12);
    }
}
