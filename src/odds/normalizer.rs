//! Implied-probability normalization ("de-vigging") for two-way markets.
//!
//! The implied probability of a decimal price is `1 / price`. Across both
//! sides these sum to more than 1; the excess is the bookmaker's overround.
//! Dividing each side by the sum removes it:
//!
//!   p_a = (1/price_a) / (1/price_a + 1/price_b)

use thiserror::Error;

use super::models::{ProbabilityEstimate, RejectionReason};

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum NormalizeError {
    #[error("invalid_price: {price}")]
    InvalidPrice { price: f64 },
}

impl From<NormalizeError> for RejectionReason {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::InvalidPrice { .. } => RejectionReason::InvalidPrice,
        }
    }
}

/// Convert a pair of decimal prices into percentage win probabilities that
/// sum to 100.
pub fn normalize_prices(price_a: f64, price_b: f64) -> Result<ProbabilityEstimate, NormalizeError> {
    for price in [price_a, price_b] {
        if !price.is_finite() || price <= 0.0 {
            return Err(NormalizeError::InvalidPrice { price });
        }
    }

    let implied_a = 1.0 / price_a;
    let implied_b = 1.0 / price_b;
    let book = implied_a + implied_b;

    // Subnormal prices overflow the reciprocal to inf, which would give NaN.
    if !book.is_finite() {
        let price = if implied_a.is_finite() { price_b } else { price_a };
        return Err(NormalizeError::InvalidPrice { price });
    }

    Ok(ProbabilityEstimate {
        prob_a: 100.0 * implied_a / book,
        prob_b: 100.0 * implied_b / book,
        overround: book - 1.0,
    })
}

/// Round a percentage to one decimal place for display.
pub fn round_display(pct: f64) -> f64 {
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn equal_prices_split_evenly() {
        for p in [1.01, 1.91, 2.0, 3.5, 25.0] {
            let est = normalize_prices(p, p).unwrap();
            assert_relative_eq!(est.prob_a, 50.0, epsilon = 1e-9);
            assert_relative_eq!(est.prob_b, 50.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn favourite_and_underdog() {
        // 1/1.5 = 0.667, 1/3.0 = 0.333 → no margin in this pair
        let est = normalize_prices(1.5, 3.0).unwrap();
        assert_relative_eq!(est.prob_a, 200.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(est.prob_b, 100.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(round_display(est.prob_a), 66.7, epsilon = 1e-9);
        assert_relative_eq!(round_display(est.prob_b), 33.3, epsilon = 1e-9);
        assert_relative_eq!(est.overround, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn overround_is_removed() {
        // Typical -110/-110 line: 1.91 both ways, ~4.7% margin
        let est = normalize_prices(1.91, 1.91).unwrap();
        assert!(est.overround > 0.04 && est.overround < 0.05);
        assert_relative_eq!(est.prob_a + est.prob_b, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn pair_sums_to_100() {
        let prices = [1.05, 1.3, 1.72, 1.91, 2.0, 2.35, 4.0, 11.0];
        for &a in &prices {
            for &b in &prices {
                let est = normalize_prices(a, b).unwrap();
                assert_relative_eq!(est.prob_a + est.prob_b, 100.0, epsilon = 1e-9);
                let shown = round_display(est.prob_a) + round_display(est.prob_b);
                assert!((shown - 100.0).abs() <= 0.1 + 1e-9, "{a} vs {b}: {shown}");
            }
        }
    }

    #[test]
    fn probability_decreases_with_price() {
        let fixed_b = 2.1;
        let mut prev = f64::INFINITY;
        for step in 0..50 {
            let price_a = 1.05 + step as f64 * 0.2;
            let p = normalize_prices(price_a, fixed_b).unwrap().prob_a;
            assert!(p <= prev, "prob rose from {prev} to {p} at price {price_a}");
            prev = p;
        }
    }

    #[test]
    fn rejects_non_positive_price() {
        assert_eq!(
            normalize_prices(0.0, 2.0),
            Err(NormalizeError::InvalidPrice { price: 0.0 })
        );
        assert_eq!(
            normalize_prices(2.0, -1.5),
            Err(NormalizeError::InvalidPrice { price: -1.5 })
        );
        assert!(normalize_prices(f64::NAN, 2.0).is_err());
    }

    #[test]
    fn rejects_price_whose_reciprocal_overflows() {
        assert_eq!(
            normalize_prices(1e-310, 2.0),
            Err(NormalizeError::InvalidPrice { price: 1e-310 })
        );
        assert_eq!(
            normalize_prices(2.0, 1e-310),
            Err(NormalizeError::InvalidPrice { price: 1e-310 })
        );
        // Each reciprocal is finite on its own but their sum is not.
        assert!(normalize_prices(6e-309, 6e-309).is_err());
    }

    #[test]
    fn tiny_but_normal_prices_stay_finite() {
        let est = normalize_prices(1e-300, 2.0).unwrap();
        assert!(est.prob_a.is_finite() && est.prob_b.is_finite());
        assert!((0.0..=100.0).contains(&est.prob_a));
    }

    #[test]
    fn invalid_price_maps_to_rejection() {
        let reason: RejectionReason = NormalizeError::InvalidPrice { price: 0.0 }.into();
        assert_eq!(reason, RejectionReason::InvalidPrice);
    }
}
