// src/analytics/forward_curve.rs
//! Closed-form relations between discount factors and forward rates
//!
//! # Mathematical Foundation
//!
//! With discrete annual compounding the zero-coupon bond maturing at grid
//! point `i` is worth
//! ```text
//! B(0, t_i) = (1 + z_i)^-(i+1)
//! ```
//!
//! and absence of arbitrage between two adjacent bonds fixes the simply
//! compounded forward rate over `[t_k, t_{k+1}]`:
//! ```text
//! F_k(0) = (1/Δ_k) * (B(0, t_k) / B(0, t_{k+1}) - 1)
//! ```

/// Zero-coupon discount factor for a zero rate compounded over `periods` periods
///
/// # Formula
/// ```text
/// B = 1 / (1 + z)^periods
/// ```
pub fn discount_factor(zero_rate: f64, periods: usize) -> f64 {
    (1.0 + zero_rate).powf(-(periods as f64))
}

/// Single-period forward rate implied by two adjacent discount factors
///
/// # Parameters
/// - `b_start`: Discount factor to the start of the accrual period
/// - `b_end`: Discount factor to the end of the accrual period
/// - `delta`: Accrual fraction of the period
pub fn single_period_forward(b_start: f64, b_end: f64, delta: f64) -> f64 {
    (b_start / b_end - 1.0) / delta
}

/// Initial forward rate of tenor `k` on a flat zero curve
///
/// With a flat rate `z` the ratio of adjacent discount factors is `1 + z`,
/// so every initial forward collapses to `z / Δ`.
pub fn flat_curve_forward(zero_rate: f64, k: usize, delta: f64) -> f64 {
    single_period_forward(
        discount_factor(zero_rate, k + 1),
        discount_factor(zero_rate, k + 2),
        delta,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_factor() {
        assert_relative_eq!(discount_factor(0.05, 1), 1.0 / 1.05, max_relative = 1e-14);
        assert_relative_eq!(discount_factor(0.05, 2), 1.0 / 1.1025, max_relative = 1e-14);
        assert_eq!(discount_factor(0.05, 0), 1.0);
    }

    #[test]
    fn test_single_period_forward() {
        // B(0,1) = 0.95, B(0,2) = 0.9 over a half-year period
        let f = single_period_forward(0.95, 0.9, 0.5);
        assert_relative_eq!(f, (0.95 / 0.9 - 1.0) * 2.0, max_relative = 1e-14);
    }

    #[test]
    fn test_flat_curve_forward() {
        for k in 0..4 {
            assert_relative_eq!(flat_curve_forward(0.01, k, 0.25), 0.04, max_relative = 1e-12);
        }
    }
}
