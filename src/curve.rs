// src/curve.rs
//! Discount curve and initial forward-rate term structure
//!
//! Converts an annualised zero curve into zero-coupon discount factors on the
//! tenor grid and derives the deterministic time-0 forward rates that seed
//! every Monte Carlo path.

use crate::analytics::forward_curve::{discount_factor, single_period_forward};
use crate::error::{validation::*, LmmError, LmmResult};
use crate::grid::TimeGrid;
use ndarray::Array1;

#[derive(Debug, Clone, PartialEq)]
pub struct DiscountCurve {
    discount_factors: Array1<f64>,
    initial_forwards: Array1<f64>,
}

impl DiscountCurve {
    /// Build discount factors `B0[i] = (1 + z_i)^-(i+1)` for every grid point
    /// and the initial forwards `F[k][0]` for every tenor `k < steps - 1`.
    ///
    /// Entries of `zero_curve` beyond the grid are ignored.
    ///
    /// # Errors
    ///
    /// - `InsufficientInputLength` if `zero_curve` has fewer than `steps` rates
    /// - `InvalidParameter` for a non-finite zero rate
    /// - `NumericDomainError` if `1 + z_i <= 0` or a discount factor degenerates
    pub fn from_zero_rates(zero_curve: &[f64], grid: &TimeGrid) -> LmmResult<Self> {
        let steps = grid.steps();
        validate_min_len("zero_curve", zero_curve.len(), steps)?;

        let mut discount_factors = Array1::zeros(steps);
        for (i, &z) in zero_curve.iter().take(steps).enumerate() {
            validate_finite("zero_curve", z)?;
            if 1.0 + z <= 0.0 {
                return Err(LmmError::NumericDomainError {
                    quantity: "zero_curve".to_string(),
                    path: None,
                    tenor: i,
                    step: 0,
                    value: z,
                    reason: "compounding base 1 + z must be positive".to_string(),
                });
            }
            let b = discount_factor(z, i + 1);
            if !b.is_finite() || b <= 0.0 {
                return Err(LmmError::NumericDomainError {
                    quantity: "discount_factor".to_string(),
                    path: None,
                    tenor: i,
                    step: 0,
                    value: b,
                    reason: "discount factor must be finite and positive".to_string(),
                });
            }
            discount_factors[i] = b;
        }

        let mut initial_forwards = Array1::zeros(grid.dimension());
        for k in 0..grid.dimension() {
            let f = single_period_forward(
                discount_factors[k],
                discount_factors[k + 1],
                grid.delta(k)?,
            );
            if !f.is_finite() {
                return Err(LmmError::NumericDomainError {
                    quantity: "initial_forward".to_string(),
                    path: None,
                    tenor: k,
                    step: 0,
                    value: f,
                    reason: "initial forward rate must be finite".to_string(),
                });
            }
            initial_forwards[k] = f;
        }

        Ok(Self {
            discount_factors,
            initial_forwards,
        })
    }

    pub fn discount_factors(&self) -> &Array1<f64> {
        &self.discount_factors
    }

    pub fn discount_factor(&self, i: usize) -> LmmResult<f64> {
        self.discount_factors
            .get(i)
            .copied()
            .ok_or_else(|| LmmError::IndexOutOfRange {
                parameter: "discount_factor".to_string(),
                index: i,
                len: self.discount_factors.len(),
            })
    }

    /// Deterministic time-0 forward rates, one per tenor
    pub fn initial_forwards(&self) -> &Array1<f64> {
        &self.initial_forwards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_curve() {
        let grid = TimeGrid::new(0.25, 1.0).unwrap();
        let curve = DiscountCurve::from_zero_rates(&[0.01; 5], &grid).unwrap();

        assert_eq!(curve.discount_factors().len(), 5);
        assert_eq!(curve.initial_forwards().len(), 4);
        for (i, b) in curve.discount_factors().iter().enumerate() {
            assert_relative_eq!(*b, 1.01_f64.powi(-(i as i32 + 1)), max_relative = 1e-14);
        }
        for f in curve.initial_forwards().iter() {
            assert_relative_eq!(*f, 0.04, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_upward_sloping_curve() {
        let grid = TimeGrid::new(1.0, 2.0).unwrap();
        let zeros = [0.01, 0.02, 0.03];
        let curve = DiscountCurve::from_zero_rates(&zeros, &grid).unwrap();

        let b0 = 1.0 / 1.01;
        let b1 = 1.0 / 1.02_f64.powi(2);
        let b2 = 1.0 / 1.03_f64.powi(3);
        assert_relative_eq!(curve.initial_forwards()[0], b0 / b1 - 1.0, max_relative = 1e-12);
        assert_relative_eq!(curve.initial_forwards()[1], b1 / b2 - 1.0, max_relative = 1e-12);
        assert!(curve.initial_forwards()[1] > curve.initial_forwards()[0]);
    }

    #[test]
    fn test_extra_zero_rates_ignored() {
        let grid = TimeGrid::new(0.5, 1.0).unwrap();
        let curve = DiscountCurve::from_zero_rates(&[0.02, 0.02, 0.02, 9.0], &grid).unwrap();
        assert_eq!(curve.discount_factors().len(), 3);
    }

    #[test]
    fn test_short_curve_rejected() {
        let grid = TimeGrid::new(0.25, 1.0).unwrap();
        let err = DiscountCurve::from_zero_rates(&[0.01; 4], &grid).unwrap_err();
        assert_eq!(
            err,
            LmmError::InsufficientInputLength {
                parameter: "zero_curve".to_string(),
                expected: 5,
                actual: 4,
            }
        );
    }

    #[test]
    fn test_non_positive_compounding_base() {
        let grid = TimeGrid::new(0.5, 1.0).unwrap();
        let err = DiscountCurve::from_zero_rates(&[0.01, -1.0, 0.01], &grid).unwrap_err();
        assert!(matches!(
            err,
            LmmError::NumericDomainError { tenor: 1, path: None, .. }
        ));
    }

    #[test]
    fn test_discount_factor_accessor() {
        let grid = TimeGrid::new(0.5, 1.0).unwrap();
        let curve = DiscountCurve::from_zero_rates(&[0.05; 3], &grid).unwrap();
        assert_relative_eq!(curve.discount_factor(0).unwrap(), 1.0 / 1.05, max_relative = 1e-14);
        assert!(curve.discount_factor(3).is_err());
    }
}
