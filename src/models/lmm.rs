// src/models/lmm.rs
//! One-Factor Lognormal LIBOR Market Model
//!
//! # Mathematical Framework
//!
//! Each simply compounded forward rate `F_k` over `[t_k, t_{k+1}]` follows a
//! driftless-in-its-own-measure lognormal diffusion. Simulated jointly under a
//! single measure every rate picks up a drift that couples it to all rates
//! that reset before it:
//! ```text
//! μ_k(t_j) = σ_{k-j-1} Σ_{i=j+1}^{k} Δ_i F_i(t_j) σ_{i-j-1} / (1 + Δ_i F_i(t_j))
//! ```
//!
//! The volatility vector is indexed by distance to reset: the rate `k - j`
//! periods away from its own reset at step `j` uses `σ_{k-j-1}`.
//!
//! With one Brownian factor all rates are perfectly correlated, so the
//! covariance of rates `i` and `k` reduces to `σ_i σ_k`.

use super::model::ForwardRateModel;
use crate::curve::DiscountCurve;
use crate::error::{validation::*, LmmError, LmmResult};
use crate::grid::TimeGrid;
use crate::triangle::ForwardRateMatrix;
use ndarray::Array1;

#[derive(Debug, Clone)]
pub struct OneFactorLmm {
    grid: TimeGrid,
    curve: DiscountCurve,
    volatilities: Array1<f64>,
}

impl OneFactorLmm {
    /// # Errors
    ///
    /// - `InsufficientInputLength` if fewer than `steps - 1` volatilities are given
    /// - `InvalidParameter` for a negative or non-finite volatility
    pub fn new(grid: TimeGrid, curve: DiscountCurve, volatilities: &[f64]) -> LmmResult<Self> {
        validate_min_len(
            "forward_rate_volatilities",
            volatilities.len(),
            grid.dimension(),
        )?;
        for &sigma in volatilities {
            validate_finite("forward_rate_volatilities", sigma)?;
            validate_non_negative("forward_rate_volatilities", sigma)?;
        }
        if curve.initial_forwards().len() != grid.dimension() {
            return Err(LmmError::InsufficientInputLength {
                parameter: "initial_forwards".to_string(),
                expected: grid.dimension(),
                actual: curve.initial_forwards().len(),
            });
        }

        Ok(Self {
            grid,
            curve,
            volatilities: Array1::from(volatilities.to_vec()),
        })
    }

    /// Build grid and curve from raw inputs in one go
    pub fn from_inputs(
        time_step: f64,
        maturity: f64,
        zero_curve: &[f64],
        volatilities: &[f64],
    ) -> LmmResult<Self> {
        let grid = TimeGrid::new(time_step, maturity)?;
        let curve = DiscountCurve::from_zero_rates(zero_curve, &grid)?;
        Self::new(grid, curve, volatilities)
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn curve(&self) -> &DiscountCurve {
        &self.curve
    }

    pub fn volatilities(&self) -> &Array1<f64> {
        &self.volatilities
    }

    fn sigma_at_offset(&self, offset: usize) -> LmmResult<f64> {
        self.volatilities
            .get(offset)
            .copied()
            .ok_or_else(|| LmmError::IndexOutOfRange {
                parameter: "forward_rate_volatilities".to_string(),
                index: offset,
                len: self.volatilities.len(),
            })
    }
}

impl ForwardRateModel for OneFactorLmm {
    fn dimension(&self) -> usize {
        self.grid.dimension()
    }

    fn initial_forwards(&self) -> &Array1<f64> {
        self.curve.initial_forwards()
    }

    fn accrual(&self, tenor: usize) -> LmmResult<f64> {
        self.grid.delta(tenor)
    }

    /// `σ[k - j - 1]`; only defined while the rate is still before its reset
    fn volatility(&self, tenor: usize, step: usize) -> LmmResult<f64> {
        if tenor <= step {
            return Err(LmmError::IndexOutOfRange {
                parameter: "step".to_string(),
                index: step,
                len: tenor,
            });
        }
        self.sigma_at_offset(tenor - step - 1)
    }

    fn drift(&self, rates: &ForwardRateMatrix, tenor: usize, step: usize) -> LmmResult<f64> {
        let sigma_k = self.volatility(tenor, step)?;

        let mut sum = 0.0;
        for i in (step + 1)..=tenor {
            let delta_i = self.accrual(i)?;
            let f_ij = rates.get(i, step)?;
            let sigma_i = self.volatility(i, step)?;

            let base = 1.0 + delta_i * f_ij;
            if !base.is_finite() || base <= 0.0 {
                return Err(LmmError::NumericDomainError {
                    quantity: "compounding factor 1 + Δ·F".to_string(),
                    path: None,
                    tenor: i,
                    step,
                    value: base,
                    reason: format!("forward rate {} is at or below -1/Δ", f_ij),
                });
            }
            sum += delta_i * f_ij * sigma_i / base;
        }

        let drift = sigma_k * sum;
        if !drift.is_finite() {
            return Err(LmmError::NumericDomainError {
                quantity: "drift".to_string(),
                path: None,
                tenor,
                step,
                value: drift,
                reason: "drift must be finite".to_string(),
            });
        }
        Ok(drift)
    }
}
