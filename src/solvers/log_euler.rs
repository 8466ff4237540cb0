// src/solvers/log_euler.rs
//! Log-Euler Scheme for Forward-Rate Paths
//!
//! # Mathematical Framework
//!
//! Each forward rate is lognormal between grid points, so the scheme steps
//! `ln F` with Euler and exponentiates:
//! ```text
//! F_k(t_{j+1}) = F_k(t_j) * exp( (μ_k(t_j) - σ²/2) Δ_j + σ √Δ_j Z )
//! ```
//!
//! with `σ = σ_{k-j-1}` and `Z ~ N(0,1)` drawn fresh for every `(k, j)`.
//!
//! # Dependency Order
//!
//! The drift of `F_k(t_{j+1})` reads `F_i(t_j)` for `j < i <= k`, so column
//! `j` must be complete before any cell of column `j + 1` is written. Paths are
//! built column by column: `j` outer, `k` from `j + 1` upward inner. A rate
//! whose reset has been reached (`k = j`) is never evolved further.
//!
//! # Properties
//!
//! - Positivity of `F` is preserved exactly
//! - Zero volatility leaves every rate at its initial value

use crate::error::{LmmError, LmmResult};
use crate::models::model::ForwardRateModel;
use crate::rng;
use crate::triangle::ForwardRateMatrix;
use rand::Rng;

/// Exact lognormal step for a drift frozen over the interval
pub struct LogEuler;

impl LogEuler {
    pub fn new() -> Self {
        LogEuler {}
    }

    /// Single lognormal step
    ///
    /// # Parameters
    /// - `f`: Current forward rate
    /// - `drift`: Risk-neutral drift at the current step
    /// - `sigma`: Volatility of the rate at its current distance to reset
    /// - `dt`: Step size
    /// - `z`: Standard normal draw
    #[inline]
    pub fn step(f: f64, drift: f64, sigma: f64, dt: f64, z: f64) -> f64 {
        f * ((drift - 0.5 * sigma * sigma) * dt + sigma * dt.sqrt() * z).exp()
    }

    /// Simulate one full triangular path of forward rates
    ///
    /// Draws are consumed in `(j, k)` lexicographic order, one per update.
    ///
    /// # Errors
    ///
    /// `NumericDomainError` tagged with `path_id` if a drift term or an updated
    /// rate leaves its domain; `IndexOutOfRange` for malformed model inputs.
    pub fn simulate_path<M, R>(
        model: &M,
        rng: &mut R,
        path_id: usize,
    ) -> LmmResult<ForwardRateMatrix>
    where
        M: ForwardRateModel + ?Sized,
        R: Rng + ?Sized,
    {
        let n = model.dimension();
        let mut rates = ForwardRateMatrix::with_initial_column(model.initial_forwards())?;

        for j in 0..n.saturating_sub(1) {
            let dt = model.accrual(j)?;
            for k in (j + 1)..n {
                let drift = model
                    .drift(&rates, k, j)
                    .map_err(|e| e.on_path(path_id))?;
                let sigma = model.volatility(k, j)?;
                let z = rng::get_normal_draw(rng);

                let next = Self::step(rates.get(k, j)?, drift, sigma, dt, z);
                if !next.is_finite() {
                    return Err(LmmError::NumericDomainError {
                        quantity: "forward rate".to_string(),
                        path: Some(path_id),
                        tenor: k,
                        step: j + 1,
                        value: next,
                        reason: "updated forward rate is not finite".to_string(),
                    });
                }
                rates.set(k, j + 1, next)?;
            }
        }

        Ok(rates)
    }
}

impl Default for LogEuler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lmm::OneFactorLmm;
    use crate::rng::RngFactory;
    use approx::assert_relative_eq;

    #[test]
    fn test_step_zero_noise() {
        // Z = 0: F * exp((μ - σ²/2) dt)
        let next = LogEuler::step(0.05, 0.01, 0.2, 0.25, 0.0);
        assert_relative_eq!(next, 0.05 * ((0.01 - 0.02) * 0.25_f64).exp(), max_relative = 1e-14);
    }

    #[test]
    fn test_zero_volatility_path_is_constant() {
        let model = OneFactorLmm::from_inputs(0.25, 1.0, &[0.01; 5], &[0.0; 4]).unwrap();
        let mut rng = RngFactory::new(7).path_rng(0);
        let path = LogEuler::simulate_path(&model, &mut rng, 0).unwrap();

        for k in 0..4 {
            let f0 = path.get(k, 0).unwrap();
            for j in 0..=k {
                assert_eq!(path.get(k, j).unwrap(), f0);
            }
        }
    }

    #[test]
    fn test_first_step_reproduces_manual_update() {
        let model =
            OneFactorLmm::from_inputs(0.5, 1.5, &[0.02, 0.025, 0.03, 0.035], &[0.15, 0.2, 0.25])
                .unwrap();
        let factory = RngFactory::new(99);
        let path = LogEuler::simulate_path(&model, &mut factory.path_rng(3), 3).unwrap();

        // replay the draws: (j=0,k=1), (j=0,k=2), (j=1,k=2)
        let mut replay = factory.path_rng(3);
        let z01 = rng::get_normal_draw(&mut replay);
        let z02 = rng::get_normal_draw(&mut replay);
        let z12 = rng::get_normal_draw(&mut replay);

        let init = ForwardRateMatrix::with_initial_column(model.initial_forwards()).unwrap();
        let f = model.initial_forwards();

        let mu_10 = model.drift(&init, 1, 0).unwrap();
        let f_11 = LogEuler::step(f[1], mu_10, 0.15, 0.5, z01);
        assert_relative_eq!(path.get(1, 1).unwrap(), f_11, max_relative = 1e-14);

        let mu_20 = model.drift(&init, 2, 0).unwrap();
        let f_21 = LogEuler::step(f[2], mu_20, 0.2, 0.5, z02);
        assert_relative_eq!(path.get(2, 1).unwrap(), f_21, max_relative = 1e-14);

        // step 1 only couples tenor 2 to itself
        let d = 0.5;
        let mu_21 = 0.15 * (d * f_21 * 0.15 / (1.0 + d * f_21));
        let f_22 = LogEuler::step(f_21, mu_21, 0.15, 0.5, z12);
        assert_relative_eq!(path.get(2, 2).unwrap(), f_22, max_relative = 1e-12);
    }

    #[test]
    fn test_initial_column_untouched() {
        let model = OneFactorLmm::from_inputs(0.25, 2.0, &[0.03; 9], &[0.3; 8]).unwrap();
        let mut rng = RngFactory::new(1).path_rng(0);
        let path = LogEuler::simulate_path(&model, &mut rng, 0).unwrap();
        assert_eq!(&path.initial_column(), model.initial_forwards());
    }

    #[test]
    fn test_positive_rates_stay_positive() {
        let model = OneFactorLmm::from_inputs(0.25, 3.0, &[0.02; 13], &[0.5; 12]).unwrap();
        let factory = RngFactory::new(2024);
        for p in 0..50 {
            let path = LogEuler::simulate_path(&model, &mut factory.path_rng(p), p as usize).unwrap();
            for k in 0..model.grid().dimension() {
                for j in 0..=k {
                    assert!(path.get(k, j).unwrap() > 0.0);
                }
            }
        }
    }
}
