// src/grid.rs
//! Tenor grid construction
//!
//! A grid of `steps` points `t_0 = 0, t_1, ..., t_{steps-1}` spaced by a
//! uniform `time_step`, together with the accrual fractions
//! `Δ_i = t_{i+1} - t_i` for `i < steps - 1`.

use crate::error::{validation::*, LmmError, LmmResult};
use ndarray::Array1;

/// Relative tolerance used when snapping `maturity / time_step` to an integer
const RATIO_SNAP_TOLERANCE: f64 = 1e-9;

/// Largest number of grid points a `TimeGrid` may hold. A path stores
/// `(steps - 1) steps / 2` forward rates, so this caps one path near 400 MB.
pub const MAX_GRID_STEPS: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    time_step: f64,
    maturity: f64,
    tenors: Array1<f64>,
    deltas: Array1<f64>,
}

impl TimeGrid {
    /// Build the grid with `steps = floor(maturity / time_step) + 1` points.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if either input is non-positive or non-finite, or if
    /// the horizon is shorter than one step (the forward matrix would be empty)
    /// or spans more than [`MAX_GRID_STEPS`] points.
    pub fn new(time_step: f64, maturity: f64) -> LmmResult<Self> {
        validate_finite("time_step", time_step)?;
        validate_positive("time_step", time_step)?;
        validate_finite("maturity", maturity)?;
        validate_positive("maturity", maturity)?;

        let steps = Self::step_count(time_step, maturity)?;
        if steps < 2 {
            return Err(LmmError::InvalidParameter {
                parameter: "maturity".to_string(),
                value: maturity,
                constraint: format!("must span at least one time_step ({})", time_step),
            });
        }

        let tenors = Array1::from_shape_fn(steps, |i| i as f64 * time_step);
        let deltas = Array1::from_elem(steps - 1, time_step);

        Ok(Self {
            time_step,
            maturity,
            tenors,
            deltas,
        })
    }

    fn step_count(time_step: f64, maturity: f64) -> LmmResult<usize> {
        let ratio = maturity / time_step;
        let nearest = ratio.round();
        let whole = if (ratio - nearest).abs() <= RATIO_SNAP_TOLERANCE * nearest.max(1.0) {
            nearest
        } else {
            ratio.floor()
        };

        // compare as f64 first so the cast below cannot saturate
        if !whole.is_finite() || whole >= MAX_GRID_STEPS as f64 {
            return Err(LmmError::InvalidParameter {
                parameter: "maturity".to_string(),
                value: maturity,
                constraint: format!(
                    "maturity / time_step ({:e}) exceeds the maximum grid of {} points",
                    ratio, MAX_GRID_STEPS
                ),
            });
        }
        Ok(whole as usize + 1)
    }

    /// Number of grid points
    pub fn steps(&self) -> usize {
        self.tenors.len()
    }

    /// Number of forward rates (`steps - 1`), the side of the forward matrix
    pub fn dimension(&self) -> usize {
        self.deltas.len()
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    pub fn tenors(&self) -> &Array1<f64> {
        &self.tenors
    }

    pub fn deltas(&self) -> &Array1<f64> {
        &self.deltas
    }

    /// Accrual fraction of the period starting at grid point `i`
    pub fn delta(&self, i: usize) -> LmmResult<f64> {
        self.deltas
            .get(i)
            .copied()
            .ok_or_else(|| LmmError::IndexOutOfRange {
                parameter: "delta".to_string(),
                index: i,
                len: self.deltas.len(),
            })
    }
}
