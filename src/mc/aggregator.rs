// src/mc/aggregator.rs
//! Path accumulation for Monte Carlo averaging
//!
//! Each worker owns a `PathAccumulator` and pushes its own paths into it; the
//! partial accumulators are merged single-threaded at the end. No mutable
//! state is shared while paths are being simulated.

use crate::analytics::statistics::standard_error;
use crate::error::{LmmError, LmmResult};
use crate::triangle::ForwardRateMatrix;

/// Running elementwise sums of simulated forward-rate paths
#[derive(Debug, Clone)]
pub struct PathAccumulator {
    sum: ForwardRateMatrix,
    sum_sq: Option<ForwardRateMatrix>,
    count: usize,
}

/// Finalised per-cell statistics
#[derive(Debug, Clone)]
pub struct PathAverages {
    pub mean: ForwardRateMatrix,
    pub std_error: Option<ForwardRateMatrix>,
    pub count: usize,
}

impl PathAccumulator {
    /// Empty accumulator; `track_squares` also keeps `Σ F²` for standard errors
    pub fn new(dim: usize, track_squares: bool) -> LmmResult<Self> {
        Ok(Self {
            sum: ForwardRateMatrix::zeros(dim)?,
            sum_sq: track_squares
                .then(|| ForwardRateMatrix::zeros(dim))
                .transpose()?,
            count: 0,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn push(&mut self, path: &ForwardRateMatrix) -> LmmResult<()> {
        self.sum.add_assign(path)?;
        if let Some(sq) = self.sum_sq.as_mut() {
            sq.add_squares(path)?;
        }
        self.count += 1;
        Ok(())
    }

    /// Fold another partial accumulator into this one
    pub fn merge(&mut self, other: PathAccumulator) -> LmmResult<()> {
        if self.sum_sq.is_some() != other.sum_sq.is_some() {
            return Err(LmmError::InvalidParameter {
                parameter: "statistics".to_string(),
                value: other.count as f64,
                constraint: "partial accumulators must track the same statistics".to_string(),
            });
        }
        self.sum.add_assign(&other.sum)?;
        if let (Some(a), Some(b)) = (self.sum_sq.as_mut(), other.sum_sq.as_ref()) {
            a.add_assign(b)?;
        }
        self.count += other.count;
        Ok(())
    }

    /// Divide by the path count. Consumes the accumulator so this happens once.
    pub fn finalize(self) -> LmmResult<PathAverages> {
        if self.count == 0 {
            return Err(LmmError::InvalidParameter {
                parameter: "paths".to_string(),
                value: 0.0,
                constraint: "cannot average an empty accumulator".to_string(),
            });
        }

        let n = self.count;
        let std_error = match self.sum_sq.as_ref() {
            Some(sum_sq) => Some(
                self.sum
                    .zip_with(sum_sq, |s, sq| standard_error(s, sq, n))?,
            ),
            None => None,
        };

        let mut mean = self.sum;
        let n_f = n as f64;
        mean.map_inplace(|x| x / n_f);

        Ok(PathAverages {
            mean,
            std_error,
            count: n,
        })
    }
}
