// src/analytics/statistics.rs
//! Sample statistics of Monte Carlo estimators
//!
//! The averaged forward rate of a `(tenor, step)` cell is a sample mean over
//! independent paths, so its standard error is
//! ```text
//! SE = sqrt( (E[X²] - E[X]²) / (N - 1) )
//! ```
//! and shrinks proportionally to `1/√N`.

use crate::error::{LmmError, LmmResult};
use crate::math_utils::norm_inv_cdf;

/// Standard error of a sample mean from running sums
///
/// Returns 0 for a single path. Tiny negative variances caused by rounding are
/// treated as zero.
pub fn standard_error(sum: f64, sum_sq: f64, n: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let n_f = n as f64;
    let mean = sum / n_f;
    let variance = (sum_sq / n_f - mean * mean).max(0.0) * n_f / (n_f - 1.0);
    (variance / n_f).sqrt()
}

/// Two-sided normal confidence interval around `mean`
///
/// # Errors
///
/// `InvalidParameter` if `level` is not strictly inside `(0, 1)`.
pub fn confidence_interval(mean: f64, std_error: f64, level: f64) -> LmmResult<(f64, f64)> {
    if !(level > 0.0 && level < 1.0) {
        return Err(LmmError::InvalidParameter {
            parameter: "level".to_string(),
            value: level,
            constraint: "must be in the open interval (0, 1)".to_string(),
        });
    }
    let z = norm_inv_cdf(0.5 + 0.5 * level);
    Ok((mean - z * std_error, mean + z * std_error))
}
