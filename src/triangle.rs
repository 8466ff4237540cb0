// src/triangle.rs
//! Lower-triangular forward-rate container
//!
//! `F[k][j]` is the value at simulation step `j` of the forward rate for the
//! period starting at tenor `k`. A rate only evolves up to its own reset, so
//! only cells with `j <= k` exist. They are stored packed row by row:
//! ```text
//! offset(k, j) = k (k + 1) / 2 + j
//! ```

use crate::error::{LmmError, LmmResult};
use ndarray::{Array1, Array2};

#[derive(Debug, Clone, PartialEq)]
pub struct ForwardRateMatrix {
    dim: usize,
    data: Vec<f64>,
}

impl ForwardRateMatrix {
    /// Zero-filled matrix with `dim` tenors
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the packed length `dim (dim + 1) / 2` overflows.
    pub fn zeros(dim: usize) -> LmmResult<Self> {
        Ok(Self {
            dim,
            data: vec![0.0; Self::packed_len(dim)?],
        })
    }

    /// Matrix whose step-0 column holds `initial` and is zero elsewhere
    pub fn with_initial_column(initial: &Array1<f64>) -> LmmResult<Self> {
        let mut m = Self::zeros(initial.len())?;
        for (k, &f) in initial.iter().enumerate() {
            m.data[Self::offset(k, 0)] = f;
        }
        Ok(m)
    }

    /// Number of stored cells for `dim` tenors
    pub fn packed_len(dim: usize) -> LmmResult<usize> {
        dim.checked_add(1)
            .and_then(|d| d.checked_mul(dim))
            .map(|cells| cells / 2)
            .ok_or_else(|| LmmError::InvalidParameter {
                parameter: "dimension".to_string(),
                value: dim as f64,
                constraint: "packed triangular length overflows usize".to_string(),
            })
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    #[inline]
    fn offset(tenor: usize, step: usize) -> usize {
        tenor * (tenor + 1) / 2 + step
    }

    #[inline]
    fn checked_offset(&self, tenor: usize, step: usize) -> LmmResult<usize> {
        if tenor >= self.dim {
            return Err(LmmError::IndexOutOfRange {
                parameter: "tenor".to_string(),
                index: tenor,
                len: self.dim,
            });
        }
        if step > tenor {
            return Err(LmmError::IndexOutOfRange {
                parameter: "step".to_string(),
                index: step,
                len: tenor + 1,
            });
        }
        Ok(Self::offset(tenor, step))
    }

    pub fn get(&self, tenor: usize, step: usize) -> LmmResult<f64> {
        let idx = self.checked_offset(tenor, step)?;
        Ok(self.data[idx])
    }

    pub fn set(&mut self, tenor: usize, step: usize, value: f64) -> LmmResult<()> {
        let idx = self.checked_offset(tenor, step)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Values of all tenors `k >= step` at simulation step `step`
    pub fn column(&self, step: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        (step..self.dim).map(move |k| (k, self.data[Self::offset(k, step)]))
    }

    pub fn initial_column(&self) -> Array1<f64> {
        Array1::from_iter(self.column(0).map(|(_, f)| f))
    }

    /// Elementwise `self += other`
    pub fn add_assign(&mut self, other: &ForwardRateMatrix) -> LmmResult<()> {
        self.check_same_dimension(other)?;
        self.data
            .iter_mut()
            .zip(other.data.iter())
            .for_each(|(a, b)| *a += b);
        Ok(())
    }

    /// Elementwise `self += other²`
    pub fn add_squares(&mut self, other: &ForwardRateMatrix) -> LmmResult<()> {
        self.check_same_dimension(other)?;
        self.data
            .iter_mut()
            .zip(other.data.iter())
            .for_each(|(a, b)| *a += b * b);
        Ok(())
    }

    /// Apply `f` to every stored cell
    pub fn map_inplace<F: FnMut(f64) -> f64>(&mut self, mut f: F) {
        self.data.iter_mut().for_each(|x| *x = f(*x));
    }

    /// New matrix with `f(self, other)` applied cell by cell
    pub fn zip_with<F: Fn(f64, f64) -> f64>(
        &self,
        other: &ForwardRateMatrix,
        f: F,
    ) -> LmmResult<ForwardRateMatrix> {
        self.check_same_dimension(other)?;
        Ok(Self {
            dim: self.dim,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    fn check_same_dimension(&self, other: &ForwardRateMatrix) -> LmmResult<()> {
        if self.dim != other.dim {
            return Err(LmmError::IndexOutOfRange {
                parameter: "dimension".to_string(),
                index: other.dim,
                len: self.dim,
            });
        }
        Ok(())
    }

    /// Dense `(dim, dim)` copy indexed `[tenor, step]`; cells with `step > tenor`
    /// are zero and carry no meaning.
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.dim, self.dim));
        for k in 0..self.dim {
            for j in 0..=k {
                dense[(k, j)] = self.data[Self::offset(k, j)];
            }
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_layout() {
        let mut m = ForwardRateMatrix::zeros(3).unwrap();
        assert_eq!(m.data.len(), 6);
        m.set(0, 0, 1.0).unwrap();
        m.set(1, 0, 2.0).unwrap();
        m.set(1, 1, 3.0).unwrap();
        m.set(2, 0, 4.0).unwrap();
        m.set(2, 1, 5.0).unwrap();
        m.set(2, 2, 6.0).unwrap();
        assert_eq!(m.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.get(2, 1).unwrap(), 5.0);
    }

    #[test]
    fn test_packed_len_overflow_rejected() {
        assert_eq!(ForwardRateMatrix::packed_len(4).unwrap(), 10);
        assert!(ForwardRateMatrix::packed_len(usize::MAX).is_err());
        let half_width = 1usize << (usize::BITS / 2 + 1);
        assert!(matches!(
            ForwardRateMatrix::zeros(half_width),
            Err(LmmError::InvalidParameter { ref parameter, .. }) if parameter == "dimension"
        ));
    }

    #[test]
    fn test_upper_region_not_addressable() {
        let mut m = ForwardRateMatrix::zeros(3).unwrap();
        assert!(matches!(
            m.get(1, 2),
            Err(LmmError::IndexOutOfRange { ref parameter, index: 2, len: 2 }) if parameter == "step"
        ));
        assert!(m.set(0, 1, 1.0).is_err());
        assert!(matches!(
            m.get(3, 0),
            Err(LmmError::IndexOutOfRange { ref parameter, .. }) if parameter == "tenor"
        ));
    }

    #[test]
    fn test_initial_column_and_column() {
        let init = Array1::from(vec![0.01, 0.02, 0.03]);
        let m = ForwardRateMatrix::with_initial_column(&init).unwrap();
        assert_eq!(m.initial_column(), init);
        let col1: Vec<(usize, f64)> = m.column(1).collect();
        assert_eq!(col1, vec![(1, 0.0), (2, 0.0)]);
    }

    #[test]
    fn test_accumulation_helpers() {
        let init = Array1::from(vec![1.0, 2.0]);
        let m = ForwardRateMatrix::with_initial_column(&init).unwrap();
        let mut sum = ForwardRateMatrix::zeros(2).unwrap();
        let mut sum_sq = ForwardRateMatrix::zeros(2).unwrap();
        sum.add_assign(&m).unwrap();
        sum.add_assign(&m).unwrap();
        sum_sq.add_squares(&m).unwrap();
        assert_eq!(sum.get(1, 0).unwrap(), 4.0);
        assert_eq!(sum_sq.get(1, 0).unwrap(), 4.0);

        sum.map_inplace(|x| x / 2.0);
        assert_eq!(sum.get(0, 0).unwrap(), 1.0);

        assert!(sum.add_assign(&ForwardRateMatrix::zeros(3).unwrap()).is_err());
    }

    #[test]
    fn test_to_dense() {
        let mut m = ForwardRateMatrix::zeros(2).unwrap();
        m.set(0, 0, 0.5).unwrap();
        m.set(1, 0, 0.6).unwrap();
        m.set(1, 1, 0.7).unwrap();
        let d = m.to_dense();
        assert_eq!(d.shape(), &[2, 2]);
        assert_eq!(d[(0, 0)], 0.5);
        assert_eq!(d[(1, 0)], 0.6);
        assert_eq!(d[(1, 1)], 0.7);
    }
}
