use crate::error::LmmResult;
use crate::triangle::ForwardRateMatrix;
use ndarray::Array1;

/// A family of forward rates evolved jointly on a tenor grid
pub trait ForwardRateModel {
    /// Number of forward rates
    fn dimension(&self) -> usize;
    fn initial_forwards(&self) -> &Array1<f64>;
    fn accrual(&self, tenor: usize) -> LmmResult<f64>;
    fn volatility(&self, tenor: usize, step: usize) -> LmmResult<f64>;
    fn drift(&self, rates: &ForwardRateMatrix, tenor: usize, step: usize) -> LmmResult<f64>;
}
