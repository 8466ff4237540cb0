// src/mc/mc_engine.rs
use crate::analytics::statistics;
use crate::error::{validation::*, LmmError, LmmResult};
use crate::grid::TimeGrid;
use crate::mc::aggregator::{PathAccumulator, PathAverages};
use crate::mc::cancel::CancellationToken;
use crate::models::lmm::OneFactorLmm;
use crate::models::model::ForwardRateModel;
use crate::rng::RngFactory;
use crate::solvers::log_euler::LogEuler;
use crate::triangle::ForwardRateMatrix;
use bitflags::bitflags;
use ndarray::{Array1, Array2};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Statistics: u32 {
        const MEAN      = 1 << 0;
        const STD_ERROR = 1 << 1;
    }
}

#[derive(Clone, Debug)]
pub struct LmmConfig {
    pub time_step: f64,
    pub maturity: f64,
    pub zero_curve: Vec<f64>,
    pub volatilities: Vec<f64>,
    pub paths: usize,
    pub seed: u64,
    pub parallel: bool,
    pub chunk_size: usize, // Paths per partial sum; fixes the reduction order
    pub statistics: Statistics,
}

impl LmmConfig {
    /// Validate every input before any simulation work starts
    pub fn validate(&self) -> LmmResult<()> {
        self.validate_sampling()?;
        self.build_model().map(|_| ())
    }

    /// Path count and chunking checks; the model inputs are checked by `build_model`
    fn validate_sampling(&self) -> LmmResult<()> {
        validate_paths(self.paths)?;
        if self.chunk_size == 0 {
            return Err(LmmError::InvalidParameter {
                parameter: "chunk_size".to_string(),
                value: 0.0,
                constraint: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Grid, discount curve and volatility structure described by this config
    pub fn build_model(&self) -> LmmResult<OneFactorLmm> {
        OneFactorLmm::from_inputs(
            self.time_step,
            self.maturity,
            &self.zero_curve,
            &self.volatilities,
        )
    }
}

impl Default for LmmConfig {
    fn default() -> Self {
        // 5y quarterly grid: 21 points, 20 forward rates
        LmmConfig {
            time_step: 0.25,
            maturity: 5.0,
            zero_curve: vec![0.02; 21],
            volatilities: vec![0.2; 20],
            paths: 10_000,
            seed: 12345,
            parallel: true,
            chunk_size: 64,
            statistics: Statistics::MEAN,
        }
    }
}

/// Averaged forward rates of a finished run
///
/// `mean` and `std_error` are dense `(steps-1, steps-1)` matrices indexed
/// `[tenor, step]`; only cells with `step <= tenor` are meaningful.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    pub mean: Array2<f64>,
    pub std_error: Option<Array2<f64>>,
    pub paths: usize,
    pub seed: u64,
    pub statistics: Statistics,
    pub grid: TimeGrid,
    pub initial_forwards: Array1<f64>,
}

impl SimulationResult {
    pub fn dimension(&self) -> usize {
        self.grid.dimension()
    }

    fn check_cell(&self, tenor: usize, step: usize) -> LmmResult<()> {
        if tenor >= self.dimension() {
            return Err(LmmError::IndexOutOfRange {
                parameter: "tenor".to_string(),
                index: tenor,
                len: self.dimension(),
            });
        }
        if step > tenor {
            return Err(LmmError::IndexOutOfRange {
                parameter: "step".to_string(),
                index: step,
                len: tenor + 1,
            });
        }
        Ok(())
    }

    /// Averaged `F[tenor][step]`
    pub fn forward(&self, tenor: usize, step: usize) -> LmmResult<f64> {
        self.check_cell(tenor, step)?;
        Ok(self.mean[(tenor, step)])
    }

    /// Standard error of `F[tenor][step]`, when `Statistics::STD_ERROR` was requested
    pub fn std_error_at(&self, tenor: usize, step: usize) -> LmmResult<Option<f64>> {
        self.check_cell(tenor, step)?;
        Ok(self.std_error.as_ref().map(|se| se[(tenor, step)]))
    }

    /// Two-sided normal confidence interval for `F[tenor][step]`
    pub fn confidence_interval(&self, tenor: usize, step: usize, level: f64) -> LmmResult<(f64, f64)> {
        let se = self
            .std_error_at(tenor, step)?
            .ok_or_else(|| LmmError::InvalidParameter {
                parameter: "statistics".to_string(),
                value: f64::from(self.statistics.bits()),
                constraint: "STD_ERROR must be requested for confidence intervals".to_string(),
            })?;
        statistics::confidence_interval(self.forward(tenor, step)?, se, level)
    }
}

/// Monte Carlo simulation of the one-factor LIBOR Market Model
///
/// # Algorithm
///
/// 1. Build the tenor grid, discount factors and initial forwards from `cfg`
/// 2. Simulate `cfg.paths` independent triangular paths, path `p` drawing from
///    its own stream `RngFactory::path_rng(p)`
/// 3. Average the paths elementwise
///
/// The `j = 0` column equals the initial forward curve on every path and is
/// reported as such.
///
/// # Errors
///
/// Input errors are returned before any path is simulated. A numeric-domain
/// error on any path aborts the whole run.
pub fn simulate_forward_rates(cfg: &LmmConfig) -> LmmResult<SimulationResult> {
    simulate_forward_rates_with_cancel(cfg, &CancellationToken::new())
}

/// As [`simulate_forward_rates`], returning `LmmError::Cancelled` if `cancel`
/// is triggered before the last path completes.
pub fn simulate_forward_rates_with_cancel(
    cfg: &LmmConfig,
    cancel: &CancellationToken,
) -> LmmResult<SimulationResult> {
    cfg.validate_sampling()?;
    let model = cfg.build_model()?;
    let averages = simulate_model(&model, cfg, cancel)?;

    Ok(SimulationResult {
        mean: averages.mean.to_dense(),
        std_error: averages.std_error.map(|se| se.to_dense()),
        paths: averages.count,
        seed: cfg.seed,
        statistics: cfg.statistics,
        grid: model.grid().clone(),
        initial_forwards: model.initial_forwards().clone(),
    })
}

/// Run the Monte Carlo loop for any forward-rate model
///
/// # Reduction Order
///
/// Paths are split into chunks of `cfg.chunk_size` consecutive path ids. Each
/// chunk sums its paths in id order into its own accumulator; the chunk
/// accumulators are then merged sequentially in chunk order. The result is
/// bit-identical for parallel and sequential execution and any thread count.
///
/// # Errors
///
/// When several paths fail, the error of the lowest failing path id is
/// returned in both modes. A chunk stops early only once a chunk with a lower
/// index has already failed.
pub fn simulate_model<M>(
    model: &M,
    cfg: &LmmConfig,
    cancel: &CancellationToken,
) -> LmmResult<PathAverages>
where
    M: ForwardRateModel + Sync,
{
    validate_paths(cfg.paths)?;
    let dim = model.dimension();
    let n = cfg.paths;
    let chunk_size = cfg.chunk_size.max(1);
    let n_chunks = (n + chunk_size - 1) / chunk_size;
    let track_squares = cfg.statistics.contains(Statistics::STD_ERROR);
    let factory = RngFactory::new(cfg.seed);
    let completed = AtomicUsize::new(0);
    let first_failed_chunk = AtomicUsize::new(usize::MAX);

    info!(
        tenors = dim,
        paths = n,
        seed = factory.base_seed(),
        parallel = cfg.parallel,
        "starting LMM simulation"
    );

    // Ok(None): skipped because a lower chunk already failed
    let run_chunk = |chunk: usize| -> LmmResult<Option<PathAccumulator>> {
        let start = chunk * chunk_size;
        let end = (start + chunk_size).min(n);
        let mut acc = PathAccumulator::new(dim, track_squares)?;

        for path_id in start..end {
            if first_failed_chunk.load(Ordering::Relaxed) < chunk {
                return Ok(None);
            }
            if cancel.is_cancelled() {
                first_failed_chunk.fetch_min(chunk, Ordering::Relaxed);
                return Err(LmmError::Cancelled {
                    completed_paths: completed.load(Ordering::Relaxed),
                    requested_paths: n,
                });
            }
            let mut rng = factory.path_rng(path_id as u64);
            let pushed = LogEuler::simulate_path(model, &mut rng, path_id)
                .and_then(|path| acc.push(&path));
            if let Err(e) = pushed {
                first_failed_chunk.fetch_min(chunk, Ordering::Relaxed);
                return Err(e);
            }
            completed.fetch_add(1, Ordering::Relaxed);
        }

        debug!(chunk, paths = end - start, "chunk complete");
        Ok(Some(acc))
    };

    let outcomes: Vec<LmmResult<Option<PathAccumulator>>> = if cfg.parallel {
        (0..n_chunks).into_par_iter().map(&run_chunk).collect()
    } else {
        (0..n_chunks).map(&run_chunk).collect()
    };

    // in chunk order, so the reported error does not depend on scheduling
    let partials = match outcomes.into_iter().collect::<LmmResult<Vec<_>>>() {
        Ok(p) => p,
        Err(e) => {
            if e.is_cancelled() {
                warn!(
                    completed = completed.load(Ordering::Relaxed),
                    requested = n,
                    "LMM simulation cancelled"
                );
            }
            return Err(e);
        }
    };

    let mut total = PathAccumulator::new(dim, track_squares)?;
    for partial in partials.into_iter().flatten() {
        total.merge(partial)?;
    }
    let averages = total.finalize()?;

    let mean = pin_initial_column(averages.mean, model.initial_forwards())?;
    let std_error = averages
        .std_error
        .map(|se| pin_initial_column(se, &Array1::zeros(dim)))
        .transpose()?;

    info!(paths = averages.count, "LMM simulation finished");

    Ok(PathAverages {
        mean,
        std_error,
        count: averages.count,
    })
}

/// The step-0 column carries no randomness; report it exactly.
fn pin_initial_column(
    mut m: ForwardRateMatrix,
    column: &Array1<f64>,
) -> LmmResult<ForwardRateMatrix> {
    for (k, &v) in column.iter().enumerate() {
        m.set(k, 0, v)?;
    }
    Ok(m)
}
