//! # fast-lmm: Monte Carlo for the LIBOR Market Model
//!
//! Simulates a family of simply compounded forward rates under the one-factor
//! lognormal LIBOR Market Model, with the risk-neutral drift that keeps every
//! tenor arbitrage-free against all earlier-resetting tenors.
//!
//! ## Key Features
//!
//! - **Curve Handling**: Zero rates → discount factors → initial forwards
//! - **Drift-Adjusted Paths**: Exact lognormal steps on a triangular tenor/step grid
//! - **Parallel Monte Carlo**: Rayon workers with per-path random streams
//! - **Reproducible**: Fixed reduction order, bit-identical for any thread count
//! - **Cancellable**: Cooperative cancellation between path completions
//!
//! ## Quick Start
//!
//! ```rust
//! use fast_lmm::mc::mc_engine::{simulate_forward_rates, LmmConfig};
//!
//! let config = LmmConfig {
//!     time_step: 0.25,
//!     maturity: 1.0,
//!     zero_curve: vec![0.01; 5],
//!     volatilities: vec![0.2; 4],
//!     paths: 1_000,
//!     seed: 42,
//!     ..Default::default()
//! };
//!
//! let result = simulate_forward_rates(&config).expect("Valid configuration");
//! // F[3][2]: the rate for the last period, two quarters in
//! println!("E[F_3(t_2)] = {:.6}", result.forward(3, 2).unwrap());
//! ```
//!
//! ## Mathematical Foundation
//!
//! For tenor `k` at step `j < k` the simulation applies
//! ```text
//! F_k(t_{j+1}) = F_k(t_j) exp((μ_k - σ²/2) Δ_j + σ √Δ_j Z)
//! μ_k = σ_{k-j-1} Σ_{i=j+1}^{k} Δ_i F_i(t_j) σ_{i-j-1} / (1 + Δ_i F_i(t_j))
//! ```

// Module declarations
pub mod error;
pub mod rng;
pub mod math_utils;
pub mod grid;
pub mod curve;
pub mod triangle;
pub mod models;
pub mod solvers;
pub mod mc;
pub mod analytics;
pub mod output;

// Re-export commonly used types for convenience
pub use error::{LmmError, LmmResult};
pub use mc::cancel::CancellationToken;
pub use mc::mc_engine::{
    simulate_forward_rates, simulate_forward_rates_with_cancel, LmmConfig, SimulationResult,
    Statistics,
};
