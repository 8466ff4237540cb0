// tests/convergence_test.rs
use fast_lmm::mc::mc_engine::{simulate_forward_rates, LmmConfig, Statistics};
use fast_lmm::models::model::ForwardRateModel;
use fast_lmm::triangle::ForwardRateMatrix;

fn config(paths: usize, seed: u64) -> LmmConfig {
    LmmConfig {
        time_step: 0.5,
        maturity: 2.0,
        zero_curve: vec![0.02, 0.022, 0.024, 0.026, 0.028],
        volatilities: vec![0.3, 0.28, 0.26, 0.24],
        paths,
        seed,
        parallel: true,
        chunk_size: 128,
        statistics: Statistics::MEAN | Statistics::STD_ERROR,
    }
}

#[test]
fn test_first_step_matches_lognormal_expectation() {
    // Over the first step the drift is frozen at the deterministic initial
    // curve, so E[F_k(t_1)] = F_k(0) exp(μ_k(0) Δ_0) exactly.
    let cfg = config(20_000, 314);
    let model = cfg.build_model().unwrap();
    let init = ForwardRateMatrix::with_initial_column(model.initial_forwards()).unwrap();
    let result = simulate_forward_rates(&cfg).expect("Valid configuration");

    for k in 1..result.dimension() {
        let mu = model.drift(&init, k, 0).unwrap();
        let expected = model.initial_forwards()[k] * (mu * 0.5).exp();
        let mc = result.forward(k, 1).unwrap();
        let se = result.std_error_at(k, 1).unwrap().unwrap();

        println!(
            "tenor {}: MC = {:.6}, expected = {:.6}, SE = {:.2e}",
            k, mc, expected, se
        );
        assert!(
            (mc - expected).abs() < 5.0 * se,
            "tenor {}: |{} - {}| exceeds 5 standard errors ({})",
            k,
            mc,
            expected,
            se
        );
    }
}

#[test]
fn test_standard_error_scales_with_inverse_sqrt_paths() {
    let small = simulate_forward_rates(&config(400, 1)).unwrap();
    let large = simulate_forward_rates(&config(6_400, 1)).unwrap();

    for (k, j) in [(1, 1), (2, 2), (3, 2), (3, 3)] {
        let se_small = small.std_error_at(k, j).unwrap().unwrap();
        let se_large = large.std_error_at(k, j).unwrap().unwrap();
        let ratio = se_small / se_large;
        println!("F[{}][{}]: SE ratio = {:.3} (expected ~4)", k, j, ratio);
        assert!(
            ratio > 3.0 && ratio < 5.0,
            "SE ratio {} not close to sqrt(16) = 4",
            ratio
        );
    }
}

#[test]
fn test_repeated_run_variance_shrinks() {
    let replicas = 16;
    let spread = |paths: usize| -> f64 {
        let estimates: Vec<f64> = (0..replicas)
            .map(|r| {
                simulate_forward_rates(&config(paths, 1_000 + r as u64))
                    .unwrap()
                    .forward(3, 3)
                    .unwrap()
            })
            .collect();
        let mean = estimates.iter().sum::<f64>() / replicas as f64;
        estimates.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (replicas - 1) as f64
    };

    let var_small = spread(100);
    let var_large = spread(1_600);
    println!("variance across runs: N=100 {:.3e}, N=1600 {:.3e}", var_small, var_large);
    assert!(
        var_large < var_small / 2.0,
        "run-to-run variance did not shrink: {} vs {}",
        var_large,
        var_small
    );
}

#[test]
fn test_first_step_mean_rises_by_drift() {
    // Positive forwards and volatilities give μ_3(0) > 0, so E[F_3(t_1)]
    // sits above F_3(0) by F_3(0) (exp(μ_3(0) Δ) - 1), roughly 7 standard
    // errors at this path count.
    let cfg = config(200_000, 99);
    let model = cfg.build_model().unwrap();
    let init = ForwardRateMatrix::with_initial_column(model.initial_forwards()).unwrap();
    let result = simulate_forward_rates(&cfg).unwrap();

    let f0 = result.forward(3, 0).unwrap();
    let mu = model.drift(&init, 3, 0).unwrap();
    let expected = f0 * (mu * 0.5).exp();
    let mc = result.forward(3, 1).unwrap();
    let se = result.std_error_at(3, 1).unwrap().unwrap();
    println!(
        "F[3][0] = {:.6}, E[F[3][1]] = {:.6}, MC = {:.6}, SE = {:.2e}",
        f0, expected, mc, se
    );

    assert!(mu > 0.0);
    assert!(expected - f0 > 5.0 * se, "drift not resolvable at this path count");
    assert!((mc - expected).abs() < 4.0 * se);
    assert!(mc - f0 > se, "mean did not rise: {} vs {}", mc, f0);
}
