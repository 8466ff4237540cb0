// demos/demo.rs
use fast_lmm::math_utils::Timer;
use fast_lmm::mc::mc_engine::{simulate_forward_rates, LmmConfig, Statistics};
use fast_lmm::output;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let csv_path = args.get(1).cloned();

    // 2y quarterly grid on an upward sloping curve
    let cfg = LmmConfig {
        time_step: 0.25,
        maturity: 2.0,
        zero_curve: vec![0.030, 0.031, 0.032, 0.033, 0.034, 0.035, 0.036, 0.037, 0.038],
        volatilities: vec![0.22, 0.21, 0.20, 0.19, 0.18, 0.17, 0.16, 0.15],
        paths: 50_000,
        seed: 42,
        statistics: Statistics::MEAN | Statistics::STD_ERROR,
        ..Default::default()
    };

    let timer = Timer::new();
    let result = match simulate_forward_rates(&cfg) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = timer.elapsed_ms();

    println!("--- One-Factor LMM Monte Carlo ---");
    println!("Paths: {}  Seed: {}  Time: {:.2} ms", result.paths, result.seed, elapsed);
    println!("Tenors: {:?}", result.grid.tenors().to_vec());
    println!();
    println!("Averaged forward rates F[k][j] (rows: tenor k, columns: step j)");

    let n = result.dimension();
    print!("{:>6}", "k\\j");
    for j in 0..n {
        print!("{:>10}", j);
    }
    println!();
    for k in 0..n {
        print!("{:>6}", k);
        for j in 0..=k {
            print!("{:>10.5}", result.mean[(k, j)]);
        }
        println!();
    }

    let last = n - 1;
    if let Ok((lo, hi)) = result.confidence_interval(last, last, 0.95) {
        println!();
        println!(
            "F[{}][{}] = {:.6}, 95% CI [{:.6}, {:.6}]",
            last,
            last,
            result.mean[(last, last)],
            lo,
            hi
        );
    }

    if let Some(path) = csv_path {
        match output::write_matrix_to_csv(&path, &result) {
            Ok(()) => println!("Forward matrix written to {}", path),
            Err(e) => eprintln!("Could not write {}: {}", path, e),
        }
        let summary_path = format!("{}.summary.csv", path.trim_end_matches(".csv"));
        let paths = result.paths.to_string();
        let seed = result.seed.to_string();
        let time = format!("{:.2}", elapsed);
        let summary = [
            ("paths", paths.as_str()),
            ("seed", seed.as_str()),
            ("time_ms", time.as_str()),
        ];
        if let Err(e) = output::write_summary_to_csv(&summary_path, &summary) {
            eprintln!("Could not write {}: {}", summary_path, e);
        }
    }
}
