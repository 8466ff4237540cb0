// scripts/benchmark.rs
use fast_lmm::math_utils::Timer;
use fast_lmm::mc::mc_engine::{simulate_forward_rates, LmmConfig, Statistics};
use std::env;
use std::fs::File;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    tenors: usize,
    paths: usize,
    parallel: bool,
    time_ms: f64,
    throughput_paths_per_sec: f64,
    last_forward: f64,
}

fn flat_config(time_step: f64, maturity: f64, paths: usize, parallel: bool) -> LmmConfig {
    let steps = (maturity / time_step).round() as usize + 1;
    LmmConfig {
        time_step,
        maturity,
        zero_curve: vec![0.03; steps],
        volatilities: vec![0.2; steps - 1],
        paths,
        seed: 42,
        parallel,
        chunk_size: 256,
        statistics: Statistics::MEAN,
    }
}

fn run_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();

    let cases = [
        ("5y quarterly", 0.25, 5.0, 100_000),
        ("10y quarterly", 0.25, 10.0, 50_000),
        ("10y monthly", 1.0 / 12.0, 10.0, 2_000),
    ];

    for (label, time_step, maturity, paths) in cases {
        for parallel in [false, true] {
            let cfg = flat_config(time_step, maturity, paths, parallel);
            println!(
                "  {} ({} paths, {})...",
                label,
                paths,
                if parallel { "parallel" } else { "sequential" }
            );

            let timer = Timer::new();
            let result = match simulate_forward_rates(&cfg) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("    failed: {}", e);
                    continue;
                }
            };
            let time_ms = timer.elapsed_ms();

            let last = result.dimension() - 1;
            results.push(BenchmarkResult {
                name: format!("LMM {}", label),
                tenors: result.dimension(),
                paths,
                parallel,
                time_ms,
                throughput_paths_per_sec: paths as f64 / (time_ms / 1000.0),
                last_forward: result.forward(last, last).unwrap_or(f64::NAN),
            });
        }
    }

    results
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(
        file,
        "Benchmark,Tenors,Paths,Parallel,Time_ms,Throughput_paths_per_sec,Last_Forward"
    )?;
    for result in results {
        writeln!(
            file,
            "{},{},{},{},{:.2},{:.0},{:.6}",
            result.name,
            result.tenors,
            result.paths,
            result.parallel,
            result.time_ms,
            result.throughput_paths_per_sec,
            result.last_forward
        )?;
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("fast-lmm Benchmark Suite");
    println!("========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    println!("Running LMM simulations...");
    let results = run_benchmarks();

    println!("\n{:=<80}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<80}", "");
    println!(
        "{:<22} {:>7} {:>8} {:>10} {:>12} {:>12} {:>10}",
        "Benchmark", "Tenors", "Paths", "Mode", "Time (ms)", "Paths/sec", "F[n][n]"
    );
    println!("{:-<80}", "");
    for result in &results {
        println!(
            "{:<22} {:>7} {:>8} {:>10} {:>12.2} {:>12.0} {:>10.6}",
            result.name,
            result.tenors,
            result.paths,
            if result.parallel { "parallel" } else { "sequential" },
            result.time_ms,
            result.throughput_paths_per_sec,
            result.last_forward
        );
    }
    println!("{:=<80}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    match write_results_to_csv(&results, &system_info, &filename) {
        Ok(()) => println!("\nResults saved to: {}", filename),
        Err(e) => eprintln!("\nCould not write {}: {}", filename, e),
    }
    println!("Run: cargo run --bin benchmark --release");
}
