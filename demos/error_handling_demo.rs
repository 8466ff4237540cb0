// demos/error_handling_demo.rs
use fast_lmm::error::LmmError;
use fast_lmm::mc::cancel::CancellationToken;
use fast_lmm::mc::mc_engine::{simulate_forward_rates, simulate_forward_rates_with_cancel, LmmConfig};

fn report(label: &str, outcome: Result<fast_lmm::SimulationResult, LmmError>) {
    match outcome {
        Ok(r) => println!("   Unexpected success with {} paths", r.paths),
        Err(e) => println!("   ✓ {}: {}", label, e),
    }
}

fn main() {
    println!("Error Handling Demo for fast-lmm");
    println!("================================\n");

    let base = LmmConfig {
        time_step: 0.25,
        maturity: 1.0,
        zero_curve: vec![0.01; 5],
        volatilities: vec![0.2; 4],
        paths: 100,
        ..Default::default()
    };

    println!("1. Zero curve shorter than the grid...");
    report(
        "Caught",
        simulate_forward_rates(&LmmConfig {
            zero_curve: vec![0.01; 3],
            ..base.clone()
        }),
    );

    println!("\n2. Missing volatilities...");
    report(
        "Caught",
        simulate_forward_rates(&LmmConfig {
            volatilities: vec![0.2; 2],
            ..base.clone()
        }),
    );

    println!("\n3. Zero paths...");
    report(
        "Caught",
        simulate_forward_rates(&LmmConfig {
            paths: 0,
            ..base.clone()
        }),
    );

    println!("\n4. Non-positive time step...");
    report(
        "Caught",
        simulate_forward_rates(&LmmConfig {
            time_step: 0.0,
            ..base.clone()
        }),
    );

    println!("\n5. Zero rate at or below -100%...");
    report(
        "Caught",
        simulate_forward_rates(&LmmConfig {
            zero_curve: vec![0.01, -1.5, 0.01, 0.01, 0.01],
            ..base.clone()
        }),
    );

    println!("\n6. Cancelled run...");
    let token = CancellationToken::new();
    token.cancel();
    report("Stopped", simulate_forward_rates_with_cancel(&base, &token));

    println!("\n7. Valid run...");
    match simulate_forward_rates(&base) {
        Ok(r) => println!("   ✓ F[3][3] = {:.6} over {} paths", r.mean[(3, 3)], r.paths),
        Err(e) => println!("   Unexpected error: {}", e),
    }
}
