//! Benchmark for roster generation.
//!
//! Run with: cargo run --release --no-default-features --bin bench

use shift_roster::{constraints, demo_data, generator};
use std::time::Instant;

const ITERATIONS: u32 = 200;

fn main() {
    let problem = demo_data::generate(demo_data::DemoData::Large);
    let n_employees = problem.employees.len();
    let n_days = problem.month.days_in_month();

    println!("Benchmark: Greedy Roster Generation");
    println!("  Month: {}", problem.month);
    println!("  Employees: {}", n_employees);
    println!("  Cells: {}", n_employees * n_days as usize);
    println!();

    let first = match generator::generate(&problem) {
        Ok(generated) => generated,
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            return;
        }
    };
    println!(
        "Initial score: {} ({:?})",
        first.analysis.score, first.stats.duration
    );
    println!();

    let bench_start = Instant::now();
    let mut analysis_time = std::time::Duration::ZERO;
    for _ in 0..ITERATIONS {
        let Ok(generated) = generator::generate(&problem) else {
            continue;
        };
        // Same seed, same grid
        assert_eq!(generated.roster, first.roster, "Roster changed between runs!");

        let analyze_start = Instant::now();
        let _ = constraints::analyze(&problem, &generated.roster);
        analysis_time += analyze_start.elapsed();
    }

    let elapsed = bench_start.elapsed();
    let per_sec = ITERATIONS as f64 / elapsed.as_secs_f64();

    println!("Results:");
    println!("  Rosters: {}", ITERATIONS);
    println!("  Time: {:.2?}", elapsed);
    println!("  Rosters/sec: {:.0}", per_sec);
    println!("  Analysis share: {:.2?}", analysis_time);
    println!("  Final score: {} (verified)", first.analysis.score);
}
