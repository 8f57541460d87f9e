// Base Fee Bench Runner v0.1.0 — scenario validation + seeded invariant sweeps
// Hand-checked reference traces, ChaCha8 random sweeps, JSON report
//
// Usage:
//   cargo run --release --bin bench                  # all scenarios + 20-run sweep
//   cargo run --release --bin bench -- --runs 100    # longer sweep
//   cargo run --release --bin bench -- --seed 42     # custom base seed
//   cargo run --release --bin bench -- PINNED        # filter scenarios by name

mod report;
mod scenarios;
mod traffic;

use basefee_engine::{
    calc_delta_pct, expand_segments, simulate_base_fee, BaseFeeParams, FeeAction, Segment,
    SimPoint, Strategy, Wei,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use report::*;
use scenarios::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use traffic::SegmentGenerator;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs { runs: 20, seed: 0, filter: None };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(20);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Invariant Checks ───────────────────────────────────────────────────────

fn bounds_hold(params: &BaseFeeParams, points: &[SimPoint]) -> bool {
    points.iter().all(|p| {
        p.base_fee_wei
            == p.base_fee_wei.clamp_to(params.min_base_fee_wei, params.max_base_fee_wei)
    })
}

fn block_zero_holds(points: &[SimPoint]) -> bool {
    points.first().map_or(true, |p| p.action == FeeAction::Hold)
}

/// Every block's action must match what the previous block's utilization
/// dictates -- the one-block causal lag, re-derived through the public
/// delta calculator.
fn causal_lag_holds(params: &BaseFeeParams, segments: &[Segment], points: &[SimPoint]) -> bool {
    let seq = expand_segments(segments);
    points.iter().skip(1).all(|p| {
        let (_, expected) = calc_delta_pct(seq[p.block as usize - 1], params);
        p.action == expected
    })
}

// ─── Scenario Runner ────────────────────────────────────────────────────────

fn run_scenario(s: &Scenario) -> ScenarioResult {
    let start = Instant::now();
    let points = simulate_base_fee(&s.params, &s.segments);
    let rerun = simulate_base_fee(&s.params, &s.segments);
    let elapsed_ms = start.elapsed().as_millis();

    let determinism_ok = points == rerun;
    let bounds_ok = bounds_hold(&s.params, &points);

    let inc_count = points.iter().filter(|p| p.action == FeeAction::Inc).count();
    let dec_count = points.iter().filter(|p| p.action == FeeAction::Dec).count();
    let hold_count = points.iter().filter(|p| p.action == FeeAction::Hold).count();

    let final_fee = points.last().map_or(0, |p| p.base_fee_wei.0);
    let peak_fee = points.iter().map(|p| p.base_fee_wei.0).max().unwrap_or(0);
    let floor_fee = points.iter().map(|p| p.base_fee_wei.0).min().unwrap_or(0);

    let mut pass = determinism_ok && bounds_ok && block_zero_holds(&points);
    let c = &s.criteria;
    if let Some(expected) = c.expected_final_fee {
        pass &= final_fee == expected;
    }
    if c.require_all_hold_after_first {
        pass &= points.iter().skip(1).all(|p| p.action == FeeAction::Hold);
    }
    if let Some(pin) = c.require_pinned_at {
        pass &= points.iter().all(|p| p.base_fee_wei.0 == pin);
    }

    ScenarioResult {
        name: s.name.to_string(),
        label: s.label.to_string(),
        category: s.category.to_string(),
        pass,
        blocks: points.len(),
        final_fee,
        peak_fee,
        floor_fee,
        inc_count,
        dec_count,
        hold_count,
        bounds_ok,
        determinism_ok,
        elapsed_ms,
    }
}

/// Paired comparison: under identical sustained congestion, the
/// weighted-quadratic strategy must outrun the linear one.
fn quadratic_dominates_linear() -> bool {
    let segments = vec![Segment::new(30.0, 70.0)];
    let linear = BaseFeeParams {
        max_base_fee_wei: Wei(u128::MAX >> 1),
        ..reference_params()
    };
    let quadratic = BaseFeeParams {
        strategy: Strategy::WeightedQuadratic,
        k: 5.0,
        ..linear.clone()
    };

    let lin_final = simulate_base_fee(&linear, &segments)
        .last()
        .map_or(0, |p| p.base_fee_wei.0);
    let quad_final = simulate_base_fee(&quadratic, &segments)
        .last()
        .map_or(0, |p| p.base_fee_wei.0);
    quad_final > lin_final
}

// ─── Random Sweep ───────────────────────────────────────────────────────────

fn run_sweep(runs: usize, base_seed: u64) -> SweepReport {
    let params = reference_params();
    let mut passed = 0;
    let mut regime_counts = [0u32; 4];
    let mut blocks_samples = Vec::with_capacity(runs);
    let mut fee_samples = Vec::with_capacity(runs);

    for run in 0..runs {
        let rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(run as u64));
        let mut generator = SegmentGenerator::new(rng);
        let segments = generator.generate(12);
        for (total, drawn) in regime_counts.iter_mut().zip(generator.regime_counts) {
            *total += drawn;
        }

        let points = simulate_base_fee(&params, &segments);
        let rerun = simulate_base_fee(&params, &segments);

        let ok = points == rerun
            && bounds_hold(&params, &points)
            && block_zero_holds(&points)
            && causal_lag_holds(&params, &segments, &points);
        if ok {
            passed += 1;
        }

        blocks_samples.push(points.len() as f64);
        if let Some(p) = points.last() {
            fee_samples.push(p.base_fee_wei.0 as f64);
        }
    }

    SweepReport {
        runs,
        base_seed,
        passed,
        failed: runs - passed,
        regime_counts,
        blocks_per_run: Stats::from_samples(&blocks_samples),
        final_fee: Stats::from_samples(&fee_samples),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios
                .iter()
                .filter(|s| {
                    s.name.to_lowercase().contains(&f_lower)
                        || s.label.to_lowercase().contains(&f_lower)
                        || s.category.to_lowercase().contains(&f_lower)
                })
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    println!("\n  Base Fee Bench Runner v0.1.0");
    println!("  PRNG: ChaCha8Rng | Sweep runs: {} | Base seed: {}", cli.runs, cli.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!(
        "  {:<34} {:>6} {:>10} {:>10} {:>5} {:>5} {:>5} {:>6}",
        "Scenario", "Blocks", "Final", "Peak", "Inc", "Dec", "Hold", "Time"
    );
    println!("  {}", "-".repeat(88));

    let suite_start = Instant::now();
    let mut results = Vec::new();

    for scenario in &to_run {
        let r = run_scenario(scenario);
        let status = if r.pass { "PASS" } else { "FAIL" };
        println!(
            "  {:<34} {:>6} {:>10} {:>10} {:>5} {:>5} {:>5} {:>4}ms  {}",
            r.label, r.blocks, r.final_fee, r.peak_fee, r.inc_count, r.dec_count,
            r.hold_count, r.elapsed_ms, status,
        );
        results.push(r);
    }

    let quad_check = quadratic_dominates_linear();
    let sweep = run_sweep(cli.runs, cli.seed);
    let suite_elapsed = suite_start.elapsed();

    // ─── Summary ────────────────────────────────────────────────────────

    let total = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let failed = total - passed;

    println!("  {}", "-".repeat(88));
    println!(
        "  Scenarios: {}  Passed: {}  Failed: {}  Suite time: {:.1}s",
        total, passed, failed, suite_elapsed.as_secs_f64()
    );
    println!(
        "  Quadratic > Linear:  {}",
        if quad_check { "PASS" } else { "FAIL" }
    );
    println!(
        "  Random sweep:        {}/{} runs held all invariants (avg {:.0} blocks/run)\n",
        sweep.passed, sweep.runs, sweep.blocks_per_run.mean
    );

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis();
    let timestamp = format!("{}", ts);

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: "0.1.0",
        prng: "ChaCha8Rng",
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total as f64,
        },
        quadratic_dominates_linear: quad_check,
        scenarios: results,
        sweep,
    };

    let dir = std::path::Path::new("benchmark-results");
    if !dir.exists() {
        std::fs::create_dir_all(dir).expect("Failed to create benchmark-results/");
    }
    let path = dir.join(format!("bench-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&report).expect("Failed to serialize");
    std::fs::write(&path, &json).expect("Failed to write benchmark file");
    println!("  Results saved to: {}\n", path.display());

    let sweep_failed = report.sweep.failed > 0;
    if failed > 0 || !quad_check || sweep_failed {
        std::process::exit(1);
    }
}
