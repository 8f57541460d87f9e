// Benchmark Report Types
// Structured output for regression tracking across engine changes

use serde::Serialize;

// ─── Statistics (per-metric sweep aggregation) ──────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        Self {
            mean,
            std_dev: variance.sqrt(),
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Scenario Result ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub label: String,
    pub category: String,
    pub pass: bool,
    pub blocks: usize,
    pub final_fee: u128,
    pub peak_fee: u128,
    pub floor_fee: u128,
    pub inc_count: usize,
    pub dec_count: usize,
    pub hold_count: usize,
    pub bounds_ok: bool,
    pub determinism_ok: bool,
    pub elapsed_ms: u128,
}

// ─── Random Sweep Report ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub runs: usize,
    pub base_seed: u64,
    pub passed: usize,
    pub failed: usize,
    /// Segments drawn per utilization regime: cruise, surge, idle, chaos.
    pub regime_counts: [u32; 4],
    pub blocks_per_run: Stats,
    pub final_fee: Stats,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub summary: Summary,
    pub quadratic_dominates_linear: bool,
    pub scenarios: Vec<ScenarioResult>,
    pub sweep: SweepReport,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}
