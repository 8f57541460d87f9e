// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Caesar Protocol Base Fee Playground ("The Gasworks") - Type Definitions

use serde::{Serialize, Deserialize};
use std::fmt;

// ─── Strategy ────────────────────────────────────────────────────────────────

/// Fee adjustment strategy applied outside the dead band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Constant rate: every adjustment is exactly ±rate percent.
    Linear,
    /// Rate scaled by squared distance from the crossed threshold --
    /// corrections grow the further utilization drifts from the dead band.
    WeightedQuadratic,
}

impl Default for Strategy {
    fn default() -> Self { Strategy::Linear }
}

// ─── Fee Action ──────────────────────────────────────────────────────────────

/// Direction the engine attempted for a block, before bound clamping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeeAction {
    Inc,
    Dec,
    Hold,
}

// ─── Wei ─────────────────────────────────────────────────────────────────────

/// Wei-denominated fee value backed by `u128`.
///
/// Fees are exact integers end to end; scaling them is integer multiply and
/// floor divide, so a simulation replays bit-identically on every platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Wei(pub u128);

impl Wei {
    /// Zero value
    pub fn zero() -> Self {
        Self(0)
    }

    /// Whether the value is exactly zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Clamp into `[lo, hi]`, applying the upper bound first: an inverted
    /// range collapses to `lo`.
    pub fn clamp_to(self, lo: Wei, hi: Wei) -> Wei {
        Wei(self.0.min(hi.0).max(lo.0))
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wei", self.0)
    }
}

// ─── Segment ─────────────────────────────────────────────────────────────────

/// Run-length utilization description: `blocks` blocks at `utilization_pct`.
///
/// `blocks` is floor-truncated and floored at zero during expansion, so
/// fractional or negative counts from the config surface are harmless.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Segment {
    pub blocks: f64,
    /// Clamped to 0-100 before replication.
    pub utilization_pct: f64,
}

impl Segment {
    pub fn new(blocks: f64, utilization_pct: f64) -> Self {
        Self { blocks, utilization_pct }
    }
}

// ─── SimPoint ────────────────────────────────────────────────────────────────

/// One simulated block: append-only output of the fee simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimPoint {
    /// 0-based, contiguous block index.
    pub block: u64,
    /// Derived: `floor(gas_limit * utilization / 100)`.
    pub gas_used: u128,
    pub gas_used_pct: f64,
    pub base_fee_wei: Wei,
    pub action: FeeAction,
}

// ─── BaseFeeParams ───────────────────────────────────────────────────────────

/// Parameters for one simulation run. Immutable for the duration of the run.
///
/// Out-of-range values are normalized by the engine (thresholds clamped to
/// 0-100, rate and `k` coerced non-negative, zero gas limit treated as 1,
/// inverted fee bounds collapsed to the minimum) -- nothing here is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseFeeParams {
    pub gas_limit: u128,

    /// Utilization above this raises the fee. e.g. 33
    pub increasing_threshold_pct: f64,
    /// Utilization below this lowers the fee. e.g. 10
    pub decreasing_threshold_pct: f64,
    /// Adjustment magnitude per block, in percent. e.g. 2
    pub base_fee_change_rate_pct: f64,

    /// Also the starting fee of every run.
    pub min_base_fee_wei: Wei,
    pub max_base_fee_wei: Wei,

    // Configs predating the strategy split carry neither field.
    #[serde(default)]
    pub strategy: Strategy,
    /// Curvature weight for the weighted-quadratic strategy. e.g. 0 ~ 10
    #[serde(default)]
    pub k: f64,
}

impl Default for BaseFeeParams {
    fn default() -> Self {
        Self {
            gas_limit: 30_000_000,
            increasing_threshold_pct: 33.0,
            decreasing_threshold_pct: 10.0,
            base_fee_change_rate_pct: 2.0,
            min_base_fee_wei: Wei(1_000_000_000),
            max_base_fee_wei: Wei(1_000_000_000_000),
            strategy: Strategy::Linear,
            k: 0.0,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_wire_strings() {
        assert_eq!(serde_json::to_string(&Strategy::Linear).unwrap(), "\"linear\"");
        assert_eq!(
            serde_json::to_string(&Strategy::WeightedQuadratic).unwrap(),
            "\"weighted-quadratic\""
        );
        let s: Strategy = serde_json::from_str("\"weighted-quadratic\"").unwrap();
        assert_eq!(s, Strategy::WeightedQuadratic);
    }

    #[test]
    fn action_wire_strings() {
        assert_eq!(serde_json::to_string(&FeeAction::Inc).unwrap(), "\"inc\"");
        assert_eq!(serde_json::to_string(&FeeAction::Dec).unwrap(), "\"dec\"");
        assert_eq!(serde_json::to_string(&FeeAction::Hold).unwrap(), "\"hold\"");
    }

    #[test]
    fn params_without_strategy_fields_deserialize() {
        // Linear-era config: no strategy, no k.
        let json = r#"{
            "gas_limit": 1000,
            "increasing_threshold_pct": 33.0,
            "decreasing_threshold_pct": 10.0,
            "base_fee_change_rate_pct": 2.0,
            "min_base_fee_wei": 100,
            "max_base_fee_wei": 10000
        }"#;
        let p: BaseFeeParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.strategy, Strategy::Linear);
        assert_eq!(p.k, 0.0);
        assert_eq!(p.min_base_fee_wei, Wei(100));
    }

    #[test]
    fn wei_clamp_ordinary_range() {
        assert_eq!(Wei(5).clamp_to(Wei(10), Wei(20)), Wei(10));
        assert_eq!(Wei(15).clamp_to(Wei(10), Wei(20)), Wei(15));
        assert_eq!(Wei(25).clamp_to(Wei(10), Wei(20)), Wei(20));
    }

    #[test]
    fn wei_clamp_inverted_range_collapses_to_lo() {
        // min > max: the minimum wins, whatever the input.
        assert_eq!(Wei(0).clamp_to(Wei(500), Wei(100)), Wei(500));
        assert_eq!(Wei(300).clamp_to(Wei(500), Wei(100)), Wei(500));
        assert_eq!(Wei(u128::MAX).clamp_to(Wei(500), Wei(100)), Wei(500));
    }

    #[test]
    fn wei_display() {
        assert_eq!(format!("{}", Wei(42)), "42 wei");
        assert!(Wei::zero().is_zero());
    }
}
