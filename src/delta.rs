// Copyright © 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Delta calculator -- maps previous-block utilization to a signed fee delta.
//!
//! The dead band between the two thresholds is checked before either
//! strategy branch and always wins. Outside it, the linear strategy applies
//! a constant ±rate while the weighted-quadratic strategy scales the rate by
//! the squared normalized distance from the crossed threshold.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::adapter::{clamp_pct, non_negative, to_decimal};
use crate::types::{BaseFeeParams, FeeAction, Strategy};

const FULL_SCALE: Decimal = dec!(100);

/// Compute the percentage delta and action for a block, given the *previous*
/// block's utilization.
///
/// Deterministic and total: thresholds are clamped to 0-100, rate and `k`
/// coerced to non-negative finite values, and the degenerate thresholds
/// (100 for increasing, 0 for decreasing) contribute a zero quadratic term
/// instead of dividing by zero.
pub fn calc_delta_pct(prev_gas_used_pct: f64, params: &BaseFeeParams) -> (Decimal, FeeAction) {
    let inc_th = clamp_pct(to_decimal(params.increasing_threshold_pct));
    let dec_th = clamp_pct(to_decimal(params.decreasing_threshold_pct));
    let rate = non_negative(params.base_fee_change_rate_pct);
    let u = clamp_pct(to_decimal(prev_gas_used_pct));

    // Dead band: no change. Inclusive at both ends, checked before any
    // strategy branch.
    if u <= inc_th && u >= dec_th {
        return (Decimal::ZERO, FeeAction::Hold);
    }

    match params.strategy {
        Strategy::Linear => {
            if u > inc_th {
                (rate, FeeAction::Inc)
            } else {
                (-rate, FeeAction::Dec)
            }
        }
        Strategy::WeightedQuadratic => {
            let k = non_negative(params.k);
            if u > inc_th {
                (weighted(rate, k, overshoot(u, inc_th)), FeeAction::Inc)
            } else {
                (-weighted(rate, k, undershoot(u, dec_th)), FeeAction::Dec)
            }
        }
    }
}

/// Normalized distance above the increasing threshold, 0..1.
///
/// A threshold of exactly 100 leaves no headroom; the overshoot is zero.
fn overshoot(u: Decimal, inc_th: Decimal) -> Decimal {
    let headroom = FULL_SCALE - inc_th;
    if headroom.is_zero() {
        Decimal::ZERO
    } else {
        (u - inc_th) / headroom
    }
}

/// Normalized distance below the decreasing threshold, 0..1.
///
/// A threshold of exactly 0 has nothing below it; the undershoot is zero.
fn undershoot(u: Decimal, dec_th: Decimal) -> Decimal {
    if dec_th.is_zero() {
        Decimal::ZERO
    } else {
        (dec_th - u) / dec_th
    }
}

/// `rate * (1 + k * x^2)` -- the squared term makes the correction grow
/// super-linearly with distance from the dead band.
fn weighted(rate: Decimal, k: Decimal, x: Decimal) -> Decimal {
    rate.saturating_mul(Decimal::ONE.saturating_add(k.saturating_mul(x * x)))
}

// ===========================================================================
// Tests
// ===========================================================================
