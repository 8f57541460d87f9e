// Copyright © 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Fee simulator -- drives the block loop over an expanded utilization
//! sequence.
//!
//! Block 0 reports the starting fee untouched; every later block applies the
//! delta derived from the *previous* block's utilization. The one-block lag
//! is the causal rule of the model: a block's fee reacts to the congestion
//! it inherited, never to its own.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use crate::adapter::to_decimal;
use crate::delta::calc_delta_pct;
use crate::segments::expand_segments;
use crate::types::{BaseFeeParams, FeeAction, Segment, SimPoint, Wei};

/// One hundred percent in basis points; deltas quantize to 0.01% steps.
const BPS_SCALE: u128 = 10_000;

/// Simulate the base fee over every block the segments expand to.
///
/// Each call is independent: the running fee is reseeded from the clamped
/// minimum, and identical inputs produce bit-identical output sequences.
pub fn simulate_base_fee(params: &BaseFeeParams, segments: &[Segment]) -> Vec<SimPoint> {
    let gas_limit = if params.gas_limit == 0 { 1 } else { params.gas_limit };
    let (min, max) = (params.min_base_fee_wei, params.max_base_fee_wei);

    let mut base_fee = min.clamp_to(min, max);

    let gas_pct_seq = expand_segments(segments);
    let mut points = Vec::with_capacity(gas_pct_seq.len());

    // Block 0 never adjusts -- there is no previous block to react to.
    if let Some(&first_pct) = gas_pct_seq.first() {
        points.push(SimPoint {
            block: 0,
            gas_used: gas_used(gas_limit, first_pct),
            gas_used_pct: first_pct,
            base_fee_wei: base_fee,
            action: FeeAction::Hold,
        });
    }

    for (i, &pct) in gas_pct_seq.iter().enumerate().skip(1) {
        let prev_pct = gas_pct_seq[i - 1];
        let (delta_pct, action) = calc_delta_pct(prev_pct, params);

        if !delta_pct.is_zero() {
            base_fee = apply_delta_pct(base_fee, delta_pct);
        }
        base_fee = base_fee.clamp_to(min, max);

        points.push(SimPoint {
            block: i as u64,
            gas_used: gas_used(gas_limit, pct),
            gas_used_pct: pct,
            base_fee_wei: base_fee,
            // The attempted direction, even when the clamp neutralized it.
            action,
        });
    }

    points
}

/// Apply a signed percentage delta with basis-point quantization.
///
/// The delta floors to whole basis points, then the fee scales by
/// `(10_000 + bps) / 10_000` in pure `u128` arithmetic with floor division,
/// so identical inputs replay to identical fees on any platform.
fn apply_delta_pct(fee: Wei, delta_pct: Decimal) -> Wei {
    let bps = quantize_bps(delta_pct);
    let multiplier = BPS_SCALE as i128 + i128::from(bps);
    if multiplier <= 0 {
        // A delta at or below -100% wipes the fee; the bound clamp restores
        // the floor afterwards.
        return Wei::zero();
    }
    let scaled = fee
        .0
        .checked_mul(multiplier as u128)
        .map(|v| v / BPS_SCALE)
        .unwrap_or(u128::MAX);
    Wei(scaled)
}

/// Floor a percentage delta to whole basis points (1 bps = 0.01%), toward
/// negative infinity.
fn quantize_bps(delta_pct: Decimal) -> i64 {
    let q = delta_pct.saturating_mul(dec!(100)).floor();
    q.to_i64()
        .unwrap_or(if q.is_sign_negative() { i64::MIN } else { i64::MAX })
}

/// Integer gas usage for a block: `floor(gas_limit * pct / 100)`.
fn gas_used(gas_limit: u128, pct: f64) -> u128 {
    let centi_pct = (to_decimal(pct) * dec!(100)).floor().to_u128().unwrap_or(0);
    gas_limit.saturating_mul(centi_pct) / BPS_SCALE
}

// ===========================================================================
// Tests
// ===========================================================================
