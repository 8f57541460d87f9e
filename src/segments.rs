// Copyright © 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Segment expansion -- run-length utilization descriptions flattened into
//! per-block sequences.
//!
//! A segment is "N blocks at X% utilization". Expansion produces one clamped
//! percentage per block in segment order, the chronological input of the fee
//! simulator.

use crate::adapter::{clamp_pct, from_decimal, to_decimal};
use crate::types::Segment;

/// Hard cap on total expanded blocks per simulation.
///
/// Segment lists come from interactive callers; the cap bounds allocation
/// against adversarial block counts. [`validate_segments`] reports the
/// overflow up front, [`expand_segments`] truncates at the cap.
pub const MAX_SIM_BLOCKS: u64 = 1_000_000;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from segment validation.
#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    #[error("segment expansion of {requested} blocks exceeds the {max}-block cap")]
    TooManyBlocks { requested: u64, max: u64 },
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

/// Total block count a segment list expands to, after floor-truncation.
pub fn total_blocks(segments: &[Segment]) -> u64 {
    segments
        .iter()
        .map(segment_blocks)
        .fold(0u64, |acc, b| acc.saturating_add(b))
}

/// Reject segment lists whose expansion would exceed [`MAX_SIM_BLOCKS`].
pub fn validate_segments(segments: &[Segment]) -> Result<(), SegmentError> {
    let requested = total_blocks(segments);
    if requested > MAX_SIM_BLOCKS {
        return Err(SegmentError::TooManyBlocks { requested, max: MAX_SIM_BLOCKS });
    }
    Ok(())
}

/// Expand segments into one clamped utilization percentage per block.
///
/// Each segment contributes `max(0, floor(blocks))` copies of its
/// percentage, clamped to 0-100 before replication. Degenerate input yields
/// an empty sequence; the function itself never fails.
pub fn expand_segments(segments: &[Segment]) -> Vec<f64> {
    let capacity = total_blocks(segments).min(MAX_SIM_BLOCKS) as usize;
    let mut seq = Vec::with_capacity(capacity);
    for s in segments {
        let blocks = segment_blocks(s);
        let pct = from_decimal(clamp_pct(to_decimal(s.utilization_pct)));
        for _ in 0..blocks {
            if seq.len() as u64 >= MAX_SIM_BLOCKS {
                return seq;
            }
            seq.push(pct);
        }
    }
    seq
}

fn segment_blocks(s: &Segment) -> u64 {
    // NaN falls through max() to zero; the cast saturates for huge counts.
    s.blocks.floor().max(0.0) as u64
}

// ===========================================================================
// Tests
// ===========================================================================
