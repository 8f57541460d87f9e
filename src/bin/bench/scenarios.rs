// Scenario Definitions — named utilization profiles with pass criteria
// Zero engine changes: every scenario is just a parameter set plus segments

use basefee_engine::{BaseFeeParams, Segment, Strategy, Wei};

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub params: BaseFeeParams,
    pub segments: Vec<Segment>,
    pub criteria: PassCriteria,
}

pub struct PassCriteria {
    /// Exact final fee, where the trace is fully determined by hand.
    pub expected_final_fee: Option<u128>,
    /// Every block after 0 must be a hold.
    pub require_all_hold_after_first: bool,
    /// Every block must sit at exactly this fee (collapsed-range scenarios).
    pub require_pinned_at: Option<u128>,
}

impl Default for PassCriteria {
    fn default() -> Self {
        Self {
            expected_final_fee: None,
            require_all_hold_after_first: false,
            require_pinned_at: None,
        }
    }
}

// ─── Shared parameter base ──────────────────────────────────────────────────

pub fn reference_params() -> BaseFeeParams {
    BaseFeeParams {
        gas_limit: 1000,
        increasing_threshold_pct: 33.0,
        decreasing_threshold_pct: 10.0,
        base_fee_change_rate_pct: 2.0,
        min_base_fee_wei: Wei(100),
        max_base_fee_wei: Wei(10_000),
        strategy: Strategy::Linear,
        k: 0.0,
    }
}

// ─── Scenario list ──────────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "LINEAR_STEP",
            label: "Linear step response",
            category: "reference",
            params: reference_params(),
            segments: vec![Segment::new(3.0, 50.0), Segment::new(2.0, 5.0)],
            criteria: PassCriteria {
                // 100 -> 102 -> 104 -> 106 -> 103
                expected_final_fee: Some(103),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "SUSTAINED_CONGESTION",
            label: "Sustained 95% congestion",
            category: "stress",
            params: BaseFeeParams {
                max_base_fee_wei: Wei(1000),
                ..reference_params()
            },
            segments: vec![Segment::new(200.0, 95.0)],
            criteria: PassCriteria {
                // 2% compounding for 199 raises pins the fee at the ceiling.
                expected_final_fee: Some(1000),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "IDLE_DRAIN",
            label: "Idle chain drains to floor",
            category: "stress",
            params: reference_params(),
            segments: vec![Segment::new(1.0, 50.0), Segment::new(150.0, 2.0)],
            criteria: PassCriteria {
                expected_final_fee: Some(100),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "DEAD_BAND_CRUISE",
            label: "Utilization inside the dead band",
            category: "reference",
            params: reference_params(),
            segments: vec![Segment::new(80.0, 20.0)],
            criteria: PassCriteria {
                expected_final_fee: Some(100),
                require_all_hold_after_first: true,
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "PINNED_RANGE",
            label: "min == max pins the fee",
            category: "edge",
            params: BaseFeeParams {
                min_base_fee_wei: Wei(500),
                max_base_fee_wei: Wei(500),
                ..reference_params()
            },
            segments: vec![
                Segment::new(10.0, 95.0),
                Segment::new(10.0, 2.0),
                Segment::new(10.0, 20.0),
            ],
            criteria: PassCriteria {
                require_pinned_at: Some(500),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "QUADRATIC_SURGE",
            label: "Weighted-quadratic surge, k=8",
            category: "stress",
            params: BaseFeeParams {
                strategy: Strategy::WeightedQuadratic,
                k: 8.0,
                ..reference_params()
            },
            segments: vec![Segment::new(60.0, 95.0)],
            criteria: PassCriteria {
                // The curvature-boosted rate reaches the ceiling well inside
                // 60 blocks.
                expected_final_fee: Some(10_000),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "OSCILLATION",
            label: "Alternating surge and idle",
            category: "stress",
            params: reference_params(),
            segments: oscillating_segments(40),
            criteria: PassCriteria::default(),
        },
    ]
}

fn oscillating_segments(cycles: usize) -> Vec<Segment> {
    let mut segs = Vec::with_capacity(cycles * 2);
    for _ in 0..cycles {
        segs.push(Segment::new(1.0, 95.0));
        segs.push(Segment::new(1.0, 5.0));
    }
    segs
}
