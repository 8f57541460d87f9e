#[cfg(test)]
mod tests {
    use basefee_engine::{
        expand_segments, simulate_base_fee, validate_segments, BaseFeeParams, FeeAction, Segment,
        SegmentError, SimPoint, Strategy, Wei, MAX_SIM_BLOCKS,
    };

    fn reference_params() -> BaseFeeParams {
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

    fn fees(points: &[SimPoint]) -> Vec<u128> {
        points.iter().map(|p| p.base_fee_wei.0).collect()
    }

    // ========== Reference Scenarios ==========

    #[test]
    fn test_empty_segments_empty_result() {
        let params = reference_params();
        assert!(simulate_base_fee(&params, &[]).is_empty());
        assert!(simulate_base_fee(&params, &[Segment::new(0.0, 80.0)]).is_empty());
        assert!(simulate_base_fee(&params, &[Segment::new(-3.0, 80.0)]).is_empty());
    }

    #[test]
    fn test_linear_reference_scenario() {
        let points = simulate_base_fee(
            &reference_params(),
            &[Segment::new(3.0, 50.0), Segment::new(2.0, 5.0)],
        );

        assert_eq!(points.len(), 5);
        assert_eq!(fees(&points), vec![100, 102, 104, 106, 103]);

        assert_eq!(points[0].action, FeeAction::Hold);
        for p in &points[1..4] {
            assert_eq!(p.action, FeeAction::Inc, "block {}", p.block);
        }
        assert_eq!(points[4].action, FeeAction::Dec);

        // Gas derives from each block's own utilization.
        assert_eq!(points[2].gas_used, 500);
        assert_eq!(points[2].gas_used_pct, 50.0);
        assert_eq!(points[4].gas_used, 50);
        assert_eq!(points[4].gas_used_pct, 5.0);
    }

    #[test]
    fn test_block_zero_holds_regardless_of_utilization() {
        for pct in [0.0, 5.0, 20.0, 99.0, 100.0] {
            let points = simulate_base_fee(&reference_params(), &[Segment::new(1.0, pct)]);
            assert_eq!(points[0].action, FeeAction::Hold, "pct={pct}");
            assert_eq!(points[0].base_fee_wei, Wei(100), "pct={pct}");
        }
    }

    #[test]
    fn test_dead_band_keeps_fee_at_minimum() {
        let segments = vec![
            Segment::new(5.0, 10.0),
            Segment::new(5.0, 15.0),
            Segment::new(5.0, 33.0),
            Segment::new(5.0, 25.0),
        ];
        let points = simulate_base_fee(&reference_params(), &segments);
        assert_eq!(points.len(), 20);
        for p in &points {
            assert_eq!(p.action, FeeAction::Hold, "block {}", p.block);
            assert_eq!(p.base_fee_wei, Wei(100), "block {}", p.block);
        }
    }

    #[test]
    fn test_min_equals_max_pins_fee() {
        let params = BaseFeeParams {
            min_base_fee_wei: Wei(500),
            max_base_fee_wei: Wei(500),
            ..reference_params()
        };
        let points = simulate_base_fee(
            &params,
            &[Segment::new(5.0, 95.0), Segment::new(5.0, 2.0)],
        );
        for p in &points {
            assert_eq!(p.base_fee_wei, Wei(500), "block {}", p.block);
        }
        // The clamp pins the fee, not the actions: attempts still register.
        assert_eq!(points[1].action, FeeAction::Inc);
        assert_eq!(points[6].action, FeeAction::Dec);
    }

    #[test]
    fn test_inverted_bounds_collapse_to_minimum() {
        let params = BaseFeeParams {
            min_base_fee_wei: Wei(500),
            max_base_fee_wei: Wei(100),
            ..reference_params()
        };
        let points = simulate_base_fee(&params, &[Segment::new(10.0, 95.0)]);
        for p in &points {
            assert_eq!(p.base_fee_wei, Wei(500), "block {}", p.block);
        }
    }

    // ========== Causal Lag ==========

    #[test]
    fn test_one_block_lag() {
        // Utilization: 90, 0, 90. Each block reacts to the previous one only.
        let segments = vec![
            Segment::new(1.0, 90.0),
            Segment::new(1.0, 0.0),
            Segment::new(1.0, 90.0),
        ];
        let points = simulate_base_fee(&reference_params(), &segments);

        // Block 1 raises off block 0's congestion despite being idle itself.
        assert_eq!(points[1].action, FeeAction::Inc);
        assert_eq!(points[1].gas_used_pct, 0.0);
        assert_eq!(points[1].base_fee_wei, Wei(102));

        // Block 2 cuts off block 1's idleness despite being congested itself.
        assert_eq!(points[2].action, FeeAction::Dec);
        assert_eq!(points[2].gas_used_pct, 90.0);
        // 102 * 0.98 floors to 99, then the floor clamp restores 100.
        assert_eq!(points[2].base_fee_wei, Wei(100));
    }

    // ========== Bounds & Determinism ==========

    #[test]
    fn test_bounds_invariant_under_varied_load() {
        let params = reference_params();
        let profiles: Vec<Vec<Segment>> = vec![
            vec![Segment::new(300.0, 100.0)],
            vec![Segment::new(300.0, 0.0)],
            vec![Segment::new(1.0, 100.0), Segment::new(200.0, 0.0), Segment::new(200.0, 100.0)],
            (0..50).map(|i| Segment::new(1.0, (i * 7 % 101) as f64)).collect(),
        ];
        for segments in &profiles {
            for p in simulate_base_fee(&params, segments) {
                assert!(
                    p.base_fee_wei >= Wei(100) && p.base_fee_wei <= Wei(10_000),
                    "block {} fee {} out of bounds",
                    p.block,
                    p.base_fee_wei
                );
            }
        }
    }

    #[test]
    fn test_determinism_bit_identical() {
        let segments = vec![
            Segment::new(20.0, 85.0),
            Segment::new(20.0, 4.0),
            Segment::new(20.0, 22.0),
        ];
        for strategy in [Strategy::Linear, Strategy::WeightedQuadratic] {
            let params = BaseFeeParams { strategy, k: 6.5, ..reference_params() };
            let a = simulate_base_fee(&params, &segments);
            let b = simulate_base_fee(&params, &segments);
            assert_eq!(a, b, "strategy {strategy:?}");
        }
    }

    #[test]
    fn test_runs_are_independent() {
        // A run that ends high must not leak its fee into the next call.
        let params = reference_params();
        let hot = vec![Segment::new(50.0, 95.0)];
        let first = simulate_base_fee(&params, &hot);
        assert!(first.last().unwrap().base_fee_wei > Wei(100));

        let cold = simulate_base_fee(&params, &[Segment::new(1.0, 20.0)]);
        assert_eq!(cold[0].base_fee_wei, Wei(100));
    }

    // ========== Strategies ==========

    #[test]
    fn test_quadratic_curvature_monotonic_in_k() {
        // One adjusting block at 90% utilization; stronger k, stronger raise.
        let segments = vec![Segment::new(2.0, 90.0)];
        let mut last_fee = 0u128;
        for k in [0.0, 2.0, 8.0] {
            let params = BaseFeeParams {
                strategy: Strategy::WeightedQuadratic,
                k,
                ..reference_params()
            };
            let points = simulate_base_fee(&params, &segments);
            let fee = points[1].base_fee_wei.0;
            assert!(fee > last_fee, "k={k}: fee {fee} should exceed {last_fee}");
            last_fee = fee;
        }
        // k=0 matches the linear strategy exactly.
        let linear = simulate_base_fee(&reference_params(), &segments);
        let quad_zero = simulate_base_fee(
            &BaseFeeParams {
                strategy: Strategy::WeightedQuadratic,
                k: 0.0,
                ..reference_params()
            },
            &segments,
        );
        assert_eq!(fees(&linear), fees(&quad_zero));
    }

    #[test]
    fn test_zero_gas_limit_coerced_to_one() {
        let params = BaseFeeParams { gas_limit: 0, ..reference_params() };
        let points = simulate_base_fee(&params, &[Segment::new(2.0, 100.0)]);
        assert_eq!(points[0].gas_used, 1);
        assert_eq!(points[1].gas_used, 1);
    }

    // ========== Validation & Wire Format ==========

    #[test]
    fn test_segment_cap_validation() {
        let over = vec![Segment::new((MAX_SIM_BLOCKS + 1) as f64, 50.0)];
        assert!(matches!(
            validate_segments(&over),
            Err(SegmentError::TooManyBlocks { .. })
        ));

        // The expander itself stays total and truncates instead.
        assert_eq!(expand_segments(&over).len() as u64, MAX_SIM_BLOCKS);
    }

    #[test]
    fn test_result_points_round_trip_json() {
        let points = simulate_base_fee(
            &reference_params(),
            &[Segment::new(3.0, 50.0), Segment::new(2.0, 5.0)],
        );
        let json = serde_json::to_string(&points).expect("test: serialize points");
        let back: Vec<SimPoint> = serde_json::from_str(&json).expect("test: deserialize points");
        assert_eq!(points, back);
    }
}
