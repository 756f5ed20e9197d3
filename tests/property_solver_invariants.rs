//! Property tests for the universally-quantified solver invariants:
//! coverage validity, the budget constraint, best-response consistency,
//! and detection-probability consistency, across randomly generated
//! connected topologies and budgets.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use wardgame::domain::network::{NodeAttributes, NodeType, Os, Topology};
use wardgame::{solve_sse, UtilityParams};

fn build_chain_topology(values: &[f64]) -> Topology {
    let mut t = Topology::new("prop");
    for (i, value) in values.iter().enumerate() {
        let id = format!("n{i}");
        let mut attrs = NodeAttributes::new(NodeType::Server, Os::Linux, vec![], *value);
        if i == 0 {
            attrs = attrs.entry_point();
        }
        t.add_node(id, attrs).unwrap();
    }
    for i in 0..values.len().saturating_sub(1) {
        t.add_edge(&format!("n{i}"), &format!("n{}", i + 1), "lan").unwrap();
    }
    t
}

proptest! {
    /// Property: coverage validity (invariant 1) and budget (invariant 2)
    /// hold for any connected chain topology and any non-negative budget.
    #[test]
    fn prop_coverage_and_budget_invariants_hold(
        values in prop::collection::vec(0.0f64..20.0, 2..8),
        budget in 0.0f64..25.0,
    ) {
        let topology = build_chain_topology(&values);
        let solution = solve_sse(&topology, budget, UtilityParams::default())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        for assets in solution.coverage.values() {
            let total: f64 = assets.values().sum();
            prop_assert!(total <= 1.0 + 1e-8, "per-node coverage {} exceeds 1", total);
            for p in assets.values() {
                prop_assert!(*p >= -1e-8 && *p <= 1.0 + 1e-8, "coverage probability {} out of range", p);
            }
        }

        let spent: f64 = solution
            .coverage
            .values()
            .flat_map(|assets| assets.iter())
            .map(|(kind, prob)| kind.cost() * prob)
            .sum();
        prop_assert!(spent <= budget + 1e-6, "spent {} exceeds budget {}", spent, budget);

        // Zero-coverage floor (invariant 6): zero coverage is always feasible for the
        // highest-value node, so defender EU can never fall below -max_t v(t).
        let max_value = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(solution.defender_eu >= -max_value - 1e-6, "defender_eu {} below floor -{}", solution.defender_eu, max_value);
    }

    /// Property: detection consistency (invariant 4) — the reported
    /// detection probability at every node equals the coverage-weighted
    /// sum of each asset's individual detection probability.
    #[test]
    fn prop_detection_probability_matches_coverage(
        values in prop::collection::vec(0.0f64..20.0, 2..8),
        budget in 0.0f64..25.0,
    ) {
        let topology = build_chain_topology(&values);
        let solution = solve_sse(&topology, budget, UtilityParams::default())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        for node_id in topology.nodes() {
            let expected: f64 = solution
                .coverage
                .get(&node_id)
                .map(|assets| assets.iter().map(|(kind, prob)| prob * kind.detection_probability()).sum())
                .unwrap_or(0.0);
            let actual = solution.detection_probabilities.get(&node_id).copied().unwrap_or(0.0);
            prop_assert!((expected - actual).abs() < 1e-6, "node {}: expected {} got {}", node_id, expected, actual);
        }
    }

    /// Property: best-response consistency (invariant 3) — the attacker's
    /// expected utility at the chosen target is at least as good as at
    /// every other node, within tolerance.
    #[test]
    fn prop_best_response_is_consistent(
        values in prop::collection::vec(1.0f64..20.0, 2..6),
        budget in 0.0f64..20.0,
    ) {
        let topology = build_chain_topology(&values);
        let solution = solve_sse(&topology, budget, UtilityParams::default())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let eu_at = |node_id: &str| -> f64 {
            let value = topology.get_attrs(node_id).unwrap().value;
            let p = solution.detection_probabilities.get(node_id).copied().unwrap_or(0.0);
            p * (-value) + (1.0 - p) * value
        };

        let eu_star = eu_at(&solution.attacker_target);
        for node_id in topology.nodes() {
            prop_assert!(eu_star >= eu_at(&node_id) - 1e-6, "target {} is not a best response vs {}", solution.attacker_target, node_id);
        }
    }
}
