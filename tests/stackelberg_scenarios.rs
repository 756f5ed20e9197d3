//! End-to-end scenarios exercising the public API: solver, baselines,
//! simulator, and the round-trip boundary between them.

use wardgame::domain::network::{NodeAttributes, NodeType, Os, Topology};
use wardgame::{baseline_heuristic, baseline_static, baseline_uniform, solve_sse, run_game, GameState, Topology as TopologyAlias, UtilityParams};

fn two_node_topology() -> Topology {
    let mut t = Topology::new("two-node");
    t.add_node(
        "low",
        NodeAttributes::new(NodeType::Workstation, Os::Linux, vec![], 2.0).entry_point(),
    )
    .unwrap();
    t.add_node("high", NodeAttributes::new(NodeType::Database, Os::Linux, vec![], 10.0)).unwrap();
    t.add_edge("low", "high", "default").unwrap();
    t
}

#[test]
fn s1_zero_budget_targets_the_highest_value_node_with_no_coverage() {
    let topology = Topology::small_enterprise();
    let solution = solve_sse(&topology, 0.0, UtilityParams::default()).unwrap();

    let target_value = topology.get_attrs(&solution.attacker_target).unwrap().value;
    assert!((target_value - 10.0).abs() < 1e-6, "expected a value-10 node, got {target_value}");
    assert!((solution.defender_eu - -10.0).abs() < 1e-6);
    for probs in solution.detection_probabilities.values() {
        assert!(*probs < 1e-8);
    }
}

#[test]
fn s2_two_node_topology_with_budget_targets_high_value_node() {
    let topology = two_node_topology();
    let solution = solve_sse(&topology, 5.0, UtilityParams::default()).unwrap();

    assert_eq!(solution.attacker_target, "high");
    assert!(solution.defender_eu >= -10.0 - 1e-6);

    let spent: f64 = solution
        .coverage
        .values()
        .flat_map(|assets| assets.iter())
        .map(|(kind, prob)| prob * kind.cost())
        .sum();
    assert!(spent <= 5.0 + 1e-6, "budget constraint violated: spent {spent}");
}

#[test]
fn s3_full_deception_on_the_attacker_path_catches_them() {
    let mut topology = Topology::small_enterprise();
    let entry = topology.entry_points().into_iter().next().expect("small preset has an entry point");
    let path = {
        let target = topology
            .high_value_targets(0.0)
            .into_iter()
            .find(|n| *n != entry)
            .expect("small preset has a reachable high-value node");
        topology.shortest_path(&entry, &target).expect("connected preset")
    };
    assert!(path.len() >= 2, "need a multi-hop path for this scenario");

    let defender_actions: Vec<(String, String)> =
        path.iter().skip(1).map(|node| ("honeypot".to_string(), node.clone())).collect();

    let state = run_game(&mut topology, 10.0, 10, 42, &defender_actions, &path).unwrap();

    assert_eq!(state.winner, "defender");
    assert!(!state.detections.is_empty());
}

#[test]
fn s4_undefended_path_never_detects_the_attacker() {
    let mut topology = Topology::small_enterprise();
    let entry = topology.entry_points().into_iter().next().unwrap();
    let target = topology
        .high_value_targets(8.0)
        .into_iter()
        .find(|n| *n != entry)
        .expect("small preset has a v=9 node reachable from entry");
    let path = topology.shortest_path(&entry, &target).unwrap();

    let state = run_game(&mut topology, 10.0, 3, 42, &[], &path).unwrap();

    assert!(state.detections.is_empty());
    if state.attacker.exfiltrated_value > 0.0 {
        assert_eq!(state.winner, "attacker");
    }
}

#[test]
fn sse_dominates_every_baseline_on_every_preset() {
    let params = UtilityParams::default();
    for topology in [Topology::small_enterprise(), Topology::medium_enterprise(), Topology::large_enterprise()] {
        let budget = 15.0;
        let sse = solve_sse(&topology, budget, params).unwrap();
        let uniform = baseline_uniform(&topology, budget, params);
        let static_ = baseline_static(&topology, budget, params);
        let heuristic = baseline_heuristic(&topology, budget, params);

        for baseline in [&uniform, &static_, &heuristic] {
            assert!(
                sse.defender_eu >= baseline.defender_eu - 1e-6,
                "SSE ({}) should dominate baseline ({}) on {}",
                sse.defender_eu,
                baseline.defender_eu,
                topology.name
            );
        }
    }
}

#[test]
fn increasing_budget_never_hurts_defender_expected_utility() {
    let topology = Topology::medium_enterprise();
    let params = UtilityParams::default();
    let low = solve_sse(&topology, 5.0, params).unwrap();
    let high = solve_sse(&topology, 20.0, params).unwrap();
    assert!(high.defender_eu >= low.defender_eu - 1e-6);
}

#[test]
fn topology_document_round_trips_through_yaml() {
    let topology = Topology::small_enterprise();
    let yaml = topology.to_yaml_string().unwrap();
    let restored = Topology::from_yaml_str(&yaml).unwrap();

    assert_eq!(restored.node_count(), topology.node_count());
    assert_eq!(restored.edge_count(), topology.edge_count());
    for node in topology.nodes() {
        assert_eq!(restored.get_attrs(&node), topology.get_attrs(&node));
    }
}

#[test]
fn game_state_round_trips_through_json() {
    let mut topology = two_node_topology();
    let state = run_game(&mut topology, 5.0, 5, 7, &[("honeytoken".to_string(), "high".to_string())], &["low".to_string(), "high".to_string()]).unwrap();

    let json = serde_json::to_string(&state).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.current_round, state.current_round);
    assert_eq!(restored.winner, state.winner);
    assert_eq!(restored.attacker.compromised_nodes, state.attacker.compromised_nodes);
}

#[test]
fn identical_inputs_produce_identical_terminal_states() {
    let mut topology_a = Topology::small_enterprise();
    let mut topology_b = Topology::small_enterprise();
    let entry = topology_a.entry_points().into_iter().next().unwrap();
    let target = topology_a.high_value_targets(5.0).into_iter().find(|n| *n != entry).unwrap();
    let path = topology_a.shortest_path(&entry, &target).unwrap();
    let actions = vec![("decoy_credential".to_string(), target.clone())];

    let state_a = run_game(&mut topology_a, 10.0, 10, 99, &actions, &path).unwrap();
    let state_b = run_game(&mut topology_b, 10.0, 10, 99, &actions, &path).unwrap();

    assert_eq!(serde_json::to_string(&state_a).unwrap(), serde_json::to_string(&state_b).unwrap());
}

// Confirms the re-export at the crate root points at the same type as the
// fully-qualified domain path, since both are used across this file.
#[test]
fn crate_root_reexport_matches_domain_path() {
    let a = TopologyAlias::small_enterprise();
    let b = Topology::small_enterprise();
    assert_eq!(a.node_count(), b.node_count());
}
