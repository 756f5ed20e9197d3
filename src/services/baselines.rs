//! Non-game-theoretic defender strategies, for benchmarking against the
//! Stackelberg solver.
//!
//! All three share [`StackelbergSolution`] as their output shape and build
//! it the same way: assemble a coverage vector, then run the shared
//! attacker best-response operator to fill in `attacker_target`,
//! `defender_eu`, and `attacker_eu`. Ported from
//! `original_source/src/stratagem/evaluation/baselines.py`.

use std::collections::BTreeMap;

use crate::domain::deception::DeceptionType;
use crate::domain::network::Topology;
use crate::services::solution::{CoverageVector, StackelbergSolution};
use crate::services::utility::{attacker_best_response, UtilityParams};

/// Asset types in detection-effectiveness order, best first. The greedy
/// baselines try each in turn until one fits the remaining budget.
const ASSET_PREFERENCE: [DeceptionType; 3] =
    [DeceptionType::Honeypot, DeceptionType::DecoyCredential, DeceptionType::Honeytoken];

fn build_solution(topology: &Topology, coverage: CoverageVector, params: UtilityParams) -> StackelbergSolution {
    let mut detection_probabilities = BTreeMap::new();
    for node_id in topology.nodes() {
        let p = coverage
            .get(&node_id)
            .map(|assets| assets.iter().map(|(kind, prob)| prob * kind.detection_probability()).sum())
            .unwrap_or(0.0);
        detection_probabilities.insert(node_id, p);
    }

    let (attacker_target, attacker_eu, defender_eu) =
        attacker_best_response(topology, &detection_probabilities, params);

    StackelbergSolution {
        coverage,
        attacker_target,
        defender_eu,
        attacker_eu,
        detection_probabilities,
    }
}

/// Spread budget evenly across every node using honeytokens (the cheapest
/// asset): the maximum-entropy strategy, using no information about node
/// values or network structure.
pub fn baseline_uniform(topology: &Topology, budget: f64, params: UtilityParams) -> StackelbergSolution {
    let n = topology.node_count();
    let honeytoken_cost = DeceptionType::Honeytoken.cost();
    let per_node = if n > 0 { budget / n as f64 } else { 0.0 };
    let coverage_prob = if honeytoken_cost > 0.0 { (per_node / honeytoken_cost).min(1.0) } else { 0.0 };

    let mut coverage = CoverageVector::new();
    for node_id in topology.nodes() {
        let mut assets = BTreeMap::new();
        if coverage_prob > 1e-8 {
            assets.insert(DeceptionType::Honeytoken, coverage_prob);
        }
        coverage.insert(node_id, assets);
    }

    build_solution(topology, coverage, params)
}

/// Greedily cover the highest-value nodes first with the most effective
/// affordable asset ("protect the crown jewels").
pub fn baseline_static(topology: &Topology, budget: f64, params: UtilityParams) -> StackelbergSolution {
    let mut ranking = topology.nodes();
    ranking.sort_by(|a, b| {
        let va = topology.get_attrs(a).map(|x| x.value).unwrap_or(0.0);
        let vb = topology.get_attrs(b).map(|x| x.value).unwrap_or(0.0);
        vb.partial_cmp(&va).unwrap()
    });

    let coverage = greedy_allocate(topology, budget, &ranking);
    build_solution(topology, coverage, params)
}

/// Greedily cover the highest-degree-centrality nodes first with the most
/// effective affordable asset: intercept the attacker at network
/// chokepoints rather than at high-value leaves.
pub fn baseline_heuristic(topology: &Topology, budget: f64, params: UtilityParams) -> StackelbergSolution {
    let nodes = topology.nodes();
    let n = nodes.len();
    let centrality: BTreeMap<String, f64> = nodes
        .iter()
        .map(|nid| {
            let degree = topology.neighbors(nid).len();
            let c = if n > 1 { degree as f64 / (n - 1) as f64 } else { 0.0 };
            (nid.clone(), c)
        })
        .collect();

    let mut ranking = nodes;
    ranking.sort_by(|a, b| centrality[b].partial_cmp(&centrality[a]).unwrap());

    let coverage = greedy_allocate(topology, budget, &ranking);
    build_solution(topology, coverage, params)
}

/// Assign assets to nodes in `ranking` order: for each node, place the most
/// effective asset that fits the remaining budget, deterministically
/// (probability 1.0). Stop once the remaining budget cannot afford even the
/// cheapest asset.
fn greedy_allocate(topology: &Topology, budget: f64, ranking: &[String]) -> CoverageVector {
    let mut remaining = budget;
    let mut coverage: CoverageVector = topology.nodes().into_iter().map(|nid| (nid, BTreeMap::new())).collect();

    let cheapest = DeceptionType::Honeytoken.cost();
    for node_id in ranking {
        if remaining < cheapest {
            break;
        }
        for kind in ASSET_PREFERENCE {
            let cost = kind.cost();
            if cost <= remaining + 1e-8 {
                let mut assets = BTreeMap::new();
                assets.insert(kind, 1.0);
                coverage.insert(node_id.clone(), assets);
                remaining -= cost;
                break;
            }
        }
    }

    coverage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_spreads_coverage_across_every_node() {
        let t = Topology::small_enterprise();
        let solution = baseline_uniform(&t, 10.0, UtilityParams::default());
        assert_eq!(solution.coverage.len(), t.node_count());
    }

    #[test]
    fn static_covers_highest_value_node_first() {
        let t = Topology::small_enterprise();
        let solution = baseline_static(&t, 3.0, UtilityParams::default());
        // db-2 has value 10.0, the highest in the small preset.
        assert!(solution.coverage["db-2"].contains_key(&DeceptionType::Honeypot));
    }

    #[test]
    fn heuristic_covers_highest_degree_node_first() {
        let t = Topology::small_enterprise();
        let solution = baseline_heuristic(&t, 3.0, UtilityParams::default());
        assert!(solution.coverage["router-1"].contains_key(&DeceptionType::Honeypot));
    }

    #[test]
    fn baselines_respect_budget() {
        let t = Topology::small_enterprise();
        for solution in [
            baseline_uniform(&t, 10.0, UtilityParams::default()),
            baseline_static(&t, 10.0, UtilityParams::default()),
            baseline_heuristic(&t, 10.0, UtilityParams::default()),
        ] {
            let spent: f64 = solution
                .coverage
                .values()
                .flat_map(|assets| assets.iter())
                .map(|(kind, prob)| kind.cost() * prob)
                .sum();
            assert!(spent <= 10.0 + 1e-6);
        }
    }
}
