//! Multi-LP Stackelberg solver.
//!
//! For each candidate attacker target `t*` we solve a linear program that
//! finds the defender's optimal coverage vector under the constraint that
//! `t*` is the attacker's best response, then keep the feasible LP with the
//! highest defender expected utility. This is the "Multiple LPs" approach
//! from the security-games literature (Conitzer & Sandholm 2006),
//! specialised to heterogeneous deception assets the way ERASER
//! (Kiekintveld et al. 2009) specialises it to heterogeneous resources.
//!
//! Ported from `scipy.optimize.linprog` to `good_lp`'s constraint builder
//! over the HiGHS backend; the per-target LP construction below mirrors
//! `original_source/src/stratagem/game/solver.py` variable-for-variable.

use std::collections::BTreeMap;

use good_lp::{variable, Expression, ProblemVariables, Solution as LpSolution, SolverModel, Variable};
use tracing::{debug, instrument, trace};

use crate::domain::deception::DeceptionType;
use crate::domain::error::SolverError;
use crate::domain::network::Topology;
use crate::services::solution::StackelbergSolution;
use crate::services::utility::UtilityParams;

/// Coverage entries below this are treated as numerically zero and dropped
/// from the returned solution (matches the original's `_EPS = 1e-8`).
const COVERAGE_EPS: f64 = 1e-8;

/// Compute the Strong Stackelberg Equilibrium coverage for `topology` under
/// `budget`.
///
/// Solves one LP per candidate attacker target and returns the solution
/// with the greatest defender expected utility among the feasible ones.
/// Zero coverage is always feasible for the highest-value target, so a
/// fully correct constraint construction can never exhaust every
/// candidate — [`SolverError::AllLpsInfeasible`] indicates a bug, not a
/// legitimate outcome.
#[instrument(skip(topology), fields(nodes = topology.node_count(), budget))]
pub fn solve_sse(
    topology: &Topology,
    budget: f64,
    params: UtilityParams,
) -> Result<StackelbergSolution, SolverError> {
    let nodes = topology.nodes();
    let n = nodes.len();
    let asset_types = DeceptionType::all();
    let num_assets = asset_types.len();
    let num_vars = n * num_assets;

    let var_idx = |t: usize, a: usize| t * num_assets + a;

    let costs: Vec<f64> = asset_types.iter().map(|a| a.cost()).collect();
    let det_probs: Vec<f64> = asset_types.iter().map(|a| a.detection_probability()).collect();

    let values: Vec<f64> = nodes
        .iter()
        .map(|nid| topology.get_attrs(nid).map(|attrs| attrs.value).unwrap_or(0.0))
        .collect();

    // U_d^u(t) = -v(t); Delta_d(t) = (alpha+1)*v(t); Delta_a(t) = -(beta+1)*v(t).
    let ud_u: Vec<f64> = values.iter().map(|&v| -v).collect();
    let ua_u: Vec<f64> = values.clone();
    let ua_c: Vec<f64> = values.iter().map(|&v| -params.beta * v).collect();
    let delta_d: Vec<f64> = values.iter().map(|&v| (params.alpha + 1.0) * v).collect();
    let delta_a: Vec<f64> = values.iter().map(|&v| -(params.beta + 1.0) * v).collect();

    let mut best: Option<StackelbergSolution> = None;
    let mut best_defender_eu = f64::NEG_INFINITY;

    for (t_star, target_id) in nodes.iter().enumerate() {
        let mut vars = ProblemVariables::new();
        let c: Vec<Variable> = vars.add_vector(variable().min(0.0).max(1.0), num_vars);

        // Objective: maximise sum_a c_{t*,a} * det(a) * Delta_d(t*).
        let mut objective = Expression::default();
        for a in 0..num_assets {
            objective.add_mul(det_probs[a] * delta_d[t_star], c[var_idx(t_star, a)]);
        }

        let mut problem = vars.maximise(objective).using(good_lp::default_solver);

        // (i) at most one asset per node.
        for t in 0..n {
            let mut lhs = Expression::default();
            for a in 0..num_assets {
                lhs.add_mul(1.0, c[var_idx(t, a)]);
            }
            problem = problem.with(lhs.leq(1.0));
        }

        // (ii) budget.
        let mut budget_lhs = Expression::default();
        for t in 0..n {
            for a in 0..num_assets {
                budget_lhs.add_mul(costs[a], c[var_idx(t, a)]);
            }
        }
        problem = problem.with(budget_lhs.leq(budget));

        // (iii) best-response: t* weakly preferred by the attacker.
        for (t, _) in nodes.iter().enumerate() {
            if t == t_star {
                continue;
            }
            let mut lhs = Expression::default();
            for a in 0..num_assets {
                lhs.add_mul(det_probs[a] * delta_a[t], c[var_idx(t, a)]);
            }
            for a in 0..num_assets {
                lhs.add_mul(-det_probs[a] * delta_a[t_star], c[var_idx(t_star, a)]);
            }
            problem = problem.with(lhs.leq(ua_u[t_star] - ua_u[t]));
        }

        let solved = match problem.solve() {
            Ok(s) => s,
            Err(e) => {
                trace!(target = %target_id, error = %e, "candidate LP infeasible, skipping");
                continue;
            }
        };

        let defender_eu = {
            let mut p_star = 0.0;
            for a in 0..num_assets {
                p_star += solved.value(c[var_idx(t_star, a)]) * det_probs[a];
            }
            p_star * delta_d[t_star] + ud_u[t_star]
        };

        if defender_eu > best_defender_eu {
            best_defender_eu = defender_eu;

            let mut coverage = BTreeMap::new();
            let mut detection_probabilities = BTreeMap::new();
            for (t, nid) in nodes.iter().enumerate() {
                let mut asset_coverage = BTreeMap::new();
                let mut p_detect = 0.0;
                for (a, kind) in asset_types.iter().enumerate() {
                    let prob = solved.value(c[var_idx(t, a)]);
                    if prob > COVERAGE_EPS {
                        asset_coverage.insert(*kind, prob);
                    }
                    p_detect += prob * det_probs[a];
                }
                coverage.insert(nid.clone(), asset_coverage);
                detection_probabilities.insert(nid.clone(), p_detect.max(0.0));
            }

            let p_star = detection_probabilities[target_id];
            let attacker_eu = p_star * ua_c[t_star] + (1.0 - p_star) * ua_u[t_star];

            best = Some(StackelbergSolution {
                coverage,
                attacker_target: target_id.clone(),
                defender_eu,
                attacker_eu,
                detection_probabilities,
            });
        }
    }

    match best {
        Some(solution) => {
            debug!(target = %solution.attacker_target, defender_eu = solution.defender_eu, "SSE computed");
            Ok(solution)
        }
        None => Err(SolverError::AllLpsInfeasible),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::network::{NodeAttributes, NodeType, Os};

    fn two_node_topology() -> Topology {
        let mut t = Topology::new("pair");
        t.add_node("low", NodeAttributes::new(NodeType::Server, Os::Linux, vec![], 2.0))
            .unwrap();
        t.add_node("high", NodeAttributes::new(NodeType::Server, Os::Linux, vec![], 10.0))
            .unwrap();
        t.add_edge("low", "high", "lan").unwrap();
        t
    }

    #[test]
    fn zero_budget_attacks_highest_value_node() {
        let t = Topology::small_enterprise();
        let solution = solve_sse(&t, 0.0, UtilityParams::default()).unwrap();
        let target_value = t.get_attrs(&solution.attacker_target).unwrap().value;
        assert_eq!(target_value, 10.0);
        assert!((solution.defender_eu - (-10.0)).abs() < 1e-6);
        for p in solution.detection_probabilities.values() {
            assert!(*p < 1e-8);
        }
    }

    #[test]
    fn budget_shifts_attacker_to_high_value_node() {
        let t = two_node_topology();
        let solution = solve_sse(&t, 5.0, UtilityParams::default()).unwrap();
        assert_eq!(solution.attacker_target, "high");
        assert!(solution.defender_eu >= -10.0 - 1e-6);

        let spent: f64 = solution
            .coverage
            .iter()
            .flat_map(|(_, assets)| assets.iter())
            .map(|(kind, prob)| kind.cost() * prob)
            .sum();
        assert!(spent <= 5.0 + 1e-6);
    }

    #[test]
    fn coverage_respects_per_node_and_budget_invariants() {
        let t = Topology::small_enterprise();
        let solution = solve_sse(&t, 10.0, UtilityParams::default()).unwrap();

        for assets in solution.coverage.values() {
            let total: f64 = assets.values().sum();
            assert!(total <= 1.0 + 1e-8);
            for p in assets.values() {
                assert!(*p >= -1e-8 && *p <= 1.0 + 1e-8);
            }
        }

        let spent: f64 = solution
            .coverage
            .iter()
            .flat_map(|(_, assets)| assets.iter())
            .map(|(kind, prob)| kind.cost() * prob)
            .sum();
        assert!(spent <= 10.0 + 1e-6);
    }

    #[test]
    fn more_budget_never_hurts_the_defender() {
        let t = Topology::small_enterprise();
        let low = solve_sse(&t, 2.0, UtilityParams::default()).unwrap();
        let high = solve_sse(&t, 10.0, UtilityParams::default()).unwrap();
        assert!(high.defender_eu >= low.defender_eu - 1e-6);
    }
}
