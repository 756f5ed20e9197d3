//! General-sum utility algebra and the attacker best-response operator.
//!
//! The solver, the three baselines, and the game simulator all share this
//! payoff model: a node of value `v` yields `+alpha*v` to the defender and
//! `-beta*v` to the attacker when the attacker is detected there, and the
//! mirror-image payoffs when the attacker succeeds undetected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::network::Topology;

/// Tie tolerance used when comparing expected utilities (ported from the
/// original solver's `1e-8` filter).
pub const EU_TIE_EPS: f64 = 1e-8;

/// Scaling parameters for the general-sum utility model.
///
/// With `alpha = beta = 1.0` the game is close to zero-sum but not exactly;
/// general-sum is the standard formulation in the security-games literature
/// because commitment power (the Stackelberg leader's advantage) only
/// matters in general-sum games.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilityParams {
    /// Defender detection reward scale: `U_d^c(v) = +alpha * v`.
    pub alpha: f64,
    /// Attacker detection penalty scale: `U_a^c(v) = -beta * v`.
    pub beta: f64,
}

impl Default for UtilityParams {
    fn default() -> Self {
        Self { alpha: 1.0, beta: 1.0 }
    }
}

/// `U_d^c(v) = +alpha * v`: defender payoff when the attacker is caught.
pub fn defender_covered_utility(value: f64, params: UtilityParams) -> f64 {
    params.alpha * value
}

/// `U_d^u(v) = -v`: defender payoff when the attacker succeeds undetected.
pub fn defender_uncovered_utility(value: f64) -> f64 {
    -value
}

/// `U_a^c(v) = -beta * v`: attacker payoff when caught.
pub fn attacker_covered_utility(value: f64, params: UtilityParams) -> f64 {
    -params.beta * value
}

/// `U_a^u(v) = +v`: attacker payoff when succeeding undetected.
pub fn attacker_uncovered_utility(value: f64) -> f64 {
    value
}

/// `EU_d(p, v) = p * U_d^c(v) + (1-p) * U_d^u(v)`.
pub fn expected_defender_utility(p: f64, value: f64, params: UtilityParams) -> f64 {
    p * defender_covered_utility(value, params) + (1.0 - p) * defender_uncovered_utility(value)
}

/// `EU_a(p, v) = p * U_a^c(v) + (1-p) * U_a^u(v)`.
pub fn expected_attacker_utility(p: f64, value: f64, params: UtilityParams) -> f64 {
    p * attacker_covered_utility(value, params) + (1.0 - p) * attacker_uncovered_utility(value)
}

/// Find the attacker's best-response target given a fixed detection
/// probability at every node.
///
/// Ties within [`EU_TIE_EPS`] on attacker EU are broken in the defender's
/// favour, which is the Strong Stackelberg Equilibrium convention: the
/// attacker is indifferent, so the leader's preferred resolution stands.
///
/// Returns `(target, attacker_eu, defender_eu)`.
pub fn attacker_best_response(
    topology: &Topology,
    detection_probabilities: &BTreeMap<String, f64>,
    params: UtilityParams,
) -> (String, f64, f64) {
    let mut best_target = String::new();
    let mut best_attacker_eu = f64::NEG_INFINITY;
    let mut best_defender_eu = f64::NEG_INFINITY;

    for node_id in topology.nodes() {
        let value = topology.get_attrs(&node_id).map(|a| a.value).unwrap_or(0.0);
        let p = detection_probabilities.get(&node_id).copied().unwrap_or(0.0);
        let a_eu = expected_attacker_utility(p, value, params);
        let d_eu = expected_defender_utility(p, value, params);

        if a_eu > best_attacker_eu + EU_TIE_EPS {
            best_target = node_id;
            best_attacker_eu = a_eu;
            best_defender_eu = d_eu;
        } else if (a_eu - best_attacker_eu).abs() < EU_TIE_EPS && d_eu > best_defender_eu {
            best_target = node_id;
            best_defender_eu = d_eu;
        }
    }

    (best_target, best_attacker_eu, best_defender_eu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::network::{NodeAttributes, NodeType, Os};

    #[test]
    fn full_detection_favours_defender() {
        let params = UtilityParams::default();
        assert_eq!(expected_defender_utility(1.0, 10.0, params), 10.0);
        assert_eq!(expected_attacker_utility(1.0, 10.0, params), -10.0);
    }

    #[test]
    fn zero_detection_favours_attacker() {
        let params = UtilityParams::default();
        assert_eq!(expected_defender_utility(0.0, 10.0, params), -10.0);
        assert_eq!(expected_attacker_utility(0.0, 10.0, params), 10.0);
    }

    #[test]
    fn best_response_targets_highest_undefended_value() {
        let mut t = Topology::new("t");
        t.add_node("low", NodeAttributes::new(NodeType::Server, Os::Linux, vec![], 2.0))
            .unwrap();
        t.add_node("high", NodeAttributes::new(NodeType::Server, Os::Linux, vec![], 10.0))
            .unwrap();

        let detection = BTreeMap::new();
        let (target, a_eu, _) = attacker_best_response(&t, &detection, UtilityParams::default());
        assert_eq!(target, "high");
        assert_eq!(a_eu, 10.0);
    }

    #[test]
    fn best_response_prefers_less_covered_target() {
        let mut t = Topology::new("t");
        t.add_node("low", NodeAttributes::new(NodeType::Server, Os::Linux, vec![], 2.0))
            .unwrap();
        t.add_node("high", NodeAttributes::new(NodeType::Server, Os::Linux, vec![], 10.0))
            .unwrap();

        let mut detection = BTreeMap::new();
        detection.insert("high".to_string(), 1.0);
        let (target, _, _) = attacker_best_response(&t, &detection, UtilityParams::default());
        assert_eq!(target, "low");
    }
}
