//! Round-structured game simulator: a deterministic stub attacker walks a
//! fixed path against the defender's deployed assets.
//!
//! Ported from `original_source/src/stratagem/game/graph.py` (the
//! LangGraph round loop) and `original_source/src/stratagem/agents/stubs.py`
//! (the deterministic stub agents), with the streaming/SSE pacing half of
//! the original `web/game_runner.py` dropped — this is the synchronous core
//! both the original's Play mode and its benchmark runner share.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::attack_surface::{get_applicable_techniques, AccessLevel};
use crate::domain::deception::DeceptionType;
use crate::domain::error::GameError;
use crate::domain::network::Topology;
use crate::domain::state::{ActionKind, ActionRecord, DetectionEvent, GameState};

/// Noise assumed for a lateral-movement step, which has no catalog entry of
/// its own. Matches the original round-evaluation's default fallback for
/// actions that don't carry an explicit noise value.
const LATERAL_MOVEMENT_NOISE: f64 = 0.3;

/// Noise fixed for the exfiltration step (technique `T1041`).
const EXFILTRATION_NOISE: f64 = 0.45;

/// Run a complete game and return the terminal [`GameState`].
///
/// `topology` is mutated in place: only the per-node `compromised` flag
/// changes, as nodes are compromised along the attacker's walk. Pass a
/// clone when running many independent trials over the same base topology.
///
/// Fails only on invalid initialisation (no entry points, an attacker path
/// starting somewhere that isn't an entry point, or an unrecognised asset
/// kind in `defender_actions`) — once the game is running, bad inputs
/// degrade to no-op steps rather than propagating errors, so that
/// determinism survives noisy callers (see the crate's error-handling
/// design notes).
pub fn run_game(
    topology: &mut Topology,
    budget: f64,
    max_rounds: u32,
    seed: u64,
    defender_actions: &[(String, String)],
    attacker_path: &[String],
) -> Result<GameState, GameError> {
    let entry_points = topology.entry_points();
    if entry_points.is_empty() {
        return Err(GameError::NoEntryPoints);
    }

    let entry_point = match attacker_path.first() {
        Some(first) => {
            if !entry_points.contains(first) {
                return Err(GameError::NotAnEntryPoint(first.clone()));
            }
            first.clone()
        }
        None => entry_points[0].clone(),
    };

    // Validate the deployment sequence before the game starts.
    for (kind, _) in defender_actions {
        if DeceptionType::from_str(kind).is_none() {
            return Err(GameError::UnknownAsset(kind.clone()));
        }
    }

    let mut state = GameState::new(entry_point, budget, max_rounds);

    // ── Defender setup (one-time) ──────────────────────────────────────
    for (kind, node_id) in defender_actions {
        // `from_str` already validated above; unreachable `None` branch.
        let kind = DeceptionType::from_str(kind).expect("validated asset kind");
        let asset = crate::domain::deception::DeceptionAsset::new(kind, node_id.clone());
        state.defender.deploy(asset);
    }

    let mut game_rng = StdRng::seed_from_u64(seed);

    // ── Round loop ──────────────────────────────────────────────────────
    for _ in 1..=max_rounds {
        attacker_step(topology, &mut state, attacker_path, &mut game_rng);
        evaluate_round(&mut state);
        if state.game_over {
            break;
        }
    }

    Ok(state)
}

/// Advance the attacker by at most one step along `path`.
///
/// Scans `path` for the first entry that isn't the attacker's current
/// position. If that entry isn't a neighbour of the current position, the
/// round ends with no action. Otherwise the attacker attempts to compromise
/// it (if not already holding access), then moves onto it and exfiltrates
/// its value if any — exactly one traversal step is ever attempted per
/// round.
fn attacker_step(topology: &mut Topology, state: &mut GameState, path: &[String], rng: &mut StdRng) {
    let position = state.attacker.position.clone();

    for target in path {
        if *target == position {
            continue;
        }

        let neighbors = topology.neighbors(&position);
        if !neighbors.contains(target) {
            break;
        }

        let mut access = state.attacker.access_of(target);

        if access == AccessLevel::None {
            let Some(attrs) = topology.get_attrs(target).cloned() else {
                break;
            };
            let techniques = get_applicable_techniques(&attrs, access);

            if techniques.is_empty() {
                break;
            }

            let best = techniques
                .into_iter()
                .max_by(|a, b| a.base_success_rate.partial_cmp(&b.base_success_rate).unwrap())
                .expect("non-empty technique list");

            let roll: f64 = rng.gen_range(0.0..1.0);
            if roll <= best.base_success_rate {
                let current = state.attacker.access_of(target);
                if best.grants_access > current {
                    state.attacker.access_levels.insert(target.clone(), best.grants_access);
                }
                if !state.attacker.compromised_nodes.contains(target) {
                    state.attacker.compromised_nodes.push(target.clone());
                    topology.set_compromised(target, true);
                }
            }

            state.actions_log.push(ActionRecord {
                action: ActionKind::Execute,
                node_id: target.clone(),
                technique_id: best.id.to_string(),
                noise: best.noise,
            });

            access = state.attacker.access_of(target);
        }

        if access != AccessLevel::None {
            state.attacker.position = target.clone();
            state.attacker.path.push(target.clone());

            state.actions_log.push(ActionRecord {
                action: ActionKind::Move,
                node_id: target.clone(),
                technique_id: "lateral_movement".to_string(),
                noise: LATERAL_MOVEMENT_NOISE,
            });

            if let Some(attrs) = topology.get_attrs(target) {
                if attrs.value > 0.0 {
                    state.attacker.exfiltrated_value += attrs.value;
                    state.actions_log.push(ActionRecord {
                        action: ActionKind::Exfiltrate,
                        node_id: target.clone(),
                        technique_id: "T1041".to_string(),
                        noise: EXFILTRATION_NOISE,
                    });
                }
            }
        }

        break;
    }
}

/// Process the round's pending actions against deployed assets, roll
/// detections, advance the round counter, and evaluate win conditions.
///
/// Uses a fresh PRNG seeded by the round index (not the game seed) so
/// detection outcomes are reproducible independent of how many rolls the
/// attacker's technique execution has already consumed this run.
fn evaluate_round(state: &mut GameState) {
    let mut round_rng = StdRng::seed_from_u64(u64::from(state.current_round));

    for action in state.actions_log.clone() {
        for asset in state.defender.assets_on_node_mut(&action.node_id) {
            if asset.triggered {
                continue;
            }
            let detection_roll = (asset.detection_probability * (1.0 + action.noise)).min(1.0);
            let roll: f64 = round_rng.gen_range(0.0..1.0);
            if roll < detection_roll {
                asset.triggered = true;
                state.attacker.detected = true;
                state.detections.push(DetectionEvent {
                    round: state.current_round,
                    node_id: action.node_id.clone(),
                    asset_type: asset.asset_type.as_str().to_string(),
                    technique_id: action.technique_id.clone(),
                });
            }
        }
    }

    let next_round = state.current_round + 1;

    if state.attacker.detected {
        state.game_over = true;
        state.winner = "defender".to_string();
    } else if next_round > state.max_rounds {
        state.game_over = true;
        state.winner = if state.attacker.exfiltrated_value > 0.0 { "attacker" } else { "defender" }.to_string();
    }

    state.actions_log.clear();
    state.current_round = next_round;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_deception_catches_the_attacker() {
        let mut t = Topology::small_enterprise();
        let path = vec![
            "fw-ext".to_string(),
            "web-1".to_string(),
            "router-1".to_string(),
            "app-1".to_string(),
        ];
        let actions: Vec<(String, String)> = t
            .nodes()
            .into_iter()
            .map(|nid| ("honeypot".to_string(), nid))
            .collect();

        let state = run_game(&mut t, 10.0, 10, 42, &actions, &path).unwrap();
        assert_eq!(state.winner, "defender");
        assert!(!state.detections.is_empty());
    }

    #[test]
    fn undefended_path_never_detects() {
        let mut t = Topology::small_enterprise();
        let path = vec!["fw-ext".to_string(), "web-1".to_string(), "router-1".to_string(), "app-1".to_string()];
        let state = run_game(&mut t, 10.0, 3, 42, &[], &path).unwrap();
        assert!(state.detections.is_empty());
        if state.attacker.exfiltrated_value > 0.0 {
            assert_eq!(state.winner, "attacker");
        }
    }

    #[test]
    fn determinism_across_identical_runs() {
        let path = vec!["fw-ext".to_string(), "web-1".to_string(), "router-1".to_string(), "app-1".to_string()];
        let actions = vec![("honeytoken".to_string(), "app-1".to_string())];

        let mut t1 = Topology::small_enterprise();
        let s1 = run_game(&mut t1, 10.0, 10, 7, &actions, &path).unwrap();
        let mut t2 = Topology::small_enterprise();
        let s2 = run_game(&mut t2, 10.0, 10, 7, &actions, &path).unwrap();

        assert_eq!(s1, s2);
    }

    #[test]
    fn unknown_asset_kind_is_rejected_before_the_game_starts() {
        let mut t = Topology::small_enterprise();
        let path = vec!["fw-ext".to_string()];
        let err = run_game(&mut t, 10.0, 1, 1, &[("laser_grid".to_string(), "app-1".to_string())], &path)
            .unwrap_err();
        assert_eq!(err, GameError::UnknownAsset("laser_grid".to_string()));
    }

    #[test]
    fn path_starting_off_an_entry_point_is_rejected() {
        let mut t = Topology::small_enterprise();
        let path = vec!["app-1".to_string()];
        let err = run_game(&mut t, 10.0, 1, 1, &[], &path).unwrap_err();
        assert_eq!(err, GameError::NotAnEntryPoint("app-1".to_string()));
    }

    #[test]
    fn non_adjacent_next_target_ends_the_round_with_no_action() {
        let mut t = Topology::small_enterprise();
        // db-1 is not a neighbour of fw-ext: the round should end with no action.
        let path = vec!["fw-ext".to_string(), "db-1".to_string()];
        let state = run_game(&mut t, 10.0, 1, 1, &[], &path).unwrap();
        assert_eq!(state.attacker.position, "fw-ext");
        assert!(state.attacker.path.len() == 1);
    }
}
