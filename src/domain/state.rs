//! Canonical in-memory game state.
//!
//! The original implementation threaded this state through an external
//! graph-orchestration framework as a plain dict. Here the struct below
//! *is* the state — `Serialize`/`Deserialize` exist only for the external
//! boundary (CLI JSON export), never for internal control flow.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::attack_surface::AccessLevel;
use crate::domain::deception::DeceptionAsset;

/// A single attacker action attempted within the current round, logged
/// for the round-evaluation detection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action: ActionKind,
    pub node_id: String,
    pub technique_id: String,
    #[serde(default)]
    pub noise: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Execute,
    Move,
    Exfiltrate,
}

/// Record of a defender detecting the attacker. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    pub round: u32,
    pub node_id: String,
    pub asset_type: String,
    pub technique_id: String,
}

/// The attacker's progress through the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackerState {
    pub position: String,
    pub access_levels: BTreeMap<String, AccessLevel>,
    pub path: Vec<String>,
    pub compromised_nodes: Vec<String>,
    pub exfiltrated_value: f64,
    pub detected: bool,
}

impl AttackerState {
    pub fn new(entry_point: impl Into<String>) -> Self {
        let position = entry_point.into();
        let mut access_levels = BTreeMap::new();
        access_levels.insert(position.clone(), AccessLevel::None);
        Self {
            path: vec![position.clone()],
            position,
            access_levels,
            compromised_nodes: Vec::new(),
            exfiltrated_value: 0.0,
            detected: false,
        }
    }

    pub fn has_access(&self, node_id: &str, minimum: AccessLevel) -> bool {
        self.access_levels.get(node_id).copied().unwrap_or(AccessLevel::None) >= minimum
    }

    pub fn access_of(&self, node_id: &str) -> AccessLevel {
        self.access_levels.get(node_id).copied().unwrap_or(AccessLevel::None)
    }
}

/// The defender's deployed assets and remaining budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenderState {
    pub budget: f64,
    pub deployed_assets: Vec<DeceptionAsset>,
    pub total_spent: f64,
}

impl DefenderState {
    pub fn new(budget: f64) -> Self {
        Self {
            budget,
            deployed_assets: Vec::new(),
            total_spent: 0.0,
        }
    }

    pub fn remaining_budget(&self) -> f64 {
        self.budget - self.total_spent
    }

    pub fn can_afford(&self, cost: f64) -> bool {
        self.remaining_budget() >= cost
    }

    /// Deploy `asset` if affordable; returns whether it was deployed.
    pub fn deploy(&mut self, asset: DeceptionAsset) -> bool {
        if !self.can_afford(asset.cost) {
            return false;
        }
        self.total_spent += asset.cost;
        self.deployed_assets.push(asset);
        true
    }

    pub fn assets_on_node_mut(&mut self, node_id: &str) -> Vec<&mut DeceptionAsset> {
        self.deployed_assets.iter_mut().filter(|a| a.node_id == node_id).collect()
    }
}

/// Full game state: topology-independent fields tracked across a run.
/// The topology itself is held alongside this by callers (it is
/// immutable except for the per-node `compromised` flag, which is
/// mutated in place on the attacker's topology reference).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub attacker: AttackerState,
    pub defender: DefenderState,
    pub detections: Vec<DetectionEvent>,
    #[serde(default)]
    pub actions_log: Vec<ActionRecord>,
    pub current_round: u32,
    pub max_rounds: u32,
    pub game_over: bool,
    pub winner: String,
}

impl GameState {
    pub fn new(entry_point: impl Into<String>, budget: f64, max_rounds: u32) -> Self {
        Self {
            attacker: AttackerState::new(entry_point),
            defender: DefenderState::new(budget),
            detections: Vec::new(),
            actions_log: Vec::new(),
            current_round: 1,
            max_rounds,
            game_over: false,
            winner: String::new(),
        }
    }
}
