//! Deception asset catalog: the defender's three deployable asset kinds.

use serde::{Deserialize, Serialize};

/// A kind of deception asset the defender can deploy on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeceptionType {
    Honeypot,
    DecoyCredential,
    Honeytoken,
}

impl DeceptionType {
    /// Deployment cost in budget units.
    pub fn cost(self) -> f64 {
        match self {
            Self::Honeypot => 3.0,
            Self::DecoyCredential => 1.5,
            Self::Honeytoken => 1.0,
        }
    }

    /// Probability of detecting an attacker who interacts with the asset.
    pub fn detection_probability(self) -> f64 {
        match self {
            Self::Honeypot => 0.85,
            Self::DecoyCredential => 0.70,
            Self::Honeytoken => 0.50,
        }
    }

    /// All asset kinds, in detection-effectiveness order (best first) —
    /// the preference order the greedy baselines use.
    pub fn all() -> [DeceptionType; 3] {
        [Self::Honeypot, Self::DecoyCredential, Self::Honeytoken]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Honeypot => "honeypot",
            Self::DecoyCredential => "decoy_credential",
            Self::Honeytoken => "honeytoken",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "honeypot" => Some(Self::Honeypot),
            "decoy_credential" => Some(Self::DecoyCredential),
            "honeytoken" => Some(Self::Honeytoken),
            _ => None,
        }
    }
}

/// A concrete instance of a deception asset deployed on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeceptionAsset {
    pub asset_type: DeceptionType,
    pub node_id: String,
    pub detection_probability: f64,
    pub cost: f64,
    #[serde(default)]
    pub triggered: bool,
}

impl DeceptionAsset {
    pub fn new(asset_type: DeceptionType, node_id: impl Into<String>) -> Self {
        Self {
            asset_type,
            node_id: node_id.into(),
            detection_probability: asset_type.detection_probability(),
            cost: asset_type.cost(),
            triggered: false,
        }
    }
}

/// Fake service that looks real to an attacker. High detection
/// probability, most expensive.
pub fn honeypot(node_id: impl Into<String>) -> DeceptionAsset {
    DeceptionAsset::new(DeceptionType::Honeypot, node_id)
}

/// Fake credential planted on a node. Medium detection probability,
/// cheaper than a honeypot.
pub fn decoy_credential(node_id: impl Into<String>) -> DeceptionAsset {
    DeceptionAsset::new(DeceptionType::DecoyCredential, node_id)
}

/// Fake data artifact. Lowest detection probability, cheapest option.
pub fn honeytoken(node_id: impl Into<String>) -> DeceptionAsset {
    DeceptionAsset::new(DeceptionType::Honeytoken, node_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_and_detection_match_the_catalog_table() {
        assert_eq!(DeceptionType::Honeypot.cost(), 3.0);
        assert_eq!(DeceptionType::Honeypot.detection_probability(), 0.85);
        assert_eq!(DeceptionType::DecoyCredential.cost(), 1.5);
        assert_eq!(DeceptionType::DecoyCredential.detection_probability(), 0.70);
        assert_eq!(DeceptionType::Honeytoken.cost(), 1.0);
        assert_eq!(DeceptionType::Honeytoken.detection_probability(), 0.50);
    }

    #[test]
    fn string_round_trip() {
        for kind in DeceptionType::all() {
            assert_eq!(DeceptionType::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn factory_functions_set_correct_parameters() {
        let asset = honeypot("web-1");
        assert_eq!(asset.asset_type, DeceptionType::Honeypot);
        assert_eq!(asset.node_id, "web-1");
        assert_eq!(asset.cost, 3.0);
        assert!(!asset.triggered);
    }
}
