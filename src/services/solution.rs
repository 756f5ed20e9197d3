//! Shared output shape for the solver and all three baselines.
//!
//! Keeping one struct means downstream code (the simulator glue, the
//! benchmark orchestrator, the CLI) is strategy-agnostic: it calls whichever
//! producer it likes and gets back the same record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::deception::DeceptionType;

/// node_id -> asset_kind -> marginal coverage probability.
pub type CoverageVector = BTreeMap<String, BTreeMap<DeceptionType, f64>>;

/// Result of computing a defender strategy, whether by the Stackelberg
/// solver or one of the baselines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackelbergSolution {
    /// The defender's mixed strategy as marginal coverage probabilities.
    /// Entries below `1e-8` are omitted.
    pub coverage: CoverageVector,
    /// The attacker's best-response target under this coverage.
    pub attacker_target: String,
    pub defender_eu: f64,
    pub attacker_eu: f64,
    /// node_id -> effective detection probability `p(t)`.
    pub detection_probabilities: BTreeMap<String, f64>,
}

impl StackelbergSolution {
    /// Human-readable summary, mirroring the original solver's `summary()`.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Attacker target: {}", self.attacker_target),
            format!("Defender EU: {:+.4}", self.defender_eu),
            format!("Attacker EU: {:+.4}", self.attacker_eu),
            String::new(),
            "Coverage (non-zero):".to_string(),
        ];
        for (node_id, assets) in &self.coverage {
            if assets.is_empty() {
                continue;
            }
            let parts: Vec<String> = assets
                .iter()
                .map(|(kind, prob)| format!("{}={:.3}", kind.as_str(), prob))
                .collect();
            let p_detect = self.detection_probabilities.get(node_id).copied().unwrap_or(0.0);
            lines.push(format!("  {}: {} (p_detect={:.3})", node_id, parts.join(", "), p_detect));
        }
        lines.join("\n")
    }
}
