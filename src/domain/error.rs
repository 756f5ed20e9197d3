//! Domain error types for the wardgame core.
//!
//! Each error enum is scoped to a single concern, following the same
//! thiserror-per-domain pattern used throughout the rest of the crate.

use thiserror::Error;

/// Errors raised while constructing or loading a [`crate::domain::network::Topology`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    /// An edge referenced a node ID that was never added.
    #[error("unknown node referenced from edge: {0}")]
    UnknownNode(String),

    /// `add_node` was called twice with the same ID.
    #[error("duplicate node: {0}")]
    DuplicateNode(String),

    /// A text document used an enum tag we don't recognise.
    #[error("invalid tag '{tag}' for field {field}")]
    InvalidTag { field: &'static str, tag: String },

    /// The document could not be parsed as YAML.
    #[error("failed to parse topology document: {0}")]
    Parse(String),
}

/// Errors raised while setting up or stepping a [`crate::services::simulator`] game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The topology has no node flagged `is_entry_point`.
    #[error("topology has no entry points")]
    NoEntryPoints,

    /// A caller-supplied entry point is not flagged as one.
    #[error("'{0}' is not an entry point")]
    NotAnEntryPoint(String),

    /// A deployment sequence named an asset kind outside the closed catalog.
    #[error("unknown asset kind in deployment sequence: {0}")]
    UnknownAsset(String),
}

/// Errors raised by [`crate::services::solver::solve_sse`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// Every per-target LP came back infeasible. Zero coverage is always
    /// feasible for the argmax-value target, so this indicates a bug in
    /// the constraint construction rather than a legitimate outcome.
    #[error("all candidate-target LPs were infeasible, which should be unreachable")]
    AllLpsInfeasible,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_error_display() {
        let err = TopologyError::UnknownNode("ghost".to_string());
        assert_eq!(err.to_string(), "unknown node referenced from edge: ghost");
    }

    #[test]
    fn game_error_display() {
        assert_eq!(
            GameError::NotAnEntryPoint("db-1".to_string()).to_string(),
            "'db-1' is not an entry point"
        );
        assert_eq!(GameError::NoEntryPoints.to_string(), "topology has no entry points");
    }

    #[test]
    fn solver_error_display() {
        assert_eq!(
            SolverError::AllLpsInfeasible.to_string(),
            "all candidate-target LPs were infeasible, which should be unreachable"
        );
    }
}
