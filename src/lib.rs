//! Wardgame — Stackelberg deception-asset placement solver and round-based
//! game simulator for enterprise network graphs.
//!
//! A defender commits to a probabilistic allocation of honeypots, decoy
//! credentials, and honeytokens across a network; an attacker observes the
//! commitment and selects a single target. [`services::solver::solve_sse`]
//! computes the Strong Stackelberg Equilibrium coverage; [`services::baselines`]
//! offers three non-game-theoretic strategies for comparison;
//! [`services::simulator::run_game`] plays a deterministic round loop of a
//! stub attacker against deployed assets; [`services::benchmark`] aggregates
//! many trials into summary statistics and pairwise significance tests.

pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::attack_surface::{technique_catalog, AccessLevel, Tactic, Technique};
pub use domain::deception::{DeceptionAsset, DeceptionType};
pub use domain::error::{GameError, SolverError, TopologyError};
pub use domain::network::{NodeAttributes, NodeType, Os, Service, Topology};
pub use domain::state::GameState;
pub use services::baselines::{baseline_heuristic, baseline_static, baseline_uniform};
pub use services::benchmark::{compare_all_pairs, compute_metrics, extract_trial, BenchmarkConfig, BenchmarkResult};
pub use services::simulator::run_game;
pub use services::solution::StackelbergSolution;
pub use services::solver::solve_sse;
pub use services::utility::UtilityParams;
