//! Benchmark orchestrator: run every configured strategy against every
//! configured topology for many trials, then summarise and compare.
//!
//! Ported from `original_source/src/stratagem/evaluation/benchmark.py`
//! (trial orchestration) and `.../evaluation/metrics.py` (summary
//! statistics and pairwise comparison). Trials are embarrassingly
//! parallel — each is an independent `(strategy, topology, seed)`
//! triple — so the trial loop is sharded with `rayon` instead of the
//! original's `asyncio.gather`.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::domain::network::Topology;
use crate::domain::state::GameState;
use crate::services::baselines::{baseline_heuristic, baseline_static, baseline_uniform};
use crate::services::simulator::run_game;
use crate::services::solution::StackelbergSolution;
use crate::services::solver::solve_sse;
use crate::services::utility::UtilityParams;

/// z-score for a 95% confidence interval, used throughout.
const Z_95: f64 = 1.96;

/// Coverage threshold above which a marginal probability is treated as a
/// firm deployment decision when flattening a mixed strategy into the
/// simulator's fixed per-trial deployment sequence.
const DEPLOYMENT_THRESHOLD: f64 = 0.5;

/// One completed game, reduced to the fields the benchmark aggregates over.
///
/// Field set matches `spec.md` §4.F trial extraction exactly: strategy and
/// topology tags, the seed that produced the run, the winner, rounds
/// played, detection bookkeeping (including the round of first detection,
/// if any), exfiltration, compromise count, and the defender's budget and
/// actual spend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialResult {
    pub strategy: String,
    pub topology: String,
    pub seed: u64,
    pub winner: String,
    pub rounds_played: u32,
    pub max_rounds: u32,
    pub detected: bool,
    /// Round of first detection, or `None` if the attacker was never caught.
    pub detection_round: Option<u32>,
    pub num_detections: u32,
    /// `detection_round` if detected, else `rounds_played` — how long the
    /// attacker stayed active before detection or game end.
    pub dwell_time: u32,
    pub exfiltrated_value: f64,
    pub compromised_count: u32,
    pub defender_budget: f64,
    pub defender_spent: f64,
    /// `1.0 + 0.1*num_detections` if the attacker was caught, else
    /// `-exfiltrated_value`. This is the authoritative formula: the
    /// original computes an unused first draft of this value and silently
    /// overwrites it with this one before returning.
    pub defender_utility: f64,
}

pub fn extract_trial(state: &GameState, strategy: &str, topology: &str, seed: u64) -> TrialResult {
    let num_detections = state.detections.len() as u32;
    let detection_round = state.detections.iter().map(|d| d.round).min();
    let rounds_played = state.current_round.saturating_sub(1);
    let dwell_time = if state.attacker.detected { detection_round.unwrap_or(rounds_played) } else { rounds_played };
    let defender_utility = if state.attacker.detected {
        1.0 + f64::from(num_detections) * 0.1
    } else {
        -state.attacker.exfiltrated_value
    };

    TrialResult {
        strategy: strategy.to_string(),
        topology: topology.to_string(),
        seed,
        winner: state.winner.clone(),
        rounds_played,
        max_rounds: state.max_rounds,
        detected: state.attacker.detected,
        detection_round,
        num_detections,
        dwell_time,
        exfiltrated_value: state.attacker.exfiltrated_value,
        compromised_count: state.attacker.compromised_nodes.len() as u32,
        defender_budget: state.defender.budget,
        defender_spent: state.defender.total_spent,
        defender_utility,
    }
}

/// Mean, sample standard deviation, 95% confidence interval, and sample
/// size for one metric across trials — the `(mean, std, ci_lower,
/// ci_upper, n)` tuple `spec.md` §4.F specifies for every summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean: f64,
    pub std: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub n: usize,
}

impl MetricSummary {
    /// The `mean_time_to_detect` summary when no trial was ever detected:
    /// the mean (and both CI bounds) are `+infinity` by convention.
    fn infinite(n: usize) -> Self {
        Self { mean: f64::INFINITY, std: 0.0, ci_lower: f64::INFINITY, ci_upper: f64::INFINITY, n }
    }
}

/// Normal-approximation CI: `mean +/- 1.96 * sample_std / sqrt(n)`.
/// Degenerates to a point estimate with no width when fewer than two
/// observations are available.
fn summarise(values: &[f64]) -> MetricSummary {
    let n = values.len();
    let mean = if n == 0 { 0.0 } else { values.iter().sum::<f64>() / n as f64 };
    if n < 2 {
        return MetricSummary { mean, std: 0.0, ci_lower: mean, ci_upper: mean, n };
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = variance.sqrt();
    let margin = Z_95 * std / (n as f64).sqrt();
    MetricSummary { mean, std, ci_lower: mean - margin, ci_upper: mean + margin, n }
}

/// Wilson score interval for a binomial proportion — tighter and better
/// behaved near 0/1 than the normal approximation `summarise` uses. Used
/// for `detection_rate` specifically, per `spec.md` §4.F.
fn binomial_ci(successes: u32, n: u32) -> MetricSummary {
    if n == 0 {
        return MetricSummary { mean: 0.0, std: 0.0, ci_lower: 0.0, ci_upper: 0.0, n: 0 };
    }
    let nf = f64::from(n);
    let p_hat = f64::from(successes) / nf;
    let std = (p_hat * (1.0 - p_hat) / nf).sqrt();
    let z2 = Z_95 * Z_95;
    let denom = 1.0 + z2 / nf;
    let center = (p_hat + z2 / (2.0 * nf)) / denom;
    let margin = (Z_95 / denom) * (p_hat * (1.0 - p_hat) / nf + z2 / (4.0 * nf * nf)).sqrt();
    MetricSummary {
        mean: p_hat,
        std,
        ci_lower: (center - margin).max(0.0),
        ci_upper: (center + margin).min(1.0),
        n: n as usize,
    }
}

/// Full set of summary metrics for one `(strategy, topology)` cell, named
/// per `spec.md` §4.F.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyMetrics {
    pub strategy: String,
    pub topology: String,
    pub num_trials: usize,
    pub detection_rate: MetricSummary,
    /// Mean round of first detection over detected trials only;
    /// [`MetricSummary::infinite`] if no trial was ever detected.
    pub mean_time_to_detect: MetricSummary,
    /// Mean of `(1 if detected else 0) / max(defender_spent, 1e-8)` per
    /// trial: detections bought per unit of defender spend.
    pub cost_efficiency: MetricSummary,
    pub attacker_dwell_time: MetricSummary,
    pub defender_utility: MetricSummary,
    pub attacker_exfiltration: MetricSummary,
}

const COST_EFFICIENCY_FLOOR: f64 = 1e-8;

pub fn compute_metrics(strategy: &str, topology: &str, trials: &[TrialResult]) -> StrategyMetrics {
    let n = trials.len() as u32;
    let detections = trials.iter().filter(|t| t.detected).count() as u32;

    let detection_rounds: Vec<f64> =
        trials.iter().filter(|t| t.detected).filter_map(|t| t.detection_round).map(f64::from).collect();
    let mean_time_to_detect =
        if detection_rounds.is_empty() { MetricSummary::infinite(0) } else { summarise(&detection_rounds) };

    let cost_efficiency: Vec<f64> = trials
        .iter()
        .map(|t| {
            let indicator = if t.detected { 1.0 } else { 0.0 };
            indicator / t.defender_spent.max(COST_EFFICIENCY_FLOOR)
        })
        .collect();

    let dwell_times: Vec<f64> = trials.iter().map(|t| f64::from(t.dwell_time)).collect();
    let exfiltrated: Vec<f64> = trials.iter().map(|t| t.exfiltrated_value).collect();
    let defender_utilities: Vec<f64> = trials.iter().map(|t| t.defender_utility).collect();

    StrategyMetrics {
        strategy: strategy.to_string(),
        topology: topology.to_string(),
        num_trials: trials.len(),
        detection_rate: binomial_ci(detections, n),
        mean_time_to_detect,
        cost_efficiency: summarise(&cost_efficiency),
        attacker_dwell_time: summarise(&dwell_times),
        defender_utility: summarise(&defender_utilities),
        attacker_exfiltration: summarise(&exfiltrated),
    }
}

/// Result of a two-sided Mann-Whitney U test comparing two samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairwiseComparison {
    pub metric: String,
    pub strategy_a: String,
    pub strategy_b: String,
    pub u_statistic: f64,
    pub p_value: f64,
    pub significant: bool,
}

/// Two-sided Mann-Whitney U test with tie correction, normal-approximated
/// (no exact tables in the Rust ecosystem used here, matching scipy's
/// `mannwhitneyu(..., method="asymptotic")`). Falls back to a
/// non-significant result when either sample has fewer than two
/// observations, since the normal approximation is unreliable there.
fn mann_whitney_u(a: &[f64], b: &[f64]) -> (f64, f64) {
    if a.len() < 2 || b.len() < 2 {
        return (0.0, 1.0);
    }

    let n1 = a.len();
    let n2 = b.len();
    let mut combined: Vec<(f64, usize)> = a.iter().map(|&v| (v, 0)).chain(b.iter().map(|&v| (v, 1))).collect();
    combined.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap());

    let mut ranks = vec![0.0; combined.len()];
    let mut tie_term = 0.0;
    let mut i = 0;
    while i < combined.len() {
        let mut j = i;
        while j + 1 < combined.len() && (combined[j + 1].0 - combined[i].0).abs() < 1e-12 {
            j += 1;
        }
        let avg_rank = (i + j) as f64 / 2.0 + 1.0;
        for r in ranks.iter_mut().take(j + 1).skip(i) {
            *r = avg_rank;
        }
        let t = (j - i + 1) as f64;
        tie_term += t.powi(3) - t;
        i = j + 1;
    }

    let rank_sum_a: f64 = ranks.iter().zip(combined.iter()).filter(|(_, (_, g))| *g == 0).map(|(r, _)| r).sum();

    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let u1 = rank_sum_a - n1f * (n1f + 1.0) / 2.0;
    let u2 = n1f * n2f - u1;
    let u = u1.min(u2);

    let n = n1f + n2f;
    let mean_u = n1f * n2f / 2.0;
    let sigma_u2 = n1f * n2f / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));
    if sigma_u2 <= 0.0 {
        return (u, 1.0);
    }
    let sigma_u = sigma_u2.sqrt();

    // Continuity-corrected z, two-sided.
    let z = (u1 - mean_u).abs().max(0.0);
    let z = (z - 0.5).max(0.0) / sigma_u;
    let p = 2.0 * (1.0 - standard_normal_cdf(z));
    (u, p.clamp(0.0, 1.0))
}

/// CDF of the standard normal distribution via the Abramowitz-Stegun
/// approximation to `erf`.
fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let a1 = 0.254_829_592;
    let a2 = -0.284_496_736;
    let a3 = 1.421_413_741;
    let a4 = -1.453_152_027;
    let a5 = 1.061_405_429;
    let p = 0.327_591_1;
    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();
    sign * y
}

pub fn compare_strategies(metric: &str, strategy_a: &str, a: &[f64], strategy_b: &str, b: &[f64]) -> PairwiseComparison {
    let (u, p) = mann_whitney_u(a, b);
    PairwiseComparison {
        metric: metric.to_string(),
        strategy_a: strategy_a.to_string(),
        strategy_b: strategy_b.to_string(),
        u_statistic: u,
        p_value: p,
        significant: p < 0.05,
    }
}

/// Compare the solver's optimal strategy against each baseline, on the
/// three metrics that matter most, pooling trials across every topology
/// the benchmark ran.
pub fn compare_all_pairs(trials: &[TrialResult]) -> Vec<PairwiseComparison> {
    const BASELINE_COMPARISONS: [&str; 3] = ["uniform", "static", "heuristic"];
    const METRICS: [&str; 3] = ["detection_rate", "dwell_time", "exfiltrated_value"];

    let sample = |strategy: &str, metric: &str| -> Vec<f64> {
        trials
            .iter()
            .filter(|t| t.strategy == strategy)
            .map(|t| match metric {
                "detection_rate" => {
                    if t.detected {
                        1.0
                    } else {
                        0.0
                    }
                }
                "dwell_time" => f64::from(t.dwell_time),
                "exfiltrated_value" => t.exfiltrated_value,
                _ => unreachable!(),
            })
            .collect()
    };

    let mut comparisons = Vec::new();
    for metric in METRICS {
        let optimal = sample("sse_optimal", metric);
        for baseline in BASELINE_COMPARISONS {
            let other = sample(baseline, metric);
            comparisons.push(compare_strategies(metric, "sse_optimal", &optimal, baseline, &other));
        }
    }
    comparisons
}

/// Configuration for a full benchmark sweep. Mirrors the original's
/// dataclass defaults exactly, and doubles as the schema the
/// `figment`-based config loader in [`crate::infrastructure::config`]
/// populates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    pub topologies: Vec<String>,
    pub strategies: Vec<String>,
    pub num_trials: u32,
    pub max_rounds: u32,
    pub budget: f64,
    pub base_seed: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            topologies: vec!["small".to_string(), "medium".to_string(), "large".to_string()],
            strategies: vec![
                "sse_optimal".to_string(),
                "uniform".to_string(),
                "static".to_string(),
                "heuristic".to_string(),
            ],
            num_trials: 100,
            max_rounds: 10,
            budget: 10.0,
            base_seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub config: BenchmarkConfig,
    pub metrics: Vec<StrategyMetrics>,
    pub comparisons: Vec<PairwiseComparison>,
}

fn topology_by_name(name: &str) -> Option<Topology> {
    match name {
        "small" => Some(Topology::small_enterprise()),
        "medium" => Some(Topology::medium_enterprise()),
        "large" => Some(Topology::large_enterprise()),
        _ => None,
    }
}

/// Highest-value node reachable from the first entry point, as a shortest
/// path starting at that entry point. Falls back to a single-node path at
/// the entry point if nothing of positive value is reachable.
pub fn compute_attacker_path(topology: &Topology) -> Vec<String> {
    let Some(entry) = topology.entry_points().into_iter().next() else {
        return Vec::new();
    };

    let mut candidates: Vec<String> = topology
        .nodes()
        .into_iter()
        .filter(|n| *n != entry)
        .filter(|n| topology.get_attrs(n).map(|a| a.value).unwrap_or(0.0) > 0.0)
        .collect();
    candidates.sort_by(|a, b| {
        let va = topology.get_attrs(a).map(|x| x.value).unwrap_or(0.0);
        let vb = topology.get_attrs(b).map(|x| x.value).unwrap_or(0.0);
        vb.partial_cmp(&va).unwrap()
    });

    for candidate in candidates {
        if let Some(path) = topology.shortest_path(&entry, &candidate) {
            return path;
        }
    }
    vec![entry]
}

/// Flatten a mixed strategy into the fixed deployment sequence the
/// simulator expects: every `(node, asset)` marginal above
/// [`DEPLOYMENT_THRESHOLD`] becomes a firm deployment.
pub fn strategy_to_defender_actions(solution: &StackelbergSolution) -> Vec<(String, String)> {
    let mut actions = Vec::new();
    for (node_id, assets) in &solution.coverage {
        for (kind, prob) in assets {
            if *prob > DEPLOYMENT_THRESHOLD {
                actions.push((kind.as_str().to_string(), node_id.clone()));
            }
        }
    }
    actions
}

fn solve_strategy(strategy: &str, topology: &Topology, budget: f64) -> Option<StackelbergSolution> {
    let params = UtilityParams::default();
    match strategy {
        "sse_optimal" => solve_sse(topology, budget, params).ok(),
        "uniform" => Some(baseline_uniform(topology, budget, params)),
        "static" => Some(baseline_static(topology, budget, params)),
        "heuristic" => Some(baseline_heuristic(topology, budget, params)),
        _ => None,
    }
}

/// Run every configured `(strategy, topology)` pair for `config.num_trials`
/// trials each, aggregate metrics, and compare the solver against every
/// baseline.
///
/// Trials within a cell run in parallel via `rayon`; the topology is
/// cloned per trial since the simulator mutates the `compromised` flag in
/// place.
pub fn run_benchmark(config: &BenchmarkConfig) -> BenchmarkResult {
    run_benchmark_with_progress(config, |_, _, _| {})
}

/// Like [`run_benchmark`], but invokes `on_progress(description, current,
/// total)` once per completed trial.
///
/// Per `spec.md` §5, the callback is cooperative and must not mutate shared
/// state — trials run concurrently across a `rayon` thread pool, so the
/// callback may be invoked from any worker thread and in any order. `Sync`
/// is required for exactly this reason.
#[instrument(skip(config, on_progress))]
pub fn run_benchmark_with_progress(
    config: &BenchmarkConfig,
    on_progress: impl Fn(&str, usize, usize) + Sync,
) -> BenchmarkResult {
    let mut metrics = Vec::new();
    let mut all_trials = Vec::new();
    let total = config.num_trials as usize;

    for topology_name in &config.topologies {
        let Some(base_topology) = topology_by_name(topology_name) else {
            info!(topology = %topology_name, "unknown topology name, skipping");
            continue;
        };
        let attacker_path = compute_attacker_path(&base_topology);

        for strategy in &config.strategies {
            let Some(solution) = solve_strategy(strategy, &base_topology, config.budget) else {
                info!(strategy = %strategy, "strategy produced no solution, skipping");
                continue;
            };
            let defender_actions = strategy_to_defender_actions(&solution);
            let description = format!("{strategy}@{topology_name}");
            let completed = std::sync::atomic::AtomicUsize::new(0);

            let trial_results: Vec<TrialResult> = (0..config.num_trials)
                .into_par_iter()
                .map(|i| {
                    let seed = config.base_seed + u64::from(i);
                    let mut topology = base_topology.clone();
                    let state = run_game(
                        &mut topology,
                        config.budget,
                        config.max_rounds,
                        seed,
                        &defender_actions,
                        &attacker_path,
                    )
                    .expect("benchmark topologies always have a valid entry point and deployment set");
                    let trial = extract_trial(&state, strategy, topology_name, seed);
                    let done = completed.fetch_add(1, std::sync::atomic::Ordering::Relaxed) + 1;
                    on_progress(&description, done, total);
                    trial
                })
                .collect();

            metrics.push(compute_metrics(strategy, topology_name, &trial_results));
            all_trials.extend(trial_results);
        }
    }

    let comparisons = compare_all_pairs(&all_trials);
    BenchmarkResult { config: config.clone(), metrics, comparisons }
}

pub fn export_results_json(result: &BenchmarkResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Flatten the per-cell metrics into a CSV table, one row per
/// `(strategy, topology)`. No `csv` crate in the dependency stack for a
/// table this small and this shaped, so this writes the format directly.
pub fn export_results_csv(result: &BenchmarkResult) -> String {
    let mut out = String::from(
        "strategy,topology,num_trials,detection_rate,detection_rate_ci_lower,detection_rate_ci_upper,\
         mean_time_to_detect,cost_efficiency,attacker_dwell_time,attacker_exfiltration,defender_utility\n",
    );
    for m in &result.metrics {
        out.push_str(&format!(
            "{},{},{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}\n",
            m.strategy,
            m.topology,
            m.num_trials,
            m.detection_rate.mean,
            m.detection_rate.ci_lower,
            m.detection_rate.ci_upper,
            m.mean_time_to_detect.mean,
            m.cost_efficiency.mean,
            m.attacker_dwell_time.mean,
            m.attacker_exfiltration.mean,
            m.defender_utility.mean,
        ));
    }
    out
}
