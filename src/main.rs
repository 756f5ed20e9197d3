//! Wardgame CLI: a thin terminal front-end over the library API.
//!
//! This binary is the "external collaborator" `spec.md` describes — it
//! only calls into [`wardgame`]'s public functions (`solve_sse`, the
//! baselines, `run_game`, the benchmark orchestrator) and renders their
//! output. No game-theoretic logic lives here.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use wardgame::infrastructure::config::ConfigLoader;
use wardgame::infrastructure::logging::{self, LogFormat};
use wardgame::services::baselines::{baseline_heuristic, baseline_static, baseline_uniform};
use wardgame::services::benchmark::{
    compute_attacker_path, export_results_csv, export_results_json, run_benchmark_with_progress,
    strategy_to_defender_actions, BenchmarkConfig,
};
use wardgame::services::simulator::run_game;
use wardgame::services::solver::solve_sse;
use wardgame::{StackelbergSolution, Topology, UtilityParams};

#[derive(Parser)]
#[command(name = "wardgame", version, about = "Stackelberg deception-asset placement and game simulation")]
struct Cli {
    #[arg(long, global = true, default_value = "info", env = "WARDGAME_LOG_LEVEL")]
    log_level: String,

    #[arg(long, global = true, default_value = "pretty", value_enum)]
    log_format: CliLogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliLogFormat {
    Pretty,
    Json,
}

impl From<CliLogFormat> for LogFormat {
    fn from(value: CliLogFormat) -> Self {
        match value {
            CliLogFormat::Pretty => LogFormat::Pretty,
            CliLogFormat::Json => LogFormat::Json,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum TopologyPreset {
    Small,
    Medium,
    Large,
}

#[derive(Clone, ValueEnum)]
enum BaselineKind {
    Uniform,
    Static,
    Heuristic,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the Strong Stackelberg Equilibrium coverage.
    Solve {
        #[arg(long, value_enum, default_value = "small", conflicts_with = "topology_file")]
        preset: TopologyPreset,
        #[arg(long)]
        topology_file: Option<PathBuf>,
        #[arg(long, default_value_t = 10.0)]
        budget: f64,
        #[arg(long, default_value_t = 1.0)]
        alpha: f64,
        #[arg(long, default_value_t = 1.0)]
        beta: f64,
        #[arg(long)]
        json: bool,
    },
    /// Compute a non-game-theoretic baseline strategy for comparison.
    Baseline {
        #[arg(long, value_enum)]
        kind: BaselineKind,
        #[arg(long, value_enum, default_value = "small", conflicts_with = "topology_file")]
        preset: TopologyPreset,
        #[arg(long)]
        topology_file: Option<PathBuf>,
        #[arg(long, default_value_t = 10.0)]
        budget: f64,
        #[arg(long, default_value_t = 1.0)]
        alpha: f64,
        #[arg(long, default_value_t = 1.0)]
        beta: f64,
        #[arg(long)]
        json: bool,
    },
    /// Realise a strategy as deployments and play one round-structured game.
    Simulate {
        #[arg(long, value_enum, default_value = "small")]
        preset: TopologyPreset,
        #[arg(long, default_value_t = 10.0)]
        budget: f64,
        #[arg(long, default_value_t = 10)]
        max_rounds: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Strategy to realise as defender deployments before the game starts.
        #[arg(long, default_value = "sse_optimal")]
        strategy: String,
        #[arg(long)]
        json: bool,
    },
    /// Run a full benchmark sweep across topologies and strategies.
    Benchmark {
        /// Optional YAML config file; falls back to `wardgame.yaml` / defaults.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Suppress the progress bar (useful for CI logs).
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format.into());

    match cli.command {
        Commands::Solve { preset, topology_file, budget, alpha, beta, json } => {
            let topology = load_topology(preset, topology_file)?;
            let solution = solve_sse(&topology, budget, UtilityParams { alpha, beta })
                .context("Stackelberg solver failed")?;
            render_solution(&solution, json);
        }
        Commands::Baseline { kind, preset, topology_file, budget, alpha, beta, json } => {
            let topology = load_topology(preset, topology_file)?;
            let params = UtilityParams { alpha, beta };
            let solution = match kind {
                BaselineKind::Uniform => baseline_uniform(&topology, budget, params),
                BaselineKind::Static => baseline_static(&topology, budget, params),
                BaselineKind::Heuristic => baseline_heuristic(&topology, budget, params),
            };
            render_solution(&solution, json);
        }
        Commands::Simulate { preset, budget, max_rounds, seed, strategy, json } => {
            let mut topology = load_topology(preset, None)?;
            let params = UtilityParams::default();
            let solution = match strategy.as_str() {
                "sse_optimal" => solve_sse(&topology, budget, params).context("solver failed")?,
                "uniform" => baseline_uniform(&topology, budget, params),
                "static" => baseline_static(&topology, budget, params),
                "heuristic" => baseline_heuristic(&topology, budget, params),
                other => bail!("unknown strategy '{other}'; expected one of sse_optimal, uniform, static, heuristic"),
            };
            let defender_actions = strategy_to_defender_actions(&solution);
            let attacker_path = compute_attacker_path(&topology);

            let state = run_game(&mut topology, budget, max_rounds, seed, &defender_actions, &attacker_path)
                .context("failed to start game")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                println!("{}", style(format!("Simulated {strategy} on {}", topology.name)).bold());
                println!("  attacker path: {}", attacker_path.join(" -> "));
                println!("  rounds played: {}", state.current_round.saturating_sub(1));
                println!("  winner: {}", style(&state.winner).cyan());
                println!("  detected: {}", state.attacker.detected);
                println!("  exfiltrated value: {:.2}", state.attacker.exfiltrated_value);
                println!("  detections: {}", state.detections.len());
            }
        }
        Commands::Benchmark { config, json, csv, quiet } => {
            let config = match config {
                Some(path) => ConfigLoader::load_from_file(path)?,
                None => ConfigLoader::load()?,
            };
            let result = run_with_progress(&config, quiet);

            if json {
                println!("{}", export_results_json(&result)?);
            } else {
                render_benchmark_table(&result);
            }
            if let Some(path) = csv {
                std::fs::write(&path, export_results_csv(&result))
                    .with_context(|| format!("failed to write CSV to {}", path.display()))?;
                println!("wrote {}", path.display());
            }
        }
    }

    Ok(())
}

fn load_topology(preset: TopologyPreset, topology_file: Option<PathBuf>) -> Result<Topology> {
    if let Some(path) = topology_file {
        return Topology::load_from_file(&path).with_context(|| format!("failed to load {}", path.display()));
    }
    Ok(match preset {
        TopologyPreset::Small => Topology::small_enterprise(),
        TopologyPreset::Medium => Topology::medium_enterprise(),
        TopologyPreset::Large => Topology::large_enterprise(),
    })
}

fn render_solution(solution: &StackelbergSolution, json: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(solution).expect("solution serialises"));
        return;
    }
    println!("{}", solution.summary());
}

fn run_with_progress(config: &BenchmarkConfig, quiet: bool) -> wardgame::BenchmarkResult {
    let total_cells = config.topologies.len() * config.strategies.len();
    let total_trials = (total_cells as u64) * u64::from(config.num_trials);

    if quiet || total_trials == 0 {
        return run_benchmark_with_progress(config, |_, _, _| {});
    }

    let bar = ProgressBar::new(total_trials);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid progress template")
            .progress_chars("=>-"),
    );

    let result = run_benchmark_with_progress(config, |description, _current, _total| {
        bar.inc(1);
        bar.set_message(description.to_string());
    });
    bar.finish_with_message("benchmark complete");
    result
}

fn render_benchmark_table(result: &wardgame::BenchmarkResult) {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("strategy"),
            Cell::new("topology"),
            Cell::new("n").set_alignment(CellAlignment::Right),
            Cell::new("detection rate").set_alignment(CellAlignment::Right),
            Cell::new("mean ttd").set_alignment(CellAlignment::Right),
            Cell::new("dwell time").set_alignment(CellAlignment::Right),
            Cell::new("exfiltration").set_alignment(CellAlignment::Right),
        ]);

    for m in &result.metrics {
        let ttd = if m.mean_time_to_detect.mean.is_infinite() {
            "inf".to_string()
        } else {
            format!("{:.2}", m.mean_time_to_detect.mean)
        };
        table.add_row(vec![
            Cell::new(&m.strategy),
            Cell::new(&m.topology),
            Cell::new(m.num_trials).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", m.detection_rate.mean)).set_alignment(CellAlignment::Right),
            Cell::new(ttd).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", m.attacker_dwell_time.mean)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", m.attacker_exfiltration.mean)).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");

    if !result.comparisons.is_empty() {
        println!("\n{}", style("pairwise comparisons vs sse_optimal").bold());
        for c in &result.comparisons {
            let marker = if c.significant { style("*").green() } else { style(" ").dim() };
            println!(
                "  {}{} vs {} on {}: U={:.1} p={:.4}",
                marker, c.strategy_a, c.strategy_b, c.metric, c.u_statistic, c.p_value
            );
        }
    }
}
