//! jam-run — command-line runner for the jam congestion router.
//!
//! Loads a problem directory (`vertices.csv`, `edges.csv`, `cars.csv`), runs
//! the tick loop to convergence or the tick ceiling, and writes
//! `histories.csv` and `tick_summaries.csv` to the output directory.
//!
//! Without `--problem` a small built-in grid is used:
//!
//! ```text
//! RUST_LOG=info cargo run --release -p jam-run -- --out output/demo
//! ```

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use jam_core::{CostPolicyKind, LoadAccounting, SimConfig};
use jam_fleet::AgentStatus;
use jam_graph::{AStarRouter, DijkstraRouter, Router};
use jam_io::{load_problem_dir, load_problem_readers, CsvWriter, SimOutputObserver, VertexIds};
use jam_sim::{validate_solution, Problem, SimBuilder, SimReport};

// ── Built-in problem ──────────────────────────────────────────────────────────

// 3 x 3 grid, unit spacing.  The middle row is a single-lane bottleneck.
const DEMO_VERTICES: &str = "\
id,x,y\n\
1,0,0\n2,1,0\n3,2,0\n\
4,0,1\n5,1,1\n6,2,1\n\
7,0,2\n8,1,2\n9,2,2\n\
";

const DEMO_EDGES: &str = "\
from,to,capacity\n\
1,2,2\n2,3,2\n\
4,5,1\n5,6,1\n\
7,8,2\n8,9,2\n\
1,4,2\n4,7,2\n\
2,5,1\n5,8,1\n\
3,6,2\n6,9,2\n\
";

const DEMO_CARS: &str = "\
origin,destination\n\
4,6\n4,6\n4,6\n4,6\n\
1,9\n7,3\n9,1\n3,7\n\
2,8\n8,2\n\
";

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PolicyArg {
    Blocking,
    Penalty,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AccountingArg {
    PerTick,
    Cumulative,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RouterArg {
    Astar,
    Dijkstra,
}

#[derive(Parser, Debug)]
#[command(name = "jam-run", about = "Congestion-aware multi-agent routing on a road graph")]
struct Cli {
    /// Directory holding vertices.csv, edges.csv and cars.csv.
    #[arg(long)]
    problem: Option<PathBuf>,

    /// Output directory for histories.csv and tick_summaries.csv.
    #[arg(long, default_value = "output/jam-run")]
    out: PathBuf,

    /// JSON file with a full `SimConfig`.  Flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Penalty slope `k`.  Implies `--policy penalty`.
    #[arg(long)]
    congestion_factor: Option<f64>,

    #[arg(long)]
    replan_threshold: Option<f64>,

    #[arg(long)]
    tick_ceiling: Option<u64>,

    #[arg(long, value_enum)]
    accounting: Option<AccountingArg>,

    /// Worker threads for the decision phase (default: all cores).
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long, value_enum, default_value = "astar")]
    router: RouterArg,
}

impl Cli {
    fn sim_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => SimConfig::default(),
        };

        let current_k = match config.cost_policy {
            CostPolicyKind::Penalty { congestion_factor } => congestion_factor,
            CostPolicyKind::Blocking => SimConfig::DEFAULT_CONGESTION_FACTOR,
        };
        match (self.policy, self.congestion_factor) {
            (Some(PolicyArg::Blocking), _) => config.cost_policy = CostPolicyKind::Blocking,
            (Some(PolicyArg::Penalty), k) | (None, k @ Some(_)) => {
                config.cost_policy = CostPolicyKind::Penalty {
                    congestion_factor: k.unwrap_or(current_k),
                };
            }
            (None, None) => {}
        }

        if let Some(t) = self.replan_threshold {
            config.replan_threshold = t;
        }
        if let Some(t) = self.tick_ceiling {
            config.tick_ceiling = t;
        }
        if let Some(a) = self.accounting {
            config.load_accounting = match a {
                AccountingArg::PerTick    => LoadAccounting::PerTick,
                AccountingArg::Cumulative => LoadAccounting::Cumulative,
            };
        }
        if self.threads.is_some() {
            config.num_threads = self.threads;
        }
        Ok(config)
    }
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn execute<R: Router>(
    config:  SimConfig,
    problem: Problem,
    ids:     VertexIds,
    router:  R,
    out:     &Path,
) -> Result<SimReport> {
    let cars = problem.cars.clone();
    let mut sim = SimBuilder::from_config(config, problem).router(router).build()?;

    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    let mut obs = SimOutputObserver::new(CsvWriter::new(out)?, ids);

    let t0 = Instant::now();
    let report = sim.run(&mut obs);
    let elapsed = t0.elapsed();
    obs.write_report(&report)?;

    let violations = validate_solution(&sim.graph, &cars, &report.outcomes);
    for v in &violations {
        log::warn!("invalid history: {v}");
    }

    println!("Run {} after {} ticks in {:.3} s", report.termination, report.ticks, elapsed.as_secs_f64());
    println!("  peak edge load : {}", sim.graph.max_load());
    println!("  invalid paths  : {}", violations.len());
    Ok(report)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.sim_config()?;

    let (problem, ids) = match &cli.problem {
        Some(dir) => load_problem_dir(dir)?,
        None => load_problem_readers(
            Cursor::new(DEMO_VERTICES),
            Cursor::new(DEMO_EDGES),
            Cursor::new(DEMO_CARS),
        )?,
    };

    println!("=== jam-run ===");
    println!(
        "Graph: {} vertices, {} edges  |  Cars: {}",
        problem.graph.vertex_count(),
        problem.graph.edge_count(),
        problem.agent_count()
    );
    println!(
        "Policy: {:?}  |  Accounting: {:?}  |  Ceiling: {}",
        config.cost_policy, config.load_accounting, config.tick_ceiling
    );
    println!();

    let report = match cli.router {
        RouterArg::Astar    => execute(config, problem, ids, AStarRouter, &cli.out)?,
        RouterArg::Dijkstra => execute(config, problem, ids, DijkstraRouter, &cli.out)?,
    };

    println!();
    println!("{:<12} {:>8}", "Status", "Agents");
    println!("{}", "-".repeat(21));
    for status in [AgentStatus::Arrived, AgentStatus::Stuck, AgentStatus::Waiting, AgentStatus::EnRoute] {
        println!("{:<12} {:>8}", status.as_str(), report.count(status));
    }
    let replans: u32 = report.outcomes.iter().map(|o| o.replans).sum();
    let waits: u32 = report.outcomes.iter().map(|o| o.waits).sum();
    println!();
    println!("Total replans: {replans}  |  Total waits: {waits}");
    println!("Total cost: {:.1}", report.total_cost());
    println!("Output written to {}", cli.out.display());
    Ok(())
}
