//! NPC Sim - replays one NPC's dialog and prints the result as JSON.
//!
//! Usage: `npc-sim --npc <file.json> [--seed N] [--config settings.toml]
//!         [--on-dangling abort|stop] [--compact] [--check]`

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dialog_core::{DanglingPolicy, Settings, Simulator, SimulatorConfig};
use npc_rules::{load_npc, Npc};

#[derive(Parser, Debug)]
#[command(name = "npc-sim")]
#[command(about = "Deterministically replay an NPC dialog graph into a log and a set of flags")]
struct Args {
    /// Path to the NPC JSON description
    #[arg(long)]
    npc: PathBuf,

    /// Seed echoed into the output (default comes from settings, then 1234)
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// What to do when a link names no node: abort or stop
    #[arg(long)]
    on_dangling: Option<DanglingPolicy>,

    /// Print the result on a single line
    #[arg(long)]
    compact: bool,

    /// Only check the graph for missing nodes; do not run it
    #[arg(long)]
    check: bool,
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    npc: &'a str,
    nodes: usize,
    issues: Vec<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// How a successful invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Done,
    /// `--check` found missing nodes.
    IssuesFound,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::IssuesFound => ExitCode::FAILURE,
        }
    }
}

/// Seed, policy and output format after applying CLI flags over settings.
#[derive(Debug, Clone, Copy)]
struct RunOptions {
    seed: i64,
    config: SimulatorConfig,
    pretty: bool,
}

/// CLI flag, then settings file, then built-in default.
fn resolve_options(args: &Args) -> Result<RunOptions> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    Ok(RunOptions {
        seed: args.seed.unwrap_or(settings.seed),
        config: SimulatorConfig {
            on_dangling: args.on_dangling.unwrap_or(settings.on_dangling),
        },
        pretty: settings.pretty && !args.compact,
    })
}

fn check(npc: &Npc, pretty: bool) -> Result<Outcome> {
    let issues: Vec<String> = npc.validate().iter().map(ToString::to_string).collect();
    let clean = issues.is_empty();

    let report = CheckReport {
        npc: &npc.name,
        nodes: npc.len(),
        issues,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("failed to serialize check report")?;
    println!("{}", json);

    Ok(if clean {
        Outcome::Done
    } else {
        Outcome::IssuesFound
    })
}

fn run(args: Args) -> Result<Outcome> {
    let RunOptions {
        seed,
        config,
        pretty,
    } = resolve_options(&args)?;

    let npc = load_npc(&args.npc)?;
    info!(npc = %npc.name, nodes = npc.len(), "loaded NPC");

    if args.check {
        return check(&npc, pretty);
    }

    info!(seed, policy = ?config.on_dangling, "running simulation");
    let result = Simulator::with_config(&npc, seed, config)
        .run()
        .with_context(|| format!("simulation of '{}' failed", npc.name))?;

    let json = result
        .to_json(pretty)
        .context("failed to serialize simulation result")?;
    println!("{}", json);
    Ok(Outcome::Done)
}

fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();

    match run(args) {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
