// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! hyperpath command line.
//!
//! Subcommands compute single-source temporal distances over channel dumps,
//! run the engine equivalence drill, summarise a dump, and edit the persisted
//! defaults. Everything a subcommand prints is one JSON document on stdout;
//! logs go to stderr.
#![forbid(unsafe_code)]

pub mod config;
pub mod fuzz;
pub mod report;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hyperpath_core::{parse_datetime, Metric, SearchEngine, Timestamp};
use hyperpath_ingest::{load_network, CommunicationNetwork};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{CliPrefs, DirPrefsStore, PrefsService, PrefsStore};
use crate::report::{DistanceReport, StatsReport};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "hyperpath", version)]
#[command(about = "Minimal temporal paths on time-varying hypergraphs")]
pub struct Cli {
    /// Directory holding `cli.json` (defaults to the platform config dir).
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Distances from one participant to every reachable participant
    Distances {
        /// Channel dump (JSON; `.zst` or `.bz2` with the `zstd` or `bzip2` feature)
        input: PathBuf,
        /// Source participant
        #[arg(long)]
        source: String,
        /// shortest, fastest or foremost
        #[arg(long)]
        metric: Option<Metric>,
        /// Earliest allowed first hop: an integer tick or an ISO-8601 date-time
        #[arg(long)]
        min_timing: Option<String>,
        /// Engine to run; `both` fails unless the engines agree
        #[arg(long, value_enum)]
        engine: Option<EngineChoice>,
    },
    /// Check that both engines agree on random pairwise networks
    Fuzz {
        /// Number of random networks
        #[arg(long)]
        runs: Option<u32>,
        /// Seed for reproducing a drill
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Participant/channel counts and the timing range of a dump
    Stats {
        /// Channel dump
        input: PathBuf,
    },
    /// Show or update persisted defaults
    Prefs {
        /// Default metric
        #[arg(long)]
        metric: Option<Metric>,
        /// Default engine
        #[arg(long)]
        engine: Option<SearchEngine>,
        /// Default log filter (`RUST_LOG` syntax)
        #[arg(long)]
        log_filter: Option<String>,
        /// Default number of fuzz runs
        #[arg(long)]
        fuzz_runs: Option<u32>,
        /// Restore built-in defaults before applying the other flags
        #[arg(long)]
        reset: bool,
    },
}

/// Engine selection for `distances`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineChoice {
    /// Vertex-level search.
    Vertex,
    /// Hyperedge-level search.
    Hyperedge,
    /// Both, cross-checked.
    Both,
}

impl From<SearchEngine> for EngineChoice {
    fn from(engine: SearchEngine) -> Self {
        match engine {
            SearchEngine::Vertex => Self::Vertex,
            SearchEngine::Hyperedge => Self::Hyperedge,
        }
    }
}

/// Parses the CLI, loads preferences, initialises logging and runs.
pub fn entrypoint() -> Result<()> {
    let cli = Cli::parse();
    let store = match cli.config_dir.clone() {
        Some(dir) => Ok(DirPrefsStore::at(dir)),
        None => DirPrefsStore::platform(),
    };
    let service = store.map(PrefsService::new);

    let loaded = match &service {
        Ok(service) => service.load(),
        Err(_) => Ok(None),
    };
    let (prefs, load_error) = match loaded {
        Ok(prefs) => (prefs.unwrap_or_default(), None),
        Err(err) => (CliPrefs::default(), Some(err)),
    };

    init_tracing(&prefs.log_filter)?;
    if let Some(err) = load_error {
        warn!(%err, "ignoring unreadable preferences");
    }
    if let Err(err) = &service {
        debug!(%err, "no preferences store");
    }

    let mut out = io::stdout().lock();
    run(cli.command, &prefs, service.as_ref().ok(), &mut out)
}

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `default_filter`; an unparsable default falls back
/// to `info`.
pub fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}

/// Runs one subcommand against `prefs`, writing its JSON output to `out`.
pub fn run<S: PrefsStore, W: Write>(
    command: Commands,
    prefs: &CliPrefs,
    service: Option<&PrefsService<S>>,
    out: &mut W,
) -> Result<()> {
    match command {
        Commands::Distances {
            input,
            source,
            metric,
            min_timing,
            engine,
        } => {
            let network = open(&input)?;
            let metric = metric.unwrap_or(prefs.metric);
            let min_timing = min_timing.as_deref().map(parse_timing).transpose()?;
            let engine = engine.unwrap_or_else(|| prefs.engine.into());
            distances(&network, &source, metric, min_timing, engine, out)
        }
        Commands::Fuzz { runs, seed } => {
            let runs = runs.unwrap_or(prefs.fuzz_runs);
            let seed = seed.unwrap_or_else(rand::random);
            info!(runs, seed, "starting fuzz drill");
            let report = fuzz::drill(runs, seed)?;
            emit(out, &report)?;
            if !report.mismatches.is_empty() {
                bail!(
                    "engines disagreed in {} of {} checks (seed {seed})",
                    report.mismatches.len(),
                    u64::from(runs) * Metric::ALL.len() as u64
                );
            }
            Ok(())
        }
        Commands::Stats { input } => {
            let network = open(&input)?;
            emit(out, &StatsReport::new(&network))
        }
        Commands::Prefs {
            metric,
            engine,
            log_filter,
            fuzz_runs,
            reset,
        } => {
            let mut next = if reset { CliPrefs::default() } else { prefs.clone() };
            if let Some(metric) = metric {
                next.metric = metric;
            }
            if let Some(engine) = engine {
                next.engine = engine;
            }
            if let Some(filter) = log_filter {
                next.log_filter = filter;
            }
            if let Some(runs) = fuzz_runs {
                next.fuzz_runs = runs;
            }
            if next != *prefs {
                let Some(service) = service else {
                    bail!("no preferences directory available; pass --config-dir");
                };
                service.save(&next).context("failed to save preferences")?;
                info!("preferences saved");
            }
            emit(out, &next)
        }
    }
}

fn distances<W: Write>(
    network: &CommunicationNetwork,
    source: &str,
    metric: Metric,
    min_timing: Option<Timestamp>,
    engine: EngineChoice,
    out: &mut W,
) -> Result<()> {
    let source_id = source.to_owned();
    let (mapping, label) = match engine {
        EngineChoice::Vertex | EngineChoice::Hyperedge => {
            let single = if engine == EngineChoice::Vertex {
                SearchEngine::Vertex
            } else {
                SearchEngine::Hyperedge
            };
            (
                single.run(network, &source_id, metric, min_timing)?,
                single.name(),
            )
        }
        EngineChoice::Both => {
            let by_vertex = SearchEngine::Vertex.run(network, &source_id, metric, min_timing)?;
            let by_hyperedge =
                SearchEngine::Hyperedge.run(network, &source_id, metric, min_timing)?;
            if by_vertex != by_hyperedge {
                bail!(
                    "engines disagree from {source} under {metric}: vertex reached {}, hyperedge reached {}",
                    by_vertex.len(),
                    by_hyperedge.len()
                );
            }
            (by_vertex, "both")
        }
    };
    emit(
        out,
        &DistanceReport::new(network, source, metric, label, min_timing, &mapping),
    )
}

fn open(input: &Path) -> Result<CommunicationNetwork> {
    load_network(input).with_context(|| format!("failed to load {}", input.display()))
}

/// An integer is a tick; anything else must be an ISO-8601 date-time.
pub fn parse_timing(text: &str) -> Result<Timestamp> {
    if let Ok(tick) = text.trim().parse::<i64>() {
        return Ok(Timestamp::Tick(tick));
    }
    let at = parse_datetime(text)
        .with_context(|| format!("min timing {text:?} is neither a tick nor a date-time"))?;
    Ok(Timestamp::DateTime(at))
}

fn emit<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
