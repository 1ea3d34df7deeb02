//! Gomoku search engine command line
//!
//! `gomoku worker` speaks the JSON-lines worker protocol on stdin/stdout;
//! `gomoku analyze` answers a single position from a file.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gomoku::protocol::{Event, Request};
use gomoku::worker::Worker;
use gomoku::{BoardState, EngineConfig, GameSearchEngine, Stone};

#[derive(Parser, Debug)]
#[command(name = "gomoku", version, about = "Gomoku negamax search engine")]
struct Cli {
    /// Engine config file (TOML); defaults to ./gomoku.toml when present
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Override the search depth in plies
    #[arg(long, global = true)]
    depth: Option<u8>,
    /// Seed for randomized move choice
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve worker requests, one JSON object per line
    Worker,
    /// Recommend a move for a stored position
    Analyze {
        /// JSON file of the form {"black": [[r, c], ...], "white": [[r, c], ...]}
        #[arg(short, long, value_name = "FILE")]
        position: PathBuf,
        /// Side to move
        #[arg(short, long, value_enum)]
        side: Side,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Stone {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Stone::Black,
            Side::White => Stone::White,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    match cli.cmd {
        Command::Worker => run_worker(config),
        Command::Analyze { position, side } => analyze(config, &position, side.into()),
    }
}

fn resolve_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::load_or_default(),
    };
    if let Some(depth) = cli.depth {
        config.max_depth = depth;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate()?;
    Ok(config)
}

fn write_event(event: &Event) {
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{}", event.to_json());
    let _ = out.flush();
}

fn run_worker(config: EngineConfig) -> Result<()> {
    let mut worker = Worker::spawn().context("starting worker thread")?;
    let requests = worker.requester();

    let reader = thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            match Request::from_json(&line) {
                Ok(mut request) => {
                    // command line settings apply unless init brings its own
                    if let Request::Init { config: slot, .. } = &mut request {
                        if slot.is_none() {
                            *slot = Some(config.clone());
                        }
                    }
                    let last = request == Request::Shutdown;
                    if requests.send(request).is_err() || last {
                        return;
                    }
                }
                Err(err) => write_event(&Event::error(err)),
            }
        }
        let _ = requests.send(Request::Shutdown);
    });

    for event in worker.events() {
        write_event(&event);
    }
    worker.join();
    if reader.join().is_err() {
        anyhow::bail!("stdin reader panicked");
    }
    Ok(())
}

fn analyze(config: EngineConfig, path: &Path, side: Stone) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let state: BoardState =
        serde_json::from_str(&text).with_context(|| format!("parsing position in {}", path.display()))?;

    let engine = GameSearchEngine::with_config(config);
    let best = engine.find_best_move(&state, side)?;
    let probability = engine.evaluate_win_probability(&state, side)?;
    let evaluation = engine.evaluate_position(&state, side)?;

    let report = serde_json::json!({
        "side": side,
        "move": best,
        "evaluation": evaluation,
        "probability": probability,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
