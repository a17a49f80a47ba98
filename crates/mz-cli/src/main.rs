//! mazefog: explore a generated maze over stdin/stdout
//!
//! Prints a start record and the initial reveal, then reads one command per
//! line. Every reply is a single JSON line; logs go to stderr.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use mz_core::wire::{DescribeResponse, ErrorResponse, MoveRequest, StartResponse};
use mz_core::{GameSession, MazeConfig};

/// Fog-of-war maze explorer
#[derive(Parser, Debug)]
#[command(name = "mazefog")]
#[command(author, version, about = "Explore a generated maze one move at a time", long_about = None)]
struct Args {
    /// Maze width in cells
    #[arg(short = 'W', long = "width")]
    width: Option<usize>,

    /// Maze height in cells
    #[arg(short = 'H', long = "height")]
    height: Option<usize>,

    /// Random region seeds to attempt
    #[arg(short = 'n', long = "seeds")]
    seeds: Option<usize>,

    /// RNG seed for a reproducible maze
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// TOML file with maze settings
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    /// Settings from the config file, if any, with flags applied on top
    fn maze_config(&self) -> Result<MazeConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => MazeConfig::default(),
        };
        self.overlay(&mut config);
        Ok(config)
    }

    fn overlay(&self, config: &mut MazeConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seeds) = self.seeds {
            config.seed_count = Some(seeds);
        }
        if let Some(seed) = self.seed {
            config.rng_seed = Some(seed);
        }
    }
}

/// One line of input
#[derive(Debug, PartialEq)]
enum Command {
    Move(MoveRequest),
    Describe,
    Quit,
}

impl Command {
    fn parse(line: &str) -> serde_json::Result<Self> {
        match line.trim() {
            "describe" => Ok(Command::Describe),
            "quit" => Ok(Command::Quit),
            other => serde_json::from_str(other).map(Command::Move),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "info,mz_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = args.maze_config()?;
    config.validate()?;
    let session = GameSession::new(&config).context("starting a new game")?;
    info!(width = config.width, height = config.height, "maze ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(session, stdin.lock(), stdout.lock())
}

/// Drive `session` from `input` until `quit` or end of input
fn run(mut session: GameSession, input: impl BufRead, mut out: impl Write) -> Result<()> {
    emit(&mut out, &StartResponse::from(&session))?;
    describe(&mut session, &mut out)?;

    for line in input.lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Describe) => describe(&mut session, &mut out)?,
            Ok(Command::Move(request)) => match session.move_to(request.position) {
                Ok(step) => {
                    debug!(?step, "move accepted");
                    describe(&mut session, &mut out)?;
                }
                Err(e) => {
                    warn!(position = %request.position, error = %e, "move rejected");
                    emit(&mut out, &ErrorResponse::new("Move failed", &e))?;
                }
            },
            Err(e) => {
                let response = ErrorResponse {
                    error: format!("Invalid command: {e}"),
                };
                emit(&mut out, &response)?;
            }
        }
    }

    Ok(())
}

fn describe(session: &mut GameSession, out: &mut impl Write) -> Result<()> {
    let reveal = session.describe()?;
    emit(out, &DescribeResponse::new(&reveal, session.player()))
}

fn emit(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mz_core::{Grid, Position};

    fn session() -> GameSession {
        let grid = Grid::from_rows(vec![vec![0, 0], vec![2, 1], vec![1, 1]]).unwrap();
        GameSession::from_grid(grid, Position::ORIGIN).unwrap()
    }

    fn replies(input: &str) -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        run(session(), input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
        assert_eq!(Command::parse("  describe ").unwrap(), Command::Describe);
        assert_eq!(
            Command::parse(r#"{"position":{"x":1,"y":0}}"#).unwrap(),
            Command::Move(MoveRequest {
                position: Position::new(1, 0)
            })
        );
        assert!(Command::parse("north").is_err());
    }

    #[test]
    fn test_overlay_flags_win() {
        let args = Args::parse_from(["mazefog", "--width", "30", "--seed", "9"]);
        let mut config = MazeConfig::with_size(50, 50);
        args.overlay(&mut config);
        assert_eq!(config.width, 30);
        assert_eq!(config.height, 50);
        assert_eq!(config.rng_seed, Some(9));
        assert_eq!(config.seed_count, None);
    }

    #[test]
    fn test_partial_toml_config() {
        let config: MazeConfig = toml::from_str("width = 32\nrng_seed = 4\n").unwrap();
        assert_eq!(config.width, 32);
        assert_eq!(config.height, 40);
        assert_eq!(config.rng_seed, Some(4));
        assert_eq!(config.wall_thickness, 4);
    }

    #[test]
    fn test_start_then_initial_reveal() {
        let out = replies("quit\n");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["cols"], 3);
        assert_eq!(out[0]["rows"], 2);
        assert_eq!(out[1]["positions"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_move_through_door() {
        let out = replies("{\"position\":{\"x\":1,\"y\":0}}\ndescribe\n");
        assert_eq!(out.len(), 4);
        assert_eq!(out[2]["player"], serde_json::json!({"x": 1, "y": 1}));
        assert_eq!(out[3]["positions"], serde_json::json!([]));
    }

    #[test]
    fn test_rejected_move_reports_error() {
        let out = replies("{\"position\":{\"x\":9,\"y\":9}}\nwat\n");
        assert_eq!(out[2]["error"], "Move failed: (9, 9) is not on the map");
        assert!(
            out[3]["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid command")
        );
    }
}
