mod logger;
mod utils;

use crate::utils::*;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::info;
use taquin_common::board::Board;
use taquin_solver::{HeuristicKind, Solver};

use std::{
    io::{IsTerminal, Read, stdin},
    path::PathBuf,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Heuristic used to order the search
    #[arg(short = 'H', long, value_enum, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,
    /// Max states to expand before giving up (unbounded by default)
    #[arg(short = 's', long, value_name = "NUM")]
    max_states: Option<usize>,
    /// Skip the parity check and search until the frontier is exhausted
    #[arg(long)]
    exhaustive: bool,
    /// Scramble the goal with this many random moves instead of reading a board
    #[arg(long, value_name = "STEPS")]
    scramble: Option<usize>,
    /// Seed for `--scramble`
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    seed: u64,
    /// Preview initial board without solving
    #[arg(short, long)]
    preview: bool,
    /// Print every board along the solution
    #[arg(short, long)]
    boards: bool,
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Path to a board file: 16 tiles, 0 or `.` for the blank
    file: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Heuristic {
    Misplaced,
    Manhattan,
    LinearConflict,
}

impl From<Heuristic> for HeuristicKind {
    fn from(value: Heuristic) -> Self {
        match value {
            Heuristic::Misplaced => HeuristicKind::Misplaced,
            Heuristic::Manhattan => HeuristicKind::Manhattan,
            Heuristic::LinearConflict => HeuristicKind::LinearConflict,
        }
    }
}

fn main() -> Result<()> {
    let Cli {
        heuristic,
        max_states,
        exhaustive,
        scramble,
        seed,
        preview,
        boards,
        verbose,
        file,
    } = Cli::parse();

    logger::init(verbose)?;

    let board = if let Some(file) = file {
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read '{}'", file.display()))?;
        info!("loaded board from {}", file.display());
        Board::parse(&content).context("Failed to parse board")?
    } else if let Some(steps) = scramble {
        info!("scrambling the goal with {steps} moves, seed {seed}");
        Board::new_from_seed(seed, steps)
    } else if !stdin().is_terminal() {
        let mut content = String::new();
        stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        Board::parse(&content).context("Failed to parse board")?
    } else {
        bail!("No board `file` or `--scramble` provided.");
    };
    if preview {
        println!("{board}");
        return Ok(());
    }

    let heuristic = HeuristicKind::from(heuristic);
    info!("solving with {heuristic}, parity check {}", !exhaustive);
    let solver = Solver::new(heuristic.function())
        .max_states(max_states)
        .check_solvable(!exhaustive);
    do_solve(&solver, heuristic, board, boards)
}
