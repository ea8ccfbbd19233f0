mod utils;

use crate::utils::*;

use anyhow::{Context, Result, bail};
use clap::Parser;
use klondike_common::{
    action::{Action, format_actions},
    board::{Board, Difficulty},
};
use klondike_solver::{DEFAULT_MAX_ITERATIONS, SolverConfig, StockKeying, generate_moves};
use tracing::info;

use std::{
    io::{IsTerminal, Read, stdin},
    path::PathBuf,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Deal from this seed instead of a random one
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,
    /// Cards drawn per turn (1 or 3), 1 for new deals
    #[arg(short, long, value_name = "NUM")]
    draw: Option<usize>,
    /// Search iterations before giving up with UNKNOWN
    #[arg(short = 'i', long, default_value_t = DEFAULT_MAX_ITERATIONS, value_name = "NUM")]
    max_iterations: usize,
    /// Check this many consecutive seeds
    #[arg(short = 'n', long, default_value_t = 1, value_name = "NUM")]
    count: u64,
    /// Key visited positions on full stock order
    #[arg(long)]
    exact_stock: bool,
    /// Preview the game state and its legal moves without solving
    #[arg(short, long)]
    preview: bool,
    /// Path to a game state file to check
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let Cli {
        seed,
        draw,
        max_iterations,
        count,
        exact_stock,
        preview,
        file,
    } = Cli::parse();

    if let Some(draw_count) = draw
        && Difficulty::from_draw_count(draw_count).is_none()
    {
        bail!("Draw count must be 1 or 3.");
    }
    let difficulty = draw.and_then(Difficulty::from_draw_count);
    let config = SolverConfig {
        max_iterations,
        stock_keying: if exact_stock {
            StockKeying::Contents
        } else {
            StockKeying::Length
        },
    };

    if count > 1 {
        if file.is_some() {
            bail!("`--count` only applies to dealt games.");
        }
        let first_seed = seed.unwrap_or_else(rand::random);
        return do_survey(first_seed, count, difficulty.unwrap_or_default(), config);
    }

    let mut board = if let Some(file) = file {
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        Board::parse(&content).context("Failed to parse board")?
    } else if let Some(seed) = seed {
        Board::new_from_seed(seed, difficulty.unwrap_or_default())
    } else if !stdin().is_terminal() {
        let mut content = String::new();
        stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        Board::parse(&content).context("Failed to parse board")?
    } else {
        let seed = rand::random();
        info!(seed, "dealing a random game");
        println!("Seed: {seed}");
        Board::new_from_seed(seed, difficulty.unwrap_or_default())
    };
    if let Some(difficulty) = difficulty {
        board.difficulty = difficulty;
    }
    board.validate().context("Invalid board")?;

    if preview {
        println!("{}\n", board.pretty_print());
        let actions: Vec<Action> = generate_moves(&board).iter().map(|c| c.action).collect();
        print!("{}", format_actions(&actions));
        return Ok(());
    }
    do_check(board, config)?;

    Ok(())
}
