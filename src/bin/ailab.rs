//! ailab CLI - Classic AI search exercises from the terminal
//!
//! - Solve the 8-puzzle with A* or greedy best-first search
//! - Place N queens by tree search, enumeration or local search
//! - Play tic-tac-toe against a negamax agent

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "ailab")]
#[command(version, about = "Search and game-playing exercises", long_about = None)]
struct Cli {
    /// Log search progress at debug level
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the 8-puzzle
    Puzzle(ailab::cli::commands::puzzle::PuzzleArgs),

    /// Solve the N-queens problem
    Queens(ailab::cli::commands::queens::QueensArgs),

    /// Play tic-tac-toe
    Tictactoe(ailab::cli::commands::tictactoe::TictactoeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match cli.command {
        Commands::Puzzle(args) => ailab::cli::commands::puzzle::execute(args),
        Commands::Queens(args) => ailab::cli::commands::queens::execute(args),
        Commands::Tictactoe(args) => ailab::cli::commands::tictactoe::execute(args),
    }
}
