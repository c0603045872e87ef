//! Chessboard - play moves, list legal moves and run perft from the shell.

use anyhow::{bail, Context};
use chessboard_core::Square;
use chessboard_engine::movegen::perft::perft_divide;
use chessboard_engine::{Game, GameSettings};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chessboard")]
#[command(about = "Chess rules engine driver")]
struct Cli {
    /// Settings file (defaults to chessboard.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a sequence of UCI moves and print the result
    Play {
        /// Starting position in FEN (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,
        /// Moves in UCI notation, e.g. e2e4 e7e5
        moves: Vec<String>,
    },
    /// List the legal moves of the piece on a square
    Moves {
        /// Square name, e.g. e2
        square: String,
        /// Position in FEN (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Search depth in plies
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        depth: u32,
        /// Position in FEN (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => GameSettings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => GameSettings::load().context("loading chessboard.toml")?,
    };
    tracing::debug!(?settings, "settings loaded");

    match cli.command {
        Commands::Play { fen, moves } => play(settings, fen.as_deref(), &moves),
        Commands::Moves { square, fen } => list_moves(settings, fen.as_deref(), &square),
        Commands::Perft { depth, fen } => run_perft(settings, fen.as_deref(), depth),
    }
}

fn open_game(settings: GameSettings, fen: Option<&str>) -> anyhow::Result<Game> {
    match fen {
        Some(fen) => Game::from_fen_with_settings(fen, settings)
            .with_context(|| format!("cannot start from FEN {:?}", fen)),
        None => Ok(Game::with_settings(settings)),
    }
}

fn play(settings: GameSettings, fen: Option<&str>, moves: &[String]) -> anyhow::Result<()> {
    let mut game = open_game(settings, fen)?;
    for (ply, uci) in moves.iter().enumerate() {
        game.apply_uci(uci)
            .with_context(|| format!("move {} ({})", ply + 1, uci))?;
    }

    println!("{}", game.board());
    println!("FEN:    {}", game.to_fen());
    println!("Status: {}", game.status());
    for color in chessboard_core::Color::BOTH {
        let lost = game.player(color).lost();
        if !lost.is_empty() {
            let names: Vec<String> = lost.iter().map(|p| p.kind.to_string()).collect();
            println!("{} lost: {}", color, names.join(", "));
        }
    }
    Ok(())
}

fn list_moves(settings: GameSettings, fen: Option<&str>, square: &str) -> anyhow::Result<()> {
    let game = open_game(settings, fen)?;
    let Some(from) = Square::from_algebraic(square) else {
        bail!("invalid square: {}", square);
    };

    let mut moves: Vec<String> = game.legal_moves(from).iter().map(|m| m.to_uci()).collect();
    moves.sort();
    if moves.is_empty() {
        println!("No legal moves from {}", from);
    } else {
        println!("{}", moves.join(" "));
    }
    Ok(())
}

fn run_perft(settings: GameSettings, fen: Option<&str>, depth: u32) -> anyhow::Result<()> {
    let game = open_game(settings, fen)?;

    let results = perft_divide(game.position(), depth);
    let mut total = 0u64;
    for (mv, nodes) in &results {
        println!("{}: {}", mv, nodes);
        total += nodes;
    }
    println!();
    println!("Nodes searched: {}", total);
    Ok(())
}
