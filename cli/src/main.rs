// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sente CLI - replay and play out Go games from the command line
//!
//! Moves are given as protocol-style coordinates (`D4`, `pass`, `resign`)
//! and played for whichever color is to move. A random player can finish
//! the game, after which the board and result are printed.

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sente_core::{GameConfig, GoGame, Move, MoveGenerator, Rules, Stone, Vertex};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "sente", about = "Go rules engine command-line interface", version)]
struct Args {
    /// Board size (9, 13, or 19)
    #[arg(short, long)]
    size: Option<u32>,

    /// Ruleset: chinese, japanese, korean, tromp-taylor
    #[arg(short, long)]
    rules: Option<String>,

    /// Komi (defaults to the ruleset's value)
    #[arg(short, long)]
    komi: Option<f64>,

    /// Number of standard handicap stones
    #[arg(long)]
    handicap: Option<u32>,

    /// JSON game config; other flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Let a random player make up to this many more moves
    #[arg(long)]
    random: Option<usize>,

    /// Seed for the random player
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Print the final state as JSON instead of a board
    #[arg(long)]
    json: bool,

    /// Moves to play, e.g. D4 Q16 pass
    moves: Vec<String>,
}

/// Picks uniformly among the legal stone placements; passes when there are none
struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl MoveGenerator for RandomPlayer {
    fn generate(&mut self, game: &GoGame, color: Stone) -> Move {
        let stones: Vec<Move> = game
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.vertex().is_some())
            .collect();
        stones
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Move::Pass(color))
    }
}

fn init_logging(debug: bool) {
    // --debug wins over RUST_LOG
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Merge the config file (if any) with the command-line flags
fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(size) = args.size {
        config.board_size = size;
    }
    if let Some(rules) = &args.rules {
        config.rules = Rules::from_name(rules);
    }
    if let Some(komi) = args.komi {
        config.komi = Some(komi);
    }
    if let Some(stones) = args.handicap {
        config = config
            .with_standard_handicap(stones)
            .context("Invalid handicap")?;
    }

    Ok(config)
}

/// Parse a move for `color` from a string like "D4", "pass" or "resign"
fn parse_move(input: &str, color: Stone, side: u8) -> Result<Move> {
    match input.trim().to_lowercase().as_str() {
        "pass" => Ok(Move::Pass(color)),
        "resign" => Ok(Move::Resign(color)),
        _ => {
            let vertex = Vertex::from_gtp(input, side)
                .context("Invalid move format. Examples: 'D4', 'pass', 'resign'.")?;
            Ok(Move::Place {
                vertex,
                stone: color,
            })
        }
    }
}

/// Protocol-style text for a move
fn format_move(mv: Move, side: u8) -> String {
    match mv {
        Move::Place { vertex, .. } => vertex.to_gtp(side),
        Move::Pass(_) => "pass".to_string(),
        Move::Resign(_) => "resign".to_string(),
    }
}

fn play_moves(game: &mut GoGame, moves: &[String]) -> Result<()> {
    for (number, text) in moves.iter().enumerate() {
        let mv = parse_move(text, game.active_player(), game.side())?;
        game.play_stone(mv)
            .with_context(|| format!("Move {} ({}) was rejected", number + 1, text))?;
        debug!("Played {}", mv);
        if mv.is_resign() {
            break;
        }
    }
    Ok(())
}

fn play_random(game: &mut GoGame, plies: usize, seed: Option<u64>) -> Result<()> {
    let mut player = RandomPlayer::new(seed);
    for _ in 0..plies {
        if game.is_over() {
            break;
        }
        game.gen_move(&mut player)
            .context("Random player made an illegal move")?;
    }
    info!("Random play stopped at move {}", game.move_number());
    Ok(())
}

fn print_json(game: &GoGame) -> Result<()> {
    let side = game.side();
    let moves: Vec<String> = game
        .get_move_sequence()
        .into_iter()
        .map(|mv| format_move(mv, side))
        .collect();
    let result = game.results().ok();

    let summary = serde_json::json!({
        "size": side,
        "rules": game.rules().to_string(),
        "komi": game.komi(),
        "to_move": game.active_player().to_string(),
        "moves": moves,
        "captured": {
            "black": game.prisoners(Stone::Black),
            "white": game.prisoners(Stone::White),
        },
        "result": result.as_ref().map(ToString::to_string),
        "score": result,
    });
    let text = serde_json::to_string_pretty(&summary).context("Failed to serialize game")?;
    println!("{}", text);
    Ok(())
}

/// Print the current game state
fn print_game_state(game: &GoGame) {
    println!(
        "\nBoard size: {}x{}  Rules: {}  Komi: {}",
        game.side(),
        game.side(),
        game.rules(),
        game.komi()
    );
    println!("Moves: {}", game.move_number());
    println!(
        "Captured: black {} - white {}",
        game.prisoners(Stone::Black),
        game.prisoners(Stone::White)
    );

    println!("\n{}", render::render_board(game));

    match game.results() {
        Ok(result) => println!("Result: {}", result),
        Err(_) => println!("{} to move", game.active_player()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = load_config(&args)?;
    let mut game = config.build().context("Failed to start game")?;

    play_moves(&mut game, &args.moves)?;
    if let Some(plies) = args.random {
        play_random(&mut game, plies, args.seed)?;
    }

    if args.json {
        print_json(&game)?;
    } else {
        print_game_state(&game);
    }

    Ok(())
}
