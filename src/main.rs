//! Go-Tutor: terminal front-end for the tutorial rules engine.
//!
//! ## Usage
//!
//! - `go-tutor` - Show a demo
//! - `go-tutor gtp` - Start GTP server for GUI integration
//! - `go-tutor demo` - Walk through captures, ko and a capture-go game

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use go_tutor::board::{Color, Point};
use go_tutor::bot::{Bot, Personality};
use go_tutor::gtp::GtpEngine;
use go_tutor::position::GameState;
use go_tutor::rules::{GameMode, RuleSet};

/// Go-Tutor: rules engine for an interactive Go tutorial
#[derive(Parser)]
#[command(name = "go-tutor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp {
        /// Board size (3 to 19)
        #[arg(long, default_value_t = go_tutor::constants::DEFAULT_BOARD_SIZE)]
        size: usize,
        /// Game mode: standard, first-capture, most-captures or race:N
        #[arg(long, default_value = "standard")]
        mode: GameMode,
        /// Bot personality used by genmove and hint
        #[arg(long, value_enum, default_value_t = BotKind::Tutor)]
        bot: BotKind,
        /// Seed for the bot's random choices
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a simple demo of the engine
    Demo {
        /// Seed for the bot's random choices
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum BotKind {
    Tutor,
    CaptureGo,
}

impl From<BotKind> for Personality {
    fn from(kind: BotKind) -> Self {
        match kind {
            BotKind::Tutor => Personality::Tutor,
            BotKind::CaptureGo => Personality::CaptureGo,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to GTP.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp {
            size,
            mode,
            bot,
            seed,
        }) => {
            let rules = RuleSet::new(size, mode).context("invalid rules")?;
            let bot = match seed {
                Some(seed) => Bot::with_seed(bot.into(), seed),
                None => Bot::new(bot.into()),
            };
            let mut engine = GtpEngine::new(rules, bot);
            engine.run().context("GTP session failed")?;
        }
        Some(Commands::Demo { seed }) => run_demo(seed)?,
        None => run_demo(42)?,
    }
    Ok(())
}

fn run_demo(seed: u64) -> Result<()> {
    println!("Go-Tutor: rules engine demo\n");

    // Demo 1: single-stone capture
    println!("=== Capture ===");
    let mut state = GameState::default().apply_move(vertex("E5")?, Color::White)?.state;
    for v in ["D5", "F5", "E4", "E6"] {
        let outcome = state.apply_move(vertex(v)?, Color::Black)?;
        if !outcome.captured.is_empty() {
            println!("Black {v} captures {:?}", outcome.captured);
        }
        state = outcome.state;
    }
    println!("{}", state.board());

    // Demo 2: ko
    println!("=== Ko ===");
    let stones = [
        ("B5", Color::Black),
        ("C6", Color::Black),
        ("C4", Color::Black),
        ("C5", Color::White),
        ("D6", Color::White),
        ("D4", Color::White),
        ("E5", Color::White),
    ]
    .into_iter()
    .map(|(v, c)| vertex(v).map(|p| (p, c)))
    .collect::<Result<Vec<_>>>()?;
    let state = GameState::from_layout(RuleSet::default(), stones, Color::Black)?;
    let state = state.play(vertex("D5")?)?.state;
    println!("{}", state.board());
    match state.play(vertex("C5")?) {
        Ok(_) => println!("White retakes at C5"),
        Err(err) => println!("White C5: {err}"),
    }

    // Demo 3: capture go between two bots
    println!("\n=== Capture Go (5x5) ===");
    let rules = RuleSet::new(5, GameMode::FirstCapture)?;
    let mut black = Bot::with_seed(Personality::CaptureGo, seed);
    let mut white = Bot::with_seed(Personality::Tutor, seed.wrapping_add(1));
    let mut state = GameState::new(rules);
    let mut passes = 0;
    while !state.is_over() && passes < 2 {
        let bot = match state.to_play() {
            Color::Black => &mut black,
            Color::White => &mut white,
        };
        state = match bot.choose_move(&state) {
            Some(p) => {
                passes = 0;
                state.play(p)?.state
            }
            None => {
                passes += 1;
                state.pass()?
            }
        };
    }
    println!("{}", state.board());
    match state.result() {
        Some(result) => println!("Game over, {result} after {} moves", state.move_number()),
        None => println!("No capture after {} moves", state.move_number()),
    }
    Ok(())
}

fn vertex(s: &str) -> Result<Point> {
    s.parse().with_context(|| format!("bad vertex {s}"))
}
