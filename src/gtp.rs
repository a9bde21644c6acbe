//! Go Text Protocol (GTP) front-end.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements GTP version 2 over the rules engine so lessons can
//! be scripted from a terminal or played from a GUI such as Sabaki or GoGui.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`, `list_commands`,
//!   `known_command <cmd>`, `quit`
//! - `boardsize <size>` - Set board size (3 to 19) and clear the board
//! - `clear_board` - Reset the board to empty
//! - `komi <value>` - Accepted and ignored (no scoring)
//! - `play <color> <vertex>` - Play a move (`pass` allowed)
//! - `genmove <color>` - Let the bot play for the given color
//! - `undo` - Take back the last move
//! - `showboard` - Print the board
//!
//! Tutorial extensions:
//!
//! - `liberties <vertex>` / `group <vertex>` - Liberties or stones of a group
//! - `atari <color>` - Groups of that color with one liberty, one per line
//! - `explain <color> <vertex>` - Classify a candidate move
//! - `hint` - Suggest a move for the side to play
//! - `captures` - Capture totals and the result, if decided
//!
//! ## Example
//!
//! ```ignore
//! use go_tutor::gtp::GtpEngine;
//! let mut engine = GtpEngine::new(RuleSet::default(), Bot::new(Personality::Tutor));
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::analysis::{explain_move, find_groups_in_atari};
use crate::board::{Color, Point};
use crate::bot::Bot;
use crate::position::GameState;
use crate::rules::RuleSet;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "atari",
    "boardsize",
    "captures",
    "clear_board",
    "explain",
    "genmove",
    "group",
    "hint",
    "known_command",
    "komi",
    "liberties",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    /// Every position of the current game; the last one is current
    history: Vec<GameState>,
    rules: RuleSet,
    bot: Bot,
}

impl GtpEngine {
    pub fn new(rules: RuleSet, bot: Bot) -> Self {
        Self {
            history: vec![GameState::new(rules)],
            rules,
            bot,
        }
    }

    pub fn state(&self) -> &GameState {
        // history is never empty: undo keeps the first position
        &self.history[self.history.len() - 1]
    }

    fn push(&mut self, state: GameState) {
        self.history.push(state);
    }

    fn reset(&mut self) {
        self.history = vec![GameState::new(self.rules)];
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            if !success {
                warn!(%command, %message, "command failed");
            }
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a GTP command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(%command, ?args, "gtp command");
        match command {
            "name" => (true, "go-tutor".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(size) = arg.parse::<usize>() else {
                    return (false, "invalid size".to_string());
                };
                match RuleSet::new(size, self.rules.mode()) {
                    Ok(rules) => {
                        self.rules = rules;
                        self.reset();
                        (true, String::new())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "clear_board" => {
                self.reset();
                (true, String::new())
            }

            "komi" => match args.first().map(|a| a.parse::<f32>()) {
                Some(Ok(_)) => (true, String::new()),
                Some(Err(_)) => (false, "invalid komi".to_string()),
                None => (false, "missing argument".to_string()),
            },

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let Ok(color) = color.parse::<Color>() else {
                    return (false, "invalid color".to_string());
                };
                if vertex.eq_ignore_ascii_case("pass") {
                    return self.pass(color);
                }
                let Ok(p) = vertex.parse::<Point>() else {
                    return (false, "invalid vertex".to_string());
                };
                match self.state().apply_move(p, color) {
                    Ok(outcome) => {
                        self.push(outcome.state);
                        (true, String::new())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "genmove" => {
                let Some(Ok(color)) = args.first().map(|a| a.parse::<Color>()) else {
                    return (false, "invalid color".to_string());
                };
                let state = self.state().clone();
                match self.bot.choose_move_for(&state, color) {
                    Some(p) => match state.apply_move(p, color) {
                        Ok(outcome) => {
                            self.push(outcome.state);
                            (true, p.to_string())
                        }
                        Err(err) => (false, err.to_string()),
                    },
                    None => match self.pass(color) {
                        (true, _) => (true, "pass".to_string()),
                        failed => failed,
                    },
                }
            }

            "undo" => {
                if self.history.len() < 2 {
                    return (false, "cannot undo".to_string());
                }
                self.history.pop();
                (true, String::new())
            }

            "showboard" => {
                let state = self.state();
                (true, format!("\n{}", state.board()))
            }

            "liberties" | "group" => {
                let Some(Ok(p)) = args.first().map(|a| a.parse::<Point>()) else {
                    return (false, "invalid vertex".to_string());
                };
                let board = self.state().board();
                let points = if command == "liberties" {
                    board.liberties(p)
                } else {
                    board.group(p)
                };
                (true, join_points(points))
            }

            "atari" => {
                let Some(Ok(color)) = args.first().map(|a| a.parse::<Color>()) else {
                    return (false, "invalid color".to_string());
                };
                let lines: Vec<String> = find_groups_in_atari(self.state().board(), color)
                    .into_iter()
                    .map(|g| join_points(g.stones))
                    .collect();
                (true, lines.join("\n"))
            }

            "explain" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let (Ok(color), Ok(p)) = (color.parse::<Color>(), vertex.parse::<Point>()) else {
                    return (false, "invalid arguments".to_string());
                };
                (true, explain_move(self.state(), p, color).to_string())
            }

            "hint" => {
                let state = self.state().clone();
                (true, self.bot.hint(&state).to_string())
            }

            "captures" => {
                let state = self.state();
                let caps = state.captures();
                let mut msg = format!(
                    "black {} white {}",
                    caps.get(Color::Black),
                    caps.get(Color::White)
                );
                if let Some(result) = state.result() {
                    msg.push_str(&format!(" {result}"));
                }
                (true, msg)
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn pass(&mut self, color: Color) -> (bool, String) {
        match self.state().pass_for(color) {
            Ok(next) => {
                self.push(next);
                (true, String::new())
            }
            Err(err) => (false, err.to_string()),
        }
    }
}

fn join_points(points: impl IntoIterator<Item = Point>) -> String {
    points
        .into_iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
