//! Rule configuration: board size and game mode.
//!
//! Standard Go and the capture-go variants share one engine; the mode only
//! decides when a game is over and how it ended.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::Color;
use crate::constants::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::position::Captures;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unacceptable size {0}, expected {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}")]
    BoardSize(usize),
    #[error("capture race target must be at least 1")]
    RaceTarget,
    #[error("unknown game mode: {0}")]
    Mode(String),
}

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    Win(Color),
    Draw,
}

impl GameResult {
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::Win(c) => Some(c),
            GameResult::Draw => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win(c) => write!(f, "winner {c}"),
            GameResult::Draw => write!(f, "draw"),
        }
    }
}

/// How a game is decided.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GameMode {
    /// Normal Go: captures accumulate, the engine never declares a winner.
    #[default]
    Standard,
    /// Capture go: the first capture wins.
    FirstCapture,
    /// The first color to capture this many stones wins.
    CaptureRace(u32),
    /// Play until the side to move has no legal point; most captures wins.
    MostCaptures,
}

impl GameMode {
    /// Result as soon as the running capture totals decide the game.
    pub fn decided(self, captures: &Captures) -> Option<GameResult> {
        let target = match self {
            GameMode::Standard | GameMode::MostCaptures => return None,
            GameMode::FirstCapture => 1,
            GameMode::CaptureRace(n) => n,
        };
        [Color::Black, Color::White]
            .into_iter()
            .find(|&c| captures.get(c) >= target)
            .map(GameResult::Win)
    }

    /// Result when the side to move has nowhere left to play, for modes that
    /// end that way.
    pub fn exhausted(self, captures: &Captures) -> Option<GameResult> {
        if self != GameMode::MostCaptures {
            return None;
        }
        let (black, white) = (captures.get(Color::Black), captures.get(Color::White));
        Some(match black.cmp(&white) {
            Ordering::Greater => GameResult::Win(Color::Black),
            Ordering::Less => GameResult::Win(Color::White),
            Ordering::Equal => GameResult::Draw,
        })
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Standard => write!(f, "standard"),
            GameMode::FirstCapture => write!(f, "first-capture"),
            GameMode::CaptureRace(n) => write!(f, "race:{n}"),
            GameMode::MostCaptures => write!(f, "most-captures"),
        }
    }
}

impl FromStr for GameMode {
    type Err = ConfigError;

    /// Accepts `standard`, `first-capture`, `most-captures` and `race:N`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(GameMode::Standard),
            "first-capture" | "atari" => Ok(GameMode::FirstCapture),
            "most-captures" => Ok(GameMode::MostCaptures),
            other => {
                let n = other
                    .strip_prefix("race:")
                    .ok_or_else(|| ConfigError::Mode(s.to_string()))?
                    .parse::<u32>()
                    .map_err(|_| ConfigError::Mode(s.to_string()))?;
                if n == 0 {
                    return Err(ConfigError::RaceTarget);
                }
                Ok(GameMode::CaptureRace(n))
            }
        }
    }
}

/// Board size plus game mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RuleSet {
    board_size: usize,
    mode: GameMode,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            mode: GameMode::Standard,
        }
    }
}

impl RuleSet {
    pub fn new(board_size: usize, mode: GameMode) -> Result<Self, ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
            return Err(ConfigError::BoardSize(board_size));
        }
        if mode == GameMode::CaptureRace(0) {
            return Err(ConfigError::RaceTarget);
        }
        Ok(Self { board_size, mode })
    }

    /// Default-size board with the given mode.
    pub fn with_mode(mode: GameMode) -> Result<Self, ConfigError> {
        Self::new(DEFAULT_BOARD_SIZE, mode)
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }
}
