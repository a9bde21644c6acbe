//! Heuristic move chooser for the practice opponent and capture go.
//!
//! The bot is deliberately shallow: it looks one move ahead through the
//! engine's own legality and capture queries and never searches deeper.
//!
//! - [`Personality::Tutor`] plays like a beginner: take a stone in atari,
//!   rescue its own, open on a star point, then fight near existing stones.
//! - [`Personality::CaptureGo`] scores every legal move by simulating it and
//!   plays the best, which suits the first-capture-wins variant.

use std::fmt;

use tracing::debug;

use crate::analysis::{find_groups_in_atari, is_eyeish};
use crate::board::{Color, Point};
use crate::constants::{
    NEAR_DISTANCE, OPENING_STONE_LIMIT, SCORE_ADJACENT_FRIEND, SCORE_CAPTURE_BASE,
    SCORE_CAPTURE_PER_STONE, SCORE_CENTER_BIAS, SCORE_OPPONENT_ATARI, SCORE_OWN_ATARI,
    SCORE_SELF_ATARI,
};
use crate::position::GameState;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Personality {
    #[default]
    Tutor,
    CaptureGo,
}

/// Advice for the side to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hint {
    /// Playing here captures this many stones
    Capture { at: Point, stones: usize },
    /// An opponent group has one liberty left
    OpponentInAtari,
    /// A solid positional move
    Play(Point),
    /// No legal move worth making
    Pass,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Capture { at, stones: 1 } => write!(f, "Place at {at} to capture 1 stone!"),
            Hint::Capture { at, stones } => write!(f, "Place at {at} to capture {stones} stones!"),
            Hint::OpponentInAtari => {
                write!(f, "Look for opponent stones with only one liberty remaining!")
            }
            Hint::Play(p) => write!(f, "Try placing at {p} to create a strong position."),
            Hint::Pass => write!(f, "No legal moves available. Consider passing."),
        }
    }
}

pub struct Bot {
    personality: Personality,
    rng: fastrand::Rng,
}

impl Bot {
    pub fn new(personality: Personality) -> Self {
        Self {
            personality,
            rng: fastrand::Rng::new(),
        }
    }

    /// Deterministic bot for tests and reproducible demos.
    pub fn with_seed(personality: Personality, seed: u64) -> Self {
        Self {
            personality,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn personality(&self) -> Personality {
        self.personality
    }

    /// Pick a move for the side to play. `None` means pass.
    pub fn choose_move(&mut self, state: &GameState) -> Option<Point> {
        self.choose_move_for(state, state.to_play())
    }

    /// Pick a move for `color`, whoever is nominally to play.
    pub fn choose_move_for(&mut self, state: &GameState, color: Color) -> Option<Point> {
        if state.is_over() {
            return None;
        }
        let choice = match self.personality {
            Personality::Tutor => self.tutor_move(state, color),
            Personality::CaptureGo => self.best_scored_move(state, color),
        };
        debug!(
            personality = ?self.personality,
            %color,
            choice = ?choice.map(|p| p.to_string()),
            "bot move"
        );
        choice
    }

    /// Suggest a move for the side to play, with a reason.
    pub fn hint(&mut self, state: &GameState) -> Hint {
        let color = state.to_play();
        let Some(p) = self.choose_move(state) else {
            return Hint::Pass;
        };
        let stones = state.preview(p, color).map(|c| c.len()).unwrap_or(0);
        if stones > 0 {
            return Hint::Capture { at: p, stones };
        }
        if !find_groups_in_atari(state.board(), color.opposite()).is_empty() {
            return Hint::OpponentInAtari;
        }
        Hint::Play(p)
    }

    fn pick(&mut self, candidates: &[Point]) -> Option<Point> {
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[self.rng.usize(..candidates.len())])
    }

    fn tutor_move(&mut self, state: &GameState, color: Color) -> Option<Point> {
        let board = state.board();
        let opp = color.opposite();

        // Take a stone in atari, then rescue our own.
        for target in [opp, color] {
            for group in find_groups_in_atari(board, target) {
                if let Some(&lib) = group.liberties.first() {
                    if state.is_legal(lib, color) {
                        return Some(lib);
                    }
                }
            }
        }

        if board.stone_count() < OPENING_STONE_LIMIT {
            let openings: Vec<Point> = opening_points(board.size())
                .into_iter()
                .filter(|&p| state.is_legal(p, color))
                .collect();
            if let Some(p) = self.pick(&openings) {
                return Some(p);
            }
        }

        // Never fill an eye, ours or theirs.
        let candidates: Vec<Point> = state
            .legal_moves(color)
            .into_iter()
            .filter(|&p| is_eyeish(board, p).is_none())
            .collect();
        let near: Vec<Point> = candidates
            .iter()
            .copied()
            .filter(|&p| board.stones().any(|(s, _)| s.chebyshev(p) <= NEAR_DISTANCE))
            .collect();

        self.pick(&near).or_else(|| self.pick(&candidates))
    }

    fn best_scored_move(&mut self, state: &GameState, color: Color) -> Option<Point> {
        let scored: Vec<(Point, i32)> = state
            .legal_moves(color)
            .into_iter()
            .filter_map(|p| score_move(state, p, color).map(|s| (p, s)))
            .collect();
        let best = scored.iter().map(|&(_, s)| s).max()?;
        let top: Vec<Point> = scored
            .into_iter()
            .filter(|&(_, s)| s == best)
            .map(|(p, _)| p)
            .collect();
        self.pick(&top)
    }
}

/// One-ply evaluation of `color` playing at `p`; `None` if illegal.
pub fn score_move(state: &GameState, p: Point, color: Color) -> Option<i32> {
    let outcome = state.apply_move(p, color).ok()?;
    if !outcome.captured.is_empty() {
        return Some(SCORE_CAPTURE_BASE + SCORE_CAPTURE_PER_STONE * outcome.captured.len() as i32);
    }

    let next = outcome.state.board();
    let opp_atari = find_groups_in_atari(next, color.opposite()).len() as i32;
    let own_atari = find_groups_in_atari(next, color);
    let self_atari = own_atari.iter().any(|g| g.contains(p));
    let friends = next
        .neighbors(p)
        .filter(|&n| next.get(n) == Some(color))
        .count() as i32;

    let mut score = opp_atari * SCORE_OPPONENT_ATARI
        + own_atari.len() as i32 * SCORE_OWN_ATARI
        + friends * SCORE_ADJACENT_FRIEND
        + SCORE_CENTER_BIAS
        - p.manhattan(next.center()) as i32;
    if self_atari {
        score += SCORE_SELF_ATARI;
    }
    Some(score)
}

/// Legal moves for `color` that capture at least one stone.
pub fn capture_opportunities(state: &GameState, color: Color) -> Vec<Point> {
    state
        .legal_moves(color)
        .into_iter()
        .filter(|&p| state.preview(p, color).is_ok_and(|c| !c.is_empty()))
        .collect()
}

/// First legal move that leaves fewer of `color`'s groups in atari.
pub fn defensive_move(state: &GameState, color: Color) -> Option<Point> {
    let in_atari = find_groups_in_atari(state.board(), color).len();
    if in_atari == 0 {
        return None;
    }
    state.legal_moves(color).into_iter().find(|&p| {
        state.apply_move(p, color).is_ok_and(|out| {
            find_groups_in_atari(out.state.board(), color).len() < in_atari
        })
    })
}

/// 3-3 and 4-4 points plus the centre, for boards large enough to have them.
fn opening_points(size: usize) -> Vec<Point> {
    let mut points = Vec::new();
    if size >= 7 {
        for d in [2, 3] {
            let (lo, hi) = (d, size - 1 - d);
            for (x, y) in [(lo, lo), (hi, lo), (lo, hi), (hi, hi)] {
                points.push(Point::new(x, y));
            }
        }
    }
    points.push(Point::new(size / 2, size / 2));
    points.sort();
    points.dedup();
    points
}
