//! Lesson and quiz scenario checking.
//!
//! A scenario is a hand-authored position plus an answer key. The checker
//! builds the position with [`GameState::from_layout`], asks the engine
//! about one move and compares the result with the key.
//!
//! Ladder quizzes have no fixed key past the opening move: the engine plays
//! the defender's escape after every attack until the chased stones have
//! nowhere left to go.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Color, Point};
use crate::position::{GameState, IllegalMove, MoveOutcome, SetupError};
use crate::rules::RuleSet;

/// Result of checking one answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The move is in the answer key; the outcome is the position after it
    Solved(MoveOutcome),
    /// Legal, but not one of the expected moves
    Wrong,
    /// The engine refused the move
    Illegal(IllegalMove),
    /// The expected answer is to pass, not to play
    NeedsPass,
}

impl Verdict {
    pub fn is_solved(&self) -> bool {
        matches!(self, Verdict::Solved(_))
    }
}

/// A quiz position with its expected answers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub setup: Vec<(Point, Color)>,
    pub to_play: Color,
    /// Accepted answers; empty means the correct answer is to pass.
    pub correct_moves: Vec<Point>,
    pub rules: RuleSet,
}

impl Scenario {
    pub fn new(setup: Vec<(Point, Color)>, to_play: Color, correct_moves: Vec<Point>) -> Self {
        Self {
            setup,
            to_play,
            correct_moves,
            rules: RuleSet::default(),
        }
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Starting position of the scenario.
    pub fn position(&self) -> Result<GameState, SetupError> {
        GameState::from_layout(self.rules, self.setup.iter().copied(), self.to_play)
    }

    /// Check an answer against the starting position.
    pub fn check(&self, p: Point) -> Result<Verdict, SetupError> {
        Ok(self.check_at(&self.position()?, p))
    }

    /// Check an answer against `state`, a position reached from this scenario.
    pub fn check_at(&self, state: &GameState, p: Point) -> Verdict {
        if self.correct_moves.is_empty() {
            return Verdict::NeedsPass;
        }
        let outcome = match state.play(p) {
            Ok(outcome) => outcome,
            Err(err) => return Verdict::Illegal(err),
        };
        if !self.correct_moves.contains(&p) {
            debug!(point = %p, "answer not in key");
            return Verdict::Wrong;
        }
        Verdict::Solved(outcome)
    }

    /// Whether passing is the expected answer.
    pub fn check_pass(&self) -> bool {
        self.correct_moves.is_empty()
    }
}

/// "Capture these stones" lesson goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureTask {
    targets: BTreeSet<Point>,
}

impl CaptureTask {
    pub fn new(targets: impl IntoIterator<Item = Point>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
        }
    }

    /// Target points still holding a stone.
    pub fn remaining(&self, board: &Board) -> Vec<Point> {
        self.targets
            .iter()
            .copied()
            .filter(|&p| board.get(p).is_some())
            .collect()
    }

    /// True once every target point is empty.
    pub fn is_complete(&self, board: &Board) -> bool {
        self.remaining(board).is_empty()
    }
}

/// One exchange of a ladder quiz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LadderStep {
    /// The defender extended at `reply`; `outcome.state` is the position
    /// after the reply, with the attacker to move again
    Extended { reply: Point, outcome: MoveOutcome },
    /// The defender has no legal extension left; the ladder is solved.
    /// `outcome` is the attacker's final move
    Trapped(MoveOutcome),
    /// First move is not one of the accepted ladder starts
    WrongStart,
    Illegal(IllegalMove),
}

/// A ladder quiz: the attacker chases, the engine answers for the defender.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LadderScenario {
    pub setup: Vec<(Point, Color)>,
    pub attacker: Color,
    /// Accepted first moves
    pub opening_moves: Vec<Point>,
    pub rules: RuleSet,
}

impl LadderScenario {
    pub fn new(setup: Vec<(Point, Color)>, attacker: Color, opening_moves: Vec<Point>) -> Self {
        Self {
            setup,
            attacker,
            opening_moves,
            rules: RuleSet::default(),
        }
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn position(&self) -> Result<GameState, SetupError> {
        GameState::from_layout(self.rules, self.setup.iter().copied(), self.attacker)
    }

    /// Play the attacker's move `p` and the defender's answer.
    ///
    /// A state with no moves played yet (straight from [`position`](Self::position))
    /// only accepts the opening moves.
    pub fn respond(&self, state: &GameState, p: Point) -> LadderStep {
        let attack = match state.apply_move(p, self.attacker) {
            Ok(outcome) => outcome,
            Err(err) => return LadderStep::Illegal(err),
        };
        if state.move_number() == 0 && !self.opening_moves.contains(&p) {
            return LadderStep::WrongStart;
        }

        let defender = self.attacker.opposite();
        let Some(reply) = defender_reply(&attack.state, defender, p) else {
            debug!(point = %p, captured = attack.captured.len(), "ladder complete");
            return LadderStep::Trapped(attack);
        };
        match attack.state.apply_move(reply, defender) {
            Ok(outcome) => LadderStep::Extended { reply, outcome },
            Err(err) => LadderStep::Illegal(err),
        }
    }
}

/// The defender's escape: a legal point next to one of its stones, as far as
/// possible (Manhattan) from the attacker's last move. Ties go to the first
/// point in row-major order. `None` when no such point exists.
pub fn defender_reply(state: &GameState, defender: Color, last_attack: Point) -> Option<Point> {
    let board = state.board();
    let candidates: BTreeSet<Point> = board
        .stones()
        .filter(|&(_, c)| c == defender)
        .flat_map(|(s, _)| board.neighbors(s))
        .filter(|&n| state.is_legal(n, defender))
        .collect();
    candidates
        .into_iter()
        .min_by_key(|p| Reverse(p.manhattan(last_attack)))
}

/// A scripted move that the engine refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("scripted move {index} at {point} rejected: {source}")]
pub struct ScriptError {
    pub index: usize,
    pub point: Point,
    pub source: IllegalMove,
}

/// Play `moves` alternately from `state`, returning the final position and
/// every stone captured along the way.
pub fn play_script(
    state: &GameState,
    moves: &[Point],
) -> Result<(GameState, Vec<Point>), ScriptError> {
    let mut current = state.clone();
    let mut captured = Vec::new();
    for (index, &point) in moves.iter().enumerate() {
        let outcome = current
            .play(point)
            .map_err(|source| ScriptError { index, point, source })?;
        captured.extend(outcome.captured);
        current = outcome.state;
    }
    Ok((current, captured))
}
