//! Game state and move execution.
//!
//! This module provides the core rules engine:
//! - [`GameState`], an immutable-by-contract snapshot of a game
//! - Legality checking (bounds, occupancy, suicide, ko, game over)
//! - Move application with capture bookkeeping
//! - A layout builder for lesson and quiz positions
//!
//! Every accepted move returns a *new* `GameState`; the input is never
//! modified, so callers can keep independent timelines or an undo stack by
//! holding on to old states.
//!
//! Ko is enforced positionally: a move may not recreate the board as it was
//! before the opponent's last move. Nothing older than that is remembered.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info, trace};

use crate::board::{Board, Color, Point, Snapshot};
use crate::rules::{GameResult, RuleSet};

/// Why a move was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    /// Point lies outside the board
    #[error("illegal move: {0} is off the board")]
    OutOfBounds(Point),
    /// Point is not empty
    #[error("illegal move: point {0} not empty")]
    Occupied(Point),
    /// Move would leave its own group without liberties and captures nothing
    #[error("illegal move: {0} is suicide")]
    Suicide(Point),
    /// Move would recreate the position before the opponent's last move
    #[error("illegal move: {0} retakes ko")]
    Ko(Point),
    /// The game mode has already ended the game
    #[error("illegal move: game is over")]
    GameOver,
}

/// Errors from [`GameState::from_layout`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("layout stone {0} is off the board")]
    OutOfBounds(Point),
    #[error("layout lists {0} twice")]
    Duplicate(Point),
    #[error("layout group at {0} has no liberties")]
    DeadGroup(Point),
}

/// Stones captured so far, keyed by the capturing color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Captures {
    black: u32,
    white: u32,
}

impl Captures {
    pub fn get(&self, by: Color) -> u32 {
        match by {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    pub(crate) fn add(&mut self, by: Color, n: u32) {
        match by {
            Color::Black => self.black += n,
            Color::White => self.white += n,
        }
    }
}

/// Result of a successful [`GameState::apply_move`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The position after the move
    pub state: GameState,
    /// Every stone removed by the move, in row-major order
    pub captured: Vec<Point>,
}

/// A Go position plus everything needed to judge the next move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    to_play: Color,
    last_move: Option<Point>,
    /// Board before the last move (or pass); `None` at the start.
    previous_snapshot: Option<Snapshot>,
    captures: Captures,
    rules: RuleSet,
    result: Option<GameResult>,
    move_number: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}

impl GameState {
    /// Empty board, Black to play, no captures.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            board: Board::new(rules.board_size()),
            to_play: Color::Black,
            last_move: None,
            previous_snapshot: None,
            captures: Captures::default(),
            rules,
            result: None,
            move_number: 0,
        }
    }

    /// Build a position directly from a stone layout.
    ///
    /// This bypasses move application (no captures, ko or turn order are
    /// applied) and exists for authoring lesson and quiz positions. The
    /// layout must still be a valid Go position: on the board, no point
    /// listed twice, and no group without liberties.
    pub fn from_layout(
        rules: RuleSet,
        stones: impl IntoIterator<Item = (Point, Color)>,
        to_play: Color,
    ) -> Result<Self, SetupError> {
        let mut board = Board::new(rules.board_size());
        for (p, color) in stones {
            if !board.contains(p) {
                return Err(SetupError::OutOfBounds(p));
            }
            if board.get(p).is_some() {
                return Err(SetupError::Duplicate(p));
            }
            board.set(p, Some(color));
        }

        if let Some(dead) = board.all_groups().iter().find(|g| g.liberties.is_empty()) {
            // a group always has at least one stone
            let anchor = dead.anchor().unwrap_or(Point::new(0, 0));
            return Err(SetupError::DeadGroup(anchor));
        }

        Ok(Self {
            board,
            to_play,
            ..Self::new(rules)
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_play(&self) -> Color {
        self.to_play
    }

    pub fn last_move(&self) -> Option<Point> {
        self.last_move
    }

    pub fn previous_snapshot(&self) -> Option<&Snapshot> {
        self.previous_snapshot.as_ref()
    }

    pub fn captures(&self) -> Captures {
        self.captures
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn winner(&self) -> Option<Color> {
        self.result.and_then(GameResult::winner)
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Moves and passes played since the state was created.
    pub fn move_number(&self) -> usize {
        self.move_number
    }

    /// Check whether `color` may play at `p`, naming the rule that fails.
    pub fn check_move(&self, p: Point, color: Color) -> Result<(), IllegalMove> {
        self.simulate(p, color).map(|_| ())
    }

    pub fn is_legal(&self, p: Point, color: Color) -> bool {
        self.check_move(p, color).is_ok()
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        self.board.points().any(|p| self.is_legal(p, color))
    }

    /// Every legal point for `color`, in row-major order.
    pub fn legal_moves(&self, color: Color) -> Vec<Point> {
        self.board
            .points()
            .filter(|&p| self.is_legal(p, color))
            .collect()
    }

    /// Stones `color` would capture by playing at `p`, or the reason it can't.
    pub fn preview(&self, p: Point, color: Color) -> Result<Vec<Point>, IllegalMove> {
        self.simulate(p, color).map(|(_, captured)| captured)
    }

    /// Play `color` at `p`, returning the next state and the captured stones.
    ///
    /// `to_play` of the next state is the opponent of `color`, whoever was
    /// nominally to move before; lessons use this to place stones of either
    /// color. An illegal move leaves `self` untouched.
    pub fn apply_move(&self, p: Point, color: Color) -> Result<MoveOutcome, IllegalMove> {
        let (board, captured) = self.simulate(p, color).inspect_err(|err| {
            debug!(point = %p, %color, reason = %err, "move rejected");
        })?;

        let mut captures = self.captures;
        if !captured.is_empty() {
            trace!(point = %p, %color, count = captured.len(), "stones captured");
            captures.add(color, captured.len() as u32);
        }

        let mode = self.rules.mode();
        let mut state = GameState {
            board,
            to_play: color.opposite(),
            last_move: Some(p),
            previous_snapshot: Some(self.board.snapshot()),
            captures,
            rules: self.rules,
            result: mode.decided(&captures),
            move_number: self.move_number + 1,
        };
        if state.result.is_none() {
            if let Some(result) = mode.exhausted(&captures) {
                if !state.has_legal_move(state.to_play) {
                    state.result = Some(result);
                }
            }
        }
        if let Some(result) = state.result {
            info!(%result, %mode, "game decided");
        }
        Ok(MoveOutcome { state, captured })
    }

    /// Play for the side to move.
    pub fn play(&self, p: Point) -> Result<MoveOutcome, IllegalMove> {
        self.apply_move(p, self.to_play)
    }

    /// Pass for the side to move.
    pub fn pass(&self) -> Result<GameState, IllegalMove> {
        self.pass_for(self.to_play)
    }

    /// Pass for `color`; the opponent moves next, as after
    /// [`apply_move`](Self::apply_move). Archiving the unchanged board lifts
    /// any pending ko.
    pub fn pass_for(&self, color: Color) -> Result<GameState, IllegalMove> {
        if self.is_over() {
            return Err(IllegalMove::GameOver);
        }
        Ok(GameState {
            board: self.board.clone(),
            to_play: color.opposite(),
            last_move: None,
            previous_snapshot: Some(self.board.snapshot()),
            captures: self.captures,
            rules: self.rules,
            result: None,
            move_number: self.move_number + 1,
        })
    }

    /// Run the move on a scratch board: placement, captures, suicide, ko.
    fn simulate(&self, p: Point, color: Color) -> Result<(Board, Vec<Point>), IllegalMove> {
        if self.is_over() {
            return Err(IllegalMove::GameOver);
        }
        if !self.board.contains(p) {
            return Err(IllegalMove::OutOfBounds(p));
        }
        if self.board.get(p).is_some() {
            return Err(IllegalMove::Occupied(p));
        }

        let mut board = self.board.clone();
        board.set(p, Some(color));

        let opp = color.opposite();
        let mut captured = BTreeSet::new();
        for n in board.neighbors(p) {
            if board.get(n) != Some(opp) || captured.contains(&n) {
                continue;
            }
            if let Some(g) = board.chain(n) {
                if g.liberties.is_empty() {
                    captured.extend(g.stones);
                }
            }
        }
        board.remove_all(&captured);

        // With a capture the placed stone has at least the freed points.
        if captured.is_empty() && board.liberties(p).is_empty() {
            return Err(IllegalMove::Suicide(p));
        }

        if let Some(prev) = &self.previous_snapshot {
            if board.matches(prev) {
                return Err(IllegalMove::Ko(p));
            }
        }

        Ok((board, captured.into_iter().collect()))
    }
}
