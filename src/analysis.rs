//! Derived board queries for lessons, hints and the bot.

use std::fmt;

use crate::board::{Board, Color, Group, Point};
use crate::constants::CENTER_BAND;
use crate::position::GameState;

/// Every maximal group of `color`, in row-major order of their first stone.
pub fn groups(board: &Board, color: Color) -> Vec<Group> {
    board
        .all_groups()
        .into_iter()
        .filter(|g| g.color == color)
        .collect()
}

/// Groups of `color` with exactly one liberty.
pub fn find_groups_in_atari(board: &Board, color: Color) -> Vec<Group> {
    groups(board, color)
        .into_iter()
        .filter(Group::in_atari)
        .collect()
}

/// Color surrounding an empty point on all orthogonal sides, if any.
///
/// Board edges count as surrounding. This may be a false eye; the diagonals
/// are not inspected.
pub fn is_eyeish(board: &Board, p: Point) -> Option<Color> {
    if !board.is_empty_at(p) {
        return None;
    }
    let mut eye_color = None;
    for n in board.neighbors(p) {
        let c = board.get(n)?;
        match eye_color {
            None => eye_color = Some(c),
            Some(e) if e != c => return None,
            _ => {}
        }
    }
    eye_color
}

/// Teaching tag for a candidate move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveExplanation {
    /// Removes this many enemy stones
    Captures(usize),
    /// Touches the friendly stone at this point
    Connects(Point),
    /// Lands within the centre band
    CenterInfluence,
    Develops,
}

impl fmt::Display for MoveExplanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveExplanation::Captures(1) => write!(f, "captures 1 stone"),
            MoveExplanation::Captures(n) => write!(f, "captures {n} stones"),
            MoveExplanation::Connects(p) => write!(f, "connects to group at {p}"),
            MoveExplanation::CenterInfluence => write!(f, "takes center influence"),
            MoveExplanation::Develops => write!(f, "develops position"),
        }
    }
}

/// Classify a move by priority: capture, connection, centre, otherwise
/// development.
///
/// Advisory only. An illegal move is classified as if it captured nothing.
pub fn explain_move(state: &GameState, p: Point, color: Color) -> MoveExplanation {
    let captured = state.preview(p, color).map(|c| c.len()).unwrap_or(0);
    if captured > 0 {
        return MoveExplanation::Captures(captured);
    }

    let board = state.board();
    if let Some(friend) = board.neighbors(p).find(|&n| board.get(n) == Some(color)) {
        return MoveExplanation::Connects(friend);
    }

    if p.manhattan(board.center()) <= CENTER_BAND {
        return MoveExplanation::CenterInfluence;
    }
    MoveExplanation::Develops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;

    fn pt(s: &str) -> Point {
        s.parse().unwrap()
    }

    fn state(black: &[&str], white: &[&str]) -> GameState {
        let stones = black
            .iter()
            .map(|s| (pt(s), Color::Black))
            .chain(white.iter().map(|s| (pt(s), Color::White)));
        GameState::from_layout(RuleSet::default(), stones, Color::Black).unwrap()
    }

    #[test]
    fn test_groups_by_color() {
        let s = state(&["A1", "B1", "E5"], &["C1", "J9"]);
        let black = groups(s.board(), Color::Black);
        assert_eq!(black.len(), 2);
        assert_eq!(black[0].len(), 2);
        assert_eq!(groups(s.board(), Color::White).len(), 2);
    }

    #[test]
    fn test_find_groups_in_atari() {
        // White C1 has one liberty (D1); white J9 has two
        let s = state(&["B1", "C2"], &["C1", "J9"]);
        let atari = find_groups_in_atari(s.board(), Color::White);
        assert_eq!(atari.len(), 1);
        assert!(atari[0].contains(pt("C1")));
        assert_eq!(atari[0].liberties.first(), Some(&pt("D1")));
        assert!(find_groups_in_atari(s.board(), Color::Black).is_empty());
    }

    #[test]
    fn test_is_eyeish() {
        let s = state(&["B1", "A2", "D1", "E2", "F1"], &["H1"]);
        assert_eq!(is_eyeish(s.board(), pt("A1")), Some(Color::Black));
        assert_eq!(is_eyeish(s.board(), pt("E1")), Some(Color::Black));
        assert_eq!(is_eyeish(s.board(), pt("G1")), None);
        assert_eq!(is_eyeish(s.board(), pt("E5")), None);
        assert_eq!(is_eyeish(s.board(), pt("B1")), None);
    }

    #[test]
    fn test_explain_priority() {
        let s = state(&["B1", "C2", "E4"], &["C1"]);
        // D1 captures C1 (and would not touch any black stone)
        assert_eq!(
            explain_move(&s, pt("D1"), Color::Black),
            MoveExplanation::Captures(1)
        );
        assert_eq!(
            explain_move(&s, pt("E5"), Color::Black),
            MoveExplanation::Connects(pt("E4"))
        );
        assert_eq!(
            explain_move(&s, pt("F6"), Color::Black),
            MoveExplanation::CenterInfluence
        );
        assert_eq!(
            explain_move(&s, pt("J9"), Color::Black),
            MoveExplanation::Develops
        );
    }

    #[test]
    fn test_explain_wording() {
        assert_eq!(MoveExplanation::Captures(1).to_string(), "captures 1 stone");
        assert_eq!(MoveExplanation::Captures(3).to_string(), "captures 3 stones");
        assert_eq!(
            MoveExplanation::Connects(pt("D4")).to_string(),
            "connects to group at D4"
        );
    }
}
