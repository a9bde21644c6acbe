//! Board grid, coordinates and group/liberty computation.
//!
//! The board is a square `size x size` grid stored row-major in a flat
//! vector. Groups are never stored: every group query runs a fresh flood
//! fill over orthogonal neighbours, which at tutorial board sizes costs a
//! few hundred cell visits.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{COLUMN_LETTERS, MAX_BOARD_SIZE};

/// Stone color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Single-byte form used by board snapshots and diagrams.
    pub fn symbol(self) -> u8 {
        match self {
            Color::Black => b'X',
            Color::White => b'O',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Color::Black),
            "w" | "white" => Ok(Color::White),
            _ => Err(ParseError::Color(s.to_string())),
        }
    }
}

/// Errors from parsing colors and vertices such as `"E5"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty coordinate")]
    Empty,
    #[error("invalid color: {0}")]
    Color(String),
    #[error("invalid column in {0}")]
    Column(String),
    #[error("invalid row in {0}")]
    Row(String),
}

/// An intersection `(x, y)`; `x` is the column, `y` the row.
///
/// Text form is a GTP vertex: column letter (skipping `I`) followed by the
/// 1-based row, so `(0, 0)` is `A1` and `(4, 4)` is `E5`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Convert signed UI coordinates, which may fall off the board edge.
    pub fn from_signed(x: i64, y: i64) -> Option<Self> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        Some(Self { x, y })
    }

    pub fn manhattan(self, other: Point) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn chebyshev(self, other: Point) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

// Row-major: bottom row first, then left to right.
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match COLUMN_LETTERS.get(self.x) {
            Some(&c) => write!(f, "{}{}", c as char, self.y + 1),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

impl FromStr for Point {
    type Err = ParseError;

    /// Parse a vertex like `"E5"` or `"j9"`. Bounds are not checked here;
    /// the engine rejects off-board points as illegal moves.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let col_char = chars.next().ok_or(ParseError::Empty)?.to_ascii_uppercase();
        let x = COLUMN_LETTERS
            .iter()
            .position(|&c| c as char == col_char)
            .ok_or_else(|| ParseError::Column(s.to_string()))?;

        let row: usize = chars
            .as_str()
            .parse()
            .map_err(|_| ParseError::Row(s.to_string()))?;
        if row == 0 || row > MAX_BOARD_SIZE {
            return Err(ParseError::Row(s.to_string()));
        }
        Ok(Point::new(x, row - 1))
    }
}

/// A maximal 4-connected set of same-colored stones and its liberties.
///
/// Produced by a single flood fill, so `stones` and `liberties` always agree
/// on which points make up the group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub color: Color,
    pub stones: BTreeSet<Point>,
    pub liberties: BTreeSet<Point>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    pub fn liberty_count(&self) -> usize {
        self.liberties.len()
    }

    pub fn in_atari(&self) -> bool {
        self.liberties.len() == 1
    }

    pub fn contains(&self, p: Point) -> bool {
        self.stones.contains(&p)
    }

    /// First stone in row-major order.
    pub fn anchor(&self) -> Option<Point> {
        self.stones.first().copied()
    }
}

/// Full-board serialization, one byte per cell, compared for ko.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot(Vec<u8>);

impl Snapshot {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Square Go board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, p: Point) -> usize {
        p.y * self.size + p.x
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x < self.size && p.y < self.size
    }

    /// Stone at `p`, or `None` for an empty or off-board point.
    pub fn get(&self, p: Point) -> Option<Color> {
        if !self.contains(p) {
            return None;
        }
        self.cells[self.idx(p)]
    }

    pub fn is_empty_at(&self, p: Point) -> bool {
        self.contains(p) && self.get(p).is_none()
    }

    /// Write a cell directly. Callers keep the group invariants.
    pub(crate) fn set(&mut self, p: Point, stone: Option<Color>) {
        let i = self.idx(p);
        self.cells[i] = stone;
    }

    pub(crate) fn remove_all<'a>(&mut self, points: impl IntoIterator<Item = &'a Point>) {
        for &p in points {
            self.set(p, None);
        }
    }

    /// Centre point (for even sizes, the upper-right of the four centre points).
    pub fn center(&self) -> Point {
        Point::new(self.size / 2, self.size / 2)
    }

    /// Orthogonal on-board neighbours of `p`.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        let Point { x, y } = p;
        [
            (x > 0).then(|| Point::new(x - 1, y)),
            (x + 1 < s).then(|| Point::new(x + 1, y)),
            (y > 0).then(|| Point::new(x, y - 1)),
            (y + 1 < s).then(|| Point::new(x, y + 1)),
        ]
        .into_iter()
        .flatten()
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        (0..s).flat_map(move |y| (0..s).map(move |x| Point::new(x, y)))
    }

    /// All stones in row-major order.
    pub fn stones(&self) -> impl Iterator<Item = (Point, Color)> + '_ {
        self.points().filter_map(|p| self.get(p).map(|c| (p, c)))
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Flood-fill the group containing `p`.
    ///
    /// Returns `None` if `p` is empty or off the board.
    pub fn chain(&self, p: Point) -> Option<Group> {
        let color = self.get(p)?;
        let mut stones = BTreeSet::new();
        let mut liberties = BTreeSet::new();
        let mut visited = vec![false; self.cells.len()];
        let mut stack = vec![p];

        while let Some(pt) = stack.pop() {
            let i = self.idx(pt);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            stones.insert(pt);

            for n in self.neighbors(pt) {
                match self.get(n) {
                    None => {
                        liberties.insert(n);
                    }
                    Some(c) if c == color && !visited[self.idx(n)] => stack.push(n),
                    _ => {}
                }
            }
        }

        Some(Group {
            color,
            stones,
            liberties,
        })
    }

    /// Liberties of the group at `p`; empty if `p` holds no stone.
    pub fn liberties(&self, p: Point) -> BTreeSet<Point> {
        self.chain(p).map(|g| g.liberties).unwrap_or_default()
    }

    /// Stones of the group at `p`; empty if `p` holds no stone.
    pub fn group(&self, p: Point) -> BTreeSet<Point> {
        self.chain(p).map(|g| g.stones).unwrap_or_default()
    }

    /// Every maximal group on the board, in row-major order of their anchors.
    pub fn all_groups(&self) -> Vec<Group> {
        let mut seen = vec![false; self.cells.len()];
        let mut groups = Vec::new();
        for p in self.points() {
            if seen[self.idx(p)] {
                continue;
            }
            if let Some(g) = self.chain(p) {
                for &s in &g.stones {
                    seen[self.idx(s)] = true;
                }
                groups.push(g);
            }
        }
        groups
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(
            self.cells
                .iter()
                .map(|c| c.map_or(b'.', Color::symbol))
                .collect(),
        )
    }

    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        self.cells.len() == snapshot.0.len()
            && self
                .cells
                .iter()
                .zip(&snapshot.0)
                .all(|(c, &b)| c.map_or(b'.', Color::symbol) == b)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.size).rev() {
            write!(f, "{:>2} ", y + 1)?;
            for x in 0..self.size {
                let ch = match self.get(Point::new(x, y)) {
                    Some(c) => c.symbol() as char,
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for &c in COLUMN_LETTERS.iter().take(self.size) {
            write!(f, "{} ", c as char)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(s: &str) -> Point {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_vertex() {
        assert_eq!(pt("A1"), Point::new(0, 0));
        assert_eq!(pt("e5"), Point::new(4, 4));
        assert_eq!(pt("J9"), Point::new(8, 8));
        assert_eq!(pt("H1"), Point::new(7, 0));
    }

    #[test]
    fn test_parse_vertex_rejects_garbage() {
        assert_eq!("".parse::<Point>(), Err(ParseError::Empty));
        assert!(matches!("I5".parse::<Point>(), Err(ParseError::Column(_))));
        assert!(matches!("A0".parse::<Point>(), Err(ParseError::Row(_))));
        assert!(matches!("Axy".parse::<Point>(), Err(ParseError::Row(_))));
    }

    #[test]
    fn test_vertex_display_skips_i() {
        assert_eq!(Point::new(8, 0).to_string(), "J1");
        assert_eq!(Point::new(4, 4).to_string(), "E5");
        assert_eq!(Point::new(30, 2).to_string(), "(30, 2)");
    }

    #[test]
    fn test_from_signed() {
        assert_eq!(Point::from_signed(-1, 3), None);
        assert_eq!(Point::from_signed(2, 3), Some(Point::new(2, 3)));
    }

    #[test]
    fn test_neighbors_at_corner_and_center() {
        let board = Board::new(9);
        assert_eq!(board.neighbors(Point::new(0, 0)).count(), 2);
        assert_eq!(board.neighbors(Point::new(4, 0)).count(), 3);
        assert_eq!(board.neighbors(Point::new(4, 4)).count(), 4);
    }

    #[test]
    fn test_chain_shares_one_traversal() {
        let mut board = Board::new(9);
        board.set(pt("D4"), Some(Color::Black));
        board.set(pt("E4"), Some(Color::Black));
        board.set(pt("F5"), Some(Color::Black)); // diagonal, separate group
        board.set(pt("D5"), Some(Color::White));

        let g = board.chain(pt("D4")).unwrap();
        assert_eq!(g.color, Color::Black);
        assert_eq!(g.stones, BTreeSet::from([pt("D4"), pt("E4")]));
        // D4: C4 D3 ; E4: E5 E3 F4 (D5 is white)
        assert_eq!(
            g.liberties,
            BTreeSet::from([pt("C4"), pt("D3"), pt("E3"), pt("E5"), pt("F4")])
        );
        assert!(!g.contains(pt("F5")));
    }

    #[test]
    fn test_empty_point_has_no_group() {
        let board = Board::new(9);
        assert!(board.chain(pt("C3")).is_none());
        assert!(board.liberties(pt("C3")).is_empty());
        assert!(board.group(Point::new(20, 20)).is_empty());
    }

    #[test]
    fn test_all_groups_row_major() {
        let mut board = Board::new(5);
        board.set(Point::new(3, 3), Some(Color::White));
        board.set(Point::new(0, 0), Some(Color::Black));
        board.set(Point::new(1, 0), Some(Color::Black));
        let groups = board.all_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].anchor(), Some(Point::new(0, 0)));
        assert_eq!(groups[1].color, Color::White);
    }

    #[test]
    fn test_snapshot_matches() {
        let mut board = Board::new(5);
        let empty = board.snapshot();
        board.set(Point::new(2, 2), Some(Color::Black));
        assert!(!board.matches(&empty));
        assert!(board.matches(&board.snapshot()));
        assert_eq!(board.snapshot().as_bytes()[12], b'X');
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3);
        board.set(Point::new(0, 2), Some(Color::Black));
        board.set(Point::new(2, 0), Some(Color::White));
        assert_eq!(board.to_string(), " 3 X . . \n 2 . . . \n 1 . . O \n   A B C \n");
    }
}
