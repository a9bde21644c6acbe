//! Constants for board dimensions, classifier bands and bot weights.
//!
//! Board size is a runtime setting carried by [`RuleSet`](crate::rules::RuleSet);
//! the values here are its defaults and limits.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN) used by lessons and the practice game.
pub const DEFAULT_BOARD_SIZE: usize = 9;

/// Smallest supported board.
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest supported board. Coordinates run out of letters beyond this.
pub const MAX_BOARD_SIZE: usize = 19;

/// Column letters in GTP order (no 'I').
pub const COLUMN_LETTERS: &[u8; 19] = b"ABCDEFGHJKLMNOPQRST";

// =============================================================================
// Move Explanation
// =============================================================================

/// Manhattan distance from the centre still counted as "central influence".
pub const CENTER_BAND: usize = 2;

// =============================================================================
// Bot Parameters
// =============================================================================

/// Below this many stones on the board the tutor bot plays an opening point.
pub const OPENING_STONE_LIMIT: usize = 4;

/// Chebyshev distance to an existing stone for a move to count as "local".
pub const NEAR_DISTANCE: usize = 2;

/// Base score for a capturing move (capture go).
pub const SCORE_CAPTURE_BASE: i32 = 1000;

/// Extra score per captured stone.
pub const SCORE_CAPTURE_PER_STONE: i32 = 100;

/// Score per opponent group left in atari.
pub const SCORE_OPPONENT_ATARI: i32 = 50;

/// Score per own group left in atari (negative).
pub const SCORE_OWN_ATARI: i32 = -30;

/// Score per adjacent friendly stone.
pub const SCORE_ADJACENT_FRIEND: i32 = 10;

/// Centre bias: this minus the Manhattan distance to the centre.
pub const SCORE_CENTER_BIAS: i32 = 4;

/// Penalty when the played stone's own group ends up in atari.
pub const SCORE_SELF_ATARI: i32 = -100;
