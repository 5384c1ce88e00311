//! Constants for board geometry, identifier layouts and move notation.
//!
//! All widths and lengths here are part of the GNU Backgammon interchange
//! formats. Changing any of them breaks compatibility with identifiers
//! produced by other programs.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of players (sides) on a board.
pub const SIDES: usize = 2;

/// Slots per side: the bar at index 0 plus points 1 to 24.
pub const SLOTS: usize = 25;

/// Index of the bar within a side.
pub const BAR: usize = 0;

/// Highest numbered point.
pub const MAX_POINT: usize = 24;

/// Checkers per side in the standard game.
pub const CHECKERS_PER_SIDE: u32 = 15;

// =============================================================================
// Position ID / Position Key
// =============================================================================

/// Bits carried by a position key (50 run terminators + up to 30 checkers).
pub const KEY_BITS: usize = 80;

/// Bytes in a position key.
pub const KEY_BYTES: usize = KEY_BITS / 8;

/// Characters in a position ID (84 bits of capacity).
pub const POSITION_ID_LEN: usize = 14;

// =============================================================================
// Match ID
// =============================================================================

/// Bytes backing a match ID (66 bits used).
pub const MATCH_KEY_BYTES: usize = 9;

/// Characters in a match ID.
pub const MATCH_ID_LEN: usize = 12;

/// Width of the log2(cube value) field.
pub const CUBE_BITS: u32 = 4;

/// Largest supported cube value (2^15).
pub const MAX_CUBE: u32 = 1 << 15;

/// Width of the match length and score fields.
pub const SCORE_BITS: u32 = 15;

/// Largest match length or score that fits [`SCORE_BITS`].
pub const MAX_SCORE: u32 = (1 << SCORE_BITS) - 1;

/// Largest die value; 0 means not rolled.
pub const MAX_DIE: u8 = 6;

/// Highest resignation level (single, gammon, backgammon).
pub const MAX_RESIGNED: u8 = 3;

// =============================================================================
// Symbol Alphabet
// =============================================================================

/// The 64-symbol alphabet; index = 6-bit value.
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Separator between the position and match parts of a GNUbg ID.
pub const COMPOSITE_SEPARATOR: char = ':';

// =============================================================================
// Move Notation
// =============================================================================

/// Move-notation number for a checker entering from the bar.
pub const BAR_POINT: u8 = 25;

/// Move-notation number for a checker bearing off.
pub const OFF_POINT: u8 = 0;

/// Maximum steps in one move (doubles).
pub const MAX_STEPS: usize = 4;
