//! Checker placement for both players and its unary bit packing.
//!
//! A [`Board`] holds two sides of 25 counts. Index 0 is the bar and indices
//! 1 to 24 are points numbered from that side's own perspective, so side 0
//! point `p` is the same physical point as side 1 point `25 - p`. Side 1 is
//! the player on roll.
//!
//! The packer writes every count in unary, side 0 first, points 1 to 24 and
//! then the bar. That order and the least-significant-first bit layout of
//! [`BitWriter`] are what make the packed bytes identical to the GNU
//! Backgammon position key.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bitstream::{BitReader, BitWriter};
use crate::constants::{BAR, CHECKERS_PER_SIDE, KEY_BITS, KEY_BYTES, MAX_POINT, SIDES, SLOTS};
use crate::error::{CodecError, Result};

/// Counts for one side: bar at index 0, then points 1 to 24.
pub type Side = [u8; SLOTS];

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    sides: [Side; SIDES],
}

impl Board {
    /// Build a standard board: at most 15 checkers per side.
    pub fn new(sides: [Side; SIDES]) -> Result<Self> {
        let board = Self { sides };
        for side in 0..SIDES {
            let n = board.checkers(side);
            if n > CHECKERS_PER_SIDE {
                return Err(CodecError::range(
                    "board",
                    format!("side {side} has {n} checkers, at most {CHECKERS_PER_SIDE} allowed"),
                ));
            }
        }
        Ok(board)
    }

    /// Build a board without the 15-checker rule, for non-standard variants.
    pub fn from_raw(sides: [Side; SIDES]) -> Self {
        Self { sides }
    }

    /// Build a board from loosely shaped input such as parsed JSON.
    ///
    /// Anything other than two sides of 25 entries is a shape error; a count
    /// above 255 is a range error. The 15-checker rule is not applied.
    pub fn from_sides<S: AsRef<[u32]>>(sides: &[S]) -> Result<Self> {
        if sides.len() != SIDES {
            return Err(CodecError::shape(
                "board",
                format!("{SIDES} sides"),
                format!("{} sides", sides.len()),
            ));
        }
        let mut out = [[0u8; SLOTS]; SIDES];
        for (i, side) in sides.iter().enumerate() {
            let side = side.as_ref();
            if side.len() != SLOTS {
                return Err(CodecError::shape(
                    "board",
                    format!("{SLOTS} entries for side {i}"),
                    format!("{} entries", side.len()),
                ));
            }
            for (slot, &n) in side.iter().enumerate() {
                out[i][slot] = u8::try_from(n).map_err(|_| {
                    CodecError::range("board", format!("side {i} slot {slot} holds {n} checkers"))
                })?;
            }
        }
        Ok(Self { sides: out })
    }

    /// The standard opening layout, identical for both sides.
    pub fn starting() -> Self {
        let mut side = [0u8; SLOTS];
        side[24] = 2;
        side[13] = 5;
        side[8] = 3;
        side[6] = 5;
        Self { sides: [side, side] }
    }

    pub fn sides(&self) -> &[Side; SIDES] {
        &self.sides
    }

    /// Counts of one side.
    ///
    /// # Panics
    ///
    /// Panics if `side` is not 0 or 1.
    pub fn side(&self, side: usize) -> &Side {
        &self.sides[side]
    }

    /// Checkers of `side` on `slot` (0 = bar).
    ///
    /// # Panics
    ///
    /// Panics if `side` is not 0 or 1 or `slot` is above 24. The same holds
    /// for every accessor below taking a side index.
    pub fn count(&self, side: usize, slot: usize) -> u8 {
        self.sides[side][slot]
    }

    /// Checkers of `side` still in play (board plus bar).
    pub fn checkers(&self, side: usize) -> u32 {
        self.sides[side].iter().map(|&n| u32::from(n)).sum()
    }

    /// Pips `side` needs to bear everything off; a checker on the bar counts 25.
    pub fn pip_count(&self, side: usize) -> u32 {
        self.sides[side]
            .iter()
            .enumerate()
            .map(|(slot, &n)| {
                let pips = if slot == BAR { MAX_POINT + 1 } else { slot };
                pips as u32 * u32::from(n)
            })
            .sum()
    }

    /// Sanity check for a standard game.
    ///
    /// Each side may have at most 15 checkers and no point may be held by
    /// both sides at once.
    pub fn check_position(&self) -> Result<()> {
        Self::new(self.sides)?;
        for point in 1..=MAX_POINT {
            let facing = MAX_POINT + 1 - point;
            if self.sides[0][point] > 0 && self.sides[1][facing] > 0 {
                return Err(CodecError::range(
                    "board",
                    format!("point {point} of side 0 is also held by side 1 (its point {facing})"),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "      bar")?;
        for point in 1..=MAX_POINT {
            write!(f, "{point:>3}")?;
        }
        writeln!(f)?;
        for (i, side) in self.sides.iter().enumerate() {
            write!(f, "side {i} {:>3}", side[BAR])?;
            for n in &side[1..] {
                write!(f, "{n:>3}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Slots in packing order: points 1 to 24, then the bar.
fn packing_order() -> impl Iterator<Item = usize> {
    (1..=MAX_POINT).chain(std::iter::once(BAR))
}

/// Pack a board into the 80-bit unary stream.
///
/// Counts above 15 are fine, but the whole board must fit in 80 bits: 50
/// run terminators plus one bit per checker, so at most 30 checkers in all.
pub fn pack_board(board: &Board) -> Result<[u8; KEY_BYTES]> {
    let mut w = BitWriter::<KEY_BYTES>::new();
    for side in 0..SIDES {
        for slot in packing_order() {
            let n = board.count(side, slot);
            if !w.push_unary(u32::from(n)) {
                debug!(side, slot, "board does not fit the position key");
                return Err(CodecError::range(
                    "board",
                    format!(
                        "{} checkers need more than {KEY_BITS} bits",
                        board.checkers(0) + board.checkers(1)
                    ),
                ));
            }
        }
    }
    Ok(w.into_bytes())
}

/// Recover a board from a packed stream, reading exactly 50 runs.
///
/// Running out of bits first is a format error; `field` names the source
/// identifier in the error.
pub fn unpack_board(bytes: &[u8], field: &'static str) -> Result<Board> {
    let mut r = BitReader::new(bytes);
    let mut sides = [[0u8; SLOTS]; SIDES];
    let mut runs = 0;
    for side in sides.iter_mut() {
        for slot in packing_order() {
            let Some(n) = r.read_unary() else {
                debug!(field, runs, "bit stream ends mid-board");
                return Err(CodecError::format(
                    field,
                    format!("bit stream ends after {runs} of {} runs", SIDES * SLOTS),
                ));
            };
            // A run can never exceed the stream length, so it fits a u8.
            side[slot] = n as u8;
            runs += 1;
        }
    }
    Ok(Board { sides })
}

/// A random standard board that passes [`Board::check_position`].
pub fn random_board(rng: &mut fastrand::Rng) -> Board {
    let mut sides = [[0u8; SLOTS]; SIDES];
    for _ in 0..rng.u32(0..=CHECKERS_PER_SIDE) {
        sides[0][rng.usize(0..SLOTS)] += 1;
    }
    let open: Vec<usize> = (0..SLOTS)
        .filter(|&slot| slot == BAR || sides[0][MAX_POINT + 1 - slot] == 0)
        .collect();
    for _ in 0..rng.u32(0..=CHECKERS_PER_SIDE) {
        sides[1][open[rng.usize(0..open.len())]] += 1;
    }
    Board { sides }
}
