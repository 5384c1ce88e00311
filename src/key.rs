//! Position key: the packed board as 10 raw bytes.
//!
//! Carries exactly the bits of a position ID without the text step, for
//! storage and indexing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, pack_board, unpack_board};
use crate::constants::KEY_BYTES;
use crate::error::{CodecError, Result};

const FIELD: &str = "position key";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionKey([u8; KEY_BYTES]);

impl PositionKey {
    pub fn from_bytes(bytes: [u8; KEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_BYTES] {
        &self.0
    }

    /// Build a key from loosely typed integers, e.g. parsed JSON or CLI input.
    ///
    /// Anything other than exactly 10 values in `0..=255` is a shape error:
    /// such input is not a key at all rather than a corrupt one.
    pub fn from_values(values: &[i64]) -> Result<Self> {
        if values.len() != KEY_BYTES {
            return Err(CodecError::shape(
                FIELD,
                format!("{KEY_BYTES} integers"),
                format!("{} integers", values.len()),
            ));
        }
        let mut bytes = [0u8; KEY_BYTES];
        for (i, (&v, b)) in values.iter().zip(bytes.iter_mut()).enumerate() {
            *b = u8::try_from(v).map_err(|_| {
                CodecError::shape(FIELD, "integers in 0..=255", format!("{v} at index {i}"))
            })?;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{b}")?;
        }
        Ok(())
    }
}

/// Encode a board as a position key.
pub fn position_key(board: &Board) -> Result<PositionKey> {
    Ok(PositionKey(pack_board(board)?))
}

/// Decode a typed position key.
pub fn position_from_key(key: &PositionKey) -> Result<Board> {
    unpack_board(&key.0, FIELD)
}

/// Decode a key given as loose integers; see [`PositionKey::from_values`].
pub fn position_from_key_values(values: &[i64]) -> Result<Board> {
    position_from_key(&PositionKey::from_values(values)?)
}
