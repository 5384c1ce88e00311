//! Position ID: a board as 14 printable characters.
//!
//! The ID is the 80-bit packed board (see [`pack_board`]) passed through the
//! 64-symbol alphabet. The last symbol carries four padding bits,
//! written as zero and ignored on decode.

use tracing::trace;

use crate::board::{Board, pack_board, unpack_board};
use crate::constants::POSITION_ID_LEN;
use crate::error::Result;
use crate::symbols::{from_symbols, to_symbols};

const FIELD: &str = "position id";

/// Encode a board as a position ID.
///
/// Fails only when the board holds more checkers than the 80-bit stream
/// can carry.
pub fn position_id(board: &Board) -> Result<String> {
    let id = to_symbols(&pack_board(board)?, POSITION_ID_LEN)?;
    trace!(%id, "encoded position id");
    Ok(id)
}

/// Decode a position ID.
///
/// The length and alphabet are checked before any bits are unpacked. The
/// 15-checker rule is not enforced here; use [`Board::check_position`].
pub fn position_from_id(id: &str) -> Result<Board> {
    let bytes = from_symbols(id, POSITION_ID_LEN, FIELD)?;
    unpack_board(&bytes, FIELD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_starting_position_id() {
        assert_eq!(position_id(&Board::starting()).unwrap(), "4HPwATDgc/ABMA");
    }

    #[test]
    fn test_decode_starting_position() {
        assert_eq!(position_from_id("4HPwATDgc/ABMA").unwrap(), Board::starting());
    }

    #[test]
    fn test_decode_ignores_padding_bits() {
        for id in ["4HPwATDgc/ABMB", "4HPwATDgc/ABMP"] {
            assert_eq!(position_from_id(id).unwrap(), Board::starting());
        }
        let board = position_from_id("4HPwATDgc/ABMB").unwrap();
        assert_eq!(position_id(&board).unwrap(), "4HPwATDgc/ABMA");
    }

    #[test]
    fn test_empty_board_id() {
        assert_eq!(position_id(&Board::default()).unwrap(), "AAAAAAAAAAAAAA");
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = position_from_id("INVALID_ID").unwrap_err();
        assert!(matches!(err, CodecError::Format { field: "position id", .. }));
    }

    #[test]
    fn test_rejects_bad_character() {
        let err = position_from_id("4HPwATDgc/AB-A").unwrap_err();
        assert!(matches!(err, CodecError::Format { .. }));
    }

    #[test]
    fn test_rejects_too_few_runs() {
        // 78 one-bits then two zeros: only two runs.
        let err = position_from_id("/////////////A").unwrap_err();
        match err {
            CodecError::Format { detail, .. } => assert!(detail.contains("after 2 of 50")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_is_case_sensitive() {
        let lower = position_from_id("4hpwatdgc/abma");
        assert_ne!(lower.ok(), Some(Board::starting()));
    }
}
