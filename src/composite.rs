//! GNUbg ID: `<position-id>:<match-id>`.

use crate::board::Board;
use crate::constants::COMPOSITE_SEPARATOR;
use crate::error::{CodecError, Result};
use crate::match_id::{CubeInfo, PosInfo, match_id};
use crate::position::{position_from_id, position_id};

const FIELD: &str = "gnubg id";

/// Join the position ID of `board` and the match ID of the context.
pub fn composite_id(board: &Board, cube: &CubeInfo, pos: &PosInfo) -> Result<String> {
    Ok(format!(
        "{}{COMPOSITE_SEPARATOR}{}",
        position_id(board)?,
        match_id(cube, pos)
    ))
}

/// [`composite_id`] for context that may be missing.
///
/// A board alone, or a board with cube info but no position info, is a
/// shape error. Partial context is never completed with defaults, since it
/// could not be told apart from a request without context.
pub fn composite_id_checked(
    board: &Board,
    cube: Option<&CubeInfo>,
    pos: Option<&PosInfo>,
) -> Result<String> {
    match (cube, pos) {
        (Some(cube), Some(pos)) => composite_id(board, cube, pos),
        (cube, pos) => {
            let supplied = match (cube.is_some(), pos.is_some()) {
                (true, false) => "board and cube info",
                (false, true) => "board and position info",
                _ => "board only",
            };
            Err(CodecError::shape(
                FIELD,
                "board, cube info and position info",
                supplied,
            ))
        }
    }
}

/// Split a GNUbg ID on its first colon into the position and match parts.
pub fn split_composite_id(id: &str) -> Result<(&str, &str)> {
    let Some((position, matched)) = id.split_once(COMPOSITE_SEPARATOR) else {
        return Err(CodecError::format(FIELD, "missing ':' separator"));
    };
    if position.is_empty() || matched.is_empty() {
        return Err(CodecError::format(FIELD, "empty position or match part"));
    }
    Ok((position, matched))
}

/// Decode the board carried by a GNUbg ID. The match part is not decoded.
pub fn position_from_composite_id(id: &str) -> Result<Board> {
    let (position, _) = split_composite_id(id)?;
    position_from_id(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_id::{CubeOwner, GameState};

    fn context() -> (CubeInfo, PosInfo) {
        let cube = CubeInfo::new(2, CubeOwner::Centered, 0, 5, [0, 0], false).unwrap();
        let pos = PosInfo::new(0, 0, false, GameState::Playing, [1, 2]).unwrap();
        (cube, pos)
    }

    #[test]
    fn test_composite_of_starting_position() {
        let (cube, pos) = context();
        let id = composite_id(&Board::starting(), &cube, &pos).unwrap();
        assert_eq!(id, "4HPwATDgc/ABMA:MYGoAAAAAAAA");
    }

    #[test]
    fn test_arity_contract() {
        let (cube, pos) = context();
        let board = Board::starting();
        for (c, p) in [(None, None), (Some(&cube), None), (None, Some(&pos))] {
            let err = composite_id_checked(&board, c, p).unwrap_err();
            assert!(matches!(err, CodecError::Shape { field: "gnubg id", .. }));
        }
        assert!(composite_id_checked(&board, Some(&cube), Some(&pos)).is_ok());
    }

    #[test]
    fn test_split() {
        assert_eq!(split_composite_id("abc:def").unwrap(), ("abc", "def"));
        assert_eq!(split_composite_id("abc:de:f").unwrap(), ("abc", "de:f"));
        assert!(split_composite_id("abcdef").is_err());
        assert!(split_composite_id(":def").is_err());
        assert!(split_composite_id("abc:").is_err());
    }

    #[test]
    fn test_position_from_composite() {
        let board = position_from_composite_id("4HPwATDgc/ABMA:MYGoAAAAAAAA").unwrap();
        assert_eq!(board, Board::starting());
    }
}
