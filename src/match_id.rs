//! Match ID: cube, score and turn context as 12 printable characters.
//!
//! The fields are packed least significant bit first into 66 bits (9 bytes)
//! and passed through the same alphabet as the position ID:
//!
//! | bit | width | field                     |
//! |-----|-------|---------------------------|
//! | 0   | 4     | log2 of the cube value    |
//! | 4   | 2     | cube owner                |
//! | 6   | 1     | player on roll            |
//! | 7   | 1     | Crawford game             |
//! | 8   | 3     | game state                |
//! | 11  | 1     | turn                      |
//! | 12  | 1     | double offered            |
//! | 13  | 2     | resignation offered       |
//! | 15  | 3     | first die                 |
//! | 18  | 3     | second die                |
//! | 21  | 15    | match length (0 = money)  |
//! | 36  | 15    | score of player 0         |
//! | 51  | 15    | score of player 1         |
//!
//! Only encoding is provided.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::bitstream::BitWriter;
use crate::constants::{
    CUBE_BITS, MATCH_ID_LEN, MATCH_KEY_BYTES, MAX_CUBE, MAX_DIE, MAX_RESIGNED, MAX_SCORE,
    SCORE_BITS,
};
use crate::error::{CodecError, Result};
use crate::symbols::write_symbols;

const FIELD: &str = "match id";

const _: () = assert!(MATCH_KEY_BYTES * 8 <= MATCH_ID_LEN * 6);

/// Who may turn the cube next.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CubeOwner {
    #[default]
    Centered,
    Player0,
    Player1,
}

impl CubeOwner {
    /// Two-bit code used in the match ID.
    pub fn code(self) -> u32 {
        match self {
            CubeOwner::Player0 => 0,
            CubeOwner::Player1 => 1,
            CubeOwner::Centered => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// No game started.
    #[default]
    None,
    Playing,
    Over,
    Resigned,
    /// Ended by a declined double.
    Dropped,
}

impl GameState {
    pub fn code(self) -> u32 {
        match self {
            GameState::None => 0,
            GameState::Playing => 1,
            GameState::Over => 2,
            GameState::Resigned => 3,
            GameState::Dropped => 4,
        }
    }
}

/// Cube and score context.
///
/// Fields are checked against their bit widths on construction; whether the
/// values make sense for a match (score below match length, Crawford only at
/// match point) is left to the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CubeInfoFields")]
pub struct CubeInfo {
    cube_value: u32,
    owner: CubeOwner,
    on_roll: u8,
    match_length: u32,
    score: [u32; 2],
    crawford: bool,
}

/// Unchecked mirror of [`CubeInfo`] used for deserialization.
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CubeInfoFields {
    cube_value: u32,
    owner: CubeOwner,
    on_roll: u8,
    match_length: u32,
    score: [u32; 2],
    crawford: bool,
}

impl Default for CubeInfoFields {
    fn default() -> Self {
        Self {
            cube_value: 1,
            owner: CubeOwner::Centered,
            on_roll: 0,
            match_length: 0,
            score: [0, 0],
            crawford: false,
        }
    }
}

impl TryFrom<CubeInfoFields> for CubeInfo {
    type Error = CodecError;

    fn try_from(f: CubeInfoFields) -> Result<Self> {
        CubeInfo::new(
            f.cube_value,
            f.owner,
            f.on_roll,
            f.match_length,
            f.score,
            f.crawford,
        )
    }
}

impl Default for CubeInfo {
    fn default() -> Self {
        Self::money()
    }
}

impl CubeInfo {
    pub fn new(
        cube_value: u32,
        owner: CubeOwner,
        on_roll: u8,
        match_length: u32,
        score: [u32; 2],
        crawford: bool,
    ) -> Result<Self> {
        if !cube_value.is_power_of_two() || cube_value > MAX_CUBE {
            return Err(CodecError::range(
                "cube value",
                format!("{cube_value} is not a power of two in 1..={MAX_CUBE}"),
            ));
        }
        check_player("player on roll", on_roll)?;
        check_score("match length", match_length)?;
        check_score("score of player 0", score[0])?;
        check_score("score of player 1", score[1])?;
        Ok(Self {
            cube_value,
            owner,
            on_roll,
            match_length,
            score,
            crawford,
        })
    }

    /// Centered cube at 1, money game, player 0 on roll.
    pub fn money() -> Self {
        Self {
            cube_value: 1,
            owner: CubeOwner::Centered,
            on_roll: 0,
            match_length: 0,
            score: [0, 0],
            crawford: false,
        }
    }

    pub fn cube_value(&self) -> u32 {
        self.cube_value
    }

    pub fn owner(&self) -> CubeOwner {
        self.owner
    }

    pub fn on_roll(&self) -> u8 {
        self.on_roll
    }

    pub fn match_length(&self) -> u32 {
        self.match_length
    }

    pub fn score(&self) -> [u32; 2] {
        self.score
    }

    pub fn crawford(&self) -> bool {
        self.crawford
    }

    pub fn is_money(&self) -> bool {
        self.match_length == 0
    }
}

/// Turn, dice and pending decisions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PosInfoFields")]
pub struct PosInfo {
    turn: u8,
    resigned: u8,
    doubled: bool,
    game_state: GameState,
    dice: [u8; 2],
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PosInfoFields {
    turn: u8,
    resigned: u8,
    doubled: bool,
    game_state: GameState,
    dice: [u8; 2],
}

impl TryFrom<PosInfoFields> for PosInfo {
    type Error = CodecError;

    fn try_from(f: PosInfoFields) -> Result<Self> {
        PosInfo::new(f.turn, f.resigned, f.doubled, f.game_state, f.dice)
    }
}

impl PosInfo {
    /// `dice` of 0 mean not rolled yet.
    pub fn new(
        turn: u8,
        resigned: u8,
        doubled: bool,
        game_state: GameState,
        dice: [u8; 2],
    ) -> Result<Self> {
        check_player("turn", turn)?;
        if resigned > MAX_RESIGNED {
            return Err(CodecError::range(
                "resigned",
                format!("level {resigned} is above {MAX_RESIGNED}"),
            ));
        }
        for die in dice {
            if die > MAX_DIE {
                return Err(CodecError::range(
                    "dice",
                    format!("{die} is not in 0..={MAX_DIE}"),
                ));
            }
        }
        Ok(Self {
            turn,
            resigned,
            doubled,
            game_state,
            dice,
        })
    }

    pub fn turn(&self) -> u8 {
        self.turn
    }

    pub fn resigned(&self) -> u8 {
        self.resigned
    }

    pub fn doubled(&self) -> bool {
        self.doubled
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn dice(&self) -> [u8; 2] {
        self.dice
    }
}

fn check_player(field: &'static str, player: u8) -> Result<()> {
    if player > 1 {
        return Err(CodecError::range(field, format!("player {player} is not 0 or 1")));
    }
    Ok(())
}

fn check_score(field: &'static str, value: u32) -> Result<()> {
    if value > MAX_SCORE {
        return Err(CodecError::range(
            field,
            format!("{value} does not fit {SCORE_BITS} bits"),
        ));
    }
    Ok(())
}

/// Encode a match ID.
pub fn match_id(cube: &CubeInfo, pos: &PosInfo) -> String {
    let fields = [
        (cube.cube_value.trailing_zeros(), CUBE_BITS),
        (cube.owner.code(), 2),
        (u32::from(cube.on_roll), 1),
        (u32::from(cube.crawford), 1),
        (pos.game_state.code(), 3),
        (u32::from(pos.turn), 1),
        (u32::from(pos.doubled), 1),
        (u32::from(pos.resigned), 2),
        (u32::from(pos.dice[0]), 3),
        (u32::from(pos.dice[1]), 3),
        (cube.match_length, SCORE_BITS),
        (cube.score[0], SCORE_BITS),
        (cube.score[1], SCORE_BITS),
    ];

    let mut w = BitWriter::<MATCH_KEY_BYTES>::new();
    for (value, width) in fields {
        let fitted = w.push_bits(value, width);
        debug_assert!(fitted, "match field {value} does not fit {width} bits");
    }
    let id = write_symbols(&w.into_bytes(), MATCH_ID_LEN);
    trace!(%id, "encoded match id");
    id
}

/// Encode a match ID from optionally supplied context.
///
/// Cube info without position info is a shape error; the missing half is
/// never filled with defaults.
pub fn match_id_checked(cube: &CubeInfo, pos: Option<&PosInfo>) -> Result<String> {
    let pos = pos.ok_or_else(|| {
        CodecError::shape(FIELD, "cube info and position info", "cube info only")
    })?;
    Ok(match_id(cube, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_game_before_first_roll() {
        let cube = CubeInfo::new(1, CubeOwner::Centered, 1, 0, [0, 0], false).unwrap();
        let pos = PosInfo::new(1, 0, false, GameState::None, [0, 0]).unwrap();
        assert_eq!(match_id(&cube, &pos), "cAgAAAAAAAAA");
    }

    #[test]
    fn test_five_point_match() {
        let cube = CubeInfo::new(2, CubeOwner::Centered, 0, 5, [0, 0], false).unwrap();
        let pos = PosInfo::new(0, 0, false, GameState::Playing, [1, 2]).unwrap();
        assert_eq!(match_id(&cube, &pos), "MYGoAAAAAAAA");
    }

    #[test]
    fn test_crawford_game_with_owned_cube() {
        let cube = CubeInfo::new(4, CubeOwner::Player1, 1, 7, [3, 6], true).unwrap();
        let pos = PosInfo::new(1, 0, false, GameState::Playing, [6, 5]).unwrap();
        assert_eq!(match_id(&cube, &pos), "0gn3ADAAMAAA");
    }

    #[test]
    fn test_length_is_fixed() {
        let cube = CubeInfo::new(MAX_CUBE, CubeOwner::Player0, 1, MAX_SCORE, [MAX_SCORE; 2], true)
            .unwrap();
        let pos = PosInfo::new(1, 3, true, GameState::Dropped, [6, 6]).unwrap();
        assert_eq!(match_id(&cube, &pos).len(), MATCH_ID_LEN);
        assert_eq!(match_id(&CubeInfo::money(), &PosInfo::default()).len(), MATCH_ID_LEN);
    }

    #[test]
    fn test_cube_value_must_be_power_of_two() {
        for bad in [0, 3, 6, MAX_CUBE * 2] {
            let err = CubeInfo::new(bad, CubeOwner::Centered, 0, 0, [0, 0], false).unwrap_err();
            assert!(matches!(err, CodecError::Range { field: "cube value", .. }));
        }
    }

    #[test]
    fn test_field_ranges() {
        assert!(CubeInfo::new(1, CubeOwner::Centered, 2, 0, [0, 0], false).is_err());
        assert!(CubeInfo::new(1, CubeOwner::Centered, 0, MAX_SCORE + 1, [0, 0], false).is_err());
        assert!(CubeInfo::new(1, CubeOwner::Centered, 0, 5, [0, MAX_SCORE + 1], false).is_err());
        assert!(PosInfo::new(2, 0, false, GameState::Playing, [0, 0]).is_err());
        assert!(PosInfo::new(0, 4, false, GameState::Playing, [0, 0]).is_err());
        let err = PosInfo::new(0, 0, false, GameState::Playing, [7, 1]).unwrap_err();
        assert!(matches!(err, CodecError::Range { field: "dice", .. }));
    }

    #[test]
    fn test_cube_info_requires_pos_info() {
        let err = match_id_checked(&CubeInfo::money(), None).unwrap_err();
        assert!(matches!(err, CodecError::Shape { field: "match id", .. }));
        assert!(match_id_checked(&CubeInfo::money(), Some(&PosInfo::default())).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let cube: CubeInfo =
            serde_json::from_str(r#"{"cube_value": 2, "match_length": 5}"#).unwrap();
        assert_eq!(cube.cube_value(), 2);
        assert_eq!(cube.owner(), CubeOwner::Centered);
        assert!(serde_json::from_str::<CubeInfo>(r#"{"cube_value": 3}"#).is_err());

        let pos: PosInfo =
            serde_json::from_str(r#"{"game_state": "playing", "dice": [1, 2]}"#).unwrap();
        assert_eq!(pos.dice(), [1, 2]);
        assert!(serde_json::from_str::<PosInfo>(r#"{"dice": [0, 9]}"#).is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let err = serde_json::from_str::<CubeInfo>(r#"{"owner": "player0", "bogus": 1}"#)
            .unwrap_err();
        assert!(err.to_string().contains("bogus"), "got {err}");
        assert!(serde_json::from_str::<PosInfo>(r#"{"dice": [1, 2], "jacoby": true}"#).is_err());
    }
}
