//! Checker moves as text, e.g. `"8/5 6/5"` or `"bar/22 13/7*"`.
//!
//! Points are numbered from the mover's side: 1 to 24, with 25 for a checker
//! entering from the bar and 0 for one bearing off. Every step moves towards
//! point 0.
//!
//! Besides plain `from/to` tokens the parser accepts the usual shorthand:
//! `-` as separator, `*` after a point that hits, chained tokens such as
//! `24/18/13`, and a `(n)` suffix repeating a token for doubles.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::constants::{BAR_POINT, MAX_POINT, MAX_STEPS, OFF_POINT};
use crate::error::{CodecError, Result};

const FIELD: &str = "move";

/// One checker moving from one point to another.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveStep {
    pub from: u8,
    pub to: u8,
}

impl MoveStep {
    pub fn new(from: u8, to: u8) -> Self {
        Self { from, to }
    }

    fn check(&self) -> Result<()> {
        let from_ok = (1..=BAR_POINT).contains(&self.from);
        let to_ok = self.to <= MAX_POINT as u8;
        if !from_ok || !to_ok || self.from <= self.to {
            return Err(CodecError::range(
                FIELD,
                format!("step {}/{} is not a move towards home", self.from, self.to),
            ));
        }
        Ok(())
    }
}

impl From<(u8, u8)> for MoveStep {
    fn from((from, to): (u8, u8)) -> Self {
        Self::new(from, to)
    }
}

impl fmt::Display for MoveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            BAR_POINT => write!(f, "bar/")?,
            n => write!(f, "{n}/")?,
        }
        match self.to {
            OFF_POINT => write!(f, "off"),
            n => write!(f, "{n}"),
        }
    }
}

/// Parse a move into its steps, in the order written.
pub fn parse_move(text: &str) -> Result<Vec<MoveStep>> {
    let mut steps = Vec::new();
    for token in text.split_whitespace() {
        steps.extend(parse_token(token)?);
        if steps.len() > MAX_STEPS {
            debug!(text, "move has too many steps");
            return Err(CodecError::format(
                FIELD,
                format!("more than {MAX_STEPS} steps in {text:?}"),
            ));
        }
    }
    if steps.is_empty() {
        return Err(CodecError::format(FIELD, "empty move"));
    }
    Ok(steps)
}

fn parse_token(token: &str) -> Result<Vec<MoveStep>> {
    let lower = token.to_ascii_lowercase();
    let (body, repeat) = split_repeat(&lower, token)?;

    let parts: Vec<&str> = body.split(['/', '-']).collect();
    if parts.len() < 2 {
        debug!(token, "move token has no separator");
        return Err(CodecError::format(
            FIELD,
            format!("{token:?} is not <from>/<to>"),
        ));
    }

    let mut points = Vec::with_capacity(parts.len());
    points.push(parse_origin(parts[0], token)?);
    for part in &parts[1..] {
        let part = part.strip_suffix('*').unwrap_or(part);
        points.push(parse_destination(part, token)?);
    }

    let mut steps = Vec::with_capacity((points.len() - 1) * repeat);
    for _ in 0..repeat {
        for pair in points.windows(2) {
            let step = MoveStep::new(pair[0], pair[1]);
            if step.check().is_err() {
                return Err(CodecError::format(
                    FIELD,
                    format!("{token:?} does not move towards home"),
                ));
            }
            steps.push(step);
        }
    }
    Ok(steps)
}

/// Split off a trailing `(n)` repeat count.
fn split_repeat<'a>(lower: &'a str, token: &str) -> Result<(&'a str, usize)> {
    let Some(inner) = lower.strip_suffix(')') else {
        return Ok((lower, 1));
    };
    let bad = || CodecError::format(FIELD, format!("bad repeat count in {token:?}"));
    let (body, count) = inner.rsplit_once('(').ok_or_else(bad)?;
    let count = parse_number(count).ok_or_else(bad)?;
    if count == 0 || count as usize > MAX_STEPS {
        return Err(bad());
    }
    Ok((body, count as usize))
}

fn parse_origin(part: &str, token: &str) -> Result<u8> {
    if part == "bar" {
        return Ok(BAR_POINT);
    }
    parse_point(part, token)
}

fn parse_destination(part: &str, token: &str) -> Result<u8> {
    if part == "off" {
        return Ok(OFF_POINT);
    }
    parse_point(part, token)
}

fn parse_point(part: &str, token: &str) -> Result<u8> {
    match parse_number(part) {
        Some(n) if (1..=MAX_POINT as u8).contains(&n) => Ok(n),
        Some(n) => Err(CodecError::format(
            FIELD,
            format!("point {n} in {token:?} is not in 1..={MAX_POINT}"),
        )),
        None => Err(CodecError::format(
            FIELD,
            format!("{part:?} in {token:?} is not a point"),
        )),
    }
}

fn parse_number(s: &str) -> Option<u8> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Format steps as text that [`parse_move`] turns back into the same steps.
///
/// Each step becomes its own `from/to` token; nothing is merged. `board`
/// (side 1 on roll) is only consulted to mark hits with `*`.
pub fn format_move(steps: &[MoveStep], board: &Board) -> Result<String> {
    if steps.is_empty() || steps.len() > MAX_STEPS {
        return Err(CodecError::shape(
            FIELD,
            format!("1..={MAX_STEPS} steps"),
            format!("{} steps", steps.len()),
        ));
    }

    let mut opponent = *board.side(0);
    let mut tokens = Vec::with_capacity(steps.len());
    for step in steps {
        step.check()?;
        let mut token = step.to_string();
        if step.to != OFF_POINT {
            let facing = MAX_POINT + 1 - step.to as usize;
            if opponent[facing] == 1 {
                opponent[facing] = 0;
                token.push('*');
            }
        }
        tokens.push(token);
    }
    Ok(tokens.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(pairs: &[(u8, u8)]) -> Vec<MoveStep> {
        pairs.iter().map(|&p| MoveStep::from(p)).collect()
    }

    #[test]
    fn test_parse_simple() {
        assert_eq!(parse_move("8/5 6/5").unwrap(), steps(&[(8, 5), (6, 5)]));
    }

    #[test]
    fn test_parse_dashes() {
        assert_eq!(parse_move("8-5 6-5").unwrap(), steps(&[(8, 5), (6, 5)]));
    }

    #[test]
    fn test_parse_bar_and_off() {
        assert_eq!(parse_move("bar/22").unwrap(), steps(&[(25, 22)]));
        assert_eq!(parse_move("BAR/20 4/off").unwrap(), steps(&[(25, 20), (4, 0)]));
    }

    #[test]
    fn test_parse_shorthand() {
        assert_eq!(parse_move("24/18/13").unwrap(), steps(&[(24, 18), (18, 13)]));
        assert_eq!(parse_move("13/7*").unwrap(), steps(&[(13, 7)]));
        assert_eq!(
            parse_move("8/5(2) 6/3").unwrap(),
            steps(&[(8, 5), (8, 5), (6, 3)])
        );
    }

    #[test]
    fn test_parse_rejects() {
        for bad in [
            "",
            "   ",
            "invalid move",
            "8/",
            "/5",
            "8//5",
            "25/20",
            "8/0",
            "8/25",
            "5/8",
            "8/8",
            "off/3",
            "8/bar",
            "8/5 6/5 4/1 3/1 2/1",
            "6/1(5)",
            "6/1(0)",
            "6/1(x)",
            "+8/5",
        ] {
            let err = parse_move(bad).unwrap_err();
            assert!(matches!(err, CodecError::Format { .. }), "{bad:?} gave {err:?}");
        }
    }

    #[test]
    fn test_format_roundtrip() {
        let board = Board::starting();
        let moves = parse_move("8/5 6/5").unwrap();
        let text = format_move(&moves, &board).unwrap();
        assert_eq!(text, "8/5 6/5");
        assert_eq!(parse_move(&text).unwrap(), moves);
    }

    #[test]
    fn test_format_does_not_merge() {
        let board = Board::starting();
        let moves = steps(&[(8, 5), (8, 5), (6, 5), (6, 5)]);
        assert_eq!(format_move(&moves, &board).unwrap(), "8/5 8/5 6/5 6/5");
    }

    #[test]
    fn test_format_marks_hits_once() {
        let mut sides = [[0u8; 25]; 2];
        // opponent blot on their point 18, which is our point 7
        sides[0][18] = 1;
        sides[1][13] = 2;
        let board = Board::from_raw(sides);
        let moves = steps(&[(13, 7), (13, 7)]);
        let text = format_move(&moves, &board).unwrap();
        assert_eq!(text, "13/7* 13/7");
        assert_eq!(parse_move(&text).unwrap(), moves);
    }

    #[test]
    fn test_format_bar_and_off() {
        let text = format_move(&steps(&[(25, 22), (3, 0)]), &Board::default()).unwrap();
        assert_eq!(text, "bar/22 3/off");
    }

    #[test]
    fn test_format_rejects() {
        let board = Board::starting();
        assert!(matches!(
            format_move(&[], &board).unwrap_err(),
            CodecError::Shape { .. }
        ));
        assert!(matches!(
            format_move(&steps(&[(5, 8)]), &board).unwrap_err(),
            CodecError::Range { .. }
        ));
        assert!(matches!(
            format_move(&steps(&[(26, 8)]), &board).unwrap_err(),
            CodecError::Range { .. }
        ));
    }
}
