//! bgid: encode and decode backgammon identifiers from the command line.
//!
//! ## Usage
//!
//! - `bgid encode --board '[[...25 counts...],[...25 counts...]]'`
//! - `bgid decode 4HPwATDgc/ABMA`
//! - `bgid match-id --cube-info '{"cube_value":2,"match_length":5}' --pos-info '{}'`
//! - `bgid gnubg-id --board ... --cube-info ... --pos-info ...`
//! - `bgid parse-move "8/5 6/5"`
//! - `bgid format-move --move "6/2(2)"` or `--steps '[[8,5],[6,5]]'`
//! - `bgid random --seed 42`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use bgid::board::{Board, random_board};
use bgid::composite::{composite_id_checked, split_composite_id};
use bgid::key::{position_from_key_values, position_key};
use bgid::logging::init_logging;
use bgid::match_id::{CubeInfo, PosInfo, match_id_checked};
use bgid::notation::{MoveStep, format_move, parse_move};
use bgid::position::{position_from_id, position_id};

/// Backgammon position, match and move identifiers
#[derive(Parser)]
#[command(name = "bgid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a board (JSON, two arrays of 25 counts) as position ID and key
    Encode {
        #[arg(long)]
        board: String,
    },
    /// Decode a 14-character position ID
    Decode { id: String },
    /// Encode a board as a 10-byte position key
    Key {
        #[arg(long)]
        board: String,
    },
    /// Decode a position key given as comma-separated integers
    FromKey { key: String },
    /// Encode a match ID from cube info and position info (JSON)
    MatchId {
        #[arg(long)]
        cube_info: String,
        #[arg(long)]
        pos_info: Option<String>,
    },
    /// Encode a GNUbg ID (position:match); all three inputs are required
    GnubgId {
        #[arg(long)]
        board: String,
        #[arg(long)]
        cube_info: Option<String>,
        #[arg(long)]
        pos_info: Option<String>,
    },
    /// Split a GNUbg ID and decode its position part
    Split { id: String },
    /// Parse move text into (from, to) steps
    ParseMove { text: String },
    /// Format a move in canonical notation, marking hits
    FormatMove {
        /// Move text, e.g. "13/7*/5"
        #[arg(
            long = "move",
            id = "move",
            conflicts_with = "steps",
            required_unless_present = "steps"
        )]
        text: Option<String>,
        /// Steps as JSON pairs, e.g. [[8,5],[6,5]]
        #[arg(long)]
        steps: Option<String>,
        /// Board used to mark hits; defaults to the starting position
        #[arg(long)]
        board: Option<String>,
    },
    /// Generate random positions with their IDs
    Random {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode { board } => {
            let board = parse_board(&board)?;
            let id = position_id(&board)?;
            let key = position_key(&board)?;
            let check = board.check_position().err().map(|e| e.to_string());
            if cli.json {
                print_json(&json!({ "position_id": id, "key": key, "check": check }))?;
            } else {
                println!("{id}");
                println!("{key}");
                if let Some(problem) = check {
                    println!("warning: {problem}");
                }
            }
        }
        Commands::Decode { id } => {
            let board = position_from_id(&id).context("cannot decode position id")?;
            print_board(&board, cli.json)?;
        }
        Commands::Key { board } => {
            let key = position_key(&parse_board(&board)?)?;
            if cli.json {
                print_json(&json!({ "key": key }))?;
            } else {
                println!("{key}");
            }
        }
        Commands::FromKey { key } => {
            let values = key
                .split(',')
                .map(|v| v.trim().parse::<i64>())
                .collect::<Result<Vec<_>, _>>()
                .context("key must be comma-separated integers")?;
            let board = position_from_key_values(&values)?;
            print_board(&board, cli.json)?;
        }
        Commands::MatchId {
            cube_info,
            pos_info,
        } => {
            let cube = parse_cube_info(&cube_info)?;
            let pos = pos_info.as_deref().map(parse_pos_info).transpose()?;
            let id = match_id_checked(&cube, pos.as_ref())?;
            if cli.json {
                print_json(&json!({ "match_id": id }))?;
            } else {
                println!("{id}");
            }
        }
        Commands::GnubgId {
            board,
            cube_info,
            pos_info,
        } => {
            let board = parse_board(&board)?;
            let cube = cube_info.as_deref().map(parse_cube_info).transpose()?;
            let pos = pos_info.as_deref().map(parse_pos_info).transpose()?;
            let id = composite_id_checked(&board, cube.as_ref(), pos.as_ref())?;
            if cli.json {
                print_json(&json!({ "gnubg_id": id }))?;
            } else {
                println!("{id}");
            }
        }
        Commands::Split { id } => {
            let (position, matched) = split_composite_id(&id)?;
            let board = position_from_id(position)?;
            if cli.json {
                print_json(&json!({
                    "position_id": position,
                    "match_id": matched,
                    "board": board,
                }))?;
            } else {
                println!("position id: {position}");
                println!("match id:    {matched}");
                print!("{board}");
            }
        }
        Commands::ParseMove { text } => {
            let steps = parse_move(&text)?;
            if cli.json {
                print_json(&json!(steps))?;
            } else {
                let pairs: Vec<String> = steps
                    .iter()
                    .map(|s| format!("({}, {})", s.from, s.to))
                    .collect();
                println!("{}", pairs.join(" "));
            }
        }
        Commands::FormatMove { text, steps, board } => {
            let steps = match (text, steps) {
                (Some(text), _) => parse_move(&text)?,
                (None, Some(json)) => {
                    let pairs: Vec<(u8, u8)> = serde_json::from_str(&json)
                        .context("steps must be JSON [[from, to], ...]")?;
                    pairs.into_iter().map(MoveStep::from).collect()
                }
                (None, None) => anyhow::bail!("either --move or --steps is required"),
            };
            let board = match board {
                Some(b) => parse_board(&b)?,
                None => Board::starting(),
            };
            let formatted = format_move(&steps, &board)?;
            if cli.json {
                print_json(&json!({ "move": formatted, "steps": steps }))?;
            } else {
                println!("{formatted}");
            }
        }
        Commands::Random { seed, count } => {
            let mut rng = match seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };
            info!(count, ?seed, "generating random positions");
            for _ in 0..count {
                let board = random_board(&mut rng);
                let id = position_id(&board)?;
                if cli.json {
                    print_json(&json!({ "position_id": id, "board": board }))?;
                } else {
                    println!("{id}");
                    print!("{board}");
                }
            }
        }
    }
    Ok(())
}

fn parse_board(text: &str) -> Result<Board> {
    let sides: Vec<Vec<u32>> =
        serde_json::from_str(text).context("board must be JSON: two arrays of 25 counts")?;
    Ok(Board::from_sides(&sides)?)
}

fn parse_cube_info(text: &str) -> Result<CubeInfo> {
    serde_json::from_str(text).context("invalid cube info")
}

fn parse_pos_info(text: &str) -> Result<PosInfo> {
    serde_json::from_str(text).context("invalid position info")
}

fn print_board(board: &Board, as_json: bool) -> Result<()> {
    if as_json {
        print_json(&json!({ "board": board }))
    } else {
        print!("{board}");
        Ok(())
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_move_takes_move_text() {
        let cli =
            Cli::try_parse_from(["bgid", "format-move", "--move", "13/7*/5", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::FormatMove { text, steps, board } => {
                assert_eq!(text.as_deref(), Some("13/7*/5"));
                assert!(steps.is_none() && board.is_none());
            }
            _ => panic!("expected format-move"),
        }
    }

    #[test]
    fn test_format_move_takes_steps_json() {
        let cli = Cli::try_parse_from(["bgid", "format-move", "--steps", "[[8,5],[6,5]]"]).unwrap();
        assert!(matches!(cli.command, Commands::FormatMove { text: None, steps: Some(_), .. }));
    }

    #[test]
    fn test_format_move_needs_exactly_one_input() {
        assert!(Cli::try_parse_from(["bgid", "format-move"]).is_err());
        assert!(
            Cli::try_parse_from(["bgid", "format-move", "--move", "8/5", "--steps", "[[8,5]]"])
                .is_err()
        );
    }
}
