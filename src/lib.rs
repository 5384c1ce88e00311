//! bgid: backgammon position and match identifiers.
//!
//! This crate encodes board states and match context into the short
//! printable identifiers used by GNU Backgammon, and decodes them again.
//! It also parses and formats checker moves written as text.
//!
//! ## Modules
//!
//! - [`board`] - Checker placement and its unary bit packing
//! - [`position`] - 14-character position IDs
//! - [`key`] - 10-byte position keys
//! - [`match_id`] - Cube/score context and 12-character match IDs
//! - [`composite`] - `position:match` GNUbg IDs
//! - [`notation`] - Move text such as `8/5 6/5`
//! - [`symbols`] - The 64-symbol alphabet codec
//! - [`bitstream`] - Fixed-capacity bit writer and reader
//! - [`constants`] - Format widths and lengths
//!
//! Every codec is a pure function of its arguments.
//!
//! ## Example
//!
//! ```
//! use bgid::board::Board;
//! use bgid::position::{position_from_id, position_id};
//! use bgid::notation::parse_move;
//!
//! let id = position_id(&Board::starting()).unwrap();
//! assert_eq!(id, "4HPwATDgc/ABMA");
//! assert_eq!(position_from_id(&id).unwrap(), Board::starting());
//!
//! let steps = parse_move("8/5 6/5").unwrap();
//! assert_eq!((steps[0].from, steps[0].to), (8, 5));
//! ```

pub mod bitstream;
pub mod board;
pub mod composite;
pub mod constants;
pub mod error;
pub mod key;
pub mod logging;
pub mod match_id;
pub mod notation;
pub mod position;
pub mod symbols;

pub use error::{CodecError, Result};
