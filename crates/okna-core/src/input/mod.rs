//! Parsing of the numbers and coordinate strings typed into the shell.

pub mod errors;
pub mod parse;

pub use errors::ParseError;
pub use parse::{parse_coordinates, parse_int, parse_optional_int};
