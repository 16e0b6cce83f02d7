//! Board configuration
//!
//! Typed configuration plus a small line-oriented parser for the TOML
//! subset used by `board.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_board_config, ConfigError};
pub use types::*;
