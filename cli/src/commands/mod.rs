//! CLI command implementations
//!
//! Each command module implements a specific typegen CLI command.

pub mod check;
pub mod generate;
pub mod init;
