//! typegen CLI - Command-line interface for typegen
//!
//! Reads an introspected metadata snapshot and writes TypeScript declarations,
//! configured by a `typegen.config.toml` file and command-line flags.
//!
//! # Quick Start
//!
//! 1. Install the CLI: `cargo install typegen-cli`
//! 2. Run `typegen init` to create a `typegen.config.toml`
//! 3. Run `typegen generate` to write your types
//!
//! # Configuration
//!
//! ```toml
//! dialect = "postgresql"
//! backend = "interfaces"
//! metadata = "./metadata.json"
//! outFile = "./src/db/types.ts"
//! camelCase = true
//! excludePattern = ["*internal*"]
//!
//! [overrides]
//! "users.settings" = "Record<string, unknown>"
//! ```
//!
//! # Commands
//!
//! - `typegen init` - Create a new typegen.config.toml configuration file
//! - `typegen generate` - Write the output file
//! - `typegen generate --print` - Print the output instead of writing it
//! - `typegen generate --verify` - Fail if the output file is out of date
//! - `typegen check` - Validate the configuration and metadata snapshot

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use config::{Config, Error as ConfigError, Filter};
pub use error::CliError;
