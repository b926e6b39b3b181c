//! typegen CLI - Main entry point

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use typegen_cli::commands::generate::GenerateArgs;
use typegen_cli::config::{CONFIG_FILE, Config};
use typegen_cli::error::CliError;
use typegen_codegen::Backend;
use typegen_types::Dialect;

/// typegen - TypeScript types from database metadata
#[derive(Parser, Debug)]
#[command(name = "typegen")]
#[command(author, version, about = "TypeScript types from introspected database metadata", long_about = None)]
struct Cli {
    /// Path to config file (default: typegen.config.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `typegen_codegen=trace` (default: RUST_LOG or warn)
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
enum Command {
    /// Generate TypeScript declarations from a metadata snapshot
    Generate {
        /// Metadata snapshot (JSON)
        #[arg(short, long, value_name = "PATH")]
        metadata: Option<PathBuf>,

        /// Output file
        #[arg(short, long, value_name = "PATH")]
        out_file: Option<PathBuf>,

        /// Source dialect (postgresql, mysql, sqlite, mssql)
        #[arg(short, long, value_parser = parse_dialect)]
        dialect: Option<Dialect>,

        /// Output backend (interfaces or zod)
        #[arg(short, long, value_parser = parse_backend)]
        backend: Option<Backend>,

        /// Convert table and column keys to camelCase
        #[arg(long)]
        camel_case: bool,

        /// Only keep tables matching `schema.table` globs
        #[arg(long, value_delimiter = ',')]
        include_pattern: Vec<String>,

        /// Drop tables matching `schema.table` globs
        #[arg(long, value_delimiter = ',')]
        exclude_pattern: Vec<String>,

        /// Coerce `IN (0, 1)` checks to booleans (zod backend)
        #[arg(long)]
        boolean_coercion: bool,

        /// Schemas whose names are not prefixed
        #[arg(long, value_delimiter = ',')]
        default_schema: Vec<String>,

        /// Print to stdout instead of writing the output file
        #[arg(long, conflicts_with = "verify")]
        print: bool,

        /// Fail if the output file differs from what would be generated
        #[arg(long)]
        verify: bool,
    },

    /// Validate configuration file
    Check,

    /// Initialize a new typegen.config.toml configuration file
    Init {
        /// Database dialect (postgresql, mysql, sqlite, mssql)
        #[arg(short, long, default_value = "postgresql", value_parser = parse_dialect)]
        dialect: Dialect,

        /// Output backend (interfaces or zod)
        #[arg(short, long, default_value = "interfaces", value_parser = parse_backend)]
        backend: Backend,
    },
}

/// Parse dialect argument
fn parse_dialect(s: &str) -> Result<Dialect, String> {
    s.parse().map_err(|e: typegen_types::DialectParseError| e.to_string())
}

/// Parse backend argument
fn parse_backend(s: &str) -> Result<Backend, String> {
    Backend::parse(s).ok_or_else(|| format!("unknown backend '{s}' (expected interfaces or zod)"))
}

fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr subscriber; `--log-level` wins over `RUST_LOG`
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Init { dialect, backend } => {
            let path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
            typegen_cli::commands::init::run(&path, dialect, backend)
        }
        Command::Generate {
            metadata,
            out_file,
            dialect,
            backend,
            camel_case,
            include_pattern,
            exclude_pattern,
            boolean_coercion,
            default_schema,
            print,
            verify,
        } => {
            let config = load_config(cli.config.as_deref())?;
            typegen_cli::commands::generate::run(
                &config,
                GenerateArgs {
                    metadata,
                    out_file,
                    dialect,
                    backend,
                    camel_case,
                    include_pattern,
                    exclude_pattern,
                    boolean_coercion,
                    default_schemas: default_schema,
                    print,
                    verify,
                },
            )
        }
        Command::Check => {
            let config = load_config(cli.config.as_deref())?;
            typegen_cli::commands::check::run(&config)
        }
    }
}

/// An explicit `--config` must exist; the default file is optional
fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    match path {
        Some(p) => Config::load_from(p).map_err(Into::into),
        None => Config::load_or_default().map_err(Into::into),
    }
}
