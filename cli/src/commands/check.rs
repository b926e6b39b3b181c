//! Check command - validates configuration, filters and the metadata snapshot

use typegen_codegen::TableFilter;

use crate::commands::generate::load_metadata;
use crate::config::Config;
use crate::error::CliError;
use crate::output::{self, Status};

pub fn run(config: &Config) -> Result<(), CliError> {
    println!("{}", output::heading("Checking configuration..."));
    println!();

    let mut warnings = Vec::new();
    let mut has_errors = false;

    println!("{}", output::field("Dialect", config.dialect));
    println!("{}", output::field("Backend", config.backend()));
    println!("{}", output::field("Metadata", config.metadata.display()));
    println!("{}", output::field("Output", config.out_file.display()));

    // Filters
    println!();
    print!("{}", output::step("Filters"));
    let options = config.generate_options();
    let filter = match TableFilter::new(&options.include_patterns, &options.exclude_patterns) {
        Ok(filter) => {
            println!("{}", Status::Ok);
            for pattern in config.patterns() {
                println!("    {}", output::muted(pattern));
            }
            Some(filter)
        }
        Err(e) => {
            println!("{}", Status::Error);
            println!("    {e}");
            has_errors = true;
            None
        }
    };

    // Metadata snapshot
    println!();
    print!("{}", output::step("Metadata"));
    if config.metadata.exists() {
        match load_metadata(&config.metadata) {
            Ok(metadata) => {
                println!("{}", Status::Ok);
                println!(
                    "    {} tables, {} enums",
                    metadata.tables.len(),
                    metadata.enums.len()
                );
                if let Some(filter) = &filter {
                    let kept = filter.apply(&metadata.tables).len();
                    println!("    {kept} tables after filters");
                    if kept == 0 && !metadata.tables.is_empty() {
                        warnings.push("Filters exclude every table".to_string());
                    }
                }
            }
            Err(e) => {
                println!("{}", Status::Error);
                println!("    {e}");
                has_errors = true;
            }
        }
    } else {
        println!("{}", Status::Missing);
        warnings.push(format!(
            "Metadata snapshot {} doesn't exist yet",
            config.metadata.display()
        ));
    }

    // Summary
    println!();
    if has_errors {
        println!("{}", output::error("Configuration has errors."));
        Err(CliError::Other("config check failed".into()))
    } else if warnings.is_empty() {
        println!("{}", output::success("Configuration OK."));
        Ok(())
    } else {
        println!(
            "{}",
            output::warning(&format!("{} warning(s):", warnings.len()))
        );
        for w in warnings {
            println!("  - {w}");
        }
        Ok(())
    }
}
