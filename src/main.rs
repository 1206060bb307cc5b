mod cli;

use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::Cli;
use renash::rename::path_utils;
use renash::rename::{HashRegistry, HashUtilityError, RenameEngine};

/// Exit status when the requested algorithm is not supported
const EXIT_UNSUPPORTED_ALGORITHM: u8 = 126;
/// Exit status for other setup failures, after printing usage
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.version {
        println!("renash {}", cli::VERSION);
        println!("Maintained by {}", cli::MAINTAINER);
        return Ok(ExitCode::SUCCESS);
    }

    if let Err(e) = renash::logging::init() {
        eprintln!("Warning: {}", e);
    }

    if cli.list {
        for info in HashRegistry::list_algorithms() {
            let kind = if info.variable_length { "variable, max" } else { "fixed" };
            println!("{:<10} {} ({} bits)", info.name, kind, info.output_bits);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let patterns = cli.pattern_list();
    println!(
        "Using pattern{}: {}",
        if patterns.len() > 1 { "s" } else { "" },
        patterns.join(",")
    );
    let absolute = path_utils::absolute_path(&cli.directory)?;
    println!("Using virtual base directory {}", absolute.display());
    if cli.recursive {
        println!("Processing recursively");
    }

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(HashUtilityError::UnsupportedAlgorithm { algorithm }) => {
            println!(
                "Unsupported algorithm: {}. Available: {}",
                algorithm,
                HashRegistry::supported_algorithms_list()
            );
            return Ok(ExitCode::from(EXIT_UNSUPPORTED_ALGORITHM));
        }
        Err(e) => return usage_failure(&e),
    };

    if config.dry_run() {
        println!("Running in dry mode");
    }
    if config.quick() {
        println!("Running in quick mode");
    }
    if config.verbose() {
        println!("Showing verbose output");
    }
    println!("Using algorithm {}", config.algorithm());
    if let Some(size) = config.digest_size() {
        println!("Using digest size {}", size);
    }

    let dry_run = config.dry_run();
    match RenameEngine::new(config).run() {
        Ok(stats) => {
            let summary = stats.summary(dry_run);
            if stats.errors > 0 {
                println!("{}", summary.yellow());
            } else {
                println!("{}", summary.green());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => usage_failure(&e),
    }
}

fn usage_failure(err: &HashUtilityError) -> Result<ExitCode> {
    eprintln!("{}", err.to_string().red());
    Cli::command().print_help()?;
    Ok(ExitCode::from(EXIT_USAGE))
}
