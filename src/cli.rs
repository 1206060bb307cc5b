// Command line interface definition

use std::path::PathBuf;

use clap::Parser;

use renash::rename::config::DEFAULT_ALGORITHM;
use renash::rename::wildcard::{self, DEFAULT_PATTERN};
use renash::rename::{HashRegistry, HashUtilityError, RenameConfig};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MAINTAINER: &str = "lightrain";

/// Rename files to their hash value
#[derive(Parser, Debug)]
#[command(name = "renash", disable_version_flag = true)]
pub struct Cli {
    /// The directory to process. Use current directory if not set.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    #[arg(long, default_value = DEFAULT_ALGORITHM, help = algorithm_help())]
    pub algorithm: String,

    /// Dry run. Only prints info about what would be done
    #[arg(long)]
    pub dry: bool,

    /// A comma separated string of file name glob patterns. Example: "*.jpg,*.mp4"
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pub patterns: String,

    /// Quick run. Skips files that look already properly named
    #[arg(long)]
    pub quick: bool,

    /// Sets the digest length in bytes. Works only for algorithms blake2b and blake2s
    #[arg(long)]
    pub size: Option<usize>,

    /// Process directory recursively
    #[arg(long)]
    pub recursive: bool,

    /// Print output verbosely
    #[arg(long)]
    pub verbose: bool,

    /// List supported algorithms and exit
    #[arg(long)]
    pub list: bool,

    /// Print version
    #[arg(long)]
    pub version: bool,
}

fn algorithm_help() -> String {
    format!(
        "Sets the hash algorithm. Available: {}",
        HashRegistry::supported_algorithms_list()
    )
}

impl Cli {
    pub fn pattern_list(&self) -> Vec<String> {
        wildcard::split_patterns(&self.patterns)
    }

    /// Build the run configuration from the parsed arguments
    pub fn to_config(&self) -> Result<RenameConfig, HashUtilityError> {
        RenameConfig::builder(&self.directory)
            .patterns(self.pattern_list())
            .algorithm(&self.algorithm)
            .digest_size(self.size)
            .recursive(self.recursive)
            .quick(self.quick)
            .dry_run(self.dry)
            .verbose(self.verbose)
            .build()
    }
}
