// Run configuration for the rename engine

use std::path::{Path, PathBuf};

use super::error::HashUtilityError;
use super::hash::{Algorithm, HashRegistry};
use super::path_utils;
use super::wildcard;

/// Default algorithm name
pub const DEFAULT_ALGORITHM: &str = "sha256";

/// Validated, read-only settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameConfig {
    base_dir: PathBuf,
    patterns: Vec<String>,
    algorithm: Algorithm,
    digest_size: Option<usize>,
    recursive: bool,
    quick: bool,
    dry_run: bool,
    verbose: bool,
}

impl RenameConfig {
    /// Start building a configuration for `directory`
    pub fn builder(directory: impl Into<PathBuf>) -> RenameConfigBuilder {
        RenameConfigBuilder::new(directory)
    }

    /// Absolute base directory, resolved once at build time
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Requested digest size; always `None` for fixed-length algorithms
    pub fn digest_size(&self) -> Option<usize> {
        self.digest_size
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn quick(&self) -> bool {
        self.quick
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// Builder for `RenameConfig`
#[derive(Debug, Clone)]
pub struct RenameConfigBuilder {
    directory: PathBuf,
    patterns: Vec<String>,
    algorithm: String,
    digest_size: Option<usize>,
    recursive: bool,
    quick: bool,
    dry_run: bool,
    verbose: bool,
}

impl RenameConfigBuilder {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            patterns: vec![wildcard::DEFAULT_PATTERN.to_string()],
            algorithm: DEFAULT_ALGORITHM.to_string(),
            digest_size: None,
            recursive: false,
            quick: false,
            dry_run: false,
            verbose: false,
        }
    }

    /// Replace the pattern list
    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the pattern list from a comma separated string
    pub fn pattern_list(mut self, patterns: &str) -> Self {
        self.patterns = wildcard::split_patterns(patterns);
        self
    }

    /// Algorithm name, resolved case-insensitively by `build`
    pub fn algorithm(mut self, name: impl Into<String>) -> Self {
        self.algorithm = name.into();
        self
    }

    pub fn digest_size(mut self, size: Option<usize>) -> Self {
        self.digest_size = size;
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn quick(mut self, quick: bool) -> Self {
        self.quick = quick;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Resolve and validate the configuration
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` if the name is not in the registry
    /// * `InvalidDigestSize` if a variable-length size is out of range
    /// * `DirectoryNotFound` if the base directory does not exist
    pub fn build(self) -> Result<RenameConfig, HashUtilityError> {
        let algorithm = HashRegistry::resolve(&self.algorithm)?;

        // A size only means something for variable-length algorithms
        let digest_size = if algorithm.is_variable_length() {
            self.digest_size
        } else {
            None
        };
        algorithm.effective_size(digest_size)?;

        let base_dir = path_utils::absolute_path(&self.directory).map_err(|e| {
            HashUtilityError::from_io_error(e, "resolving directory", Some(self.directory.clone()))
        })?;
        if !base_dir.is_dir() {
            return Err(HashUtilityError::DirectoryNotFound { path: base_dir });
        }

        let patterns = if self.patterns.is_empty() {
            vec![wildcard::DEFAULT_PATTERN.to_string()]
        } else {
            self.patterns
        };

        Ok(RenameConfig {
            base_dir,
            patterns,
            algorithm,
            digest_size,
            recursive: self.recursive,
            quick: self.quick,
            dry_run: self.dry_run,
            verbose: self.verbose,
        })
    }
}

// Tests in tests/rename/config_tests.rs
