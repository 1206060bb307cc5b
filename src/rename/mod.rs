// Rename Core Library
// Content hashing, name heuristics and the rename pipeline

pub mod config;
pub mod engine;
pub mod error;
pub mod file_io;
pub mod hash;
pub mod heuristic;
pub mod path_utils;
pub mod stats;
pub mod wildcard;

// Re-export commonly used types for convenience
pub use config::{RenameConfig, RenameConfigBuilder};
pub use engine::{RenameEngine, RenameEvent};
pub use error::HashUtilityError;
pub use hash::{Algorithm, AlgorithmInfo, HashComputer, HashRegistry, HashResult, Hasher};
pub use heuristic::looks_like_hash;
pub use stats::RenameStats;
