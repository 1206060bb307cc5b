// Hash computation module
// Provides the closed algorithm registry and digest computation over byte buffers

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use blake2::digest::{Update, VariableOutput};
use blake2::{Blake2bVar, Blake2sVar};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use sha3::{Sha3_256, Sha3_512};

use super::error::HashUtilityError;
use super::file_io;

/// Trait for hash algorithm implementations
pub trait Hasher {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Finalize the hash and return the result
    fn finalize(self: Box<Self>) -> Vec<u8>;
}

// Any fixed-output RustCrypto digest
pub struct FixedWrapper<D>(D);

impl<D: Digest> Hasher for FixedWrapper<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(self.0).to_vec()
    }
}

// BLAKE2b with caller-chosen output length (1..=64 bytes)
pub struct Blake2bVarWrapper(Blake2bVar);

impl Hasher for Blake2bVarWrapper {
    fn update(&mut self, data: &[u8]) {
        Update::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        let mut out = vec![0u8; self.0.output_size()];
        // The buffer is sized from the hasher itself, so this cannot fail
        let _ = self.0.finalize_variable(&mut out);
        out
    }
}

// BLAKE2s with caller-chosen output length (1..=32 bytes)
pub struct Blake2sVarWrapper(Blake2sVar);

impl Hasher for Blake2sVarWrapper {
    fn update(&mut self, data: &[u8]) {
        Update::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        let mut out = vec![0u8; self.0.output_size()];
        let _ = self.0.finalize_variable(&mut out);
        out
    }
}

/// A supported hash algorithm
///
/// Variant order is the registry order used in help and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Md5,
    Sha256,
    Sha512,
    Sha1,
    Sha3_256,
    Sha3_512,
    Blake2b,
    Blake2s,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Md5,
        Algorithm::Sha256,
        Algorithm::Sha512,
        Algorithm::Sha1,
        Algorithm::Sha3_256,
        Algorithm::Sha3_512,
        Algorithm::Blake2b,
        Algorithm::Blake2s,
    ];

    /// Registry name, as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha3_256 => "sha3_256",
            Algorithm::Sha3_512 => "sha3_512",
            Algorithm::Blake2b => "blake2b",
            Algorithm::Blake2s => "blake2s",
        }
    }

    /// Digest length in bytes; the maximum for variable-length algorithms
    pub fn digest_len(self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
            Algorithm::Sha256 | Algorithm::Sha3_256 | Algorithm::Blake2s => 32,
            Algorithm::Sha512 | Algorithm::Sha3_512 | Algorithm::Blake2b => 64,
        }
    }

    /// Whether the output length can be chosen per run
    pub fn is_variable_length(self) -> bool {
        matches!(self, Algorithm::Blake2b | Algorithm::Blake2s)
    }

    /// Resolve the digest size actually produced for a requested size
    ///
    /// Fixed-length algorithms ignore the request. Variable-length ones accept
    /// `1..=digest_len()` and default to `digest_len()`.
    pub fn effective_size(self, requested: Option<usize>) -> Result<usize, HashUtilityError> {
        if !self.is_variable_length() {
            return Ok(self.digest_len());
        }
        match requested {
            None => Ok(self.digest_len()),
            Some(size) if size >= 1 && size <= self.digest_len() => Ok(size),
            Some(size) => Err(HashUtilityError::InvalidDigestSize {
                algorithm: self.name().to_string(),
                size,
                max: self.digest_len(),
            }),
        }
    }

    /// Create a fresh hasher producing `effective_size(requested)` bytes
    pub fn hasher(self, requested: Option<usize>) -> Result<Box<dyn Hasher>, HashUtilityError> {
        let size = self.effective_size(requested)?;
        let invalid = || HashUtilityError::InvalidDigestSize {
            algorithm: self.name().to_string(),
            size,
            max: self.digest_len(),
        };

        let hasher: Box<dyn Hasher> = match self {
            Algorithm::Md5 => Box::new(FixedWrapper(Md5::new())),
            Algorithm::Sha256 => Box::new(FixedWrapper(Sha256::new())),
            Algorithm::Sha512 => Box::new(FixedWrapper(Sha512::new())),
            Algorithm::Sha1 => Box::new(FixedWrapper(Sha1::new())),
            Algorithm::Sha3_256 => Box::new(FixedWrapper(Sha3_256::new())),
            Algorithm::Sha3_512 => Box::new(FixedWrapper(Sha3_512::new())),
            Algorithm::Blake2b => {
                Box::new(Blake2bVarWrapper(Blake2bVar::new(size).map_err(|_| invalid())?))
            }
            Algorithm::Blake2s => {
                Box::new(Blake2sVarWrapper(Blake2sVar::new(size).map_err(|_| invalid())?))
            }
        };
        Ok(hasher)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = HashUtilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashRegistry::resolve(s)
    }
}

/// Information about a hash algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub output_bits: usize,
    pub variable_length: bool,
}

/// Registry for hash algorithms
pub struct HashRegistry;

impl HashRegistry {
    /// Names of all supported algorithms, in registry order
    pub fn supported_algorithms() -> Vec<&'static str> {
        Algorithm::ALL.iter().map(|a| a.name()).collect()
    }

    /// Supported names joined for help and error text
    pub fn supported_algorithms_list() -> String {
        Self::supported_algorithms().join(", ")
    }

    /// Look up an algorithm by name, ignoring case
    ///
    /// The error carries the lowercased input so callers can echo it.
    pub fn resolve(name: &str) -> Result<Algorithm, HashUtilityError> {
        let normalized = name.to_lowercase();
        Algorithm::ALL
            .iter()
            .copied()
            .find(|a| a.name() == normalized)
            .ok_or(HashUtilityError::UnsupportedAlgorithm { algorithm: normalized })
    }

    /// List all available hash algorithms
    pub fn list_algorithms() -> Vec<AlgorithmInfo> {
        Algorithm::ALL
            .iter()
            .map(|a| AlgorithmInfo {
                name: a.name(),
                output_bits: a.digest_len() * 8,
                variable_length: a.is_variable_length(),
            })
            .collect()
    }
}

/// Result of a hash computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashResult {
    pub algorithm: Algorithm,
    pub hash: String, // hex-encoded
    pub file_path: PathBuf,
}

/// Hash computer over in-memory buffers and files
pub struct HashComputer {
    buffer_size: usize,
}

impl HashComputer {
    /// Create a new HashComputer with default read buffer size (1MB)
    pub fn new() -> Self {
        Self {
            buffer_size: 1024 * 1024,
        }
    }

    /// Create a new HashComputer with custom read buffer size
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self { buffer_size }
    }

    /// Digest a byte buffer, returning lowercase hex of `2 * effective size` chars
    pub fn digest(
        &self,
        data: &[u8],
        algorithm: Algorithm,
        digest_size: Option<usize>,
    ) -> Result<String, HashUtilityError> {
        let mut hasher = algorithm.hasher(digest_size)?;
        hasher.update(data);
        Ok(bytes_to_hex(&hasher.finalize()))
    }

    /// Stream a file through the hasher and digest its content
    ///
    /// The file is fed to the hasher in chunks and never copied into a buffer
    /// of its own size. Read failures come back as `FileNotFound`,
    /// `PermissionDenied` or `IoError` with the "reading" operation.
    pub fn compute_hash(
        &self,
        path: &Path,
        algorithm: Algorithm,
        digest_size: Option<usize>,
    ) -> Result<HashResult, HashUtilityError> {
        let mut hasher = algorithm.hasher(digest_size)?;
        file_io::stream_contents(path, self.buffer_size, |chunk| hasher.update(chunk))?;
        let hash = bytes_to_hex(&hasher.finalize());

        Ok(HashResult {
            algorithm,
            hash,
            file_path: path.to_path_buf(),
        })
    }
}

impl Default for HashComputer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert bytes to hexadecimal string
fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// Tests in tests/rename/hash_tests.rs
