// src/hash.rs

//! SHA-256 checksums for recipe artifacts
//!
//! Recipes pin every downloadable artifact with a SHA-256 digest written as
//! 64 lowercase hex characters. This module computes those digests, either
//! from a byte slice or by streaming a reader, and validates checksum strings
//! found in recipe files.

use sha2::{Digest, Sha256};
use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;

/// Length of a checksum in hex characters (SHA-256, 32 bytes)
pub const CHECKSUM_HEX_LEN: usize = 64;

/// Buffer size for streaming reads (8 KB)
const STREAM_BUFFER_SIZE: usize = 8192;

/// Checksum parse errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumError {
    /// Checksum string has the wrong length
    InvalidLength { expected: usize, got: usize },
    /// Checksum string contains characters outside `[0-9a-f]`
    InvalidHex(String),
}

impl fmt::Display for ChecksumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { expected, got } => {
                write!(f, "invalid checksum length: expected {}, got {}", expected, got)
            }
            Self::InvalidHex(s) => write!(f, "checksum must be lowercase hex: {}", s),
        }
    }
}

impl std::error::Error for ChecksumError {}

/// A SHA-256 checksum, always 64 lowercase hex characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    /// Validate a checksum string as written in a recipe
    ///
    /// Uppercase hex is rejected rather than normalized: recipe files are
    /// expected to carry the canonical lowercase form.
    pub fn parse(value: &str) -> Result<Self, ChecksumError> {
        if value.len() != CHECKSUM_HEX_LEN {
            return Err(ChecksumError::InvalidLength {
                expected: CHECKSUM_HEX_LEN,
                got: value.len(),
            });
        }

        if !value.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
            return Err(ChecksumError::InvalidHex(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    /// Get the checksum as a hex string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the checksum, returning the hex string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Checksum {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Incremental SHA-256 hasher
#[derive(Default)]
pub struct Hasher {
    state: Sha256,
}

impl Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the hasher with more data
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Finalize and return the checksum
    pub fn finalize(self) -> Checksum {
        Checksum(format!("{:x}", self.state.finalize()))
    }
}

/// Compute the checksum of a byte slice
pub fn hash_bytes(data: &[u8]) -> Checksum {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Compute the checksum of everything a reader yields
///
/// Streams in fixed-size chunks, so artifacts of any size are hashed without
/// being buffered in memory.
pub fn hash_reader<R: Read + ?Sized>(reader: &mut R) -> io::Result<Checksum> {
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; STREAM_BUFFER_SIZE];

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hasher.finalize())
}
