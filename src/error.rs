// src/error.rs

//! Error types shared by every stage of the update pipeline
//!
//! Only [`Error::ConfigError`] and [`Error::LoadError`] stop a run. Everything
//! else is scoped to a single recipe: the pipeline logs it, counts it and moves
//! on to the next recipe.

use std::path::PathBuf;
use thiserror::Error;

use crate::upstream::SourceRef;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed skip or source-override configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A recipe file could not be read or parsed
    #[error("Failed to load recipe {}: {reason}", .path.display())]
    LoadError { path: PathBuf, reason: String },

    /// Recipe text is not a well-formed recipe
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The version declared by the recipe itself is not a semantic version
    #[error("Recipe version '{version}' is not a semantic version: {reason}")]
    VersionParseError { version: String, reason: String },

    /// The latest-release lookup failed
    #[error("GitHub release lookup for {upstream} failed: {reason}")]
    ReleaseError { upstream: SourceRef, reason: String },

    /// Fetching a new artifact failed
    #[error("{}", format_download_error(.url, .status, .body, .reason))]
    DownloadError {
        url: String,
        status: Option<u16>,
        body: Option<String>,
        reason: String,
    },

    /// The patched recipe failed linting
    #[error("Linting failed:\n - {}", .0.join("\n - "))]
    ValidationError(Vec<String>),

    /// The recipe text could not be patched
    #[error("Patch error: {0}")]
    PatchError(String),

    /// Failed to build an HTTP client or other long-lived resource
    #[error("Initialization error: {0}")]
    InitError(String),

    /// Cloning the recipe repository failed
    #[error("Git error: {0}")]
    GitError(String),

    /// File system failure
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}

fn format_download_error(
    url: &str,
    status: &Option<u16>,
    body: &Option<String>,
    reason: &str,
) -> String {
    let mut msg = format!("Downloading package {url} failed: {reason}");
    if let Some(code) = status {
        msg.push_str(&format!("\n\nresponse code: {code}"));
    }
    if let Some(body) = body {
        msg.push_str(&format!("\nresponse body: {body}"));
    }
    msg
}
