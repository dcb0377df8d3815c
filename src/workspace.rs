// src/workspace.rs

//! Getting hold of a recipe repository
//!
//! Either a shallow clone into a temporary directory, removed when the
//! workspace is dropped, or an existing directory used in place.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::info;

pub struct RecipeWorkspace {
    // Held for its Drop; removes the clone
    _checkout: Option<TempDir>,
    recipes_dir: PathBuf,
}

impl RecipeWorkspace {
    /// Shallow-clone `url` and use `subdir` inside it as the recipe directory
    pub fn clone_repo(url: &str, subdir: &str) -> Result<Self> {
        let checkout = tempfile::Builder::new()
            .prefix("recipe-bump-")
            .tempdir()
            .map_err(|e| Error::IoError(format!("creating temp dir: {}", e)))?;

        info!("Cloning {} into {}", url, checkout.path().display());
        let output = Command::new("git")
            .args(["clone", "--depth", "1", "--quiet", url])
            .arg(checkout.path())
            .output()
            .map_err(|e| Error::GitError(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            return Err(Error::GitError(format!(
                "cloning {} failed: {}",
                url,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let recipes_dir = checkout.path().join(subdir);
        Ok(Self {
            _checkout: Some(checkout),
            recipes_dir,
        })
    }

    /// Use an existing directory of recipes
    pub fn local(dir: impl Into<PathBuf>) -> Self {
        Self {
            _checkout: None,
            recipes_dir: dir.into(),
        }
    }

    pub fn recipes_dir(&self) -> &Path {
        &self.recipes_dir
    }
}
