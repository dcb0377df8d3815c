// src/recipe/format.rs

//! Recipe file format definitions
//!
//! A recipe is a small TOML file describing one package and the artifacts
//! that can be downloaded for it:
//!
//! ```toml
//! name = "helm"
//! description = "The Kubernetes package manager"
//! version = "3.2.1"
//! homepage = "https://github.com/helm/helm"
//!
//! [[packages]]
//! os = "linux"
//! arch = "amd64"
//! url = "https://get.helm.sh/helm-v3.2.1-linux-amd64.tar.gz"
//! checksum = "018f9908cb950701a5d59e757653a790c66d8eda288625dbb185354ca6f41f6b"
//! ```
//!
//! Package URLs may use `%(version)s` in place of the literal version.

use serde::Deserialize;
use std::path::PathBuf;

/// Placeholder expanded to the recipe version inside package URLs
pub const VERSION_TEMPLATE: &str = "%(version)s";

/// Marks a recipe locked to a specific version (`name@version`)
pub const PIN_MARKER: char = '@';

/// A package recipe
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Recipe {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub version: String,

    #[serde(default)]
    pub homepage: String,

    #[serde(default)]
    pub packages: Vec<Package>,
}

/// One downloadable artifact of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub os: Option<String>,

    #[serde(default)]
    pub arch: Option<String>,

    /// Download URL, possibly containing `%(version)s`
    pub url: String,

    /// SHA-256 of the artifact
    pub checksum: String,
}

impl Recipe {
    /// Whether the name carries the pin marker
    pub fn is_pinned(&self) -> bool {
        self.name.contains(PIN_MARKER)
    }
}

impl Package {
    /// Whether the URL uses the `%(version)s` placeholder
    pub fn is_templated(&self) -> bool {
        self.url.contains(VERSION_TEMPLATE)
    }

    /// The URL with `%(version)s` expanded for `version`
    pub fn download_url(&self, version: &str) -> String {
        self.url.replace(VERSION_TEMPLATE, version)
    }
}

/// A recipe together with the file it was loaded from
#[derive(Debug, Clone)]
pub struct LoadedRecipe {
    pub path: PathBuf,
    pub recipe: Recipe,
}
