// src/config.rs

//! Run configuration
//!
//! [`UpdateConfig`] is built once from the command line, validated, and then
//! only ever borrowed by the pipeline stages.

use crate::error::{Error, Result};
use crate::upstream::{SourceRef, DEFAULT_GITHUB_API_URL};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use std::time::Duration;

/// Default HTTP timeout for release lookups and artifact downloads
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(300);

static RECIPE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.+@-]+$").expect("valid regex"));

static SOURCE_OVERRIDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[A-Za-z0-9_.+@-]+):(?P<owner>[A-Za-z0-9_.-]+)/(?P<repo>[A-Za-z0-9_.-]+)$")
        .expect("valid regex")
});

/// Whether `name` is a well-formed recipe name
pub fn is_valid_recipe_name(name: &str) -> bool {
    RECIPE_NAME.is_match(name)
}

/// Immutable configuration for one run
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Recipes never to update
    pub skip: HashSet<String>,
    /// Explicit upstream repositories, keyed by recipe name
    pub overrides: HashMap<String, SourceRef>,
    /// Plan, hash and validate without writing recipe files
    pub dry_run: bool,
    /// Timeout applied to every HTTP request
    pub http_timeout: Duration,
    /// GitHub REST API base URL
    pub github_api_url: String,
    /// Token for authenticated GitHub API requests
    pub github_token: Option<String>,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            skip: HashSet::new(),
            overrides: HashMap::new(),
            dry_run: false,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_token: None,
        }
    }
}

impl UpdateConfig {
    /// Build a config from the raw skip and override strings
    pub fn from_lists(skip: &str, overrides: &str) -> Result<Self> {
        Ok(Self {
            skip: parse_skip_list(skip)?,
            overrides: parse_source_overrides(overrides)?,
            ..Self::default()
        })
    }

    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip.contains(name)
    }

    pub fn source_override(&self, name: &str) -> Option<&SourceRef> {
        self.overrides.get(name)
    }
}

/// Split a comma-separated list, tolerating one trailing comma
fn split_list(list: &str) -> impl Iterator<Item = &str> {
    let list = list.trim();
    let list = list.strip_suffix(',').unwrap_or(list);
    list.split(',')
        .map(str::trim)
        .filter(move |_| !list.is_empty())
}

/// Parse a skip list such as `helm,kubectl,`
pub fn parse_skip_list(list: &str) -> Result<HashSet<String>> {
    let mut skip = HashSet::new();
    for name in split_list(list) {
        if !is_valid_recipe_name(name) {
            return Err(Error::ConfigError(format!(
                "skip entry '{}' is not a recipe name",
                name
            )));
        }
        skip.insert(name.to_string());
    }
    Ok(skip)
}

/// Parse source overrides such as `vault:hashicorp/vault,kubectl:kubernetes/kubernetes`
pub fn parse_source_overrides(list: &str) -> Result<HashMap<String, SourceRef>> {
    let mut overrides = HashMap::new();
    for entry in split_list(list) {
        let caps = SOURCE_OVERRIDE.captures(entry).ok_or_else(|| {
            Error::ConfigError(format!(
                "source override '{}' does not match 'name:owner/repo'",
                entry
            ))
        })?;
        overrides.insert(
            caps["name"].to_string(),
            SourceRef::new(&caps["owner"], &caps["repo"]),
        );
    }
    Ok(overrides)
}
