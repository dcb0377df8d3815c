// src/resolver.rs

//! Deciding whether a recipe is out of date
//!
//! Resolution order for a recipe:
//! 1. Skip-listed or pinned (`name@version`) recipes stop here, offline.
//! 2. The upstream repository comes from a configured override, else the
//!    first package URL, else the homepage.
//! 3. The latest release tag is fetched and compared by semver precedence.
//!
//! A recipe whose own version does not parse is an error. A release tag that
//! does not parse is only a skip: plenty of projects tag with dates or names.

use crate::config::UpdateConfig;
use crate::error::{Error, Result};
use crate::plan::VersionBump;
use crate::recipe::Recipe;
use crate::upstream::{ReleaseSource, SourceRef};
use crate::version::{format_like, is_newer, parse_version};
use std::fmt;

/// Why a recipe was not considered for an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Named in the skip list
    Listed,
    /// Name carries the pin marker
    Pinned,
    /// No GitHub repository could be determined
    NoUpstream,
    /// The latest release tag is not a semantic version
    UnparsableTag(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listed => write!(f, "skipping"),
            Self::Pinned => write!(f, "skipping pinned version"),
            Self::NoUpstream => write!(f, "no available github release"),
            Self::UnparsableTag(tag) => write!(f, "cannot parse semver for: {}", tag),
        }
    }
}

/// Outcome of resolving one recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Skipped(SkipReason),
    UpToDate { current: String, latest: String },
    Outdated(VersionBump),
}

pub struct VersionResolver<'a> {
    config: &'a UpdateConfig,
    releases: &'a dyn ReleaseSource,
}

impl<'a> VersionResolver<'a> {
    pub fn new(config: &'a UpdateConfig, releases: &'a dyn ReleaseSource) -> Self {
        Self { config, releases }
    }

    /// Pick the upstream repository for a recipe
    pub fn upstream_source(&self, recipe: &Recipe) -> Option<SourceRef> {
        if let Some(source) = self.config.source_override(&recipe.name) {
            return Some(source.clone());
        }

        recipe
            .packages
            .first()
            .and_then(|pkg| SourceRef::from_github_url(&pkg.download_url(&recipe.version)))
            .or_else(|| SourceRef::from_github_url(&recipe.homepage))
    }

    pub fn resolve(&self, recipe: &Recipe) -> Result<Resolution> {
        if self.config.is_skipped(&recipe.name) {
            return Ok(Resolution::Skipped(SkipReason::Listed));
        }
        if recipe.is_pinned() {
            return Ok(Resolution::Skipped(SkipReason::Pinned));
        }
        if recipe.packages.is_empty() {
            return Err(Error::ValidationError(vec![
                "at least one package is required".to_string(),
            ]));
        }

        let Some(source) = self.upstream_source(recipe) else {
            return Ok(Resolution::Skipped(SkipReason::NoUpstream));
        };

        let release = self.releases.latest_release(&source)?;

        let current = parse_version(&recipe.version).map_err(|e| Error::VersionParseError {
            version: recipe.version.clone(),
            reason: e.to_string(),
        })?;

        let Ok(latest) = parse_version(&release.tag) else {
            return Ok(Resolution::Skipped(SkipReason::UnparsableTag(release.tag)));
        };

        if !is_newer(&latest, &current) {
            return Ok(Resolution::UpToDate {
                current: recipe.version.clone(),
                latest: release.tag,
            });
        }

        Ok(Resolution::Outdated(VersionBump {
            source,
            old_version: recipe.version.clone(),
            new_version: format_like(&latest, &recipe.version),
        }))
    }
}
