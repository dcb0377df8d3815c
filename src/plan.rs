// src/plan.rs

//! Per-recipe update plans
//!
//! A plan lives only while one recipe is processed: the hasher builds it,
//! the patcher applies it, and it is dropped afterwards.

use crate::upstream::SourceRef;

/// Answer from the resolver when a newer release exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBump {
    pub source: SourceRef,
    /// Version exactly as declared in the recipe
    pub old_version: String,
    /// Release tag as a semantic version, prefixed like `old_version`
    pub new_version: String,
}

/// New values for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUpdate {
    /// URL as written in the recipe before the update
    pub old_url: String,
    /// URL as it will be written in the recipe
    pub new_url: String,
    /// `new_url` with `%(version)s` expanded; what actually gets downloaded
    pub fetch_url: String,
    pub old_checksum: String,
    pub new_checksum: String,
}

/// Everything needed to rewrite one recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    pub old_version: String,
    pub new_version: String,
    pub packages: Vec<PackageUpdate>,
}
