// src/lib.rs

//! recipe-bump: keep package recipes on their latest upstream release
//!
//! For every recipe in a recipe repository, look up the latest GitHub
//! release of its upstream project. When that release is newer than the
//! recipe, download the new artifacts, hash them, and rewrite the recipe's
//! version, URLs and checksums in place.
//!
//! # Architecture
//!
//! - [`resolver`]: skip/pin rules, upstream detection, version comparison
//! - [`artifact`]: downloads and SHA-256 checksums
//! - [`recipe`]: recipe format, span-preserving patching, linting
//! - [`pipeline`]: per-recipe orchestration and failure accounting
//!
//! Processing is sequential and every per-recipe failure is isolated: one
//! broken recipe never stops the others from being updated.

pub mod artifact;
pub mod config;
mod error;
pub mod hash;
pub mod pipeline;
pub mod plan;
pub mod recipe;
pub mod resolver;
pub mod upstream;
pub mod version;
pub mod workspace;

pub use artifact::{ArtifactFetcher, ArtifactHasher, HttpArtifactFetcher};
pub use config::UpdateConfig;
pub use error::{Error, Result};
pub use hash::{hash_bytes, hash_reader, Checksum};
pub use pipeline::{RecipeOutcome, RunSummary, UpdatePipeline};
pub use plan::{PackageUpdate, UpdatePlan, VersionBump};
pub use recipe::{LoadedRecipe, Package, Recipe};
pub use resolver::{Resolution, SkipReason, VersionResolver};
pub use upstream::{GithubReleases, ReleaseInfo, ReleaseSource, SourceRef};
pub use workspace::RecipeWorkspace;
