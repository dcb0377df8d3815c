// src/pipeline.rs

//! The per-recipe update pipeline
//!
//! Recipes are processed one at a time, in load order:
//! resolve -> hash -> patch -> validate -> commit. A failure anywhere is
//! logged against the recipe and counted; the run always continues with the
//! next recipe.

use crate::artifact::{ArtifactFetcher, ArtifactHasher};
use crate::config::UpdateConfig;
use crate::error::Result;
use crate::plan::UpdatePlan;
use crate::recipe::{update_recipe_file, LoadedRecipe};
use crate::resolver::{Resolution, SkipReason, VersionResolver};
use crate::upstream::ReleaseSource;
use tracing::{debug, error, info, warn};

/// What happened to one recipe that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeOutcome {
    Updated(UpdatePlan),
    UpToDate,
    Skipped(SkipReason),
}

/// Aggregated results of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub updated: Vec<String>,
    pub up_to_date: Vec<String>,
    pub skipped: Vec<String>,
    /// Recipe name and error message
    pub failed: Vec<(String, String)>,
}

impl RunSummary {
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// Process exit code: the failure count, saturated so it cannot wrap to 0
    pub fn exit_code(&self) -> i32 {
        self.failure_count().min(255) as i32
    }
}

pub struct UpdatePipeline<'a> {
    config: &'a UpdateConfig,
    resolver: VersionResolver<'a>,
    hasher: ArtifactHasher<'a>,
}

impl<'a> UpdatePipeline<'a> {
    pub fn new(
        config: &'a UpdateConfig,
        releases: &'a dyn ReleaseSource,
        fetcher: &'a dyn ArtifactFetcher,
    ) -> Self {
        Self {
            config,
            resolver: VersionResolver::new(config, releases),
            hasher: ArtifactHasher::new(fetcher),
        }
    }

    /// Run one recipe through every stage
    pub fn process(&self, loaded: &LoadedRecipe) -> Result<RecipeOutcome> {
        let recipe = &loaded.recipe;

        let bump = match self.resolver.resolve(recipe)? {
            Resolution::Skipped(reason) => {
                warn!("{}: {}", recipe.name, reason);
                return Ok(RecipeOutcome::Skipped(reason));
            }
            Resolution::UpToDate { current, latest } => {
                debug!("{}: {} is current (latest release {})", recipe.name, current, latest);
                return Ok(RecipeOutcome::UpToDate);
            }
            Resolution::Outdated(bump) => bump,
        };

        info!(
            "updating: {} {} -> {} (from {})",
            recipe.name, bump.old_version, bump.new_version, bump.source
        );

        let plan = self.hasher.plan(recipe, &bump)?;
        update_recipe_file(&loaded.path, &plan, self.config.dry_run)?;

        if self.config.dry_run {
            info!("{}: would update to {} (dry run)", recipe.name, plan.new_version);
        } else {
            info!("{}: updated to {}", recipe.name, plan.new_version);
        }
        Ok(RecipeOutcome::Updated(plan))
    }

    /// Process every recipe, never stopping on a per-recipe failure
    pub fn run(&self, recipes: &[LoadedRecipe]) -> RunSummary {
        let mut summary = RunSummary::default();

        for loaded in recipes {
            let name = loaded.recipe.name.clone();
            match self.process(loaded) {
                Ok(RecipeOutcome::Updated(_)) => summary.updated.push(name),
                Ok(RecipeOutcome::UpToDate) => summary.up_to_date.push(name),
                Ok(RecipeOutcome::Skipped(_)) => summary.skipped.push(name),
                Err(e) => {
                    error!("{}: {}", name, e);
                    summary.failed.push((name, e.to_string()));
                }
            }
        }

        info!(
            "{} recipes: {} updated, {} up to date, {} skipped, {} failed",
            recipes.len(),
            summary.updated.len(),
            summary.up_to_date.len(),
            summary.skipped.len(),
            summary.failed.len()
        );
        summary
    }
}
