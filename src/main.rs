// src/main.rs

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use recipe_bump::{
    recipe, GithubReleases, HttpArtifactFetcher, RecipeWorkspace, RunSummary, UpdateConfig,
    UpdatePipeline,
};
use std::time::Duration;
use tracing::info;

fn build_config(cli: &Cli) -> Result<UpdateConfig> {
    let mut config = UpdateConfig::from_lists(&cli.skip, &cli.release)?;
    config.dry_run = cli.dry_run;
    config.http_timeout = Duration::from_secs(cli.timeout);
    config.github_api_url = cli.github_api_url.clone();
    config.github_token = cli.github_token.clone();
    Ok(config)
}

/// Everything up to and including the pipeline run
///
/// The workspace (and any temporary clone) is dropped before this returns.
fn run(cli: &Cli) -> Result<RunSummary> {
    let config = build_config(cli)?;

    let workspace = match (&cli.rig, &cli.recipes_dir) {
        (_, Some(dir)) => RecipeWorkspace::local(dir),
        (Some(url), None) => RecipeWorkspace::clone_repo(url, &cli.recipe_subdir)?,
        (None, None) => anyhow::bail!("either --rig or --recipes-dir is required"),
    };

    let recipes = recipe::load_recipes(workspace.recipes_dir())
        .with_context(|| format!("loading recipes from {}", workspace.recipes_dir().display()))?;
    info!("Loaded {} recipes", recipes.len());

    let releases = GithubReleases::new(
        &config.github_api_url,
        config.github_token.clone(),
        config.http_timeout,
    )?;
    let fetcher = HttpArtifactFetcher::new(config.http_timeout)?;

    let pipeline = UpdatePipeline::new(&config, &releases, &fetcher);
    Ok(pipeline.run(&recipes))
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let summary = run(&cli)?;

    std::process::exit(summary.exit_code());
}
