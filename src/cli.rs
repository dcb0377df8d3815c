// src/cli.rs
//! CLI definitions for recipe-bump

use clap::{ArgGroup, Parser};
use recipe_bump::upstream::DEFAULT_GITHUB_API_URL;

/// Upstream repositories for recipes whose download URLs do not point at GitHub
pub const DEFAULT_SOURCE_OVERRIDES: &str = "consul:hashicorp/consul,kubectl:kubernetes/kubernetes,nomad:hashicorp/nomad,terraform:hashicorp/terraform,vagrant:hashicorp/vagrant,vault:hashicorp/vault";

#[derive(Parser, Debug)]
#[command(name = "recipe-bump")]
#[command(author, version)]
#[command(about = "Bump package recipes to their latest upstream GitHub release", long_about = None)]
#[command(group(ArgGroup::new("recipes").required(true).args(["rig", "recipes_dir"])))]
pub struct Cli {
    /// Git URL of the recipe repository to clone
    #[arg(long)]
    pub rig: Option<String>,

    /// Directory inside the cloned repository that holds the recipes
    #[arg(long, default_value = "recipes")]
    pub recipe_subdir: String,

    /// Existing local directory of recipes, updated in place
    #[arg(long)]
    pub recipes_dir: Option<String>,

    /// Comma-separated recipe names never to update
    #[arg(long, default_value = "")]
    pub skip: String,

    /// Comma-separated `name:owner/repo` upstream overrides
    #[arg(long, default_value = DEFAULT_SOURCE_OVERRIDES)]
    pub release: String,

    /// GitHub token for API requests
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, default_value = DEFAULT_GITHUB_API_URL)]
    pub github_api_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 300)]
    pub timeout: u64,

    /// Resolve, download and validate, but do not write any recipe
    #[arg(long)]
    pub dry_run: bool,
}
