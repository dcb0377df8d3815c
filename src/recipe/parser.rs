// src/recipe/parser.rs

//! Recipe file parsing

use crate::error::{Error, Result};
use crate::recipe::format::{LoadedRecipe, Recipe};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// File extension of recipe files
pub const RECIPE_EXTENSION: &str = "toml";

/// Parse a recipe from a TOML string
pub fn parse_recipe(content: &str) -> Result<Recipe> {
    toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid recipe: {}", e)))
}

/// Parse a recipe from a file
pub fn parse_recipe_file(path: &Path) -> Result<Recipe> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::LoadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_recipe(&content).map_err(|e| Error::LoadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load every recipe in `dir`, ordered by file name
///
/// Only `*.toml` files directly inside `dir` are considered. Any file that
/// fails to parse aborts the whole load.
pub fn load_recipes(dir: &Path) -> Result<Vec<LoadedRecipe>> {
    let mut recipes = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::LoadError {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(RECIPE_EXTENSION)
        {
            continue;
        }

        let recipe = parse_recipe_file(path)?;
        debug!("Loaded recipe {} {} from {}", recipe.name, recipe.version, path.display());
        recipes.push(LoadedRecipe {
            path: path.to_path_buf(),
            recipe,
        });
    }

    Ok(recipes)
}
