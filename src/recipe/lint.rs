// src/recipe/lint.rs

//! Structural lint rules for recipes
//!
//! Every rule runs; violations are collected rather than stopping at the
//! first one, so a broken recipe reports all of its problems at once.

use crate::config::is_valid_recipe_name;
use crate::error::{Error, Result};
use crate::hash::Checksum;
use crate::recipe::format::Recipe;
use crate::recipe::parser::parse_recipe;
use crate::version::parse_version;
use std::path::Path;
use url::Url;

/// Run all lint rules, returning one message per violation
///
/// When `origin` is given the recipe name must match its file stem.
pub fn lint_recipe(recipe: &Recipe, origin: Option<&Path>) -> Vec<String> {
    let mut violations = Vec::new();

    if recipe.name.is_empty() {
        violations.push("name cannot be empty".to_string());
    } else if !is_valid_recipe_name(&recipe.name) {
        violations.push(format!("name '{}' contains invalid characters", recipe.name));
    }

    if let Some(stem) = origin.and_then(|p| p.file_stem()).and_then(|s| s.to_str()) {
        if stem != recipe.name {
            violations.push(format!(
                "name '{}' does not match file name '{}'",
                recipe.name, stem
            ));
        }
    }

    if recipe.version.is_empty() {
        violations.push("version cannot be empty".to_string());
    } else if let Err(e) = parse_version(&recipe.version) {
        violations.push(format!("version '{}' is not a semantic version: {}", recipe.version, e));
    }

    if recipe.homepage.is_empty() {
        violations.push("homepage cannot be empty".to_string());
    } else if let Err(reason) = check_http_url(&recipe.homepage) {
        violations.push(format!("homepage '{}' {}", recipe.homepage, reason));
    }

    if recipe.packages.is_empty() {
        violations.push("at least one package is required".to_string());
    }

    for (i, pkg) in recipe.packages.iter().enumerate() {
        let url = pkg.download_url(&recipe.version);
        if pkg.url.is_empty() {
            violations.push(format!("package {}: url cannot be empty", i));
        } else if let Err(reason) = check_http_url(&url) {
            violations.push(format!("package {}: url '{}' {}", i, url, reason));
        }

        if let Err(e) = Checksum::parse(&pkg.checksum) {
            violations.push(format!("package {}: {}", i, e));
        }

        if pkg.os.as_deref() == Some("") {
            violations.push(format!("package {}: os cannot be empty when set", i));
        }
        if pkg.arch.as_deref() == Some("") {
            violations.push(format!("package {}: arch cannot be empty when set", i));
        }
    }

    violations
}

fn check_http_url(raw: &str) -> std::result::Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("is not a valid URL: {}", e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("must use http or https, not {}", url.scheme()));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err("has no host".to_string());
    }
    Ok(())
}

/// Lint a parsed recipe, failing with every violation found
pub fn validate_recipe(recipe: &Recipe, origin: Option<&Path>) -> Result<()> {
    let violations = lint_recipe(recipe, origin);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::ValidationError(violations))
    }
}

/// Parse and lint recipe text
///
/// Text that no longer parses is reported as a validation failure.
pub fn validate_content(content: &str, origin: Option<&Path>) -> Result<Recipe> {
    let recipe = parse_recipe(content).map_err(|e| Error::ValidationError(vec![e.to_string()]))?;
    validate_recipe(&recipe, origin)?;
    Ok(recipe)
}
