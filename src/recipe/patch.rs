// src/recipe/patch.rs

//! Rewriting recipe files in place
//!
//! Patching edits the parsed document, not a reserialized recipe. Only the
//! version, URL and checksum values are replaced, each keeping its original
//! surrounding whitespace and trailing comment, so comments, key order and
//! unrelated values survive untouched. Each package's checksum is its own
//! value, which keeps two packages that happen to share a checksum from being
//! confused with each other. Rewritten values use basic (double-quoted)
//! strings.
//!
//! Writes go through a temporary file in the recipe's directory that is
//! linted before it is renamed over the original. A recipe that fails
//! validation is never left half-updated on disk.

use crate::error::{Error, Result};
use crate::plan::UpdatePlan;
use crate::recipe::format::Recipe;
use crate::recipe::lint::validate_content;
use std::fs;
use std::io::Write;
use std::path::Path;
use toml_edit::{DocumentMut, Item, TableLike, Value};
use tracing::debug;

/// Produce the updated text of a recipe
///
/// Fails with [`Error::PatchError`] if `content` no longer holds the values
/// the plan was computed from.
pub fn patch_content(content: &str, plan: &UpdatePlan) -> Result<String> {
    let mut doc = content
        .parse::<DocumentMut>()
        .map_err(|e| Error::ParseError(format!("Invalid recipe: {}", e)))?;

    replace_string(
        doc.get_mut("version"),
        &plan.old_version,
        &plan.new_version,
        "version",
    )?;

    let mut packages = package_tables(&mut doc)?;
    if packages.len() != plan.packages.len() {
        return Err(Error::PatchError(format!(
            "recipe has {} packages, plan has {}",
            packages.len(),
            plan.packages.len()
        )));
    }

    for (i, (pkg, update)) in packages.iter_mut().zip(&plan.packages).enumerate() {
        replace_string(
            pkg.get_mut("url"),
            &update.old_url,
            &update.new_url,
            &format!("package {} url", i),
        )?;
        replace_string(
            pkg.get_mut("checksum"),
            &update.old_checksum,
            &update.new_checksum,
            &format!("package {} checksum", i),
        )?;
    }

    Ok(doc.to_string())
}

/// Every package table, whether written as `[[packages]]` or inline
fn package_tables(doc: &mut DocumentMut) -> Result<Vec<&mut dyn TableLike>> {
    match doc.get_mut("packages") {
        None => Ok(Vec::new()),
        Some(Item::ArrayOfTables(tables)) => Ok(tables
            .iter_mut()
            .map(|t| t as &mut dyn TableLike)
            .collect()),
        Some(Item::Value(Value::Array(array))) => array
            .iter_mut()
            .map(|v| {
                v.as_inline_table_mut()
                    .map(|t| t as &mut dyn TableLike)
                    .ok_or_else(|| Error::PatchError("packages entry is not a table".to_string()))
            })
            .collect(),
        Some(_) => Err(Error::PatchError("packages is not an array of tables".to_string())),
    }
}

/// Swap a string value for `new`, keeping its decor
fn replace_string(item: Option<&mut Item>, expected: &str, new: &str, what: &str) -> Result<()> {
    let value = item
        .and_then(Item::as_value_mut)
        .ok_or_else(|| Error::PatchError(format!("{} is missing", what)))?;

    match value.as_str() {
        Some(current) if current == expected => {}
        Some(current) => {
            return Err(Error::PatchError(format!(
                "{} changed since the recipe was loaded: expected '{}', found '{}'",
                what, expected, current
            )));
        }
        None => return Err(Error::PatchError(format!("{} is not a string", what))),
    }

    if expected != new {
        let decor = value.decor().clone();
        *value = Value::from(new);
        *value.decor_mut() = decor;
    }
    Ok(())
}

/// Check that patched text says what the plan says it should
fn verify_patched(recipe: &Recipe, plan: &UpdatePlan) -> Result<()> {
    let checksums_match = recipe
        .packages
        .iter()
        .zip(&plan.packages)
        .all(|(pkg, update)| pkg.checksum == update.new_checksum && pkg.url == update.new_url);

    if recipe.version != plan.new_version
        || recipe.packages.len() != plan.packages.len()
        || !checksums_match
    {
        return Err(Error::PatchError(
            "patched recipe does not reflect the update plan".to_string(),
        ));
    }
    Ok(())
}

/// Apply `plan` to the recipe at `path`
///
/// With `dry_run` the patched text is validated in memory and nothing is
/// written. Otherwise the text is written next to the recipe with the
/// recipe's permission bits, re-read, validated, and atomically renamed into
/// place. Returns the updated recipe.
pub fn update_recipe_file(path: &Path, plan: &UpdatePlan, dry_run: bool) -> Result<Recipe> {
    let original = fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("reading file {}: {}", path.display(), e)))?;
    let patched = patch_content(&original, plan)?;

    if dry_run {
        let recipe = validate_content(&patched, Some(path))?;
        verify_patched(&recipe, plan)?;
        debug!("Dry run: not writing {}", path.display());
        return Ok(recipe);
    }

    commit(path, &patched, plan)
}

fn commit(path: &Path, content: &str, plan: &UpdatePlan) -> Result<Recipe> {
    let permissions = fs::metadata(path)
        .map_err(|e| Error::IoError(format!("finding info of file {}: {}", path.display(), e)))?
        .permissions();

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut staged = tempfile::Builder::new()
        .prefix(".recipe-bump-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::IoError(format!("creating temp file in {}: {}", dir.display(), e)))?;

    staged
        .write_all(content.as_bytes())
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| Error::IoError(format!("writing to file {}: {}", staged.path().display(), e)))?;
    fs::set_permissions(staged.path(), permissions)?;

    // Validate what actually landed on disk, named after the real recipe
    let written = fs::read_to_string(staged.path())?;
    let recipe = validate_content(&written, Some(path))?;
    verify_patched(&recipe, plan)?;

    staged.persist(path).map_err(|e| {
        Error::IoError(format!("replacing {}: {}", path.display(), e.error))
    })?;
    debug!("Wrote {}", path.display());

    Ok(recipe)
}
