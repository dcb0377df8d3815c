// src/recipe/mod.rs

//! Recipe files: format, parsing, linting and in-place patching
//!
//! A recipe repository is a flat directory of `<name>.toml` files. Loading is
//! eager and all-or-nothing; patching is per recipe and never reserializes a
//! file, so hand-written formatting survives automated updates.

mod format;
pub mod lint;
pub mod parser;
pub mod patch;

pub use format::{LoadedRecipe, Package, Recipe, PIN_MARKER, VERSION_TEMPLATE};
pub use lint::{lint_recipe, validate_content, validate_recipe};
pub use parser::{load_recipes, parse_recipe, parse_recipe_file};
pub use patch::{patch_content, update_recipe_file};
