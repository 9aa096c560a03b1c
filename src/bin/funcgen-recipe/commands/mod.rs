//! Command implementations

pub mod completions;
pub mod create;
pub mod detect;
pub mod generate;
pub mod inspect;
pub mod layout;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::ConfigArgs;
use funcgen_recipe::core::package::{FixedVersion, HeaderVersion, VersionSource};
use funcgen_recipe::generators::DependencyGraph;
use funcgen_recipe::util::config::{global_profile_path, load_profiles, project_profile_path};
use funcgen_recipe::util::fs::normalize_path;
use funcgen_recipe::{Profile, Recipe};

/// Source root selected by `--source`, or the current directory.
pub fn source_dir(args: &ConfigArgs) -> Result<PathBuf> {
    let dir = match &args.source {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    Ok(normalize_path(&dir))
}

/// Merge global, project and explicit profiles, then apply `-s`/`-o`.
pub fn load_profile(args: &ConfigArgs, source_dir: &std::path::Path) -> Result<Profile> {
    let global = global_profile_path();
    let mut profile = load_profiles(
        global.as_deref(),
        &project_profile_path(source_dir),
        args.profile.as_deref(),
    )?;

    for assignment in &args.settings {
        profile.apply_setting(assignment)?;
    }
    for assignment in &args.options {
        profile.options.apply_assignment(assignment)?;
    }

    Ok(profile)
}

/// Load the recipe for the selected source tree and configuration.
pub fn load_recipe(args: &ConfigArgs) -> Result<Recipe> {
    let source = source_dir(args)?;
    let profile = load_profile(args, &source)?;
    let settings = profile.resolve_settings()?;

    let version: Box<dyn VersionSource> = match &args.version_override {
        Some(v) => Box::new(FixedVersion(v.clone())),
        None => Box::new(HeaderVersion::for_source_root(&source)),
    };

    Recipe::load(&source, version.as_ref(), settings, &profile.options)
}

/// Load `--deps`, or an empty graph when absent.
pub fn load_graph(path: Option<&std::path::Path>) -> Result<DependencyGraph> {
    match path {
        Some(path) => Ok(DependencyGraph::load(path)?),
        None => Ok(DependencyGraph::default()),
    }
}
