//! Implementation of `funcgen-recipe create`.
//!
//! Runs the post-load lifecycle in a fixed order:
//! generate -> validate -> configure -> build -> package.
//! The first failure aborts every later step.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::builder::BuildTool;
use crate::generators::{DependencyGraph, GeneratedFiles};
use crate::ops::recipe::Recipe;

/// Options for the create command.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Package output directory (None = `package/<build_type>` under the source)
    pub package_dir: Option<PathBuf>,

    /// Number of parallel jobs
    pub jobs: Option<usize>,

    /// Verbose build tool output
    pub verbose: bool,
}

/// What a successful create produced.
#[derive(Debug, Clone, Serialize)]
pub struct CreateReport {
    pub reference: String,
    pub generated: GeneratedFiles,
    pub package_dir: PathBuf,
}

/// Generate, validate, configure, build and package the recipe.
pub fn create(
    recipe: &Recipe,
    graph: &DependencyGraph,
    opts: &CreateOptions,
    tool: &dyn BuildTool,
) -> Result<CreateReport> {
    let generated = recipe.generate(graph)?;

    recipe.validate()?;

    let package_dir = opts
        .package_dir
        .clone()
        .unwrap_or_else(|| recipe.layout.default_package_dir());
    let ctx = recipe.build_context(&generated, package_dir.clone(), opts.jobs, opts.verbose);

    tool.configure(&ctx)?;
    tool.build(&ctx)?;
    recipe.package(tool, &ctx)?;

    tracing::info!(
        "Packaged {} into {}",
        recipe.identity.reference(),
        package_dir.display()
    );

    Ok(CreateReport {
        reference: recipe.identity.reference(),
        generated,
        package_dir,
    })
}
