//! `funcgen-recipe create` command

use anyhow::Result;

use crate::cli::CreateArgs;
use crate::commands::{load_graph, load_recipe};
use funcgen_recipe::builder::CMakeTool;
use funcgen_recipe::ops::{create, CreateOptions};

pub fn execute(args: CreateArgs, verbose: bool) -> Result<()> {
    let recipe = load_recipe(&args.config)?;
    let graph = load_graph(args.deps.as_deref())?;

    tracing::info!(
        "Creating {} ({}, {})",
        recipe.identity.reference(),
        recipe.settings.build_type,
        recipe.options
    );

    let tool = CMakeTool::new();
    let opts = CreateOptions {
        package_dir: args.package_dir,
        jobs: args.jobs,
        verbose,
    };

    let report = create(&recipe, &graph, &opts, &tool)?;

    println!(
        "Packaged {} -> {}",
        report.reference,
        report.package_dir.display()
    );

    Ok(())
}
