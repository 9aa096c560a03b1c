//! `funcgen-recipe generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use crate::commands::{load_graph, load_recipe};

pub fn execute(args: GenerateArgs) -> Result<()> {
    let recipe = load_recipe(&args.config)?;
    let graph = load_graph(args.deps.as_deref())?;

    let generated = recipe.generate(&graph)?;
    recipe.validate()?;

    for file in &generated.dependency_files {
        println!("{}", file.display());
    }
    println!("{}", generated.toolchain_file.display());

    Ok(())
}
