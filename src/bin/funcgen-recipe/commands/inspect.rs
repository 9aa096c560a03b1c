//! `funcgen-recipe inspect` command

use anyhow::Result;

use crate::cli::{InspectArgs, OutputFormat};
use crate::commands::load_recipe;
use funcgen_recipe::ops::{format_report, InspectReport};

pub fn execute(args: InspectArgs) -> Result<()> {
    let recipe = load_recipe(&args.config)?;
    let report = InspectReport::new(&recipe);

    match args.format {
        OutputFormat::Text => println!("{}", format_report(&report)),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
