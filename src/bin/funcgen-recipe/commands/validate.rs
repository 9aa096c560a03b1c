//! `funcgen-recipe validate` command

use anyhow::Result;

use crate::cli::ConfigArgs;
use crate::commands::{load_profile, source_dir};
use funcgen_recipe::core::compat;

pub fn execute(args: ConfigArgs) -> Result<()> {
    let source = source_dir(&args)?;
    let settings = load_profile(&args, &source)?.resolve_settings()?;

    compat::validate(&settings.compiler)?;

    let compiler = &settings.compiler;
    match &compiler.cppstd {
        Some(cppstd) => println!(
            "{} {} (cppstd {}) is supported",
            compiler.name, compiler.version, cppstd
        ),
        None => println!("{} {} is supported", compiler.name, compiler.version),
    }

    Ok(())
}
