//! `funcgen-recipe detect` command

use anyhow::{Context, Result};

use crate::cli::DetectArgs;
use funcgen_recipe::builder::detect_compiler;
use funcgen_recipe::core::settings::Os;
use funcgen_recipe::util::config::{global_profile_path, save_merged};
use funcgen_recipe::Profile;

pub fn execute(args: DetectArgs) -> Result<()> {
    let detected = detect_compiler()?;

    let mut snippet = Profile::default();
    snippet.settings.os = Some(Os::host().to_string());
    snippet.settings.arch = Some(std::env::consts::ARCH.to_string());
    snippet.settings.compiler.name = Some(detected.compiler.name().to_string());
    snippet.settings.compiler.version = Some(detected.version.clone());

    print!("{}", snippet.to_toml()?);

    if args.save {
        let path = global_profile_path().context("could not determine home directory")?;
        save_merged(&path, snippet)?;
        eprintln!("Saved detected compiler to {}", path.display());
    }

    Ok(())
}
