//! `funcgen-recipe layout` command

use anyhow::Result;

use crate::cli::ConfigArgs;
use crate::commands::{load_profile, source_dir};
use funcgen_recipe::ops::format_layout;
use funcgen_recipe::Layout;

pub fn execute(args: ConfigArgs) -> Result<()> {
    let source = source_dir(&args)?;
    let build_type = load_profile(&args, &source)?.build_type()?;

    let layout = Layout::plan(&source, build_type);
    println!("{}", format_layout(&layout));

    Ok(())
}
