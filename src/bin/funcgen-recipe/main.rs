//! funcgen-recipe CLI - build recipe driver for func-gen

use anyhow::Result;
use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

use funcgen_recipe::ConfigurationError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        if let Some(help) = e
            .downcast_ref::<ConfigurationError>()
            .and_then(|diag| diag.help())
        {
            eprintln!("help: {}", help);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("funcgen_recipe=debug")
    } else {
        EnvFilter::new("funcgen_recipe=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Create(args) => commands::create::execute(args, cli.verbose),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Layout(args) => commands::layout::execute(args),
        Commands::Inspect(args) => commands::inspect::execute(args),
        Commands::Detect(args) => commands::detect::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
