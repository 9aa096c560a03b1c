//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// funcgen-recipe - build recipe for the func-gen C++ library
#[derive(Parser)]
#[command(name = "funcgen-recipe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate, validate, configure, build and package func-gen
    Create(CreateArgs),

    /// Check the configured compiler against the compatibility matrix
    Validate(ConfigArgs),

    /// Write the CMake toolchain and dependency files only
    Generate(GenerateArgs),

    /// Print the build layout and package export spec
    Layout(ConfigArgs),

    /// Show package identity, settings and the pruned option set
    Inspect(InspectArgs),

    /// Detect the host C++ compiler
    Detect(DetectArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Settings, options and source selection shared by recipe commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Source tree of func-gen (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Extra profile applied on top of the global and project profiles
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Setting assignment, e.g. `-s compiler=gcc -s compiler.version=12`
    #[arg(short = 's', long = "setting", value_name = "NAME=VALUE")]
    pub settings: Vec<String>,

    /// Option assignment, e.g. `-o shared=True`
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,

    /// Use this package version instead of reading include/version.hpp
    #[arg(long, value_name = "VERSION", env = "FUNCGEN_VERSION")]
    pub version_override: Option<String>,
}

#[derive(Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Resolved dependency graph (JSON)
    #[arg(long, value_name = "FILE")]
    pub deps: Option<PathBuf>,

    /// Package output directory (defaults to package/<build_type>)
    #[arg(long, value_name = "DIR")]
    pub package_dir: Option<PathBuf>,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Resolved dependency graph (JSON)
    #[arg(long, value_name = "FILE")]
    pub deps: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Write the detected compiler into the global profile
    #[arg(long)]
    pub save: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
