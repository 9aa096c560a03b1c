//! Build context shared by configure, build and install.

use std::path::PathBuf;

use crate::core::settings::BuildType;

/// Everything a build tool needs to run one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Directory holding the top-level CMakeLists.txt
    pub source_dir: PathBuf,

    /// Build tree, keyed by build type
    pub build_dir: PathBuf,

    /// Generated toolchain file
    pub toolchain_file: PathBuf,

    pub build_type: BuildType,

    /// Package output directory (install prefix)
    pub install_prefix: PathBuf,

    /// Parallel jobs for the build step (None = tool default)
    pub jobs: Option<usize>,

    pub verbose: bool,
}
