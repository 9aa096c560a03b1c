//! Descriptor generation for the CMake build.
//!
//! Two kinds of files are written into the generators directory: package
//! configs for each resolved dependency, and a toolchain file carrying the
//! recipe's settings and pruned options.

pub mod cmake_deps;
pub mod cmake_toolchain;
pub mod graph;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::layout::Layout;
use crate::core::options::OptionSet;
use crate::core::settings::Settings;

pub use cmake_deps::CMakeDeps;
pub use cmake_toolchain::{CMakeToolchain, CMakeValue, TOOLCHAIN_FILE};
pub use graph::{DependencyGraph, DependencyNode, GraphError};

/// Files written by [`generate`].
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct GeneratedFiles {
    pub toolchain_file: PathBuf,
    pub dependency_files: Vec<PathBuf>,
}

/// Write dependency configs, then the toolchain file.
///
/// `options` must already be pruned for the target environment.
pub fn generate(
    settings: &Settings,
    options: &OptionSet,
    layout: &Layout,
    graph: &DependencyGraph,
) -> Result<GeneratedFiles> {
    let dependency_files = CMakeDeps::new(graph).generate(&layout.generators_dir)?;
    let toolchain_file =
        CMakeToolchain::new(settings, options, layout).generate(&layout.generators_dir)?;

    Ok(GeneratedFiles {
        toolchain_file,
        dependency_files,
    })
}

/// Render a path the way CMake expects it (forward slashes).
pub fn cmake_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
