//! Build tool abstraction.
//!
//! The recipe drives an external build system through [`BuildTool`]. The
//! production implementation shells out to CMake; tests substitute a
//! recording double.

pub mod cmake;
pub mod context;
pub mod detect;

use anyhow::Result;

pub use cmake::CMakeTool;
pub use context::BuildContext;
pub use detect::{detect_compiler, DetectedCompiler};

/// An external build system the recipe can configure, build and install with.
pub trait BuildTool {
    /// Configure the build tree against the generated toolchain file.
    fn configure(&self, ctx: &BuildContext) -> Result<()>;

    /// Compile the configured tree.
    fn build(&self, ctx: &BuildContext) -> Result<()>;

    /// Install build artifacts into `ctx.install_prefix`.
    fn install(&self, ctx: &BuildContext) -> Result<()>;
}
