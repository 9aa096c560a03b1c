//! CMake driver.

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::builder::context::BuildContext;
use crate::builder::BuildTool;
use crate::util::process::{find_cmake, ProcessBuilder};

/// Runs configure, build and install through the `cmake` executable.
///
/// A missing CMake is reported when the first step runs, so configuration
/// errors surface before tool errors.
#[derive(Debug, Clone)]
pub struct CMakeTool {
    cmake: Option<PathBuf>,
}

impl CMakeTool {
    /// Locate CMake on PATH.
    pub fn new() -> Self {
        CMakeTool {
            cmake: find_cmake(),
        }
    }

    /// Use a specific CMake executable.
    pub fn with_program(cmake: impl Into<PathBuf>) -> Self {
        CMakeTool {
            cmake: Some(cmake.into()),
        }
    }

    /// A tool whose CMake could not be found.
    #[cfg(test)]
    pub(crate) fn unavailable() -> Self {
        CMakeTool { cmake: None }
    }

    fn program(&self) -> Result<&PathBuf> {
        let Some(cmake) = &self.cmake else {
            bail!(
                "CMake not found\n\
                 \n\
                 CMake is required to build func-gen.\n\
                 Install CMake and ensure it's in your PATH."
            );
        };
        Ok(cmake)
    }

    fn configure_command(&self, ctx: &BuildContext) -> Result<ProcessBuilder> {
        Ok(ProcessBuilder::new(self.program()?)
            .arg("-S")
            .arg(&ctx.source_dir)
            .arg("-B")
            .arg(&ctx.build_dir)
            .arg(format!(
                "-DCMAKE_TOOLCHAIN_FILE={}",
                ctx.toolchain_file.display()
            ))
            .arg(format!("-DCMAKE_BUILD_TYPE={}", ctx.build_type))
            .arg(format!(
                "-DCMAKE_INSTALL_PREFIX={}",
                ctx.install_prefix.display()
            ))
            .cwd(&ctx.source_dir))
    }

    fn build_command(&self, ctx: &BuildContext) -> Result<ProcessBuilder> {
        // --config matters for multi-config generators and is ignored otherwise
        let mut cmd = ProcessBuilder::new(self.program()?)
            .arg("--build")
            .arg(&ctx.build_dir)
            .arg("--config")
            .arg(ctx.build_type.as_str());

        if let Some(jobs) = ctx.jobs {
            cmd = cmd.arg("--parallel").arg(jobs.to_string());
        }

        if ctx.verbose {
            cmd = cmd.arg("--verbose");
        }

        Ok(cmd)
    }

    fn install_command(&self, ctx: &BuildContext) -> Result<ProcessBuilder> {
        Ok(ProcessBuilder::new(self.program()?)
            .arg("--install")
            .arg(&ctx.build_dir)
            .arg("--config")
            .arg(ctx.build_type.as_str())
            .arg("--prefix")
            .arg(&ctx.install_prefix))
    }
}

impl Default for CMakeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildTool for CMakeTool {
    fn configure(&self, ctx: &BuildContext) -> Result<()> {
        tracing::info!("Configuring func-gen ({})", ctx.build_type);
        self.configure_command(ctx)?.run()
    }

    fn build(&self, ctx: &BuildContext) -> Result<()> {
        tracing::info!("Building func-gen ({})", ctx.build_type);
        self.build_command(ctx)?.run()
    }

    fn install(&self, ctx: &BuildContext) -> Result<()> {
        tracing::info!("Installing func-gen into {}", ctx.install_prefix.display());
        self.install_command(ctx)?.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::BuildType;

    fn ctx() -> BuildContext {
        BuildContext {
            source_dir: PathBuf::from("/src"),
            build_dir: PathBuf::from("/src/build/Debug"),
            toolchain_file: PathBuf::from("/src/build/Debug/generators/funcgen_toolchain.cmake"),
            build_type: BuildType::Debug,
            install_prefix: PathBuf::from("/src/package/Debug"),
            jobs: Some(4),
            verbose: false,
        }
    }

    #[test]
    fn test_configure_args() {
        let tool = CMakeTool::with_program("cmake");
        let cmd = tool.configure_command(&ctx()).unwrap();
        let args = cmd.get_args();

        assert_eq!(&args[..4], ["-S", "/src", "-B", "/src/build/Debug"]);
        assert!(args.contains(
            &"-DCMAKE_TOOLCHAIN_FILE=/src/build/Debug/generators/funcgen_toolchain.cmake"
                .to_string()
        ));
        assert!(args.contains(&"-DCMAKE_BUILD_TYPE=Debug".to_string()));
    }

    #[test]
    fn test_build_args() {
        let tool = CMakeTool::with_program("cmake");
        let cmd = tool.build_command(&ctx()).unwrap();

        assert_eq!(
            cmd.display_command(),
            "cmake --build /src/build/Debug --config Debug --parallel 4"
        );
    }

    #[test]
    fn test_install_args() {
        let tool = CMakeTool::with_program("cmake");
        let cmd = tool.install_command(&ctx()).unwrap();

        assert_eq!(
            cmd.display_command(),
            "cmake --install /src/build/Debug --config Debug --prefix /src/package/Debug"
        );
    }

    #[test]
    fn test_missing_cmake_reported_on_first_step() {
        let tool = CMakeTool::unavailable();
        let err = tool.configure(&ctx()).unwrap_err();
        assert!(err.to_string().contains("CMake not found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_tool_error_propagates() {
        let tool = CMakeTool::with_program("false");
        let err = tool.build(&ctx()).unwrap_err();
        assert!(err.to_string().contains("failed with exit code"));
    }
}
