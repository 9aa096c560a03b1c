//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::{bail, Context, Result};

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }

    /// Execute with captured stdout/stderr.
    pub fn exec(&self) -> Result<Output> {
        self.build_command()
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))
    }

    /// Execute with inherited stdio and require a zero exit code.
    pub fn run(&self) -> Result<()> {
        tracing::debug!("running `{}`", self.display_command());

        let status = self
            .build_command()
            .status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))?;

        if !status.success() {
            bail!(
                "`{}` failed with exit code {:?}",
                self.display_command(),
                status.code()
            );
        }
        Ok(())
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Find CMake.
pub fn find_cmake() -> Option<PathBuf> {
    find_executable("cmake")
}

/// C++ compiler drivers to probe, in priority order.
///
/// `$CXX` comes first when set and resolvable.
pub fn find_cxx_compilers() -> Vec<PathBuf> {
    let mut found = Vec::new();

    if let Ok(cxx) = std::env::var("CXX") {
        if let Some(path) = find_executable(&cxx) {
            found.push(path);
        }
    }

    let candidates: &[&str] = if cfg!(windows) {
        &["cl", "clang++", "g++"]
    } else {
        &["c++", "g++", "clang++"]
    };

    for name in candidates {
        if let Some(path) = find_executable(name) {
            if !found.contains(&path) {
                found.push(path);
            }
        }
    }

    found
}
