//! Build settings supplied by the invoking environment.
//!
//! Settings are read-only for the lifetime of one invocation. They are
//! assembled from profiles and command-line assignments in
//! [`crate::util::config`].

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::core::cppstd::{CppStandardParseError, CppStdSetting};

/// Target operating system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Os {
    Windows,
    Linux,
    Macos,
    FreeBsd,
    Android,
    Ios,
    /// Any other OS name, kept verbatim.
    Other(String),
}

impl Os {
    /// The OS this process is running on.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "windows" => Os::Windows,
            "linux" => Os::Linux,
            "macos" => Os::Macos,
            "freebsd" => Os::FreeBsd,
            "android" => Os::Android,
            "ios" => Os::Ios,
            other => Os::Other(other.to_string()),
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Os::Windows)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Os::Windows => "Windows",
            Os::Linux => "Linux",
            Os::Macos => "Macos",
            Os::FreeBsd => "FreeBSD",
            Os::Android => "Android",
            Os::Ios => "iOS",
            Os::Other(name) => name,
        }
    }
}

impl std::str::FromStr for Os {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let os = match s.trim().to_ascii_lowercase().as_str() {
            "windows" => Os::Windows,
            "linux" => Os::Linux,
            "macos" | "darwin" => Os::Macos,
            "freebsd" => Os::FreeBsd,
            "android" => Os::Android,
            "ios" => Os::Ios,
            _ => Os::Other(s.trim().to_string()),
        };
        Ok(os)
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Os {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Named build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl std::str::FromStr for BuildType {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            _ => Err(SettingsError::UnknownBuildType(s.to_string())),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiler identity as declared by the environment.
///
/// The name is deliberately an open string: mapping it onto a supported
/// compiler is the compatibility check's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilerSettings {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cppstd: Option<CppStdSetting>,
}

/// The full settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub os: Os,
    pub compiler: CompilerSettings,
    pub build_type: BuildType,
    pub arch: String,
}

/// Errors while assembling settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unknown build_type '{0}', valid values: Debug, Release, RelWithDebInfo, MinSizeRel")]
    UnknownBuildType(String),

    #[error("no compiler configured\nhelp: pass `-s compiler=<name>` or run `funcgen-recipe detect`")]
    MissingCompiler,

    #[error("no version configured for compiler `{0}`\nhelp: pass `-s compiler.version=<version>`")]
    MissingCompilerVersion(String),

    #[error("unknown setting `{0}`, valid settings: os, arch, build_type, compiler, compiler.version, compiler.cppstd")]
    UnknownSetting(String),

    #[error("malformed setting assignment `{0}`, expected `name=value`")]
    MalformedAssignment(String),

    #[error(transparent)]
    InvalidCppStd(#[from] CppStandardParseError),
}
