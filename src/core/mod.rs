//! Core recipe data and decisions.
//!
//! This module contains the recipe's pure logic:
//! - Package identity and version resolution
//! - Settings and the option set with its pruning rules
//! - Build layout and export spec
//! - Compiler compatibility validation

pub mod compat;
pub mod cppstd;
pub mod layout;
pub mod options;
pub mod package;
pub mod settings;
pub mod version;

pub use compat::{validate, ConfigurationError, SupportedCompiler, MIN_CPPSTD};
pub use cppstd::{CppStandard, CppStdSetting};
pub use layout::{ExportSpec, Layout};
pub use options::{OptionName, OptionOverrides, OptionSet};
pub use package::{FixedVersion, HeaderVersion, PackageIdentity, VersionError, VersionSource};
pub use settings::{BuildType, CompilerSettings, Os, Settings, SettingsError};
pub use version::CompilerVersion;
