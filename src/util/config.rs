//! Profile files and settings assembly.
//!
//! A profile supplies settings and option values:
//! - Global: `~/.funcgen/profile.toml` - User-wide defaults
//! - Project: `.funcgen/profile.toml` - Project-specific overrides
//! - Explicit: `--profile <file>` - Applied on top of both
//!
//! Command-line `-s`/`-o` assignments override every profile.
//!
//! ```toml
//! [settings]
//! os = "Linux"
//! arch = "x86_64"
//! build_type = "Release"
//!
//! [settings.compiler]
//! name = "gcc"
//! version = "12"
//! cppstd = "17"
//!
//! [options]
//! shared = false
//! asan_enabled = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::cppstd::CppStdSetting;
use crate::core::options::OptionOverrides;
use crate::core::settings::{BuildType, CompilerSettings, Os, Settings, SettingsError};

/// Name of the per-user and per-project config directory.
pub const CONFIG_DIR_NAME: &str = ".funcgen";

/// File name of a profile inside the config directory.
pub const PROFILE_FILE_NAME: &str = "profile.toml";

/// Compiler section of a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cppstd: Option<String>,
}

/// Settings section of a profile. Every field is optional until resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_type: Option<String>,
    pub compiler: CompilerConfig,
}

/// A profile: settings plus option overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub settings: SettingsConfig,
    pub options: OptionOverrides,
}

impl Profile {
    /// Load a profile from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse profile: {}", path.display()))
    }

    /// Load a profile, or defaults if the file doesn't exist.
    ///
    /// A file that exists but fails to parse is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load(path)
    }

    /// Save the profile to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;
        crate::util::fs::write_string(path, &contents)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize profile")
    }

    /// Merge another profile into this one (other takes precedence).
    pub fn merge(&mut self, other: Profile) {
        let s = other.settings;
        if s.os.is_some() {
            self.settings.os = s.os;
        }
        if s.arch.is_some() {
            self.settings.arch = s.arch;
        }
        if s.build_type.is_some() {
            self.settings.build_type = s.build_type;
        }
        if s.compiler.name.is_some() {
            self.settings.compiler.name = s.compiler.name;
        }
        if s.compiler.version.is_some() {
            self.settings.compiler.version = s.compiler.version;
        }
        if s.compiler.cppstd.is_some() {
            self.settings.compiler.cppstd = s.compiler.cppstd;
        }
        self.options.merge(other.options);
    }

    /// Apply a `-s name=value` assignment.
    pub fn apply_setting(&mut self, assignment: &str) -> Result<(), SettingsError> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| SettingsError::MalformedAssignment(assignment.to_string()))?;
        let value = Some(value.trim().to_string());

        match name.trim() {
            "os" => self.settings.os = value,
            "arch" => self.settings.arch = value,
            "build_type" => self.settings.build_type = value,
            "compiler" => self.settings.compiler.name = value,
            "compiler.version" => self.settings.compiler.version = value,
            "compiler.cppstd" => self.settings.compiler.cppstd = value,
            other => return Err(SettingsError::UnknownSetting(other.to_string())),
        }
        Ok(())
    }

    /// Build type, defaulting to Release.
    pub fn build_type(&self) -> Result<BuildType, SettingsError> {
        self.settings
            .build_type
            .as_deref()
            .map(str::parse::<BuildType>)
            .transpose()
            .map(Option::unwrap_or_default)
    }

    /// Resolve into concrete settings.
    ///
    /// OS and arch default to the host, build type to Release. The compiler
    /// name and version have no default.
    pub fn resolve_settings(&self) -> Result<Settings, SettingsError> {
        let os = match self.settings.os.as_deref() {
            Some(os) => os.parse::<Os>().unwrap_or_else(|never| match never {}),
            None => Os::host(),
        };

        let arch = self
            .settings
            .arch
            .clone()
            .unwrap_or_else(|| std::env::consts::ARCH.to_string());

        let compiler = &self.settings.compiler;
        let name = compiler
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .ok_or(SettingsError::MissingCompiler)?;
        let version = compiler
            .version
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SettingsError::MissingCompilerVersion(name.clone()))?;
        let cppstd = compiler
            .cppstd
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<CppStdSetting>)
            .transpose()?;

        Ok(Settings {
            os,
            compiler: CompilerSettings {
                name,
                version,
                cppstd,
            },
            build_type: self.build_type()?,
            arch,
        })
    }
}

/// Get the global config directory (~/.funcgen).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the global profile path (~/.funcgen/profile.toml).
pub fn global_profile_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(PROFILE_FILE_NAME))
}

/// Get the project profile path (.funcgen/profile.toml).
pub fn project_profile_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join(PROFILE_FILE_NAME)
}

/// Merge `update` into the profile at `path` and write it back.
///
/// Refuses to touch a file that exists but does not parse.
pub fn save_merged(path: &Path, update: Profile) -> Result<Profile> {
    let mut profile = Profile::load_or_default(path)
        .with_context(|| format!("refusing to overwrite {}", path.display()))?;
    profile.merge(update);
    profile.save(path)?;
    Ok(profile)
}

/// Load the merged profile.
///
/// Order of precedence (highest to lowest):
/// 1. Explicit profile (`--profile`), which must exist
/// 2. Project profile
/// 3. Global profile
pub fn load_profiles(
    global_path: Option<&Path>,
    project_path: &Path,
    explicit: Option<&Path>,
) -> Result<Profile> {
    let mut profile = Profile::default();

    if let Some(global) = global_path {
        profile.merge(Profile::load_or_default(global)?);
    }

    profile.merge(Profile::load_or_default(project_path)?);

    if let Some(explicit) = explicit {
        if !explicit.exists() {
            bail!("profile not found: {}", explicit.display());
        }
        profile.merge(Profile::load(explicit)?);
    }

    Ok(profile)
}
