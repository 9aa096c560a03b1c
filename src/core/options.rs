//! Package options and per-environment pruning.
//!
//! The option set starts from the documented defaults
//! (`shared=False`, `fPIC=True`, `asan_enabled=False`), takes user overrides,
//! and is then pruned twice: once for the target OS, once for the linkage
//! choice. Each step returns a new value. `fPIC` is the only prunable entry,
//! and nothing puts it back once it is gone.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::settings::Os;

/// Name of a declared option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    Shared,
    Fpic,
    AsanEnabled,
}

impl OptionName {
    pub const ALL: [OptionName; 3] = [OptionName::Shared, OptionName::Fpic, OptionName::AsanEnabled];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionName::Shared => "shared",
            OptionName::Fpic => "fPIC",
            OptionName::AsanEnabled => "asan_enabled",
        }
    }
}

impl std::str::FromStr for OptionName {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s.trim())
            .ok_or_else(|| OptionError::UnknownOption(s.to_string()))
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors while reading option values.
#[derive(Debug, Error)]
pub enum OptionError {
    #[error("unknown option `{0}`, valid options: shared, fPIC, asan_enabled")]
    UnknownOption(String),

    #[error("invalid value `{value}` for option `{name}`, expected True or False")]
    InvalidValue { name: OptionName, value: String },

    #[error("malformed option assignment `{0}`, expected `name=value`")]
    MalformedAssignment(String),
}

/// User-supplied option values, applied on top of the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
    #[serde(rename = "fPIC", skip_serializing_if = "Option::is_none")]
    pub fpic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asan_enabled: Option<bool>,
}

impl OptionOverrides {
    pub fn set(&mut self, name: OptionName, value: bool) {
        match name {
            OptionName::Shared => self.shared = Some(value),
            OptionName::Fpic => self.fpic = Some(value),
            OptionName::AsanEnabled => self.asan_enabled = Some(value),
        }
    }

    /// Apply a `name=value` assignment as given on the command line.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), OptionError> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| OptionError::MalformedAssignment(assignment.to_string()))?;

        let name: OptionName = name.parse()?;
        let value = parse_bool(value).ok_or_else(|| OptionError::InvalidValue {
            name,
            value: value.to_string(),
        })?;

        self.set(name, value);
        Ok(())
    }

    /// Merge another set of overrides into this one (other takes precedence).
    pub fn merge(&mut self, other: OptionOverrides) {
        if other.shared.is_some() {
            self.shared = other.shared;
        }
        if other.fpic.is_some() {
            self.fpic = other.fpic;
        }
        if other.asan_enabled.is_some() {
            self.asan_enabled = other.asan_enabled;
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "True" | "true" | "1" | "ON" | "on" => Some(true),
        "False" | "false" | "0" | "OFF" | "off" => Some(false),
        _ => None,
    }
}

/// The option set for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionSet {
    shared: bool,
    #[serde(rename = "fPIC", skip_serializing_if = "Option::is_none")]
    fpic: Option<bool>,
    asan_enabled: bool,
}

impl Default for OptionSet {
    fn default() -> Self {
        OptionSet {
            shared: false,
            fpic: Some(true),
            asan_enabled: false,
        }
    }
}

impl OptionSet {
    /// Defaults with user overrides applied, before any pruning.
    pub fn with_overrides(overrides: &OptionOverrides) -> Self {
        let defaults = OptionSet::default();
        OptionSet {
            shared: overrides.shared.unwrap_or(defaults.shared),
            fpic: overrides.fpic.or(defaults.fpic),
            asan_enabled: overrides.asan_enabled.unwrap_or(defaults.asan_enabled),
        }
    }

    /// Environment pruning: drop `fPIC` on Windows.
    pub fn config_options(self, os: &Os) -> Self {
        if os.is_windows() && self.fpic.is_some() {
            tracing::debug!("removing option fPIC: not applicable on {}", os);
            return OptionSet { fpic: None, ..self };
        }
        self
    }

    /// Linkage pruning: drop `fPIC` for shared builds.
    pub fn configure(self) -> Self {
        if self.shared && self.fpic.is_some() {
            tracing::debug!("removing option fPIC: irrelevant for shared linkage");
            return OptionSet { fpic: None, ..self };
        }
        self
    }

    /// Both pruning steps, in order.
    pub fn pruned_for(self, os: &Os) -> Self {
        self.config_options(os).configure()
    }

    pub fn shared(&self) -> bool {
        self.shared
    }

    pub fn fpic(&self) -> Option<bool> {
        self.fpic
    }

    pub fn asan_enabled(&self) -> bool {
        self.asan_enabled
    }

    pub fn contains(&self, name: OptionName) -> bool {
        match name {
            OptionName::Fpic => self.fpic.is_some(),
            OptionName::Shared | OptionName::AsanEnabled => true,
        }
    }

    pub fn get(&self, name: OptionName) -> Option<bool> {
        match name {
            OptionName::Shared => Some(self.shared),
            OptionName::Fpic => self.fpic,
            OptionName::AsanEnabled => Some(self.asan_enabled),
        }
    }

    /// Present entries in declaration order.
    pub fn entries(&self) -> Vec<(OptionName, bool)> {
        OptionName::ALL
            .into_iter()
            .filter_map(|name| self.get(name).map(|value| (name, value)))
            .collect()
    }

    pub fn names(&self) -> Vec<OptionName> {
        self.entries().into_iter().map(|(name, _)| name).collect()
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries()
            .into_iter()
            .map(|(name, value)| format!("{}={}", name, if value { "True" } else { "False" }))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
