//! Dotted-numeric compiler versions.
//!
//! Compiler versions do not follow semver: `gcc` reports `10`, `msvc` reports
//! `19.29`, `apple-clang` reports `14.0.3`. Versions compare component by
//! component as integers, and a missing trailing component counts as zero, so
//! `14`, `14.0` and `14.0.0` are all equal.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use thiserror::Error;

/// A parsed compiler version.
#[derive(Debug, Clone)]
pub struct CompilerVersion {
    components: Vec<u64>,
}

/// Error returned for versions that are not dotted-numeric.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid compiler version '{0}': expected dotted numeric form like `10.0`")]
pub struct CompilerVersionParseError(pub String);

impl CompilerVersion {
    /// Build a version from its numeric components.
    pub fn from_components(components: &[u64]) -> Self {
        CompilerVersion {
            components: components.to_vec(),
        }
    }

    /// Parse a version such as `10`, `19.29` or `14.0.3`.
    pub fn parse(s: &str) -> Result<Self, CompilerVersionParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CompilerVersionParseError(s.to_string()));
        }

        let components = trimmed
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                part.parse::<u64>().ok()
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| CompilerVersionParseError(s.to_string()))?;

        Ok(CompilerVersion { components })
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Components with trailing zeros removed; equal versions share this form.
    fn significant(&self) -> &[u64] {
        let end = self
            .components
            .iter()
            .rposition(|&c| c != 0)
            .map_or(0, |i| i + 1);
        &self.components[..end]
    }
}

impl PartialEq for CompilerVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CompilerVersion {}

impl Hash for CompilerVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl PartialOrd for CompilerVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CompilerVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                non_eq => return non_eq,
            }
        }
        Ordering::Equal
    }
}

impl std::str::FromStr for CompilerVersion {
    type Err = CompilerVersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompilerVersion::parse(s)
    }
}

impl std::fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.components.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}
