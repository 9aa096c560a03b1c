//! Package identity and version resolution.
//!
//! The version is not hard-coded: it is read from the library's own
//! `include/version.hpp`, so the recipe and the headers never disagree.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

pub const NAME: &str = "func-gen";
pub const LICENSE: &str = "Apache-2.0";
pub const HOMEPAGE: &str = "https://github.com/QuTech-Delft/func-gen";
pub const URL: &str = "https://github.com/conan-io/conan-center-index";
pub const DESCRIPTION: &str = "Generator of functions usable within cQASM.";
pub const TOPICS: &[&str] = &["code generation"];

/// Macro in `include/version.hpp` that carries the version string.
pub const VERSION_MACRO: &str = "FUNC_GEN_VERSION";

/// Header-relative location of the version header.
pub const VERSION_HEADER: &str = "include/version.hpp";

static DEFINE_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*#\s*define\s+(\w+)\s+"([^"]*)""#).expect("static regex is valid")
});

/// Conan-style version: `1`, `0.2`, `1.0.0.1`, `1.0.0-rc.1+build.5`.
static PACKAGE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Za-z]+(?:\.[0-9A-Za-z]+)*(?:-[0-9A-Za-z.\-]+)?(?:\+[0-9A-Za-z.\-]+)?$")
        .expect("static regex is valid")
});

/// Errors from version resolution.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("failed to read version source {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("`{macro_name}` is not defined in {}", path.display())]
    MacroNotFound { macro_name: String, path: PathBuf },

    #[error("version source {origin} yielded an empty version")]
    Empty { origin: String },

    #[error(
        "version `{version}` from {origin} is malformed: expected dot-separated alphanumeric \
         components with an optional `-pre` or `+build` suffix, like `0.2` or `1.0.0-rc.1`"
    )]
    Malformed { version: String, origin: String },
}

/// Somewhere a version string can be read from.
pub trait VersionSource {
    /// Human-readable description used in errors and logs.
    fn describe(&self) -> String;

    /// Read the raw version text.
    fn read_version(&self) -> Result<String, VersionError>;
}

/// Reads a `#define <MACRO> "x.y.z"` line from a C++ header.
#[derive(Debug, Clone)]
pub struct HeaderVersion {
    path: PathBuf,
    macro_name: String,
}

impl HeaderVersion {
    pub fn new(path: impl Into<PathBuf>, macro_name: impl Into<String>) -> Self {
        HeaderVersion {
            path: path.into(),
            macro_name: macro_name.into(),
        }
    }

    /// The func-gen version header under a source root.
    pub fn for_source_root(source_root: &Path) -> Self {
        HeaderVersion::new(source_root.join(VERSION_HEADER), VERSION_MACRO)
    }
}

impl VersionSource for HeaderVersion {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_version(&self) -> Result<String, VersionError> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|error| VersionError::Unreadable {
                path: self.path.clone(),
                error,
            })?;

        DEFINE_STRING
            .captures_iter(&contents)
            .find(|caps| &caps[1] == self.macro_name)
            .map(|caps| caps[2].to_string())
            .ok_or_else(|| VersionError::MacroNotFound {
                macro_name: self.macro_name.clone(),
                path: self.path.clone(),
            })
    }
}

/// A version given literally, e.g. from `--version-override`.
#[derive(Debug, Clone)]
pub struct FixedVersion(pub String);

impl VersionSource for FixedVersion {
    fn describe(&self) -> String {
        "explicit override".to_string()
    }

    fn read_version(&self) -> Result<String, VersionError> {
        Ok(self.0.clone())
    }
}

/// Resolve a validated, non-empty version string.
pub fn resolve_version(source: &dyn VersionSource) -> Result<String, VersionError> {
    let raw = source.read_version()?;
    let version = raw.trim();

    if version.is_empty() {
        return Err(VersionError::Empty {
            origin: source.describe(),
        });
    }

    if !PACKAGE_VERSION.is_match(version) {
        return Err(VersionError::Malformed {
            version: version.to_string(),
            origin: source.describe(),
        });
    }

    tracing::debug!("resolved version {} from {}", version, source.describe());
    Ok(version.to_string())
}

/// Identity of the package being built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageIdentity {
    pub name: String,
    pub version: String,
    pub license: String,
    pub homepage: String,
    pub url: String,
    pub description: String,
    pub topics: Vec<String>,
}

impl PackageIdentity {
    /// Resolve the func-gen identity, reading the version from `source`.
    pub fn resolve(source: &dyn VersionSource) -> Result<Self, VersionError> {
        let version = resolve_version(source)?;

        Ok(PackageIdentity {
            name: NAME.to_string(),
            version,
            license: LICENSE.to_string(),
            homepage: HOMEPAGE.to_string(),
            url: URL.to_string(),
            description: DESCRIPTION.to_string(),
            topics: TOPICS.iter().map(|t| t.to_string()).collect(),
        })
    }

    /// `name/version` reference.
    pub fn reference(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_header(tmp: &TempDir, contents: &str) -> HeaderVersion {
        let include = tmp.path().join("include");
        std::fs::create_dir_all(&include).unwrap();
        std::fs::write(include.join("version.hpp"), contents).unwrap();
        HeaderVersion::for_source_root(tmp.path())
    }

    #[test]
    fn test_header_version() {
        let tmp = TempDir::new().unwrap();
        let source = write_header(
            &tmp,
            "#pragma once\n\n#define FUNC_GEN_VERSION \"0.2.1\"\n#define FUNC_GEN_RELEASE_YEAR \"2024\"\n",
        );

        let identity = PackageIdentity::resolve(&source).unwrap();
        assert_eq!(identity.version, "0.2.1");
        assert_eq!(identity.reference(), "func-gen/0.2.1");
        assert_eq!(identity.license, "Apache-2.0");
        assert_eq!(identity.topics, vec!["code generation".to_string()]);
    }

    #[test]
    fn test_header_ignores_other_macros() {
        let tmp = TempDir::new().unwrap();
        let source = write_header(&tmp, "#define OTHER_VERSION \"9.9.9\"\n");

        let err = resolve_version(&source).unwrap_err();
        assert!(matches!(err, VersionError::MacroNotFound { .. }));
    }

    #[test]
    fn test_missing_header_fails() {
        let tmp = TempDir::new().unwrap();
        let source = HeaderVersion::for_source_root(tmp.path());

        let err = resolve_version(&source).unwrap_err();
        assert!(matches!(err, VersionError::Unreadable { .. }));
    }

    #[test]
    fn test_empty_version_fails() {
        let err = resolve_version(&FixedVersion("  ".to_string())).unwrap_err();
        assert!(matches!(err, VersionError::Empty { .. }));
    }

    #[test]
    fn test_malformed_version_fails() {
        for bad in ["1..0", "1.0/beta", "v 1.0", ".1", "1.0-"] {
            let err = resolve_version(&FixedVersion(bad.to_string())).unwrap_err();
            assert!(matches!(err, VersionError::Malformed { .. }), "accepted {:?}", bad);
            assert!(err.to_string().contains(bad));
        }
    }

    #[test]
    fn test_non_semver_versions_accepted() {
        for good in ["0.2", "1.0.0.1", "1", "2024.1.0-beta.2+abc"] {
            assert_eq!(resolve_version(&FixedVersion(good.to_string())).unwrap(), good);
        }
    }

    #[test]
    fn test_fixed_version_trimmed() {
        assert_eq!(
            resolve_version(&FixedVersion(" 1.0.0-rc.1\n".to_string())).unwrap(),
            "1.0.0-rc.1"
        );
    }
}
