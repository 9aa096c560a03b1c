//! Build layout and package export spec.
//!
//! The layout is computed fresh for every invocation and never touches the
//! filesystem: it only names the directories other steps create.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::package;
use crate::core::settings::BuildType;

/// What the installed package exposes to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSpec {
    pub libs: Vec<String>,
    pub includedirs: Vec<PathBuf>,
}

impl ExportSpec {
    /// One library artifact and one include root.
    pub fn func_gen() -> Self {
        ExportSpec {
            libs: vec![package::NAME.to_string()],
            includedirs: vec![PathBuf::from("include")],
        }
    }
}

/// Directory layout for one build type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub build_type: BuildType,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub generators_dir: PathBuf,
    /// Include dirs used when consuming the package straight from source.
    pub source_includedirs: Vec<PathBuf>,
    pub package: ExportSpec,
}

impl Layout {
    /// Plan the layout under `source_root` for `build_type`.
    pub fn plan(source_root: &Path, build_type: BuildType) -> Self {
        let build_dir = source_root.join("build").join(build_type.as_str());
        let generators_dir = build_dir.join("generators");

        Layout {
            build_type,
            source_dir: source_root.to_path_buf(),
            build_dir,
            generators_dir,
            source_includedirs: vec![PathBuf::from("include")],
            package: ExportSpec::func_gen(),
        }
    }

    /// Default package output directory, keyed by build type like `build_dir`.
    pub fn default_package_dir(&self) -> PathBuf {
        self.source_dir.join("package").join(self.build_type.as_str())
    }

    /// Where the license file lands inside a package directory.
    pub fn license_dir(package_dir: &Path) -> PathBuf {
        package_dir.join("licenses")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = Layout::plan(Path::new("/src/func-gen"), BuildType::Debug);

        assert_eq!(layout.source_dir, PathBuf::from("/src/func-gen"));
        assert_eq!(layout.build_dir, PathBuf::from("/src/func-gen/build/Debug"));
        assert_eq!(
            layout.generators_dir,
            PathBuf::from("/src/func-gen/build/Debug/generators")
        );
    }

    #[test]
    fn test_layout_is_reproducible() {
        let root = Path::new("/src");
        assert_eq!(
            Layout::plan(root, BuildType::Release),
            Layout::plan(root, BuildType::Release)
        );
    }

    #[test]
    fn test_debug_and_release_do_not_overlap() {
        let root = Path::new("/src");
        let debug = Layout::plan(root, BuildType::Debug);
        let release = Layout::plan(root, BuildType::Release);

        assert_ne!(debug.build_dir, release.build_dir);
        assert!(!debug.build_dir.starts_with(&release.build_dir));
        assert!(!release.build_dir.starts_with(&debug.build_dir));
        assert_ne!(debug.default_package_dir(), release.default_package_dir());
    }

    #[test]
    fn test_export_spec_is_static() {
        let layout = Layout::plan(Path::new("."), BuildType::MinSizeRel);
        assert_eq!(layout.package.libs, vec!["func-gen".to_string()]);
        assert_eq!(layout.package.includedirs, vec![PathBuf::from("include")]);
        assert_eq!(layout.source_includedirs, vec![PathBuf::from("include")]);
    }

    #[test]
    fn test_default_package_dir() {
        let layout = Layout::plan(Path::new("/src"), BuildType::RelWithDebInfo);
        assert_eq!(
            layout.default_package_dir(),
            PathBuf::from("/src/package/RelWithDebInfo")
        );
        assert_eq!(
            Layout::license_dir(Path::new("/pkg")),
            PathBuf::from("/pkg/licenses")
        );
    }
}
