//! The func-gen recipe: identity, settings, pruned options and layout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::{BuildContext, BuildTool};
use crate::core::compat::{self, ConfigurationError};
use crate::core::layout::Layout;
use crate::core::options::{OptionOverrides, OptionSet};
use crate::core::package::{PackageIdentity, VersionSource};
use crate::core::settings::Settings;
use crate::generators::{self, DependencyGraph, GeneratedFiles};
use crate::util::fs::copy_into;

/// File copied into the package's `licenses/` directory.
pub const LICENSE_FILE: &str = "LICENSE.md";

/// A loaded recipe for one invocation.
///
/// Loading runs the pre-build hooks in order: version resolution,
/// environment pruning, linkage pruning, layout. Everything here is fixed
/// afterwards.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub identity: PackageIdentity,
    pub settings: Settings,
    pub options: OptionSet,
    pub layout: Layout,
}

impl Recipe {
    pub fn load(
        source_dir: &Path,
        version: &dyn VersionSource,
        settings: Settings,
        overrides: &OptionOverrides,
    ) -> Result<Self> {
        let identity = PackageIdentity::resolve(version)?;
        tracing::debug!("resolved {}", identity.reference());

        let options = OptionSet::with_overrides(overrides)
            .config_options(&settings.os)
            .configure();
        tracing::debug!("options: {}", options);

        let layout = Layout::plan(source_dir, settings.build_type);

        Ok(Recipe {
            identity,
            settings,
            options,
            layout,
        })
    }

    /// Check the configured compiler against the compatibility matrix.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        compat::validate(&self.settings.compiler)
    }

    /// Write CMake descriptors into the generators directory.
    pub fn generate(&self, graph: &DependencyGraph) -> Result<GeneratedFiles> {
        tracing::info!(
            "Generating CMake files in {}",
            self.layout.generators_dir.display()
        );
        generators::generate(&self.settings, &self.options, &self.layout, graph)
    }

    pub fn build_context(
        &self,
        generated: &GeneratedFiles,
        package_dir: PathBuf,
        jobs: Option<usize>,
        verbose: bool,
    ) -> BuildContext {
        BuildContext {
            source_dir: self.layout.source_dir.clone(),
            build_dir: self.layout.build_dir.clone(),
            toolchain_file: generated.toolchain_file.clone(),
            build_type: self.settings.build_type,
            install_prefix: package_dir,
            jobs,
            verbose,
        }
    }

    /// Copy the license into the package, then install the build output.
    pub fn package(&self, tool: &dyn BuildTool, ctx: &BuildContext) -> Result<()> {
        let licenses = Layout::license_dir(&ctx.install_prefix);
        copy_into(&self.layout.source_dir, LICENSE_FILE, &licenses)
            .context("failed to package license")?;

        tool.install(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::package::FixedVersion;
    use crate::core::settings::{BuildType, CompilerSettings, Os};
    use crate::core::OptionName;

    fn settings(os: Os) -> Settings {
        Settings {
            os,
            compiler: CompilerSettings {
                name: "gcc".to_string(),
                version: "12".to_string(),
                cppstd: None,
            },
            build_type: BuildType::Release,
            arch: "x86_64".to_string(),
        }
    }

    #[test]
    fn test_load_prunes_fpic_on_windows() {
        let recipe = Recipe::load(
            Path::new("/src"),
            &FixedVersion("0.1.0".to_string()),
            settings(Os::Windows),
            &OptionOverrides::default(),
        )
        .unwrap();

        assert_eq!(
            recipe.options.names(),
            vec![OptionName::Shared, OptionName::AsanEnabled]
        );
        assert_eq!(recipe.identity.reference(), "func-gen/0.1.0");
        assert_eq!(recipe.layout.build_dir, PathBuf::from("/src/build/Release"));
    }

    #[test]
    fn test_load_keeps_fpic_for_static_linux() {
        let recipe = Recipe::load(
            Path::new("/src"),
            &FixedVersion("0.1.0".to_string()),
            settings(Os::Linux),
            &OptionOverrides::default(),
        )
        .unwrap();

        assert_eq!(recipe.options.fpic(), Some(true));
    }

    #[test]
    fn test_load_fails_on_malformed_version() {
        let err = Recipe::load(
            Path::new("/src"),
            &FixedVersion("1.0/beta".to_string()),
            settings(Os::Linux),
            &OptionOverrides::default(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("1.0/beta"));
    }
}
