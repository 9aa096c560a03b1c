//! CMake toolchain file generation.
//!
//! The toolchain file carries every decision the recipe has made (build type,
//! linkage, PIC, language standard, sanitizer switch) into CMake, which reads
//! it through `-DCMAKE_TOOLCHAIN_FILE`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::cppstd::CppStdSetting;
use crate::core::layout::Layout;
use crate::core::options::OptionSet;
use crate::core::settings::{BuildType, Os, Settings};
use crate::generators::cmake_path;
use crate::util::fs::write_string;

/// File name of the generated toolchain.
pub const TOOLCHAIN_FILE: &str = "funcgen_toolchain.cmake";

/// A value for a CMake cache variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CMakeValue {
    Bool(bool),
    String(String),
    Path(PathBuf),
}

impl CMakeValue {
    fn cache_type(&self) -> &'static str {
        match self {
            CMakeValue::Bool(_) => "BOOL",
            CMakeValue::String(_) => "STRING",
            CMakeValue::Path(_) => "PATH",
        }
    }

    fn render(&self) -> String {
        match self {
            CMakeValue::Bool(b) => if *b { "ON" } else { "OFF" }.to_string(),
            CMakeValue::String(s) => format!("\"{}\"", s),
            CMakeValue::Path(p) => format!("\"{}\"", cmake_path(p)),
        }
    }
}

/// The toolchain descriptor for one invocation.
#[derive(Debug, Clone)]
pub struct CMakeToolchain {
    build_type: BuildType,
    shared: bool,
    fpic: Option<bool>,
    cppstd: Option<CppStdSetting>,
    osx_architecture: Option<String>,
    generators_dir: PathBuf,
    /// Project variables, written last, in insertion order.
    pub variables: Vec<(String, CMakeValue)>,
}

impl CMakeToolchain {
    /// Build the descriptor from settings and the pruned option set.
    pub fn new(settings: &Settings, options: &OptionSet, layout: &Layout) -> Self {
        let osx_architecture = match settings.os {
            Os::Macos | Os::Ios => Some(apple_arch(&settings.arch).to_string()),
            _ => None,
        };

        let mut toolchain = CMakeToolchain {
            build_type: settings.build_type,
            shared: options.shared(),
            fpic: options.fpic(),
            cppstd: settings.compiler.cppstd,
            osx_architecture,
            generators_dir: layout.generators_dir.clone(),
            variables: Vec::new(),
        };

        toolchain.set("ASAN_ENABLED", CMakeValue::Bool(options.asan_enabled()));
        toolchain
    }

    /// Set a project variable, replacing an earlier value of the same name.
    pub fn set(&mut self, name: impl Into<String>, value: CMakeValue) {
        let name = name.into();
        match self.variables.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.variables.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CMakeValue> {
        self.variables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Render the toolchain file contents.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("# Toolchain generated by funcgen-recipe; do not edit.\n");
        out.push_str("include_guard()\n\n");

        let _ = writeln!(
            out,
            "set(CMAKE_BUILD_TYPE \"{}\" CACHE STRING \"Build type\" FORCE)",
            self.build_type
        );
        let _ = writeln!(
            out,
            "set(BUILD_SHARED_LIBS {} CACHE BOOL \"Build shared libraries\")",
            CMakeValue::Bool(self.shared).render()
        );

        if let Some(fpic) = self.fpic {
            let _ = writeln!(
                out,
                "set(CMAKE_POSITION_INDEPENDENT_CODE {} CACHE BOOL \"Position independent code\")",
                CMakeValue::Bool(fpic).render()
            );
        }

        if let Some(cppstd) = self.cppstd {
            let _ = writeln!(out, "\nset(CMAKE_CXX_STANDARD {})", cppstd.standard.as_number());
            let _ = writeln!(
                out,
                "set(CMAKE_CXX_EXTENSIONS {})",
                CMakeValue::Bool(cppstd.gnu_extensions).render()
            );
            out.push_str("set(CMAKE_CXX_STANDARD_REQUIRED ON)\n");
        }

        if let Some(ref arch) = self.osx_architecture {
            let _ = writeln!(
                out,
                "\nset(CMAKE_OSX_ARCHITECTURES \"{}\" CACHE STRING \"\" FORCE)",
                arch
            );
        }

        let generators = cmake_path(&self.generators_dir);
        let _ = writeln!(out, "\nlist(PREPEND CMAKE_PREFIX_PATH \"{}\")", generators);
        let _ = writeln!(out, "list(PREPEND CMAKE_MODULE_PATH \"{}\")", generators);

        if !self.variables.is_empty() {
            out.push('\n');
        }
        for (name, value) in &self.variables {
            let _ = writeln!(
                out,
                "set({} {} CACHE {} \"Variable {} defined by funcgen-recipe\")",
                name,
                value.render(),
                value.cache_type(),
                name
            );
        }

        out
    }

    /// Write the toolchain into `generators_dir` and return its path.
    pub fn generate(&self, generators_dir: &Path) -> Result<PathBuf> {
        let path = generators_dir.join(TOOLCHAIN_FILE);
        tracing::debug!("writing toolchain {}", path.display());
        write_string(&path, &self.render())?;
        Ok(path)
    }
}

fn apple_arch(arch: &str) -> &str {
    match arch {
        "armv8" | "aarch64" => "arm64",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cppstd::CppStandard;
    use crate::core::options::OptionOverrides;
    use crate::core::settings::CompilerSettings;
    use tempfile::TempDir;

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

    fn options(overrides: OptionOverrides, os: &Os) -> OptionSet {
        OptionSet::with_overrides(&overrides).pruned_for(os)
    }

    #[test]
    fn test_asan_variable_follows_option() {
        let s = settings(Os::Linux);
        let layout = Layout::plan(Path::new("/src"), s.build_type);

        let off = CMakeToolchain::new(&s, &options(Default::default(), &s.os), &layout);
        assert_eq!(off.get("ASAN_ENABLED"), Some(&CMakeValue::Bool(false)));
        assert!(off.render().contains("set(ASAN_ENABLED OFF CACHE BOOL"));

        let asan = OptionOverrides {
            asan_enabled: Some(true),
            ..Default::default()
        };
        let on = CMakeToolchain::new(&s, &options(asan, &s.os), &layout);
        assert!(on.render().contains("set(ASAN_ENABLED ON CACHE BOOL"));
    }

    #[test]
    fn test_pic_only_when_option_present() {
        let linux = settings(Os::Linux);
        let layout = Layout::plan(Path::new("/src"), linux.build_type);
        let rendered =
            CMakeToolchain::new(&linux, &options(Default::default(), &linux.os), &layout).render();
        assert!(rendered.contains("set(CMAKE_POSITION_INDEPENDENT_CODE ON"));
        assert!(rendered.contains("set(BUILD_SHARED_LIBS OFF"));

        let windows = settings(Os::Windows);
        let rendered =
            CMakeToolchain::new(&windows, &options(Default::default(), &windows.os), &layout)
                .render();
        assert!(!rendered.contains("CMAKE_POSITION_INDEPENDENT_CODE"));

        let shared = OptionOverrides {
            shared: Some(true),
            ..Default::default()
        };
        let rendered =
            CMakeToolchain::new(&linux, &options(shared, &linux.os), &layout).render();
        assert!(!rendered.contains("CMAKE_POSITION_INDEPENDENT_CODE"));
        assert!(rendered.contains("set(BUILD_SHARED_LIBS ON"));
    }

    #[test]
    fn test_cppstd_and_paths() {
        let mut s = settings(Os::Linux);
        s.compiler.cppstd = Some(CppStdSetting::gnu(CppStandard::Cpp20));
        let layout = Layout::plan(Path::new("/src"), s.build_type);

        let rendered = CMakeToolchain::new(&s, &options(Default::default(), &s.os), &layout).render();
        assert!(rendered.contains("set(CMAKE_CXX_STANDARD 20)"));
        assert!(rendered.contains("set(CMAKE_CXX_EXTENSIONS ON)"));
        assert!(rendered.contains("list(PREPEND CMAKE_PREFIX_PATH \"/src/build/Release/generators\")"));
        assert!(rendered.contains("set(CMAKE_BUILD_TYPE \"Release\""));
    }

    #[test]
    fn test_macos_architecture() {
        let mut s = settings(Os::Macos);
        s.arch = "armv8".to_string();
        let layout = Layout::plan(Path::new("/src"), s.build_type);

        let rendered = CMakeToolchain::new(&s, &options(Default::default(), &s.os), &layout).render();
        assert!(rendered.contains("set(CMAKE_OSX_ARCHITECTURES \"arm64\""));
    }

    #[test]
    fn test_set_replaces_existing() {
        let s = settings(Os::Linux);
        let layout = Layout::plan(Path::new("/src"), s.build_type);
        let mut tc = CMakeToolchain::new(&s, &options(Default::default(), &s.os), &layout);

        tc.set("ASAN_ENABLED", CMakeValue::Bool(true));
        tc.set("FUNC_GEN_DOCS", CMakeValue::String("none".to_string()));

        assert_eq!(tc.variables.len(), 2);
        assert_eq!(tc.get("ASAN_ENABLED"), Some(&CMakeValue::Bool(true)));
        assert!(tc.render().contains("set(FUNC_GEN_DOCS \"none\" CACHE STRING"));
    }

    #[test]
    fn test_generate_writes_file() {
        let tmp = TempDir::new().unwrap();
        let s = settings(Os::Linux);
        let layout = Layout::plan(tmp.path(), s.build_type);
        let tc = CMakeToolchain::new(&s, &options(Default::default(), &s.os), &layout);

        let path = tc.generate(&layout.generators_dir).unwrap();
        assert_eq!(path, layout.generators_dir.join(TOOLCHAIN_FILE));
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("ASAN_ENABLED"));
    }
}
