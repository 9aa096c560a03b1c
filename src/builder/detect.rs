//! Host compiler detection.
//!
//! Probes the C++ drivers on PATH, classifies the family from the
//! `--version` banner and reports the version in the form the compatibility
//! matrix uses (major for gcc/clang/apple-clang, `major.minor` for msvc).

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{bail, Result};
use regex::Regex;

use crate::core::compat::SupportedCompiler;
use crate::util::process::{find_cxx_compilers, ProcessBuilder};

static VERSION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("static regex is valid"));

/// A compiler found on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedCompiler {
    pub compiler: SupportedCompiler,
    pub version: String,
    pub path: PathBuf,
}

/// Detect the first usable C++ compiler.
pub fn detect_compiler() -> Result<DetectedCompiler> {
    for path in find_cxx_compilers() {
        match probe(&path) {
            Some(detected) => {
                tracing::info!(
                    "Detected {} {} at {}",
                    detected.compiler,
                    detected.version,
                    detected.path.display()
                );
                return Ok(detected);
            }
            None => tracing::debug!("could not identify compiler at {}", path.display()),
        }
    }

    bail!(
        "no C++ compiler found\n\
         \n\
         func-gen requires apple-clang, clang, gcc or msvc.\n\
         Set the CXX environment variable or install a compiler."
    )
}

fn probe(path: &Path) -> Option<DetectedCompiler> {
    let is_cl = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.eq_ignore_ascii_case("cl"));

    // cl prints its banner on stderr and rejects --version
    let output = if is_cl {
        ProcessBuilder::new(path).exec().ok()?
    } else {
        ProcessBuilder::new(path).arg("--version").exec().ok()?
    };

    let mut banner = String::from_utf8_lossy(&output.stdout).into_owned();
    banner.push_str(&String::from_utf8_lossy(&output.stderr));

    let (compiler, version) = parse_banner(&banner)?;
    Some(DetectedCompiler {
        compiler,
        version,
        path: path.to_path_buf(),
    })
}

/// Classify a `--version` banner and extract the version.
pub fn parse_banner(banner: &str) -> Option<(SupportedCompiler, String)> {
    let first_line = banner.lines().find(|l| !l.trim().is_empty())?;
    let lower = banner.to_lowercase();

    let compiler = if lower.contains("apple") && lower.contains("clang") {
        SupportedCompiler::AppleClang
    } else if lower.contains("clang") {
        SupportedCompiler::Clang
    } else if lower.contains("microsoft") {
        SupportedCompiler::Msvc
    } else if lower.contains("gcc") || lower.contains("g++") || lower.contains("free software foundation") {
        SupportedCompiler::Gcc
    } else {
        return None;
    };

    // gcc puts the distro package version in parentheses before the real one
    let line = match compiler {
        SupportedCompiler::Gcc => first_line.rsplit(')').next().unwrap_or(first_line),
        _ => first_line,
    };
    let caps = VERSION_NUMBER.captures(line)?;

    let version = match compiler {
        SupportedCompiler::Msvc => format!("{}.{}", &caps[1], &caps[2]),
        _ => caps[1].to_string(),
    };

    Some((compiler, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gcc_banner() {
        let banner = "g++ (Ubuntu 11.4.0-1ubuntu1~22.04) 11.4.0\nCopyright (C) 2021 Free Software Foundation, Inc.\n";
        assert_eq!(
            parse_banner(banner),
            Some((SupportedCompiler::Gcc, "11".to_string()))
        );
    }

    #[test]
    fn test_parse_clang_banner() {
        let banner = "Ubuntu clang version 14.0.0-1ubuntu1.1\nTarget: x86_64-pc-linux-gnu\n";
        assert_eq!(
            parse_banner(banner),
            Some((SupportedCompiler::Clang, "14".to_string()))
        );
    }

    #[test]
    fn test_parse_apple_clang_banner() {
        let banner = "Apple clang version 14.0.3 (clang-1403.0.22.14.1)\nTarget: arm64-apple-darwin22.5.0\n";
        assert_eq!(
            parse_banner(banner),
            Some((SupportedCompiler::AppleClang, "14".to_string()))
        );
    }

    #[test]
    fn test_parse_msvc_banner() {
        let banner = "Microsoft (R) C/C++ Optimizing Compiler Version 19.29.30133 for x64\nCopyright (C) Microsoft Corporation.  All rights reserved.\n";
        assert_eq!(
            parse_banner(banner),
            Some((SupportedCompiler::Msvc, "19.29".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown_banner() {
        assert_eq!(parse_banner("icpx (R) oneAPI DPC++/C++ Compiler 2023.2.0\n"), None);
        assert_eq!(parse_banner(""), None);
    }
}
