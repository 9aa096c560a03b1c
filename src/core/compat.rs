//! Compiler compatibility validation.
//!
//! The build is gated on three checks, in order:
//! 1. the compiler is one of the supported families,
//! 2. its version is at least that family's minimum,
//! 3. a declared `compiler.cppstd` is at least [`MIN_CPPSTD`].
//!
//! Validation is pure: it either returns `Ok(())` or the first failure. It
//! never substitutes another compiler or standard.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::cppstd::{CppStandard, CppStdSetting};
use crate::core::package;
use crate::core::settings::CompilerSettings;
use crate::core::version::CompilerVersion;

/// Lowest C++ standard the library compiles under.
pub const MIN_CPPSTD: CppStandard = CppStandard::Cpp11;

/// Compiler families with a known minimum version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedCompiler {
    AppleClang,
    Clang,
    Gcc,
    Msvc,
}

impl SupportedCompiler {
    pub const ALL: [SupportedCompiler; 4] = [
        SupportedCompiler::AppleClang,
        SupportedCompiler::Clang,
        SupportedCompiler::Gcc,
        SupportedCompiler::Msvc,
    ];

    /// Look up a `compiler` setting value.
    pub fn from_name(name: &str) -> Option<Self> {
        SupportedCompiler::ALL
            .into_iter()
            .find(|compiler| compiler.name() == name)
    }

    /// Setting value naming this compiler.
    pub fn name(&self) -> &'static str {
        match self {
            SupportedCompiler::AppleClang => "apple-clang",
            SupportedCompiler::Clang => "clang",
            SupportedCompiler::Gcc => "gcc",
            SupportedCompiler::Msvc => "msvc",
        }
    }

    /// Name used in diagnostics (the C++ driver).
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportedCompiler::AppleClang => "apple-clang++",
            SupportedCompiler::Clang => "clang++",
            SupportedCompiler::Gcc => "g++",
            SupportedCompiler::Msvc => "msvc",
        }
    }

    /// Minimum supported version, as written in diagnostics.
    pub fn minimum_version_str(&self) -> &'static str {
        match self {
            SupportedCompiler::AppleClang => "14",
            SupportedCompiler::Clang => "13",
            SupportedCompiler::Gcc => "10.0",
            SupportedCompiler::Msvc => "19.29",
        }
    }

    pub fn minimum_version(&self) -> CompilerVersion {
        match self {
            SupportedCompiler::AppleClang => CompilerVersion::from_components(&[14]),
            SupportedCompiler::Clang => CompilerVersion::from_components(&[13]),
            SupportedCompiler::Gcc => CompilerVersion::from_components(&[10, 0]),
            SupportedCompiler::Msvc => CompilerVersion::from_components(&[19, 29]),
        }
    }
}

impl std::fmt::Display for SupportedCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a configuration cannot be built.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigurationError {
    #[error("unsupported compiler `{name}`")]
    #[diagnostic(
        code(funcgen::unsupported_compiler),
        help("supported compilers: apple-clang, clang, gcc, msvc")
    )]
    UnsupportedCompiler { name: String },

    #[error(
        "{} requires at least {} {} (found {})",
        package::NAME,
        .compiler.display_name(),
        .compiler.minimum_version_str(),
        .found
    )]
    #[diagnostic(
        code(funcgen::compiler_too_old),
        help("upgrade the compiler or select a newer one with `-s compiler.version=<version>`")
    )]
    BelowMinimumVersion {
        compiler: SupportedCompiler,
        found: String,
    },

    #[error("invalid version `{version}` for compiler `{compiler}`: expected dotted numeric form like `10.0`")]
    #[diagnostic(code(funcgen::invalid_compiler_version))]
    InvalidCompilerVersion {
        compiler: SupportedCompiler,
        version: String,
    },

    #[error("current cppstd ({found}) is lower than the required C++ standard ({required})")]
    #[diagnostic(
        code(funcgen::cppstd_too_old),
        help("pass `-s compiler.cppstd=11` or newer")
    )]
    BelowMinimumStandard {
        found: CppStdSetting,
        required: CppStandard,
    },
}

/// Check a compiler configuration against the compatibility matrix.
pub fn validate(compiler: &CompilerSettings) -> Result<(), ConfigurationError> {
    let Some(supported) = SupportedCompiler::from_name(&compiler.name) else {
        return Err(ConfigurationError::UnsupportedCompiler {
            name: compiler.name.clone(),
        });
    };

    let found = CompilerVersion::parse(&compiler.version).map_err(|_| {
        ConfigurationError::InvalidCompilerVersion {
            compiler: supported,
            version: compiler.version.clone(),
        }
    })?;

    if found < supported.minimum_version() {
        return Err(ConfigurationError::BelowMinimumVersion {
            compiler: supported,
            found: compiler.version.clone(),
        });
    }

    if let Some(cppstd) = compiler.cppstd {
        if cppstd.standard < MIN_CPPSTD {
            return Err(ConfigurationError::BelowMinimumStandard {
                found: cppstd,
                required: MIN_CPPSTD,
            });
        }
    }

    tracing::debug!(
        "compiler {} {} accepted (minimum {})",
        supported,
        found,
        supported.minimum_version_str()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiler(name: &str, version: &str) -> CompilerSettings {
        CompilerSettings {
            name: name.to_string(),
            version: version.to_string(),
            cppstd: None,
        }
    }

    #[test]
    fn test_gcc_nine_rejected() {
        let err = validate(&compiler("gcc", "9.0")).unwrap_err();
        assert!(matches!(err, ConfigurationError::BelowMinimumVersion { .. }));
        assert!(
            err.to_string().contains("g++ 10.0"),
            "message should name the minimum. Got: {}",
            err
        );
    }

    #[test]
    fn test_gcc_ten_accepted() {
        assert!(validate(&compiler("gcc", "10.0")).is_ok());
        assert!(validate(&compiler("gcc", "10")).is_ok());
        assert!(validate(&compiler("gcc", "13.2")).is_ok());
    }

    #[test]
    fn test_msvc_boundary() {
        let err = validate(&compiler("msvc", "19.28")).unwrap_err();
        assert!(err.to_string().contains("msvc 19.29"));
        assert!(validate(&compiler("msvc", "19.29")).is_ok());
        assert!(validate(&compiler("msvc", "193")).is_ok());
    }

    #[test]
    fn test_every_family_at_and_below_minimum() {
        for supported in SupportedCompiler::ALL {
            let minimum = supported.minimum_version_str();
            assert!(
                validate(&compiler(supported.name(), minimum)).is_ok(),
                "{} {} should be accepted",
                supported,
                minimum
            );

            let mut below = supported.minimum_version().components().to_vec();
            let last = below.len() - 1;
            if below[last] == 0 {
                below[0] -= 1;
            } else {
                below[last] -= 1;
            }
            let below = CompilerVersion::from_components(&below).to_string();

            let err = validate(&compiler(supported.name(), &below)).unwrap_err();
            let message = err.to_string();
            assert!(message.contains(supported.display_name()), "{}", message);
            assert!(message.contains(minimum), "{}", message);
        }
    }

    #[test]
    fn test_unlisted_compiler_always_rejected() {
        for version in ["1", "2023.2", "999", "not-a-version"] {
            let err = validate(&compiler("intel", version)).unwrap_err();
            assert!(matches!(err, ConfigurationError::UnsupportedCompiler { .. }));
            assert!(err.to_string().contains("unsupported compiler"));
        }
    }

    #[test]
    fn test_name_lookup_is_exact() {
        assert_eq!(SupportedCompiler::from_name("gcc"), Some(SupportedCompiler::Gcc));
        assert_eq!(SupportedCompiler::from_name("GCC"), None);
        assert_eq!(SupportedCompiler::from_name("clang-cl"), None);
    }

    #[test]
    fn test_invalid_version_for_known_compiler() {
        let err = validate(&compiler("clang", "thirteen")).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidCompilerVersion { .. }));
    }

    #[test]
    fn test_apple_clang_trailing_components() {
        assert!(validate(&compiler("apple-clang", "14.0.0")).is_ok());
        assert!(validate(&compiler("apple-clang", "13.1.6")).is_err());
    }

    #[test]
    fn test_cppstd_floor() {
        let mut settings = compiler("gcc", "12");
        settings.cppstd = Some(CppStdSetting::gnu(CppStandard::Cpp98));

        let err = validate(&settings).unwrap_err();
        assert!(matches!(err, ConfigurationError::BelowMinimumStandard { .. }));
        assert!(err.to_string().contains("C++11"));

        settings.cppstd = Some(CppStdSetting::new(CppStandard::Cpp11));
        assert!(validate(&settings).is_ok());

        settings.cppstd = Some(CppStdSetting::gnu(CppStandard::Cpp20));
        assert!(validate(&settings).is_ok());
    }

    #[test]
    fn test_version_checked_before_cppstd() {
        let mut settings = compiler("clang", "12");
        settings.cppstd = Some(CppStdSetting::new(CppStandard::Cpp98));

        let err = validate(&settings).unwrap_err();
        assert!(matches!(err, ConfigurationError::BelowMinimumVersion { .. }));
    }
}
