//! C++ language standard settings.
//!
//! A declared `compiler.cppstd` is a standard level plus an optional GNU
//! extension flag (`17` vs `gnu17`). Only the level takes part in ordering.

use serde::{Deserialize, Serialize};

/// C++ standard version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CppStandard {
    /// C++98 (also accepted as 03)
    Cpp98,
    /// C++11
    Cpp11,
    /// C++14
    Cpp14,
    /// C++17
    Cpp17,
    /// C++20
    Cpp20,
    /// C++23
    Cpp23,
    /// C++26
    Cpp26,
}

impl CppStandard {
    /// Get the two-digit year used by CMake's `CMAKE_CXX_STANDARD`.
    pub fn as_number(&self) -> &'static str {
        match self {
            CppStandard::Cpp98 => "98",
            CppStandard::Cpp11 => "11",
            CppStandard::Cpp14 => "14",
            CppStandard::Cpp17 => "17",
            CppStandard::Cpp20 => "20",
            CppStandard::Cpp23 => "23",
            CppStandard::Cpp26 => "26",
        }
    }
}

impl std::str::FromStr for CppStandard {
    type Err = CppStandardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "98" | "03" | "c++98" | "c++03" => Ok(CppStandard::Cpp98),
            "11" | "c++11" | "cpp11" => Ok(CppStandard::Cpp11),
            "14" | "c++14" | "cpp14" => Ok(CppStandard::Cpp14),
            "17" | "c++17" | "cpp17" => Ok(CppStandard::Cpp17),
            "20" | "c++20" | "cpp20" => Ok(CppStandard::Cpp20),
            "23" | "c++23" | "cpp23" => Ok(CppStandard::Cpp23),
            "26" | "c++26" | "cpp26" => Ok(CppStandard::Cpp26),
            _ => Err(CppStandardParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for CppStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C++{}", self.as_number())
    }
}

/// Error returned when parsing an invalid C++ standard string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid C++ standard '{0}', valid values: 98, 11, 14, 17, 20, 23, 26 (optionally prefixed with `gnu`)")]
pub struct CppStandardParseError(pub String);

/// The `compiler.cppstd` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CppStdSetting {
    pub standard: CppStandard,
    pub gnu_extensions: bool,
}

impl CppStdSetting {
    pub fn new(standard: CppStandard) -> Self {
        CppStdSetting {
            standard,
            gnu_extensions: false,
        }
    }

    pub fn gnu(standard: CppStandard) -> Self {
        CppStdSetting {
            standard,
            gnu_extensions: true,
        }
    }
}

impl std::str::FromStr for CppStdSetting {
    type Err = CppStandardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (level, gnu_extensions) = match trimmed.strip_prefix("gnu") {
            Some(rest) => (rest, true),
            None => (trimmed, false),
        };

        let standard = level
            .parse::<CppStandard>()
            .map_err(|_| CppStandardParseError(s.to_string()))?;

        Ok(CppStdSetting {
            standard,
            gnu_extensions,
        })
    }
}

impl TryFrom<String> for CppStdSetting {
    type Error = CppStandardParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CppStdSetting> for String {
    fn from(value: CppStdSetting) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for CppStdSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.gnu_extensions {
            write!(f, "gnu{}", self.standard.as_number())
        } else {
            write!(f, "{}", self.standard.as_number())
        }
    }
}
