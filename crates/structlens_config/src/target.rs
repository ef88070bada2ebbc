//! Target architecture selection.
//!
//! Accepts the architecture names Go uses for `GOARCH` plus the common LLVM
//! spellings, and maps each to the word size the layout engine needs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use structlens_layout::WordSize;

use crate::error::ConfigError;

/// A known target architecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct TargetArch {
    /// Canonical `GOARCH` name (e.g. amd64, arm64, 386)
    name: &'static str,
    word_size: WordSize,
}

const ARCHITECTURES: &[(&str, WordSize)] = &[
    ("amd64", WordSize::Eight),
    ("arm64", WordSize::Eight),
    ("ppc64", WordSize::Eight),
    ("ppc64le", WordSize::Eight),
    ("mips64", WordSize::Eight),
    ("mips64le", WordSize::Eight),
    ("riscv64", WordSize::Eight),
    ("s390x", WordSize::Eight),
    ("loong64", WordSize::Eight),
    ("wasm", WordSize::Eight),
    ("386", WordSize::Four),
    ("arm", WordSize::Four),
    ("mips", WordSize::Four),
    ("mipsle", WordSize::Four),
];

impl TargetArch {
    /// Parse an architecture name (e.g., "amd64", "x86_64", "386")
    pub fn parse(arch: &str) -> Result<Self, ConfigError> {
        let lowered = arch.trim().to_lowercase();
        // Normalize LLVM-style names to their GOARCH equivalents
        let canonical = match lowered.as_str() {
            "x86_64" | "x86-64" | "x64" => "amd64",
            "aarch64" => "arm64",
            "i386" | "i686" | "x86" => "386",
            "wasm32" => "wasm",
            other => other,
        };

        ARCHITECTURES
            .iter()
            .find(|(name, _)| *name == canonical)
            .map(|&(name, word_size)| Self { name, word_size })
            .ok_or_else(|| ConfigError::UnknownArchitecture(arch.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn word_size(&self) -> WordSize {
        self.word_size
    }

    /// Check if this is a 64-bit target
    pub fn is_64_bit(&self) -> bool {
        self.word_size == WordSize::Eight
    }

    /// x86-64 (amd64), the default target
    pub fn amd64() -> Self {
        Self {
            name: "amd64",
            word_size: WordSize::Eight,
        }
    }

    /// 64-bit ARM (arm64)
    pub fn arm64() -> Self {
        Self {
            name: "arm64",
            word_size: WordSize::Eight,
        }
    }

    /// 32-bit x86 (386)
    pub fn i386() -> Self {
        Self {
            name: "386",
            word_size: WordSize::Four,
        }
    }

    /// 32-bit ARM (arm)
    pub fn arm() -> Self {
        Self {
            name: "arm",
            word_size: WordSize::Four,
        }
    }

    pub fn known_names() -> impl Iterator<Item = &'static str> {
        ARCHITECTURES.iter().map(|(name, _)| *name)
    }
}

impl Default for TargetArch {
    fn default() -> Self {
        Self::amd64()
    }
}

impl FromStr for TargetArch {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TargetArch {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

// Written by hand: the derive would infer `'de: 'static` from the
// `&'static str` field even with `try_from`.
impl<'de> Deserialize<'de> for TargetArch {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl From<TargetArch> for String {
    fn from(value: TargetArch) -> Self {
        value.name.to_string()
    }
}

impl fmt::Display for TargetArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
