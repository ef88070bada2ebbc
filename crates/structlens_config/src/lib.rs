//! Analyzer configuration.
//!
//! Values come from defaults, an optional TOML file and `STRUCTLENS_*`
//! environment variables, in that order of precedence.

pub mod error;
pub mod target;

pub use crate::error::ConfigError;
pub use crate::target::TargetArch;

use serde::{Deserialize, Serialize};
use std::path::Path;
use structlens_layout::WordSize;
use structlens_parser::{MultiNamePolicy, ParseOptions};
use tracing::warn;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_ARCH: &str = "STRUCTLENS_ARCH";
pub const ENV_INLINE_ANNOTATIONS: &str = "STRUCTLENS_INLINE_ANNOTATIONS";
pub const ENV_OPTIMIZATION_WARNINGS: &str = "STRUCTLENS_OPTIMIZATION_WARNINGS";
pub const ENV_MULTI_NAME_FIELDS: &str = "STRUCTLENS_MULTI_NAME_FIELDS";

/// Complete analyzer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AnalyzerConfig {
    /// Target architecture, decides the word size
    pub architecture: TargetArch,

    /// Emit per-field and per-record annotations
    pub show_inline_annotations: bool,

    /// Emit a warning for every record whose size a reordering would reduce
    pub enable_optimization_warnings: bool,

    /// How `a, b T` field lines are recorded
    pub multi_name_fields: MultiNamePolicy,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            architecture: TargetArch::default(),
            show_inline_annotations: true,
            enable_optimization_warnings: true,
            multi_name_fields: MultiNamePolicy::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn word_size(&self) -> WordSize {
        self.architecture.word_size()
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            multi_name_fields: self.multi_name_fields,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::default().merge_with_env()
    }

    /// Merge with environment variables (env vars take precedence)
    pub fn merge_with_env(self) -> Self {
        self.merge_with(|key| std::env::var(key).ok())
    }

    /// Overrides every setting for which `lookup` yields a value. Values that
    /// fail to parse are reported and leave the setting untouched.
    pub fn merge_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup(ENV_ARCH) {
            match TargetArch::parse(&val) {
                Ok(arch) => self.architecture = arch,
                Err(err) => warn!("ignoring {ENV_ARCH}: {err}"),
            }
        }

        if let Some(val) = lookup(ENV_INLINE_ANNOTATIONS) {
            match parse_flag(ENV_INLINE_ANNOTATIONS, &val) {
                Ok(flag) => self.show_inline_annotations = flag,
                Err(err) => warn!("ignoring {err}"),
            }
        }

        if let Some(val) = lookup(ENV_OPTIMIZATION_WARNINGS) {
            match parse_flag(ENV_OPTIMIZATION_WARNINGS, &val) {
                Ok(flag) => self.enable_optimization_warnings = flag,
                Err(err) => warn!("ignoring {err}"),
            }
        }

        if let Some(val) = lookup(ENV_MULTI_NAME_FIELDS) {
            match parse_policy(&val) {
                Ok(policy) => self.multi_name_fields = policy,
                Err(err) => warn!("ignoring {ENV_MULTI_NAME_FIELDS}: {err}"),
            }
        }

        self
    }

    /// Load configuration from TOML file
    #[cfg(feature = "toml-config")]
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from TOML file (stub when toml feature is disabled)
    #[cfg(not(feature = "toml-config"))]
    pub fn from_file(_path: &Path) -> Result<Self, ConfigError> {
        Err(ConfigError::TomlDisabled)
    }

    /// Save configuration to TOML file
    #[cfg(feature = "toml-config")]
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save configuration to TOML file (stub when toml feature is disabled)
    #[cfg(not(feature = "toml-config"))]
    pub fn save_to_file(&self, _path: &Path) -> Result<(), ConfigError> {
        Err(ConfigError::TomlDisabled)
    }
}

fn parse_policy(value: &str) -> Result<MultiNamePolicy, ConfigError> {
    value.trim().parse().map_err(ConfigError::UnknownPolicy)
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
