use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown target architecture `{0}`")]
    UnknownArchitecture(String),

    #[error("{0}")]
    UnknownPolicy(String),

    #[error("invalid boolean `{value}` for {key}")]
    InvalidFlag { key: String, value: String },

    #[error("failed to access config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "toml-config")]
    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[cfg(feature = "toml-config")]
    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),

    #[error("TOML support not enabled. Enable the 'toml-config' feature.")]
    TomlDisabled,
}
