//! Error types for keanu-gen-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while resolving generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure, annotated with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load; carries the file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A config file was named explicitly but does not exist.
    #[error("config file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Neither the config file nor the command line named a template directory.
    #[error("no template directories configured; pass --template-dir or set `template-dirs`")]
    NoTemplateDirs,

    /// The output path is missing or not a directory.
    #[error("output path {path} is not an existing directory")]
    OutputNotDirectory { path: PathBuf },
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
