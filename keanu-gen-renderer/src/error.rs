//! Error types for keanu-gen-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template discovery, loading and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building the render context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while reading templates.
    #[error("template io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configured search directory is missing or not a directory.
    #[error("template search directory {path} is not a readable directory")]
    SearchDir { path: PathBuf },

    /// A template referenced by another one is in none of the search directories.
    #[error("template '{name}' referenced by '{referenced_by}' not found in any search directory")]
    TemplateNotFound { name: String, referenced_by: String },

    /// A template source file is not valid Tera.
    #[error("failed to parse template '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: tera::Error,
    },

    /// The template defines no block with this name.
    #[error("template '{template}' has no block '{block}'")]
    UnknownBlock { template: String, block: String },
}

/// Convenience constructor for [`RenderError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}
