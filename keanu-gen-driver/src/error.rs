//! Error types for keanu-gen-driver.

use std::path::PathBuf;

use thiserror::Error;

use keanu_gen_renderer::RenderError;

/// Run-level failures. Anything scoped to a single template is reported in
/// the [`GenerateReport`](crate::GenerateReport) instead.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The render context could not be built.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// The output directory cannot be accessed.
    #[error("cannot access output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output path exists but is not a directory.
    #[error("output path {path} is not a directory")]
    OutputNotDirectory { path: PathBuf },

    /// Template enumeration failed as a whole.
    #[error("template discovery failed: {0}")]
    Discovery(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`GenerateError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> GenerateError {
    GenerateError::Io {
        path: path.into(),
        source,
    }
}
