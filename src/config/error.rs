use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// A source that failed to materialize its data.
///
/// Stored inside the source and reported by [`bind`](crate::bind) before any
/// field is touched. Causes are shared so the error can be handed out
/// without consuming the source.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("required config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read {origin}: {source}")]
    ReadError {
        origin: String,
        source: Arc<std::io::Error>,
    },

    #[error("failed to parse {origin}: {source}")]
    ParseError {
        origin: String,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Other(Arc<dyn std::error::Error + Send + Sync>),
}

impl SourceError {
    pub(crate) fn read(origin: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadError {
            origin: origin.into(),
            source: Arc::new(source),
        }
    }

    /// Wraps an arbitrary error, e.g. one produced while preparing a source
    /// outside this crate.
    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(Arc::new(error))
    }
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        Self::read("stream", e)
    }
}
