use crate::bind::FieldError;
use crate::config::SourceError;
use thiserror::Error;

/// Top-level error type for the dragon-bind library.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("config source error: {0}")]
    Source(#[from] SourceError),

    #[error(transparent)]
    Field(#[from] FieldError),
}
