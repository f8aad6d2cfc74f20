use std::borrow::Cow;

use crate::bind::Field;

use super::SourceError;

/// An origin of raw string values keyed by field name.
///
/// Sources are read-only once constructed; any I/O happens up front and a
/// failure is kept as the terminal error returned by [`err`](Self::err).
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Raw value for `field`, or `None` if this source does not know it.
    fn lookup(&self, field: &Field<'_>) -> Option<Cow<'_, str>>;

    /// Error encountered while materializing the source.
    fn err(&self) -> Option<SourceError> {
        None
    }
}

/// A source that carries an already-known error and never finds anything.
#[derive(Debug, Clone)]
pub struct FailedSource {
    error: SourceError,
}

impl FailedSource {
    pub fn new(error: impl Into<SourceError>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl Source for FailedSource {
    fn lookup(&self, _field: &Field<'_>) -> Option<Cow<'_, str>> {
        None
    }

    fn err(&self) -> Option<SourceError> {
        Some(self.error.clone())
    }
}
