//! File-based `key=value` source.

use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::bind::Field;

use super::source::Source;
use super::stream::StreamSource;
use super::SourceError;

/// A `key=value` file, read once when the source is created.
///
/// Files opened with [`open`](Self::open) are optional overlays: if the
/// file cannot be opened the source is simply empty. Files opened with
/// [`require`](Self::require) turn a missing file into a terminal error.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    entries: StreamSource,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::load(path.as_ref(), false)
    }

    pub fn require(path: impl AsRef<Path>) -> Self {
        Self::load(path.as_ref(), true)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path, required: bool) -> Self {
        let entries = match File::open(path) {
            Ok(file) => StreamSource::scan(file, &path.display().to_string()),
            Err(e) if required && e.kind() == std::io::ErrorKind::NotFound => {
                StreamSource::failed(SourceError::FileNotFound(path.to_path_buf()))
            }
            Err(e) if required => {
                StreamSource::failed(SourceError::read(path.display().to_string(), e))
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "optional config file not opened");
                StreamSource::empty()
            }
        };

        Self {
            path: path.to_path_buf(),
            entries,
        }
    }
}

impl Source for FileSource {
    fn lookup(&self, field: &Field<'_>) -> Option<Cow<'_, str>> {
        self.entries.lookup(field)
    }

    fn err(&self) -> Option<SourceError> {
        self.entries.err()
    }
}
