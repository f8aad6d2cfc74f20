use std::io::Read;
use std::path::Path;

use crate::bind::{bind, Bind};
use crate::Error;

use super::env::EnvSource;
use super::file::FileSource;
use super::map::MapSource;
use super::source::Source;
use super::stream::StreamSource;
use super::toml::TomlSource;

/// Builder for binding a record from an ordered chain of sources.
///
/// Sources are queried in registration order and the first one that knows
/// a field wins, so register the most specific source first. Each source
/// is materialized when it is added; [`load`](Self::load) only reads.
///
/// ## Example
///
/// ```no_run
/// use dragon_bind::{Bind, Loader};
///
/// #[derive(Bind, Default)]
/// struct Service {
///     pub listen: String,
///     #[bind(default = "4")]
///     pub workers: u16,
///     #[bind(default = "30s")]
///     pub timeout: std::time::Duration,
/// }
///
/// // APP_* variables override the local file, which overrides the base file
/// let mut service = Service::default();
/// Loader::new()
///     .with_env("APP_")
///     .with_file("config/local.conf")
///     .with_required_file("config/default.conf")
///     .load(&mut service)?;
/// # Ok::<(), dragon_bind::Error>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "loaders do nothing until .load() is called"]
pub struct Loader {
    sources: Vec<Box<dyn Source>>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the process environment, looked up as `uppercase(prefix + name)`.
    pub fn with_env(self, prefix: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix))
    }

    /// Adds an optional `key=value` file. A file that cannot be opened is an
    /// empty source.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_source(FileSource::open(path))
    }

    /// Adds a `key=value` file that must exist.
    pub fn with_required_file(self, path: impl AsRef<Path>) -> Self {
        self.with_source(FileSource::require(path))
    }

    /// Scans `reader` for `key=value` lines now.
    pub fn with_reader(self, reader: impl Read) -> Self {
        self.with_source(StreamSource::from_reader(reader))
    }

    pub fn with_map(self, map: MapSource) -> Self {
        self.with_source(map)
    }

    /// Adds the top-level scalars of an optional TOML file.
    pub fn with_toml_file(self, path: impl AsRef<Path>) -> Self {
        self.with_source(TomlSource::open(path))
    }

    pub fn with_source(mut self, source: impl Source + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Binds `record` from the registered sources.
    pub fn load<R: Bind + ?Sized>(&self, record: &mut R) -> Result<(), Error> {
        let sources: Vec<&dyn Source> = self.sources.iter().map(|s| s.as_ref()).collect();
        bind(record, &sources)
    }
}
