//! Sources of raw values and the builder that chains them.

mod builder;
mod env;
mod error;
mod file;
mod map;
mod source;
mod stream;
mod toml;

pub use builder::Loader;
pub use env::EnvSource;
pub use error::SourceError;
pub use file::FileSource;
pub use map::MapSource;
pub use source::{FailedSource, Source};
pub use stream::StreamSource;
pub use self::toml::TomlSource;
