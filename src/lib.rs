//! Typed configuration binding.
//!
//! Fill a plain struct from an ordered chain of key-value sources: the
//! process environment, `key=value` files and streams, in-memory maps and
//! flat TOML documents. Each field's raw string is taken from the first
//! source that has it (or from the field's default) and converted by the
//! field's type.
//!
//! ```
//! use dragon_bind::{Bind, Loader};
//!
//! #[derive(Bind, Default)]
//! struct Conf {
//!     pub timeout: std::time::Duration,
//!     #[bind(format = "%Y-%m-%d")]
//!     pub day: chrono::DateTime<chrono::Utc>,
//!     pub worker_name: String,
//!     #[bind(default = "5")]
//!     pub num_workers: u32,
//! }
//!
//! let mut conf = Conf::default();
//! Loader::new()
//!     .with_reader("timeout=1h2m3s\nday=2013-12-13\nworker_name=Hulk\n".as_bytes())
//!     .load(&mut conf)?;
//!
//! assert_eq!(conf.timeout.as_secs(), 3723);
//! assert_eq!(conf.day.to_rfc3339(), "2013-12-13T00:00:00+00:00");
//! assert_eq!(conf.worker_name, "Hulk");
//! assert_eq!(conf.num_workers, 5);
//! # Ok::<(), dragon_bind::Error>(())
//! ```

extern crate self as dragon_bind;

pub mod bind;
pub mod config;
mod error;

pub use bind::{bind, Bind, Field, FieldError, FieldKind, Settable, Target};
pub use config::{
    EnvSource, FailedSource, FileSource, Loader, MapSource, Source, SourceError, StreamSource,
    TomlSource,
};
pub use error::Error;

#[cfg(feature = "derive")]
pub use dragon_bind_derive::Bind;
