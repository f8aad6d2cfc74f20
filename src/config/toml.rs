//! Flat TOML documents as a source.
//!
//! Only top-level scalars are exposed; tables and arrays are skipped since
//! fields are leaf values.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use toml::{Table, Value};
use tracing::debug;

use crate::bind::Field;

use super::source::Source;
use super::SourceError;

#[derive(Debug, Clone, Default)]
pub struct TomlSource {
    values: HashMap<String, String>,
    error: Option<SourceError>,
}

impl TomlSource {
    /// Parses a TOML document. A parse failure becomes the terminal error.
    pub fn from_text(text: &str) -> Self {
        Self::parse(text, "toml document")
    }

    /// Reads a TOML file. A missing file yields an empty source.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents, &path.display().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "optional toml file not found");
                Self::default()
            }
            Err(e) => Self {
                values: HashMap::new(),
                error: Some(SourceError::read(path.display().to_string(), e)),
            },
        }
    }

    fn parse(text: &str, origin: &str) -> Self {
        match toml::from_str::<Table>(text) {
            Ok(table) => Self {
                values: flatten(&table),
                error: None,
            },
            Err(e) => Self {
                values: HashMap::new(),
                error: Some(SourceError::ParseError {
                    origin: origin.to_string(),
                    source: e,
                }),
            },
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }
}

fn flatten(table: &Table) -> HashMap<String, String> {
    table
        .iter()
        .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key.to_lowercase(), v)))
        .collect()
}

/// Converts a TOML scalar to the string a field converter expects.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(dt) => Some(dt.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}

impl Source for TomlSource {
    fn lookup(&self, field: &Field<'_>) -> Option<Cow<'_, str>> {
        self.get(field.name()).map(Cow::Borrowed)
    }

    fn err(&self) -> Option<SourceError> {
        self.error.clone()
    }
}
