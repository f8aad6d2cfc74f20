//! Line-oriented `key=value` sources.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};

use tracing::{trace, warn};

use crate::bind::Field;

use super::source::Source;
use super::SourceError;

/// A source built by scanning a byte stream for `key=value` lines.
///
/// The key is everything before the first `=` and must not be empty; the
/// value is everything after it and may be. Other lines are ignored. Keys
/// are lowercased and lookups lowercase the field name. Lines that are not
/// valid UTF-8 are skipped like any other malformed line. A read failure
/// is kept as the terminal error; lines seen before it stay in the map.
#[derive(Debug, Clone, Default)]
pub struct StreamSource {
    values: HashMap<String, String>,
    error: Option<SourceError>,
}

impl StreamSource {
    /// Eagerly scans `reader` to its end.
    pub fn from_reader(reader: impl Read) -> Self {
        Self::scan(reader, "stream")
    }

    pub(crate) fn scan(reader: impl Read, origin: &str) -> Self {
        let mut source = Self::default();
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!(origin, error = %e, "stopped reading key=value source");
                    source.error = Some(SourceError::read(origin, e));
                    break;
                }
            }

            let Ok(line) = std::str::from_utf8(trim_newline(&buf)) else {
                trace!(origin, "skipped line that is not valid UTF-8");
                continue;
            };
            if let Some((key, value)) = parse_line(line) {
                source.values.insert(key.to_lowercase(), value.to_string());
            }
        }

        trace!(origin, keys = source.values.len(), "scanned key=value source");
        source
    }

    /// Scans an in-memory document.
    pub fn from_text(text: &str) -> Self {
        Self::from_reader(text.as_bytes())
    }

    pub(crate) fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn failed(error: SourceError) -> Self {
        Self {
            values: HashMap::new(),
            error: Some(error),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn trim_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Splits a line on its first `=`. Lines without one, or with nothing
/// before it, are not entries.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    match line.split_once('=') {
        Some((key, value)) if !key.is_empty() => Some((key, value)),
        _ => None,
    }
}

impl Source for StreamSource {
    fn lookup(&self, field: &Field<'_>) -> Option<Cow<'_, str>> {
        self.get(field.name()).map(Cow::Borrowed)
    }

    fn err(&self) -> Option<SourceError> {
        self.error.clone()
    }
}
