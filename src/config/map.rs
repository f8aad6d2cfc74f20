use std::borrow::Cow;
use std::collections::HashMap;

use crate::bind::Field;

use super::source::Source;

/// An in-memory source, keyed case-insensitively.
///
/// ```
/// use dragon_bind::MapSource;
///
/// let defaults: MapSource = [("Workers", "4"), ("name", "hulk")].into_iter().collect();
/// assert_eq!(defaults.get("workers"), Some("4"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.values
            .insert(key.as_ref().to_lowercase(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Source for MapSource {
    fn lookup(&self, field: &Field<'_>) -> Option<Cow<'_, str>> {
        self.get(field.name()).map(Cow::Borrowed)
    }
}
