use std::borrow::Cow;

use crate::bind::Field;

use super::source::Source;

/// Looks fields up in the process environment.
///
/// The variable name is `uppercase(prefix + field name)`; no separator is
/// inserted, so a prefix like `APP_` should carry its own. Unset, empty and
/// non-unicode variables count as not found.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn var_name(&self, field: &str) -> String {
        format!("{}{}", self.prefix, field).to_uppercase()
    }
}

impl Source for EnvSource {
    fn lookup(&self, field: &Field<'_>) -> Option<Cow<'_, str>> {
        std::env::var(self.var_name(field.name()))
            .ok()
            .filter(|v| !v.is_empty())
            .map(Cow::Owned)
    }
}
