use thiserror::Error;

use super::convert::ConvertError;
use super::field::FieldKind;

/// A resolved value that could not be converted to its field's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("can't set {record}.{field} ({kind}) to '{value}': {cause}")]
pub struct FieldError {
    record: String,
    field: String,
    kind: FieldKind,
    value: String,
    #[source]
    cause: ConvertError,
}

impl FieldError {
    pub(crate) fn new(
        record: &str,
        field: &str,
        kind: FieldKind,
        value: &str,
        cause: ConvertError,
    ) -> Self {
        Self {
            record: record.to_string(),
            field: field.to_string(),
            kind,
            value: value.to_string(),
            cause,
        }
    }

    /// Type name of the record being bound.
    pub fn record(&self) -> &str {
        &self.record
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Raw string as it came from the source (or the default literal).
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cause(&self) -> &ConvertError {
        &self.cause
    }
}
