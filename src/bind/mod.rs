//! The binding engine.
//!
//! Walks a record's [`Field`]s in declaration order, resolves each one
//! against an ordered list of sources (first hit wins, then the field's
//! default literal), converts the raw string by the field's [`Target`]
//! and writes it in place. The first conversion failure stops the walk;
//! fields written before it stay written.

mod convert;
mod duration;
mod error;
mod field;

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::config::Source;
use crate::Error;

pub use convert::{ConvertError, DEFAULT_TIMESTAMP_FORMAT};
pub use duration::{parse_duration, DurationError};
pub use error::FieldError;
pub use field::{Bind, Field, FieldKind, Settable, Target};

/// Populates `record` from `sources`, in priority order.
///
/// Any terminal source error is returned before a single field is looked
/// up. Fields no source knows and that carry no default are left as they
/// are.
///
/// Only records can be bound; anything else is rejected at compile time:
///
/// ```compile_fail
/// let mut n = 5;
/// dragon_bind::bind(&mut n, &[]);
/// ```
pub fn bind<R>(record: &mut R, sources: &[&dyn Source]) -> Result<(), Error>
where
    R: Bind + ?Sized,
{
    if let Some(err) = sources.iter().find_map(|s| s.err()) {
        return Err(Error::Source(err));
    }

    let record_name = record.record_name();
    let mut fields = record.fields();

    for field in &mut fields {
        let Some((raw, origin)) = resolve(field, sources) else {
            trace!(record = record_name, field = field.name(), "no value, keeping current");
            continue;
        };

        let format = field.format();
        let kind = field.kind();
        let result = convert::assign(field.target_mut(), &raw, format);
        if let Err(cause) = result {
            return Err(FieldError::new(record_name, field.name(), kind, &raw, cause).into());
        }
        debug!(record = record_name, field = field.name(), %kind, origin, "bound field");
    }

    Ok(())
}

/// First source hit, else the default literal.
fn resolve<'s>(
    field: &Field<'_>,
    sources: &[&'s dyn Source],
) -> Option<(Cow<'s, str>, &'static str)> {
    sources
        .iter()
        .find_map(|&s| s.lookup(field))
        .map(|raw| (raw, "source"))
        .or_else(|| {
            field
                .default_value()
                .map(|d| (Cow::Owned(d.to_string()), "default"))
        })
}
