//! String to typed value conversion, one rule per [`Target`] variant.

use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use chrono::format::{Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, Offset, TimeDelta, Utc};
use thiserror::Error;

use super::duration::{parse_nanos, DurationError};
use super::field::Target;

/// Layout used for timestamp fields that declare no format (`date` style).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Z %Y";

/// Why a raw string could not be converted to a field's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error("unsigned value must not carry a sign")]
    SignedUnsigned,

    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error("invalid boolean literal")]
    Bool,

    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error("duration must not be negative")]
    NegativeDuration,

    #[error("timestamp does not match format '{format}': {source}")]
    Timestamp {
        format: String,
        source: chrono::ParseError,
    },

    #[error("timestamp out of range")]
    TimestampRange,
}

/// Converts `raw` and writes it into `target`. Opaque targets are left alone.
pub(crate) fn assign(
    target: &mut Target<'_>,
    raw: &str,
    format: Option<&str>,
) -> Result<(), ConvertError> {
    match target {
        Target::Text(v) => **v = raw.to_owned(),
        Target::U8(v) => **v = parse_unsigned(raw)?,
        Target::U16(v) => **v = parse_unsigned(raw)?,
        Target::U32(v) => **v = parse_unsigned(raw)?,
        Target::U64(v) => **v = parse_unsigned(raw)?,
        Target::U128(v) => **v = parse_unsigned(raw)?,
        Target::Usize(v) => **v = parse_unsigned(raw)?,
        Target::I8(v) => **v = raw.parse()?,
        Target::I16(v) => **v = raw.parse()?,
        Target::I32(v) => **v = raw.parse()?,
        Target::I64(v) => **v = raw.parse()?,
        Target::I128(v) => **v = raw.parse()?,
        Target::Isize(v) => **v = raw.parse()?,
        Target::F32(v) => **v = raw.parse()?,
        Target::F64(v) => **v = raw.parse()?,
        Target::Bool(v) => **v = parse_bool(raw)?,
        Target::Span(v) => **v = TimeDelta::nanoseconds(parse_nanos(raw)?),
        Target::StdSpan(v) => {
            let nanos = parse_nanos(raw)?;
            let nanos = u64::try_from(nanos).map_err(|_| ConvertError::NegativeDuration)?;
            **v = std::time::Duration::from_nanos(nanos);
        }
        Target::Timestamp(v) => **v = parse_timestamp(raw, format)?,
        Target::UtcTimestamp(v) => **v = parse_timestamp(raw, format)?.with_timezone(&Utc),
        Target::Opaque => {}
    }
    Ok(())
}

/// Base-10 unsigned parse. `str::parse` tolerates a leading `+`, which an
/// unsigned field does not.
fn parse_unsigned<T>(raw: &str) -> Result<T, ConvertError>
where
    T: FromStr<Err = ParseIntError>,
{
    if raw.starts_with(['+', '-']) {
        return Err(ConvertError::SignedUnsigned);
    }
    Ok(raw.parse()?)
}

fn parse_bool(raw: &str) -> Result<bool, ConvertError> {
    const TRUE: [&str; 4] = ["true", "t", "1", "yes"];
    const FALSE: [&str; 4] = ["false", "f", "0", "no"];

    if TRUE.iter().any(|l| raw.eq_ignore_ascii_case(l)) {
        Ok(true)
    } else if FALSE.iter().any(|l| raw.eq_ignore_ascii_case(l)) {
        Ok(false)
    } else {
        Err(ConvertError::Bool)
    }
}

/// Parses with a `strftime` layout.
///
/// The layout must yield a date. Missing time fields read as midnight and a
/// missing offset reads as UTC, so `%Y-%m-%d %z` keeps its offset and
/// `%Y-%m-%d` is midnight UTC. Layouts without a date (time-only) never
/// match.
fn parse_timestamp(raw: &str, format: Option<&str>) -> Result<DateTime<FixedOffset>, ConvertError> {
    let format = format.unwrap_or(DEFAULT_TIMESTAMP_FORMAT);
    let mismatch = |source| ConvertError::Timestamp {
        format: format.to_string(),
        source,
    };

    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, raw, StrftimeItems::new(format)).map_err(mismatch)?;

    let date = parsed.to_naive_date().map_err(mismatch)?;
    let time = parsed.to_naive_time().unwrap_or_default();
    let offset = parsed.to_fixed_offset().unwrap_or(Utc.fix());

    date.and_time(time)
        .and_local_timezone(offset)
        .single()
        .ok_or(ConvertError::TimestampRange)
}
