//! Duration literals such as `1h2m3s`, `1.5s` or `-300ms`.
//!
//! A literal is an optional sign followed by one or more `<number><unit>`
//! terms, where the number may carry a fraction and the unit is one of
//! `ns`, `us` (`µs`, `μs`), `ms`, `s`, `m`, `h`. A bare `0` needs no unit.
//! The total is held as signed nanoseconds.

use chrono::TimeDelta;
use thiserror::Error;

const LIMIT: u64 = 1 << 63;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DurationError {
    #[error("invalid duration '{0}'")]
    Invalid(String),

    #[error("missing unit in duration '{0}'")]
    MissingUnit(String),

    #[error("unknown unit '{unit}' in duration '{input}'")]
    UnknownUnit { unit: String, input: String },

    #[error("duration '{0}' out of range")]
    Overflow(String),
}

/// Parses a duration literal into a signed span.
pub fn parse_duration(input: &str) -> Result<TimeDelta, DurationError> {
    parse_nanos(input).map(TimeDelta::nanoseconds)
}

pub(crate) fn parse_nanos(input: &str) -> Result<i64, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());
    let overflow = || DurationError::Overflow(input.to_string());

    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(0);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, rest) = leading_int(s).ok_or_else(invalid)?;
        let has_whole = rest.len() != s.len();
        s = rest;

        let mut fraction = 0u64;
        let mut scale = 1f64;
        let mut has_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let (f, sc, rest_after) = leading_fraction(rest);
            has_fraction = rest_after.len() != rest.len();
            fraction = f;
            scale = sc;
            s = rest_after;
        }
        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_end = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_end == 0 {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let (unit, rest) = s.split_at(unit_end);
        s = rest;

        let per_unit = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        if whole > LIMIT / per_unit {
            return Err(overflow());
        }
        let mut term = whole * per_unit;
        if fraction > 0 {
            term += (fraction as f64 * (per_unit as f64 / scale)) as u64;
            if term > LIMIT {
                return Err(overflow());
            }
        }

        total = total.checked_add(term).ok_or_else(overflow)?;
        if total > LIMIT {
            return Err(overflow());
        }
    }

    if negative {
        // LIMIT itself is i64::MIN in magnitude
        return Ok((total as i64).wrapping_neg());
    }
    if total > LIMIT - 1 {
        return Err(overflow());
    }
    Ok(total as i64)
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}

/// Consumes leading ASCII digits. `None` on overflow past `LIMIT`.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    for b in s[..end].bytes() {
        if value > LIMIT / 10 {
            return None;
        }
        value = value * 10 + u64::from(b - b'0');
        if value > LIMIT {
            return None;
        }
    }
    Some((value, &s[end..]))
}

/// Consumes leading digits of a fraction. Digits past the point where the
/// value would overflow are consumed but dropped.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    let mut scale = 1f64;
    let mut overflowed = false;
    for b in s[..end].bytes() {
        if overflowed {
            continue;
        }
        if value > (LIMIT - 1) / 10 {
            overflowed = true;
            continue;
        }
        let next = value * 10 + u64::from(b - b'0');
        if next > LIMIT {
            overflowed = true;
            continue;
        }
        value = next;
        scale *= 10.0;
    }
    (value, scale, &s[end..])
}
