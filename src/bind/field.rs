//! Field descriptors: the explicit metadata a record hands to the engine.

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

/// A record whose fields can be populated from sources.
///
/// Usually derived with `#[derive(Bind)]`; implementing it by hand is a
/// matter of listing the settable fields in declaration order:
///
/// ```
/// use dragon_bind::{Bind, Field};
///
/// struct Limits {
///     max_conns: u32,
///     label: String,
/// }
///
/// impl Bind for Limits {
///     fn record_name(&self) -> &'static str {
///         "Limits"
///     }
///
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![
///             Field::new("max_conns", &mut self.max_conns).with_default("16"),
///             Field::new("label", &mut self.label),
///         ]
///     }
/// }
/// ```
pub trait Bind {
    /// Type name reported in field errors.
    fn record_name(&self) -> &'static str;

    /// Settable fields, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// Mutable view of one field's storage, tagged with its semantic type.
#[derive(Debug)]
#[non_exhaustive]
pub enum Target<'a> {
    Text(&'a mut String),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    U128(&'a mut u128),
    Usize(&'a mut usize),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    I128(&'a mut i128),
    Isize(&'a mut isize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Bool(&'a mut bool),
    /// Signed elapsed time, parsed with the duration grammar.
    Span(&'a mut TimeDelta),
    /// Non-negative elapsed time, parsed with the duration grammar.
    StdSpan(&'a mut std::time::Duration),
    Timestamp(&'a mut DateTime<FixedOffset>),
    UtcTimestamp(&'a mut DateTime<Utc>),
    /// Not a convertible leaf; looked up but never written.
    Opaque,
}

impl Target<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            Target::Text(_) => FieldKind::Text,
            Target::U8(_) => FieldKind::U8,
            Target::U16(_) => FieldKind::U16,
            Target::U32(_) => FieldKind::U32,
            Target::U64(_) => FieldKind::U64,
            Target::U128(_) => FieldKind::U128,
            Target::Usize(_) => FieldKind::Usize,
            Target::I8(_) => FieldKind::I8,
            Target::I16(_) => FieldKind::I16,
            Target::I32(_) => FieldKind::I32,
            Target::I64(_) => FieldKind::I64,
            Target::I128(_) => FieldKind::I128,
            Target::Isize(_) => FieldKind::Isize,
            Target::F32(_) => FieldKind::F32,
            Target::F64(_) => FieldKind::F64,
            Target::Bool(_) => FieldKind::Bool,
            Target::Span(_) => FieldKind::Span,
            Target::StdSpan(_) => FieldKind::StdSpan,
            Target::Timestamp(_) => FieldKind::Timestamp,
            Target::UtcTimestamp(_) => FieldKind::UtcTimestamp,
            Target::Opaque => FieldKind::Opaque,
        }
    }
}

/// Semantic type of a field, without the storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FieldKind {
    Text,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    F32,
    F64,
    Bool,
    Span,
    StdSpan,
    Timestamp,
    UtcTimestamp,
    Opaque,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "String",
            FieldKind::U8 => "u8",
            FieldKind::U16 => "u16",
            FieldKind::U32 => "u32",
            FieldKind::U64 => "u64",
            FieldKind::U128 => "u128",
            FieldKind::Usize => "usize",
            FieldKind::I8 => "i8",
            FieldKind::I16 => "i16",
            FieldKind::I32 => "i32",
            FieldKind::I64 => "i64",
            FieldKind::I128 => "i128",
            FieldKind::Isize => "isize",
            FieldKind::F32 => "f32",
            FieldKind::F64 => "f64",
            FieldKind::Bool => "bool",
            FieldKind::Span => "TimeDelta",
            FieldKind::StdSpan => "Duration",
            FieldKind::Timestamp => "DateTime<FixedOffset>",
            FieldKind::UtcTimestamp => "DateTime<Utc>",
            FieldKind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Types that can be the target of a bound field.
///
/// Implement this for your own types to make them usable in a derived
/// record; returning [`Target::Opaque`] makes the field a no-op.
pub trait Settable {
    fn target(&mut self) -> Target<'_>;
}

macro_rules! settable {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Settable for $ty {
                fn target(&mut self) -> Target<'_> {
                    Target::$variant(self)
                }
            }
        )*
    };
}

settable! {
    String => Text,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    TimeDelta => Span,
    std::time::Duration => StdSpan,
    DateTime<FixedOffset> => Timestamp,
    DateTime<Utc> => UtcTimestamp,
}

/// One settable field of a record.
#[derive(Debug)]
pub struct Field<'a> {
    name: &'a str,
    target: Target<'a>,
    default: Option<&'a str>,
    format: Option<&'a str>,
}

impl<'a> Field<'a> {
    pub fn new<T: Settable + ?Sized>(name: &'a str, value: &'a mut T) -> Self {
        Self::from_target(name, value.target())
    }

    pub fn from_target(name: &'a str, target: Target<'a>) -> Self {
        Self {
            name,
            target,
            default: None,
            format: None,
        }
    }

    /// A field that is looked up but never converted or written.
    pub fn opaque(name: &'a str) -> Self {
        Self::from_target(name, Target::Opaque)
    }

    /// Literal used when no source has a value. An empty literal counts as
    /// no default at all.
    pub fn with_default(mut self, literal: &'a str) -> Self {
        self.default = Some(literal).filter(|l| !l.is_empty());
        self
    }

    /// `strftime` layout for timestamp fields.
    pub fn with_format(mut self, format: &'a str) -> Self {
        self.format = Some(format).filter(|f| !f.is_empty());
        self
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.target.kind()
    }

    pub fn default_value(&self) -> Option<&'a str> {
        self.default
    }

    pub fn format(&self) -> Option<&'a str> {
        self.format
    }

    pub(crate) fn target_mut(&mut self) -> &mut Target<'a> {
        &mut self.target
    }
}
