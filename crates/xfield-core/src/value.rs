//! # Values — Typed Nodes of a Target Graph
//!
//! [`Value`] is the dynamic representation the engine reads. Every scalar
//! keeps its declared type (an `i32` field stays `I32`, never widened to
//! `I64`), which is what lets comparisons reject mismatched widths.
//!
//! Containers come in four kinds because indexing depends on them: arrays
//! and ordered lists are positionally addressable, sets and maps are not.

use std::collections::BTreeMap;
use std::fmt;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::record::Record;
use crate::temporal::{format_local, ZonedDateTime};

/// A node in a target object graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// 8-bit signed integer.
    I8(i8),
    /// 16-bit signed integer.
    I16(i16),
    /// 32-bit signed integer.
    I32(i32),
    /// 64-bit signed integer.
    I64(i64),
    /// 128-bit signed integer.
    I128(i128),
    /// 8-bit unsigned integer.
    U8(u8),
    /// 16-bit unsigned integer.
    U16(u16),
    /// 32-bit unsigned integer.
    U32(u32),
    /// 64-bit unsigned integer.
    U64(u64),
    /// 128-bit unsigned integer.
    U128(u128),
    /// Single-precision float.
    F32(f32),
    /// Double-precision float.
    F64(f64),
    /// Arbitrary-precision integer.
    BigInt(BigInt),
    /// Arbitrary-precision decimal.
    Decimal(BigDecimal),
    /// Local date without time or offset.
    Date(NaiveDate),
    /// Local date-time without offset.
    DateTime(NaiveDateTime),
    /// Date-time with a fixed UTC offset.
    OffsetDateTime(DateTime<FixedOffset>),
    /// Date-time with offset and zone id.
    ZonedDateTime(ZonedDateTime),
    /// UTF-8 string.
    String(String),
    /// Enumeration constant.
    Enum(EnumValue),
    /// Fixed-size array; positionally indexable.
    Array(Vec<Value>),
    /// Ordered list; positionally indexable.
    List(Vec<Value>),
    /// Unordered set; not indexable.
    Set(Vec<Value>),
    /// Keyed map; not indexable by position.
    Map(BTreeMap<String, Value>),
    /// Object with members.
    Record(Record),
}

/// An enumeration constant with the name of its enum type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    /// Enum type name, e.g. `ContactMethod`.
    pub type_name: String,
    /// Constant name, e.g. `EMAIL`.
    pub variant: String,
}

impl EnumValue {
    /// Create an enum constant.
    pub fn new(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            variant: variant.into(),
        }
    }
}

/// The runtime kind of a [`Value`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    BigInt,
    Decimal,
    Date,
    DateTime,
    OffsetDateTime,
    ZonedDateTime,
    String,
    Enum,
    Array,
    List,
    Set,
    Map,
    Record,
}

impl ValueKind {
    /// Stable name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::BigInt => "BigInt",
            Self::Decimal => "BigDecimal",
            Self::Date => "NaiveDate",
            Self::DateTime => "NaiveDateTime",
            Self::OffsetDateTime => "DateTime<FixedOffset>",
            Self::ZonedDateTime => "ZonedDateTime",
            Self::String => "String",
            Self::Enum => "enum",
            Self::Array => "array",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Record => "record",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Build an array from any iterable of convertible items.
    pub fn array<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Build an ordered list from any iterable of convertible items.
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build an unordered set from any iterable of convertible items.
    pub fn set<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    /// Build a keyed map.
    pub fn map<K: Into<String>, T: Into<Value>>(entries: impl IntoIterator<Item = (K, T)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build an enum constant.
    pub fn enumeration(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::Enum(EnumValue::new(type_name, variant))
    }

    /// The runtime kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::I8(_) => ValueKind::I8,
            Self::I16(_) => ValueKind::I16,
            Self::I32(_) => ValueKind::I32,
            Self::I64(_) => ValueKind::I64,
            Self::I128(_) => ValueKind::I128,
            Self::U8(_) => ValueKind::U8,
            Self::U16(_) => ValueKind::U16,
            Self::U32(_) => ValueKind::U32,
            Self::U64(_) => ValueKind::U64,
            Self::U128(_) => ValueKind::U128,
            Self::F32(_) => ValueKind::F32,
            Self::F64(_) => ValueKind::F64,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Date(_) => ValueKind::Date,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::OffsetDateTime(_) => ValueKind::OffsetDateTime,
            Self::ZonedDateTime(_) => ValueKind::ZonedDateTime,
            Self::String(_) => ValueKind::String,
            Self::Enum(_) => ValueKind::Enum,
            Self::Array(_) => ValueKind::Array,
            Self::List(_) => ValueKind::List,
            Self::Set(_) => ValueKind::Set,
            Self::Map(_) => ValueKind::Map,
            Self::Record(_) => ValueKind::Record,
        }
    }

    /// Human-readable runtime type: the record or enum type name where one
    /// exists, otherwise the kind name.
    pub fn type_name(&self) -> String {
        match self {
            Self::Record(r) => r.type_name().to_string(),
            Self::Enum(e) => e.type_name.clone(),
            other => other.kind().as_str().to_string(),
        }
    }

    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The record, if this is a record.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Mutable variant of [`Value::as_record`].
    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }
}

/// Textual rendering used when a condition compares a value against literal
/// strings.
///
/// Scalars render in their canonical textual form; `Null` renders as
/// `null`; records render as their type name.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::I8(n) => write!(f, "{n}"),
            Self::I16(n) => write!(f, "{n}"),
            Self::I32(n) => write!(f, "{n}"),
            Self::I64(n) => write!(f, "{n}"),
            Self::I128(n) => write!(f, "{n}"),
            Self::U8(n) => write!(f, "{n}"),
            Self::U16(n) => write!(f, "{n}"),
            Self::U32(n) => write!(f, "{n}"),
            Self::U64(n) => write!(f, "{n}"),
            Self::U128(n) => write!(f, "{n}"),
            // Debug keeps the fractional part: 1.0 rather than 1.
            Self::F32(n) => write!(f, "{n:?}"),
            Self::F64(n) => write!(f, "{n:?}"),
            Self::BigInt(n) => write!(f, "{n}"),
            Self::Decimal(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => f.write_str(&format_local(dt)),
            Self::OffsetDateTime(dt) => f.write_str(&dt.to_rfc3339()),
            Self::ZonedDateTime(z) => write!(f, "{z}"),
            Self::String(s) => f.write_str(s),
            Self::Enum(e) => f.write_str(&e.variant),
            Self::Array(items) | Self::List(items) | Self::Set(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}={v}")?;
                }
                f.write_str("}")
            }
            Self::Record(r) => f.write_str(r.type_name()),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    f32 => F32,
    f64 => F64,
    BigInt => BigInt,
    BigDecimal => Decimal,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => OffsetDateTime,
    ZonedDateTime => ZonedDateTime,
    String => String,
    EnumValue => Enum,
    Record => Record,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
