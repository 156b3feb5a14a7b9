//! # Inspect — Snapshotting Rust Values into Target Graphs
//!
//! The engine reads [`Value`] trees. Application types opt in by
//! implementing [`Inspect`], which produces a snapshot of the instance with
//! every member's declared type preserved. Implementations for the standard
//! scalars, collections, chrono types, and arbitrary-precision numbers are
//! provided here.
//!
//! Collection kinds map onto container kinds deliberately: `Vec<T>` is an
//! ordered list, `[T; N]` an array, `BTreeSet`/`HashSet` a set, string-keyed
//! maps a map. Only arrays and lists can be indexed by a property path.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::record::Record;
use crate::temporal::ZonedDateTime;
use crate::value::{EnumValue, Value};

/// Produce a [`Value`] snapshot of `self`.
///
/// ```
/// use xfield_core::{Inspect, Record, Value};
///
/// struct Booking {
///     nights: u16,
///     guests: Vec<String>,
/// }
///
/// impl Inspect for Booking {
///     fn inspect(&self) -> Value {
///         Record::new("Booking")
///             .with("nights", self.nights.inspect())
///             .with("guests", self.guests.inspect())
///             .into()
///     }
/// }
///
/// let v = Booking { nights: 2, guests: vec!["Ada".into()] }.inspect();
/// assert_eq!(v.type_name(), "Booking");
/// ```
pub trait Inspect {
    /// Snapshot this value.
    fn inspect(&self) -> Value;
}

macro_rules! inspect_by_clone {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Value {
                    Value::from(self.clone())
                }
            }
        )*
    };
}

inspect_by_clone!(
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    u8,
    u16,
    u32,
    u64,
    u128,
    f32,
    f64,
    String,
    BigInt,
    BigDecimal,
    NaiveDate,
    NaiveDateTime,
    DateTime<FixedOffset>,
    ZonedDateTime,
    EnumValue,
    Record,
    Value,
);

impl Inspect for str {
    fn inspect(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self) -> Value {
        self.as_ref().map_or(Value::Null, Inspect::inspect)
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self) -> Value {
        Value::List(self.iter().map(Inspect::inspect).collect())
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn inspect(&self) -> Value {
        Value::Array(self.iter().map(Inspect::inspect).collect())
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn inspect(&self) -> Value {
        Value::Set(self.iter().map(Inspect::inspect).collect())
    }
}

impl<T: Inspect, S> Inspect for HashSet<T, S> {
    fn inspect(&self) -> Value {
        Value::Set(self.iter().map(Inspect::inspect).collect())
    }
}

impl<T: Inspect> Inspect for BTreeMap<String, T> {
    fn inspect(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.clone(), v.inspect())).collect())
    }
}

impl<T: Inspect, S> Inspect for HashMap<String, T, S> {
    fn inspect(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.clone(), v.inspect())).collect())
    }
}
