//! # Type-Strict Comparison
//!
//! Orders two resolved values for comparison rules. Both sides must carry
//! the *same* declared type; there is no widening between integer widths,
//! between floats of different precision, or between numeric families.
//!
//! ## Comparable kinds
//!
//! - Integers of every width, signed and unsigned.
//! - `f32` and `f64`, under IEEE-754 total ordering (`-0.0 < 0.0`, NaN at
//!   the extremes) so that the ordering is total.
//! - Arbitrary-precision integers and decimals.
//! - Local dates, local date-times, offset date-times (instant, then local
//!   date-time), zoned date-times (instant, local date-time, zone id).
//! - Strings, by code point. UTF-8 byte order coincides with code-point
//!   order, so no collation or locale is involved.
//!
//! ## Error precedence
//!
//! A null side is reported first, then a side outside the allow-list (left
//! before right), then a declared-type mismatch.

use std::cmp::Ordering;

use xfield_core::temporal::compare_offset;
use xfield_core::{Value, ValueKind};

use crate::error::RuleError;

/// Whether values of `kind` can be ordered.
pub fn is_comparable(kind: ValueKind) -> bool {
    matches!(
        kind,
        ValueKind::I8
            | ValueKind::I16
            | ValueKind::I32
            | ValueKind::I64
            | ValueKind::I128
            | ValueKind::U8
            | ValueKind::U16
            | ValueKind::U32
            | ValueKind::U64
            | ValueKind::U128
            | ValueKind::F32
            | ValueKind::F64
            | ValueKind::BigInt
            | ValueKind::Decimal
            | ValueKind::Date
            | ValueKind::DateTime
            | ValueKind::OffsetDateTime
            | ValueKind::ZonedDateTime
            | ValueKind::String
    )
}

/// Order `a` relative to `b`.
///
/// # Errors
///
/// - [`RuleError::NullOperand`] if either side is null.
/// - [`RuleError::UnsupportedType`] if either side is not comparable.
/// - [`RuleError::TypeMismatch`] if the declared types differ.
pub fn order(a: &Value, b: &Value) -> Result<Ordering, RuleError> {
    let ordering = match (a, b) {
        (Value::I8(x), Value::I8(y)) => x.cmp(y),
        (Value::I16(x), Value::I16(y)) => x.cmp(y),
        (Value::I32(x), Value::I32(y)) => x.cmp(y),
        (Value::I64(x), Value::I64(y)) => x.cmp(y),
        (Value::I128(x), Value::I128(y)) => x.cmp(y),
        (Value::U8(x), Value::U8(y)) => x.cmp(y),
        (Value::U16(x), Value::U16(y)) => x.cmp(y),
        (Value::U32(x), Value::U32(y)) => x.cmp(y),
        (Value::U64(x), Value::U64(y)) => x.cmp(y),
        (Value::U128(x), Value::U128(y)) => x.cmp(y),
        (Value::F32(x), Value::F32(y)) => x.total_cmp(y),
        (Value::F64(x), Value::F64(y)) => x.total_cmp(y),
        (Value::BigInt(x), Value::BigInt(y)) => x.cmp(y),
        (Value::Decimal(x), Value::Decimal(y)) => x.cmp(y),
        (Value::Date(x), Value::Date(y)) => x.cmp(y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::OffsetDateTime(x), Value::OffsetDateTime(y)) => compare_offset(x, y),
        (Value::ZonedDateTime(x), Value::ZonedDateTime(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => return Err(incomparable(a, b)),
    };
    Ok(ordering)
}

fn incomparable(a: &Value, b: &Value) -> RuleError {
    if a.is_null() || b.is_null() {
        return RuleError::NullOperand;
    }
    for side in [a, b] {
        if !is_comparable(side.kind()) {
            return RuleError::UnsupportedType {
                type_name: side.type_name(),
            };
        }
    }
    RuleError::TypeMismatch {
        left: a.type_name(),
        right: b.type_name(),
    }
}

/// Decide whether `a` stands in the required relation to the basis `b`.
///
/// With `valid_when_less_than_basis`, `a` must be below `b`; otherwise
/// above. `allows_equal` additionally accepts equality.
///
/// # Errors
///
/// Same as [`order`].
pub fn is_valid(
    a: &Value,
    b: &Value,
    allows_equal: bool,
    valid_when_less_than_basis: bool,
) -> Result<bool, RuleError> {
    let wanted = if valid_when_less_than_basis {
        Ordering::Less
    } else {
        Ordering::Greater
    };
    let c = order(a, b)?;
    Ok(c == wanted || (allows_equal && c == Ordering::Equal))
}
