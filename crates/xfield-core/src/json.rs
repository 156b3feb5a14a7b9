//! # JSON Bridge
//!
//! Converts `serde_json::Value` documents into target graphs so that rules
//! can be evaluated against data that never had a Rust type.
//!
//! | JSON             | Value                                   |
//! |------------------|-----------------------------------------|
//! | `null`           | `Null`                                  |
//! | `true`/`false`   | `Bool`                                  |
//! | integer          | `I64`, or `U64` above `i64::MAX`        |
//! | other number     | `F64`                                   |
//! | string           | `String`                                |
//! | array            | `Array`                                 |
//! | object           | `Record` of type [`JSON_OBJECT_TYPE`]   |
//!
//! JSON carries no temporal or arbitrary-precision types; such fields
//! arrive as strings or `F64` and compare as such.

use serde_json::Value as Json;

use crate::record::Record;
use crate::value::Value;

/// Type name given to records built from JSON objects.
pub const JSON_OBJECT_TYPE: &str = "object";

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    // serde_json numbers are always representable as f64.
                    Value::F64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => {
                let record = map
                    .into_iter()
                    .fold(Record::new(JSON_OBJECT_TYPE), |record, (k, v)| {
                        record.with(k, Value::from(v))
                    });
                Value::Record(record)
            }
        }
    }
}
