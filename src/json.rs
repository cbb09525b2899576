//! Conversion of decoded saves to and from JSON
//!
//! ```
//! use sbvj::{Variant, VariantMap};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut map = VariantMap::new();
//! map.insert("health", 8.5);
//! map.insert("slots", Variant::List(vec![Variant::Null, Variant::Integer(3)]));
//! let value = Variant::Map(map);
//!
//! let json = serde_json::to_string(&value)?;
//! assert_eq!(json, r#"{"health":8.5,"slots":[null,3]}"#);
//!
//! let parsed = Variant::from_json(serde_json::from_str(&json)?)?;
//! assert_eq!(parsed, value);
//! # Ok(())
//! # }
//! ```
//!
//! JSON can't tell an integral float from an integer, so a float like `2.0`
//! comes back as a float only if it was written with a fractional part.

use crate::{Error, ErrorKind, SaveFile, Variant, VariantMap};
use serde::{
    ser::{SerializeMap, SerializeStruct},
    Serialize, Serializer,
};

impl Serialize for Variant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Variant::Null => serializer.serialize_unit(),
            Variant::Float(x) => serializer.serialize_f64(*x),
            Variant::Bool(x) => serializer.serialize_bool(*x),
            Variant::Integer(x) => serializer.serialize_i64(*x),
            Variant::String(x) => serializer.serialize_str(x),
            Variant::List(x) => serializer.collect_seq(x),
            Variant::Map(x) => x.serialize(serializer),
        }
    }
}

impl Serialize for VariantMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for SaveFile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut save = serializer.serialize_struct("SaveFile", 4)?;
        save.serialize_field("entity_name", self.entity_name())?;
        save.serialize_field("format_version", &self.format_version())?;
        save.serialize_field("root", self.root())?;
        save.serialize_field("trailer", self.trailer())?;
        save.end()
    }
}

impl Variant {
    /// Converts a JSON value into a variant.
    ///
    /// Fails with [`UnsupportedValueType`](ErrorKind::UnsupportedValueType)
    /// for integers above `i64::MAX`, which have no variant representation.
    pub fn from_json(value: serde_json::Value) -> Result<Variant, Error> {
        use serde_json::Value;
        match value {
            Value::Null => Ok(Variant::Null),
            Value::Bool(x) => Ok(Variant::Bool(x)),
            Value::Number(x) => {
                if let Some(i) = x.as_i64() {
                    Ok(Variant::Integer(i))
                } else if x.is_u64() {
                    Err(Error::new(ErrorKind::UnsupportedValueType {
                        message: format!("integer {} does not fit in 64 signed bits", x),
                    }))
                } else {
                    x.as_f64().map(Variant::Float).ok_or_else(|| {
                        Error::new(ErrorKind::UnsupportedValueType {
                            message: format!("number {} is not representable", x),
                        })
                    })
                }
            }
            Value::String(x) => Ok(Variant::String(x)),
            Value::Array(x) => x
                .into_iter()
                .map(Variant::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Variant::List),
            Value::Object(x) => {
                let mut map = VariantMap::with_capacity(x.len());
                for (key, value) in x {
                    map.insert(key, Variant::from_json(value)?);
                }
                Ok(Variant::Map(map))
            }
        }
    }

    /// Converts the variant into a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            Variant::Null => Value::Null,
            Variant::Float(x) => serde_json::Number::from_f64(*x)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Variant::Bool(x) => Value::Bool(*x),
            Variant::Integer(x) => Value::from(*x),
            Variant::String(x) => Value::String(x.clone()),
            Variant::List(x) => Value::Array(x.iter().map(Variant::to_json).collect()),
            Variant::Map(x) => Value::Object(
                x.iter()
                    .map(|(k, v)| (k.to_string(), v.to_json()))
                    .collect(),
            ),
        }
    }
}
