//! Runtime values bound to statement parameters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A typed value bound to a named parameter.
///
/// The variant determines how the execution layer binds the value and how it
/// is displayed in diagnostics (see [`super::format`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ParameterValue {
    Null,
    Boolean(bool),
    Char(char),
    Byte(u8),
    SByte(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    String(String),
    Uuid(Uuid),
    Enum(EnumValue),
}

/// A member of a named enumeration type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub type_name: String,
    pub member: String,
}

impl ParameterValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for ParameterValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<char> for ParameterValue {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<u8> for ParameterValue {
    fn from(n: u8) -> Self {
        Self::Byte(n)
    }
}

impl From<i16> for ParameterValue {
    fn from(n: i16) -> Self {
        Self::Int16(n)
    }
}

impl From<i32> for ParameterValue {
    fn from(n: i32) -> Self {
        Self::Int32(n)
    }
}

impl From<i64> for ParameterValue {
    fn from(n: i64) -> Self {
        Self::Int64(n)
    }
}

impl From<u32> for ParameterValue {
    fn from(n: u32) -> Self {
        Self::UInt32(n)
    }
}

impl From<u64> for ParameterValue {
    fn from(n: u64) -> Self {
        Self::UInt64(n)
    }
}

impl From<f64> for ParameterValue {
    fn from(n: f64) -> Self {
        Self::Float64(n)
    }
}

impl From<Decimal> for ParameterValue {
    fn from(n: Decimal) -> Self {
        Self::Decimal(n)
    }
}

impl From<String> for ParameterValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for ParameterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<Uuid> for ParameterValue {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<EnumValue> for ParameterValue {
    fn from(e: EnumValue) -> Self {
        Self::Enum(e)
    }
}

impl<T: Into<ParameterValue>> From<Option<T>> for ParameterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(ParameterValue::Int32(7)).unwrap();

        assert_eq!(json, serde_json::json!({ "type": "int32", "value": 7 }));
    }

    #[test]
    fn serializes_null_without_value() {
        let json = serde_json::to_value(ParameterValue::Null).unwrap();

        assert_eq!(json, serde_json::json!({ "type": "null" }));
    }

    #[test]
    fn none_becomes_null() {
        assert!(ParameterValue::from(None::<i32>).is_null());
        assert_eq!(ParameterValue::from(Some(3_i64)), ParameterValue::Int64(3));
    }
}
