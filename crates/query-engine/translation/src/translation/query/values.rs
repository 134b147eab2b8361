//! Handle the translation of literal values.

use std::str::FromStr;

use query_engine_metadata::metadata::database::{ColumnInfo, ScalarType};
use query_engine_sql::sql;
use query_engine_sql::sql::value::{EnumValue, ParameterValue};
use rust_decimal::Decimal;

use crate::translation::error::Error;
use crate::translation::helpers::{Env, Resource, State};

/// Bind the identifier of a resource to a parameter.
pub fn translate_id(
    env: &Env,
    state: &mut State,
    resource: &Resource,
    id: &serde_json::Value,
) -> Result<sql::ast::ParameterNode, Error> {
    let primary_key = resource.primary_key()?;
    if id.is_null() {
        return Err(Error::TypeMismatch(id.clone(), primary_key.r#type));
    }
    state.make_parameter(translate_column_value(env, id, primary_key)?)
}

/// Convert a JSON value into a value for an attribute.
pub fn translate_column_value(
    env: &Env,
    value: &serde_json::Value,
    column: &ColumnInfo,
) -> Result<ParameterValue, Error> {
    match column.r#type {
        ScalarType::Enum => match value {
            serde_json::Value::Null => Ok(ParameterValue::Null),
            serde_json::Value::String(member) => {
                let type_name = column.enum_type.as_deref().ok_or_else(|| {
                    Error::NotSupported(format!("enum column '{}' without an enum type", column.name))
                })?;
                translate_enum_member(env, type_name, member)
            }
            _ => Err(Error::TypeMismatch(value.clone(), ScalarType::Enum)),
        },
        scalar_type => translate_json_value(value, scalar_type),
    }
}

fn translate_enum_member(env: &Env, type_name: &str, member: &str) -> Result<ParameterValue, Error> {
    let enum_type = env.lookup_enum_type(type_name)?;
    if enum_type.members.iter().any(|known| known == member) {
        Ok(ParameterValue::Enum(EnumValue {
            type_name: type_name.to_string(),
            member: member.to_string(),
        }))
    } else {
        Err(Error::UnknownEnumMember(
            member.to_string(),
            type_name.to_string(),
        ))
    }
}

/// Convert a JSON value into a SQL value.
pub fn translate_json_value(
    value: &serde_json::Value,
    scalar_type: ScalarType,
) -> Result<ParameterValue, Error> {
    let mismatch = || Error::TypeMismatch(value.clone(), scalar_type);
    match value {
        // numbers
        serde_json::Value::Number(num) => match scalar_type {
            // integers
            ScalarType::Byte => num
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .map(ParameterValue::Byte)
                .ok_or_else(mismatch),
            ScalarType::Smallint => num
                .as_i64()
                .and_then(|n| i16::try_from(n).ok())
                .map(ParameterValue::Int16)
                .ok_or_else(mismatch),
            ScalarType::Integer => num
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(ParameterValue::Int32)
                .ok_or_else(mismatch),
            ScalarType::Bigint => num
                .as_i64()
                .map(ParameterValue::Int64)
                .ok_or_else(mismatch),

            // floats
            #[allow(clippy::cast_possible_truncation)]
            ScalarType::Real => num
                .as_f64()
                .map(|n| ParameterValue::Float32(n as f32))
                .ok_or_else(mismatch),
            ScalarType::Double => num
                .as_f64()
                .map(ParameterValue::Float64)
                .ok_or_else(mismatch),
            ScalarType::Decimal => Decimal::from_str(&num.to_string())
                .map(ParameterValue::Decimal)
                .map_err(|_| mismatch()),

            _ => Err(mismatch()),
        },

        // booleans
        serde_json::Value::Bool(b) => match scalar_type {
            ScalarType::Boolean => Ok(ParameterValue::Boolean(*b)),

            _ => Err(mismatch()),
        },

        // strings
        serde_json::Value::String(s) => match scalar_type {
            // strings
            ScalarType::Text => Ok(ParameterValue::String(s.clone())),
            ScalarType::Character => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(ParameterValue::Char(c)),
                    _ => Err(mismatch()),
                }
            }

            // numbers - for when the user wants to pass numbers as strings
            ScalarType::Byte => s.parse().map(ParameterValue::Byte).map_err(|_| mismatch()),
            ScalarType::Smallint => s.parse().map(ParameterValue::Int16).map_err(|_| mismatch()),
            ScalarType::Integer => s.parse().map(ParameterValue::Int32).map_err(|_| mismatch()),
            ScalarType::Bigint => s.parse().map(ParameterValue::Int64).map_err(|_| mismatch()),
            ScalarType::Decimal => Decimal::from_str(s)
                .map(ParameterValue::Decimal)
                .map_err(|_| mismatch()),

            // uuid
            ScalarType::Uuid => uuid::Uuid::parse_str(s)
                .map(ParameterValue::Uuid)
                .map_err(|_| mismatch()),

            _ => Err(mismatch()),
        },
        // null
        serde_json::Value::Null => Ok(ParameterValue::Null),

        // not supported
        serde_json::Value::Array(_) => Err(Error::NotSupported("array values".to_string())),
        serde_json::Value::Object(_) => Err(Error::NotSupported("object values".to_string())),
    }
}
