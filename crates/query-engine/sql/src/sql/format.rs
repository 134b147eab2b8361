//! Render parameter values as readable literals, for logs and diagnostics.
//!
//! The output is never sent to the database; statements always bind their
//! values by parameter name.

use super::value::{EnumValue, ParameterValue};

/// Format one parameter as `name = value`.
pub fn format_parameter(name: &str, value: &ParameterValue) -> String {
    format!("{name} = {}", format_value(value))
}

/// Format a single value as a SQL-like literal.
pub fn format_value(value: &ParameterValue) -> String {
    match value {
        ParameterValue::Null => "null".to_string(),
        ParameterValue::Char(c) => format!("'{c}'"),
        ParameterValue::Byte(b) => format!("0x{b:02X}"),
        ParameterValue::Enum(EnumValue { type_name, member }) => format!("{type_name}.{member}"),
        ParameterValue::SByte(n) => n.to_string(),
        ParameterValue::Int16(n) => n.to_string(),
        ParameterValue::Int32(n) => n.to_string(),
        ParameterValue::Int64(n) => n.to_string(),
        ParameterValue::UInt16(n) => n.to_string(),
        ParameterValue::UInt32(n) => n.to_string(),
        ParameterValue::UInt64(n) => n.to_string(),
        ParameterValue::Float32(n) => n.to_string(),
        ParameterValue::Float64(n) => n.to_string(),
        ParameterValue::Decimal(n) => n.to_string(),
        ParameterValue::Boolean(true) => quote("True"),
        ParameterValue::Boolean(false) => quote("False"),
        ParameterValue::String(s) => quote(s),
        ParameterValue::Uuid(u) => quote(&u.to_string()),
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
