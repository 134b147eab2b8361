//! Type definitions of a low-level SQL string representation.

use indexmap::IndexMap;
use serde::Serialize;

use super::ast::ParameterNode;
use super::dialect::Dialect;
use super::format;
use super::value::ParameterValue;

/// A SQL string under construction, together with the parameters it refers to.
#[derive(Debug, Default, PartialEq)]
pub struct SQL {
    pub sql: String,
    pub params: IndexMap<String, ParameterValue>,
}

impl SQL {
    pub fn new() -> SQL {
        SQL::default()
    }

    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    pub fn append_identifier(&mut self, dialect: Dialect, name: &str) {
        self.sql.push_str(&dialect.quote_identifier(name));
    }

    pub fn append_param(&mut self, param: &ParameterNode) {
        self.sql.push_str(param.name());
        self.params
            .insert(param.name().to_string(), param.value().clone());
    }
}

/// A rendered statement with its named parameter values, ready to be executed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlCommand {
    statement: String,
    parameters: IndexMap<String, ParameterValue>,
}

impl SqlCommand {
    pub(crate) fn new(statement: String, parameters: IndexMap<String, ParameterValue>) -> Self {
        SqlCommand {
            statement,
            parameters,
        }
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn parameters(&self) -> &IndexMap<String, ParameterValue> {
        &self.parameters
    }

    /// The parameters as readable `name = value` pairs, for logging.
    pub fn display_parameters(&self) -> String {
        self.parameters
            .iter()
            .map(|(name, value)| format::format_parameter(name, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
