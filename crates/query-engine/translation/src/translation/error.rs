//! Errors for translation.

use query_engine_metadata::metadata::database::{ComparisonOperator, ScalarType};
use query_engine_sql::sql;

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    ResourceNotFound(String),
    AttributeNotFound(String, String),
    RelationshipNotFound(String, String),
    ExpectedToOneRelationship(String, String),
    ExpectedToManyRelationship(String, String),
    EmptyFieldPath,
    TypeMismatch(serde_json::Value, ScalarType),
    UnknownEnumMember(String, String),
    EmptyValueList,
    InvalidNullComparison(ComparisonOperator),
    RequiredRelationship(String, String),
    NotSupported(String),
    Node(sql::ast::NodeError),
}

impl From<sql::ast::NodeError> for Error {
    fn from(error: sql::ast::NodeError) -> Self {
        Error::Node(error)
    }
}

impl std::error::Error for Error {}

/// Display errors.
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::ResourceNotFound(resource_name) => {
                write!(f, "Resource type '{resource_name}' not found.")
            }
            Error::AttributeNotFound(attribute_name, resource_name) => write!(
                f,
                "Attribute '{attribute_name}' not found on resource type '{resource_name}'."
            ),
            Error::RelationshipNotFound(relationship_name, resource_name) => write!(
                f,
                "Relationship '{relationship_name}' not found on resource type '{resource_name}'."
            ),
            Error::ExpectedToOneRelationship(relationship_name, resource_name) => write!(
                f,
                "Relationship '{relationship_name}' on resource type '{resource_name}' must be a to-one relationship here."
            ),
            Error::ExpectedToManyRelationship(relationship_name, resource_name) => write!(
                f,
                "Relationship '{relationship_name}' on resource type '{resource_name}' must be a to-many relationship here."
            ),
            Error::EmptyFieldPath => write!(f, "Field paths must contain at least one element."),
            Error::TypeMismatch(value, scalar_type) => {
                write!(f, "Value {value} is not compatible with type '{scalar_type}'.")
            }
            Error::UnknownEnumMember(member, enum_type) => {
                write!(f, "'{member}' is not a member of enum type '{enum_type}'.")
            }
            Error::EmptyValueList => write!(f, "At least one value is required."),
            Error::InvalidNullComparison(operator) => {
                write!(f, "Operator '{operator}' cannot be used to compare with null.")
            }
            Error::RequiredRelationship(relationship_name, resource_name) => write!(
                f,
                "Relationship '{relationship_name}' on resource type '{resource_name}' is required and cannot be cleared."
            ),
            Error::NotSupported(thing) => {
                write!(f, "Requests containing {thing} are not supported.")
            }
            Error::Node(error) => write!(f, "{error}"),
        }
    }
}
