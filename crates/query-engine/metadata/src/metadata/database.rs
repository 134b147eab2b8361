//! Metadata information regarding the database tables behind each resource.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The scalar types supported by the Engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Sequence, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Boolean,
    Byte,
    Smallint,
    Integer,
    Bigint,
    Real,
    Double,
    Decimal,
    Character,
    Text,
    Uuid,
    /// A member of one of the declared [`EnumTypes`].
    Enum,
}

impl ScalarType {
    const ORDERING_OPERATORS: &'static [ComparisonOperator] = &[
        ComparisonOperator::Equals,
        ComparisonOperator::LessThan,
        ComparisonOperator::LessOrEqual,
        ComparisonOperator::GreaterThan,
        ComparisonOperator::GreaterOrEqual,
    ];

    const EQUALITY_OPERATORS: &'static [ComparisonOperator] = &[ComparisonOperator::Equals];

    /// Returns the complete set of comparison operators for the given type.
    pub fn comparison_operators(self) -> BTreeSet<ComparisonOperator> {
        let operators = match self {
            ScalarType::Boolean | ScalarType::Uuid | ScalarType::Enum => Self::EQUALITY_OPERATORS,
            _ => Self::ORDERING_OPERATORS,
        };
        operators.iter().copied().collect()
    }

    /// Whether values of this type can be matched against a text pattern.
    pub fn supports_text_matching(self) -> bool {
        matches!(self, ScalarType::Character | ScalarType::Text)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format!("{self:?}").to_lowercase())
    }
}

/// The complete list of supported binary operators for scalar types.
/// Not all of these are supported for every type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Equals,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl ComparisonOperator {
    /// The name of the binary operator in requests.
    pub fn name(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::LessThan => "less_than",
            Self::LessOrEqual => "less_or_equal",
            Self::GreaterThan => "greater_than",
            Self::GreaterOrEqual => "greater_or_equal",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mapping from a resource type name to its information.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ResourcesInfo(pub BTreeMap<String, ResourceInfo>);

impl ResourcesInfo {
    pub fn empty() -> Self {
        ResourcesInfo(BTreeMap::new())
    }
}

/// Information about a resource type and the table that stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceInfo {
    #[serde(default)]
    pub schema_name: Option<String>,
    pub table_name: String,
    /// The attribute that identifies a resource.
    pub primary_key: String,
    /// Attributes by their exposed name.
    pub columns: BTreeMap<String, ColumnInfo>,
    #[serde(default)]
    pub relationships: BTreeMap<String, RelationshipInfo>,
}

/// Can this column contain null values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Nullable {
    #[default]
    Nullable,
    NonNullable,
}

/// Information about a database column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    pub name: String,
    pub r#type: ScalarType,
    #[serde(default)]
    pub nullable: Nullable,
    /// The declared enum type, for columns of type `enum`.
    #[serde(default)]
    pub enum_type: Option<String>,
}

/// A navigation from one resource type (the left side) to another (the right side).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipInfo {
    /// The resource type on the right side.
    pub target: String,
    pub kind: RelationshipKind,
    pub foreign_key: ForeignKeyInfo,
    #[serde(default)]
    pub delete_behavior: DeleteBehavior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    ToOne,
    ToMany,
}

/// The column that realizes a relationship.
///
/// When `at_left_side` is set, the column lives in the table of the declaring
/// resource and references the primary key of the target. Otherwise it lives
/// in the target table and references the primary key of the declaring resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyInfo {
    pub column: String,
    pub at_left_side: bool,
    #[serde(default)]
    pub nullable: Nullable,
}

/// What happens to dependent rows on the other side when a resource is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeleteBehavior {
    Cascade,
    SetNull,
    #[default]
    Restrict,
}

/// Mapping from an enum type name to its members.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct EnumTypes(pub BTreeMap<String, EnumTypeInfo>);

impl EnumTypes {
    pub fn empty() -> Self {
        EnumTypes(BTreeMap::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EnumTypeInfo {
    pub members: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_all_binary_comparison_operators_are_used() {
        // This is the set of all operators exposed through the schema.
        let exposed_operators = enum_iterator::all::<ScalarType>()
            .flat_map(ScalarType::comparison_operators)
            .collect::<BTreeSet<ComparisonOperator>>();

        for operator in enum_iterator::all::<ComparisonOperator>() {
            assert!(
                exposed_operators.contains(&operator),
                "The operator {operator:?} is not exposed anywhere."
            );
        }
    }

    #[test]
    fn every_scalar_type_supports_equality() {
        for scalar_type in enum_iterator::all::<ScalarType>() {
            assert!(
                scalar_type
                    .comparison_operators()
                    .contains(&ComparisonOperator::Equals),
                "{scalar_type} cannot be compared for equality."
            );
        }
    }

    #[test]
    fn operator_names_match_their_serialized_form() {
        for operator in enum_iterator::all::<ComparisonOperator>() {
            assert_eq!(
                serde_json::to_value(operator).unwrap(),
                serde_json::Value::String(operator.name().to_string())
            );
        }
    }

    #[test]
    fn only_text_types_support_matching() {
        let matching = enum_iterator::all::<ScalarType>()
            .filter(|scalar_type| scalar_type.supports_text_matching())
            .collect::<Vec<_>>();

        assert_eq!(matching, vec![ScalarType::Character, ScalarType::Text]);
    }

    #[test]
    fn relationship_defaults() {
        let relationship: RelationshipInfo = serde_json::from_value(serde_json::json!({
            "target": "Person",
            "kind": "to_one",
            "foreignKey": { "column": "OwnerId", "atLeftSide": true }
        }))
        .unwrap();

        assert_eq!(relationship.kind, RelationshipKind::ToOne);
        assert_eq!(relationship.foreign_key.nullable, Nullable::Nullable);
        assert_eq!(relationship.delete_behavior, DeleteBehavior::Restrict);
    }
}
