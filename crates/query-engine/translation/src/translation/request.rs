//! The requests accepted by the compiler, already parsed from their query strings and documents.

use std::collections::BTreeMap;

use query_engine_metadata::metadata::database::ComparisonOperator;
use serde::{Deserialize, Serialize};

/// A path of relationship names, usually ending in an attribute name.
pub type FieldPath = Vec<String>;

/// Read resources of one type, optionally narrowed to a single one by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub resource: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub filter: Option<FilterExpression>,
    #[serde(default)]
    pub sort: Vec<SortElement>,
    /// Relationship chains whose resources are read along.
    #[serde(default)]
    pub include: Vec<FieldPath>,
    /// Sparse fieldsets, by resource type.
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterExpression {
    And {
        terms: Vec<FilterExpression>,
    },
    Or {
        terms: Vec<FilterExpression>,
    },
    Not {
        filter: Box<FilterExpression>,
    },
    Comparison {
        operator: ComparisonOperator,
        left: Operand,
        right: Operand,
    },
    Match {
        kind: MatchKind,
        field: FieldPath,
        text: String,
    },
    /// The attribute equals any of the values.
    Any {
        field: FieldPath,
        values: Vec<serde_json::Value>,
    },
    /// The to-many relationship has at least one resource, matching `filter` if given.
    Has {
        field: FieldPath,
        #[serde(default)]
        filter: Option<Box<FilterExpression>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operand {
    Field { path: FieldPath },
    Value { value: serde_json::Value },
    Null,
    /// The number of resources in a to-many relationship.
    Count { path: FieldPath },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    StartsWith,
    EndsWith,
    Contains,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortElement {
    pub target: SortTarget,
    #[serde(default)]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SortTarget {
    Field { path: FieldPath },
    Count { path: FieldPath },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Create, change or remove resources and the links between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MutationRequest {
    Insert {
        resource: String,
        #[serde(default)]
        attributes: BTreeMap<String, serde_json::Value>,
        #[serde(default)]
        relationships: BTreeMap<String, RelationshipData>,
    },
    Update {
        resource: String,
        id: serde_json::Value,
        #[serde(default)]
        attributes: BTreeMap<String, serde_json::Value>,
        #[serde(default)]
        relationships: BTreeMap<String, RelationshipData>,
    },
    Delete {
        resource: String,
        id: serde_json::Value,
    },
    SetRelationship {
        resource: String,
        id: serde_json::Value,
        relationship: String,
        value: RelationshipData,
    },
    AddToRelationship {
        resource: String,
        id: serde_json::Value,
        relationship: String,
        ids: Vec<serde_json::Value>,
    },
    RemoveFromRelationship {
        resource: String,
        id: serde_json::Value,
        relationship: String,
        ids: Vec<serde_json::Value>,
    },
}

/// The new right side of a relationship: the identifiers of the related resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    Many(Vec<serde_json::Value>),
    /// A single identifier, or `null` to clear a to-one relationship.
    One(serde_json::Value),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_nested_filters() {
        let filter: FilterExpression = serde_json::from_value(json!({
            "type": "and",
            "terms": [
                {
                    "type": "comparison",
                    "operator": "greater_than",
                    "left": { "type": "field", "path": ["age"] },
                    "right": { "type": "value", "value": 18 }
                },
                { "type": "has", "field": ["ownedTodoItems"] }
            ]
        }))
        .unwrap();

        assert_eq!(
            filter,
            FilterExpression::And {
                terms: vec![
                    FilterExpression::Comparison {
                        operator: ComparisonOperator::GreaterThan,
                        left: Operand::Field {
                            path: vec!["age".to_string()]
                        },
                        right: Operand::Value { value: json!(18) },
                    },
                    FilterExpression::Has {
                        field: vec!["ownedTodoItems".to_string()],
                        filter: None,
                    },
                ]
            }
        );
    }

    #[test]
    fn query_requests_default_to_everything() {
        let request: QueryRequest =
            serde_json::from_value(json!({ "resource": "Person" })).unwrap();

        assert_eq!(request.id, None);
        assert!(request.sort.is_empty());
        assert!(request.include.is_empty());
        assert!(request.fields.is_empty());
        assert_eq!(request.pagination, None);
    }

    #[test]
    fn relationship_data_distinguishes_lists() {
        let many: RelationshipData = serde_json::from_value(json!([1, 2])).unwrap();
        let one: RelationshipData = serde_json::from_value(json!(1)).unwrap();
        let cleared: RelationshipData = serde_json::from_value(json!(null)).unwrap();

        assert_eq!(many, RelationshipData::Many(vec![json!(1), json!(2)]));
        assert_eq!(one, RelationshipData::One(json!(1)));
        assert_eq!(cleared, RelationshipData::One(serde_json::Value::Null));
    }
}
