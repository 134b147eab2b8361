//! Resolve how a relationship between two resource types is realized in the database.

use std::fmt;

use query_engine_metadata::metadata::{Nullable, RelationshipInfo, RelationshipKind};
use query_engine_sql::sql::ast::JoinType;
use query_engine_sql::sql::dialect::Dialect;

use super::error::Error;
use super::helpers::{Env, Resource};

/// The foreign key column behind a relationship, and the table that holds it.
///
/// Displays as `DeclaringType.relationship => "Table"."Column"`, quoted for the
/// dialect, with a trailing `?` for optional to-one relationships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipForeignKey {
    dialect: Dialect,
    declaring_type: String,
    relationship_name: String,
    target_type: String,
    kind: RelationshipKind,
    table_name: String,
    column_name: String,
    at_left_side: bool,
    nullable: bool,
}

impl RelationshipForeignKey {
    pub fn new(
        dialect: Dialect,
        declaring: &Resource,
        relationship_name: &str,
        relationship: &RelationshipInfo,
        target: &Resource,
    ) -> RelationshipForeignKey {
        let owner = if relationship.foreign_key.at_left_side {
            declaring
        } else {
            target
        };
        RelationshipForeignKey {
            dialect,
            declaring_type: declaring.name.to_string(),
            relationship_name: relationship_name.to_string(),
            target_type: target.name.to_string(),
            kind: relationship.kind,
            table_name: owner.info.table_name.clone(),
            column_name: relationship.foreign_key.column.clone(),
            at_left_side: relationship.foreign_key.at_left_side,
            nullable: relationship.foreign_key.nullable == Nullable::Nullable,
        }
    }

    /// Lookup a relationship of `declaring` and the resource type it points to.
    pub fn resolve(
        env: &Env,
        declaring: &Resource,
        relationship_name: &str,
    ) -> Result<RelationshipForeignKey, Error> {
        let relationship = declaring.lookup_relationship(relationship_name)?;
        let target = env.lookup_resource(&relationship.target)?;
        Ok(RelationshipForeignKey::new(
            env.dialect(),
            declaring,
            relationship_name,
            relationship,
            &target,
        ))
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn relationship_name(&self) -> &str {
        &self.relationship_name
    }

    pub fn target_type(&self) -> &str {
        &self.target_type
    }

    pub fn is_to_one(&self) -> bool {
        self.kind == RelationshipKind::ToOne
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// Whether the column lives in the table of the declaring type.
    pub fn is_at_left_side(&self) -> bool {
        self.at_left_side
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// A required foreign key on the declaring side always finds its row.
    pub fn join_type(&self) -> JoinType {
        if self.at_left_side && !self.nullable {
            JoinType::InnerJoin
        } else {
            JoinType::LeftJoin
        }
    }

    pub fn to_one_error(&self) -> Error {
        Error::ExpectedToOneRelationship(self.relationship_name.clone(), self.declaring_type.clone())
    }

    pub fn to_many_error(&self) -> Error {
        Error::ExpectedToManyRelationship(
            self.relationship_name.clone(),
            self.declaring_type.clone(),
        )
    }
}

impl fmt::Display for RelationshipForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} => {}.{}",
            self.declaring_type,
            self.relationship_name,
            self.dialect.quote_identifier(&self.table_name),
            self.dialect.quote_identifier(&self.column_name)
        )?;
        if self.is_to_one() && self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_engine_metadata::metadata::Metadata;
    use serde_json::json;

    fn metadata() -> Metadata {
        serde_json::from_value(json!({
            "resources": {
                "Person": {
                    "tableName": "People",
                    "primaryKey": "id",
                    "columns": { "id": { "name": "Id", "type": "integer", "nullable": "NonNullable" } },
                    "relationships": {
                        "assignedTodoItems": {
                            "target": "TodoItem",
                            "kind": "to_many",
                            "foreignKey": { "column": "AssigneeId", "atLeftSide": false, "nullable": "Nullable" }
                        }
                    }
                },
                "TodoItem": {
                    "tableName": "TodoItems",
                    "primaryKey": "id",
                    "columns": { "id": { "name": "Id", "type": "integer", "nullable": "NonNullable" } },
                    "relationships": {
                        "owner": {
                            "target": "Person",
                            "kind": "to_one",
                            "foreignKey": { "column": "OwnerId", "atLeftSide": true, "nullable": "NonNullable" }
                        },
                        "assignee": {
                            "target": "Person",
                            "kind": "to_one",
                            "foreignKey": { "column": "AssigneeId", "atLeftSide": true, "nullable": "Nullable" }
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    fn resolve(dialect: Dialect, resource: &str, relationship: &str) -> RelationshipForeignKey {
        let metadata = metadata();
        let env = Env::new(&metadata, dialect);
        let declaring = env.lookup_resource(resource).unwrap();
        RelationshipForeignKey::resolve(&env, &declaring, relationship).unwrap()
    }

    #[test]
    fn optional_to_one_relationship_is_marked() {
        let foreign_key = resolve(Dialect::PostgreSql, "TodoItem", "assignee");

        assert_eq!(
            foreign_key.to_string(),
            r#"TodoItem.assignee => "TodoItems"."AssigneeId"?"#
        );
        assert_eq!(foreign_key.join_type(), JoinType::LeftJoin);
    }

    #[test]
    fn required_to_one_relationship_is_not_marked() {
        let foreign_key = resolve(Dialect::PostgreSql, "TodoItem", "owner");

        assert_eq!(
            foreign_key.to_string(),
            r#"TodoItem.owner => "TodoItems"."OwnerId""#
        );
        assert_eq!(foreign_key.join_type(), JoinType::InnerJoin);
    }

    #[test]
    fn to_many_relationship_is_never_marked() {
        let foreign_key = resolve(Dialect::PostgreSql, "Person", "assignedTodoItems");

        assert!(foreign_key.is_nullable());
        assert!(!foreign_key.is_at_left_side());
        assert_eq!(
            foreign_key.to_string(),
            r#"Person.assignedTodoItems => "TodoItems"."AssigneeId""#
        );
        assert_eq!(foreign_key.join_type(), JoinType::LeftJoin);
    }

    #[test]
    fn quotes_per_dialect() {
        assert_eq!(
            resolve(Dialect::MySql, "TodoItem", "assignee").to_string(),
            "TodoItem.assignee => `TodoItems`.`AssigneeId`?"
        );
        assert_eq!(
            resolve(Dialect::SqlServer, "TodoItem", "owner").to_string(),
            "TodoItem.owner => [TodoItems].[OwnerId]"
        );
    }

    #[test]
    fn unknown_relationship_fails() {
        let metadata = metadata();
        let env = Env::new(&metadata, Dialect::PostgreSql);
        let declaring = env.lookup_resource("Person").unwrap();

        assert_eq!(
            RelationshipForeignKey::resolve(&env, &declaring, "friends"),
            Err(Error::RelationshipNotFound(
                "friends".to_string(),
                "Person".to_string()
            ))
        );
    }
}
