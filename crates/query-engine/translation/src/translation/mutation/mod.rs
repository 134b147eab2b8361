//! Translate a mutation request to the statements that carry it out.

pub mod delete;
pub mod insert;
pub mod relationships;
pub mod update;

use query_engine_metadata::metadata;
use query_engine_sql::sql;

use super::error::Error;
use super::foreign_key::RelationshipForeignKey;
use super::helpers::{Env, Resource, State};
use super::query;
use super::query::values;
use super::request::{MutationRequest, RelationshipData};

/// Translate a mutation request to SQL commands, to be executed in order.
/// Either every statement translates, or no command is returned.
pub fn translate(
    metadata: &metadata::Metadata,
    dialect: sql::dialect::Dialect,
    request: &MutationRequest,
) -> Result<Vec<sql::string::SqlCommand>, Error> {
    let env = Env::new(metadata, dialect);
    let mut state = State::new();

    let statements = match request {
        MutationRequest::Insert {
            resource,
            attributes,
            relationships,
        } => insert::translate_insert(&env, &mut state, resource, attributes, relationships)?,
        MutationRequest::Update {
            resource,
            id,
            attributes,
            relationships,
        } => update::translate_update(
            &env,
            &mut state,
            resource,
            id,
            attributes,
            relationships,
        )?,
        MutationRequest::Delete { resource, id } => {
            delete::translate_delete(&env, &mut state, resource, id)?
        }
        MutationRequest::SetRelationship {
            resource,
            id,
            relationship,
            value,
        } => {
            let resource = env.lookup_resource(resource)?;
            relationships::translate_set_relationship(
                &env,
                &mut state,
                &resource,
                id,
                relationship,
                value,
            )?
        }
        MutationRequest::AddToRelationship {
            resource,
            id,
            relationship,
            ids,
        } => {
            let resource = env.lookup_resource(resource)?;
            relationships::translate_add_to_relationship(
                &env,
                &mut state,
                &resource,
                id,
                relationship,
                ids,
            )?
        }
        MutationRequest::RemoveFromRelationship {
            resource,
            id,
            relationship,
            ids,
        } => {
            let resource = env.lookup_resource(resource)?;
            relationships::translate_remove_from_relationship(
                &env,
                &mut state,
                &resource,
                id,
                relationship,
                ids,
            )?
        }
    };

    Ok(statements
        .iter()
        .map(|statement| query::render(dialect, statement))
        .collect())
}

/// `WHERE pk = @id`
fn where_primary_key(
    env: &Env,
    state: &mut State,
    resource: &Resource,
    table: &sql::ast::TableNode,
    id: &serde_json::Value,
) -> Result<sql::ast::WhereNode, Error> {
    let primary_key = resource.primary_key()?;
    Ok(sql::ast::WhereNode {
        filter: sql::helpers::equals(
            table.column(&primary_key.name, sql::ast::ColumnType::Scalar),
            values::translate_id(env, state, resource, id)?,
        ),
    })
}

/// Assign a new value to an attribute, `null` clears it.
fn assign_attribute(
    env: &Env,
    state: &mut State,
    resource: &Resource,
    table: &sql::ast::TableNode,
    attribute: &str,
    value: &serde_json::Value,
) -> Result<sql::ast::ColumnAssignmentNode, Error> {
    let column_info = resource.lookup_column(attribute)?;
    let value = if value.is_null() {
        sql::ast::NullConstantNode.into()
    } else {
        state
            .make_parameter(values::translate_column_value(env, value, column_info)?)?
            .into()
    };
    Ok(sql::ast::ColumnAssignmentNode {
        column: table.column(&column_info.name, sql::ast::ColumnType::Scalar),
        value,
    })
}

/// Point a foreign key held by `table` at another resource, `null` clears it.
fn assign_foreign_key(
    env: &Env,
    state: &mut State,
    table: &sql::ast::TableNode,
    foreign_key: &RelationshipForeignKey,
    data: &RelationshipData,
) -> Result<sql::ast::ColumnAssignmentNode, Error> {
    let RelationshipData::One(related_id) = data else {
        return Err(foreign_key.to_many_error());
    };
    let value = if related_id.is_null() {
        if !foreign_key.is_nullable() {
            return Err(Error::RequiredRelationship(
                foreign_key.relationship_name().to_string(),
                foreign_key.declaring_type().to_string(),
            ));
        }
        sql::ast::NullConstantNode.into()
    } else {
        let target = env.lookup_resource(foreign_key.target_type())?;
        values::translate_id(env, state, &target, related_id)?.into()
    };
    Ok(sql::ast::ColumnAssignmentNode {
        column: table.column(foreign_key.column_name(), sql::ast::ColumnType::ForeignKey),
        value,
    })
}
