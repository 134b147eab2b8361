//! Translate changes to the resources a relationship points at.
//!
//! A foreign key held by the changed resource is a single column update. A
//! foreign key held by the related table means updating the related rows:
//! detaching the old ones and attaching the new ones.

use query_engine_metadata::metadata::DeleteBehavior;
use query_engine_sql::sql;

use super::{assign_foreign_key, where_primary_key};
use crate::translation::error::Error;
use crate::translation::foreign_key::RelationshipForeignKey;
use crate::translation::helpers::{Env, Resource, State};
use crate::translation::query::values;
use crate::translation::request::RelationshipData;

/// Which of the related rows of a resource to detach.
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    All,
    Only(&'a [serde_json::Value]),
    AllExcept(&'a [serde_json::Value]),
}

/// Replace the right side of a relationship.
pub fn translate_set_relationship(
    env: &Env,
    state: &mut State,
    resource: &Resource,
    id: &serde_json::Value,
    relationship_name: &str,
    data: &RelationshipData,
) -> Result<Vec<sql::ast::StatementNode>, Error> {
    let foreign_key = state.lookup_foreign_key(env, resource, relationship_name)?;

    if foreign_key.is_at_left_side() {
        state.start_statement();
        let table = resource.table();
        let assignment = assign_foreign_key(env, state, &table, &foreign_key, data)?;
        let where_ = where_primary_key(env, state, resource, &table, id)?;
        return Ok(vec![sql::ast::StatementNode::Update(sql::ast::UpdateNode {
            table,
            assignments: vec![assignment],
            where_,
        })]);
    }

    let related_ids = match (foreign_key.is_to_one(), data) {
        (true, RelationshipData::One(serde_json::Value::Null)) => vec![],
        (true, RelationshipData::One(related_id)) => vec![related_id.clone()],
        (false, RelationshipData::Many(related_ids)) => related_ids.clone(),
        (true, RelationshipData::Many(_)) => return Err(foreign_key.to_many_error()),
        (false, RelationshipData::One(_)) => return Err(foreign_key.to_one_error()),
    };
    let delete_behavior = resource
        .lookup_relationship(relationship_name)?
        .delete_behavior;

    let mut statements = vec![detach(
        env,
        state,
        resource,
        &foreign_key,
        delete_behavior,
        id,
        Selection::AllExcept(&related_ids),
    )?];
    if !related_ids.is_empty() {
        statements.push(attach(env, state, resource, &foreign_key, id, &related_ids)?);
    }
    Ok(statements)
}

/// Link more resources to a to-many relationship.
pub fn translate_add_to_relationship(
    env: &Env,
    state: &mut State,
    resource: &Resource,
    id: &serde_json::Value,
    relationship_name: &str,
    related_ids: &[serde_json::Value],
) -> Result<Vec<sql::ast::StatementNode>, Error> {
    let foreign_key = state.lookup_foreign_key(env, resource, relationship_name)?;
    if foreign_key.is_to_one() {
        return Err(foreign_key.to_many_error());
    }
    if related_ids.is_empty() {
        return Ok(vec![]);
    }
    Ok(vec![attach(env, state, resource, &foreign_key, id, related_ids)?])
}

/// Unlink resources from a to-many relationship.
pub fn translate_remove_from_relationship(
    env: &Env,
    state: &mut State,
    resource: &Resource,
    id: &serde_json::Value,
    relationship_name: &str,
    related_ids: &[serde_json::Value],
) -> Result<Vec<sql::ast::StatementNode>, Error> {
    let foreign_key = state.lookup_foreign_key(env, resource, relationship_name)?;
    if foreign_key.is_to_one() {
        return Err(foreign_key.to_many_error());
    }
    if related_ids.is_empty() {
        return Ok(vec![]);
    }
    let delete_behavior = resource
        .lookup_relationship(relationship_name)?
        .delete_behavior;
    Ok(vec![detach(
        env,
        state,
        resource,
        &foreign_key,
        delete_behavior,
        id,
        Selection::Only(related_ids),
    )?])
}

/// Detach related rows from the resource `id`: clear their foreign key, or
/// delete them when the key is required and the relationship cascades.
pub fn detach(
    env: &Env,
    state: &mut State,
    resource: &Resource,
    foreign_key: &RelationshipForeignKey,
    delete_behavior: DeleteBehavior,
    id: &serde_json::Value,
    selection: Selection,
) -> Result<sql::ast::StatementNode, Error> {
    state.start_statement();
    let target = env.lookup_resource(foreign_key.target_type())?;
    let table = target.table();
    let foreign_key_column =
        table.column(foreign_key.column_name(), sql::ast::ColumnType::ForeignKey);

    let owned = sql::helpers::equals(
        foreign_key_column.clone(),
        values::translate_id(env, state, resource, id)?,
    );
    let filter = match selection {
        Selection::All | Selection::AllExcept([]) => owned,
        Selection::Only(related_ids) => sql::ast::LogicalNode::new(
            sql::ast::LogicalOperator::And,
            vec![owned, related_in(env, state, &target, &table, related_ids)?],
        )?
        .into(),
        Selection::AllExcept(related_ids) => sql::ast::LogicalNode::new(
            sql::ast::LogicalOperator::And,
            vec![
                owned,
                sql::ast::NotNode {
                    child: Box::new(related_in(env, state, &target, &table, related_ids)?),
                }
                .into(),
            ],
        )?
        .into(),
    };
    let where_ = sql::ast::WhereNode { filter };

    if foreign_key.is_nullable() {
        Ok(sql::ast::StatementNode::Update(sql::ast::UpdateNode {
            table,
            assignments: vec![sql::ast::ColumnAssignmentNode {
                column: foreign_key_column,
                value: sql::ast::NullConstantNode.into(),
            }],
            where_,
        }))
    } else if delete_behavior == DeleteBehavior::Cascade {
        Ok(sql::ast::StatementNode::Delete(sql::ast::DeleteNode {
            table,
            where_,
        }))
    } else {
        Err(Error::RequiredRelationship(
            foreign_key.relationship_name().to_string(),
            foreign_key.declaring_type().to_string(),
        ))
    }
}

/// Point the foreign key of the related rows at the resource `id`.
fn attach(
    env: &Env,
    state: &mut State,
    resource: &Resource,
    foreign_key: &RelationshipForeignKey,
    id: &serde_json::Value,
    related_ids: &[serde_json::Value],
) -> Result<sql::ast::StatementNode, Error> {
    state.start_statement();
    let target = env.lookup_resource(foreign_key.target_type())?;
    let table = target.table();
    let assignment = sql::ast::ColumnAssignmentNode {
        column: table.column(foreign_key.column_name(), sql::ast::ColumnType::ForeignKey),
        value: values::translate_id(env, state, resource, id)?.into(),
    };
    let where_ = sql::ast::WhereNode {
        filter: related_in(env, state, &target, &table, related_ids)?,
    };
    Ok(sql::ast::StatementNode::Update(sql::ast::UpdateNode {
        table,
        assignments: vec![assignment],
        where_,
    }))
}

/// `pk IN (@id, ..)` over the rows of a related table.
fn related_in(
    env: &Env,
    state: &mut State,
    target: &Resource,
    table: &sql::ast::TableNode,
    related_ids: &[serde_json::Value],
) -> Result<sql::ast::FilterNode, Error> {
    let primary_key = target.primary_key()?;
    let values = related_ids
        .iter()
        .map(|related_id| Ok(values::translate_id(env, state, target, related_id)?.into()))
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(sql::ast::InNode {
        column: table
            .column(&primary_key.name, sql::ast::ColumnType::Scalar)
            .into(),
        values,
    }
    .into())
}
