//! Translate changes to an existing resource.

use std::collections::BTreeMap;

use query_engine_sql::sql;

use super::relationships::translate_set_relationship;
use super::{assign_attribute, assign_foreign_key, where_primary_key};
use crate::translation::error::Error;
use crate::translation::helpers::{Env, State};
use crate::translation::request::RelationshipData;

/// `UPDATE table SET .. WHERE pk = @id` for the attributes and the foreign keys
/// held by the row, followed by the statements for relationships held by other tables.
pub fn translate_update(
    env: &Env,
    state: &mut State,
    resource_name: &str,
    id: &serde_json::Value,
    attributes: &BTreeMap<String, serde_json::Value>,
    relationships: &BTreeMap<String, RelationshipData>,
) -> Result<Vec<sql::ast::StatementNode>, Error> {
    let resource = env.lookup_resource(resource_name)?;
    let table = resource.table();
    state.start_statement();

    let mut assignments = attributes
        .iter()
        .map(|(attribute, value)| assign_attribute(env, state, &resource, &table, attribute, value))
        .collect::<Result<Vec<_>, Error>>()?;

    let mut held_elsewhere = vec![];
    for (relationship_name, data) in relationships {
        let foreign_key = state.lookup_foreign_key(env, &resource, relationship_name)?;
        if foreign_key.is_to_one() && foreign_key.is_at_left_side() {
            assignments.push(assign_foreign_key(env, state, &table, &foreign_key, data)?);
        } else {
            held_elsewhere.push((relationship_name, data));
        }
    }

    let mut statements = vec![];
    if !assignments.is_empty() {
        let where_ = where_primary_key(env, state, &resource, &table, id)?;
        statements.push(sql::ast::StatementNode::Update(sql::ast::UpdateNode {
            table,
            assignments,
            where_,
        }));
    }
    for (relationship_name, data) in held_elsewhere {
        statements.extend(translate_set_relationship(
            env,
            state,
            &resource,
            id,
            relationship_name,
            data,
        )?);
    }
    Ok(statements)
}
