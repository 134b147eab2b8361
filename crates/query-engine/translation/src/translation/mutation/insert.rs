//! Translate the creation of a resource.

use std::collections::BTreeMap;

use query_engine_sql::sql;

use super::{assign_attribute, assign_foreign_key};
use crate::translation::error::Error;
use crate::translation::helpers::{Env, State};
use crate::translation::request::RelationshipData;

/// `INSERT INTO table (..) VALUES (..)`, handing back the generated primary key.
///
/// Relationships can only be set when their foreign key is held by the new row.
pub fn translate_insert(
    env: &Env,
    state: &mut State,
    resource_name: &str,
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

    for (relationship_name, data) in relationships {
        let foreign_key = state.lookup_foreign_key(env, &resource, relationship_name)?;
        if !foreign_key.is_to_one() {
            return Err(foreign_key.to_one_error());
        }
        if !foreign_key.is_at_left_side() {
            return Err(Error::NotSupported(format!(
                "relationship '{relationship_name}' on new resources, its foreign key is held by the related table"
            )));
        }
        assignments.push(assign_foreign_key(env, state, &table, &foreign_key, data)?);
    }

    let returning = Some(table.column(
        &resource.primary_key()?.name,
        sql::ast::ColumnType::Scalar,
    ));

    Ok(vec![sql::ast::StatementNode::Insert(sql::ast::InsertNode {
        table,
        assignments,
        returning,
    })])
}
