//! Translate the removal of a resource.

use query_engine_metadata::metadata::DeleteBehavior;
use query_engine_sql::sql;

use super::relationships::{detach, Selection};
use super::where_primary_key;
use crate::translation::error::Error;
use crate::translation::helpers::{Env, State};

/// `DELETE FROM table WHERE pk = @id`, preceded by clearing the foreign keys
/// of related rows whose relationship asks for it.
pub fn translate_delete(
    env: &Env,
    state: &mut State,
    resource_name: &str,
    id: &serde_json::Value,
) -> Result<Vec<sql::ast::StatementNode>, Error> {
    let resource = env.lookup_resource(resource_name)?;
    let mut statements = vec![];

    for (relationship_name, relationship) in &resource.info.relationships {
        if relationship.delete_behavior == DeleteBehavior::SetNull
            && !relationship.foreign_key.at_left_side
        {
            let foreign_key = state.lookup_foreign_key(env, &resource, relationship_name)?;
            statements.push(detach(
                env,
                state,
                &resource,
                &foreign_key,
                DeleteBehavior::SetNull,
                id,
                Selection::All,
            )?);
        }
    }

    state.start_statement();
    let table = resource.table();
    let where_ = where_primary_key(env, state, &resource, &table, id)?;
    statements.push(sql::ast::StatementNode::Delete(sql::ast::DeleteNode {
        table,
        where_,
    }));
    Ok(statements)
}
