//! Handle the translation of sort orders.

use query_engine_sql::sql;

use super::filtering;
use super::relationships;
use crate::translation::error::Error;
use crate::translation::helpers::{Env, Scope, State};
use crate::translation::request::{SortDirection, SortElement, SortTarget};

/// Convert the sort elements of a request to an ORDER BY clause.
/// Without any, resources are ordered by their primary key.
pub fn translate_order_by(
    env: &Env,
    state: &mut State,
    scope: &mut Scope,
    sort: &[SortElement],
) -> Result<sql::ast::OrderByNode, Error> {
    let terms = if sort.is_empty() {
        let primary_key = env.lookup_resource(&scope.root.name)?.primary_key()?;
        vec![sql::ast::OrderByTermNode::Column(
            sql::ast::OrderByColumnNode {
                column: scope
                    .root
                    .column(&primary_key.name, sql::ast::ColumnType::Scalar),
                is_ascending: true,
            },
        )]
    } else {
        sort.iter()
            .map(|element| translate_sort_element(env, state, scope, element))
            .collect::<Result<Vec<_>, Error>>()?
    };
    Ok(sql::ast::OrderByNode { terms })
}

fn translate_sort_element(
    env: &Env,
    state: &mut State,
    scope: &mut Scope,
    element: &SortElement,
) -> Result<sql::ast::OrderByTermNode, Error> {
    let is_ascending = element.direction == SortDirection::Asc;
    match &element.target {
        SortTarget::Field { path } => {
            let (column, _) = filtering::translate_field(env, state, scope, path)?;
            Ok(sql::ast::OrderByTermNode::Column(
                sql::ast::OrderByColumnNode {
                    column,
                    is_ascending,
                },
            ))
        }
        SortTarget::Count { path } => Ok(sql::ast::OrderByTermNode::Count(
            sql::ast::OrderByCountNode {
                count: relationships::translate_count(env, state, scope, path)?,
                is_ascending,
            },
        )),
    }
}
