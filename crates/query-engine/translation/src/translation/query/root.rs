//! Handle 'rows' and 'count' translation.

use query_engine_sql::sql;

use super::fields;
use super::filtering;
use super::relationships;
use super::sorting;
use crate::translation::error::Error;
use crate::translation::helpers::{
    Env, Resource, Scope, State, TableNameAndReference, TableReference,
};
use crate::translation::request::{Pagination, QueryRequest};

/// Translate the rows part of a request to sql ast.
pub fn translate_rows_query(
    env: &Env,
    state: &mut State,
    request: &QueryRequest,
) -> Result<sql::ast::SelectNode, Error> {
    let resource = env.lookup_resource(&request.resource)?;
    let table = resource.aliased_table(state.make_table_alias());
    let limit = translate_limit(request.pagination);

    // a page of rows must count resources, not the rows joined to them
    if !limit.is_empty()
        && relationships::includes_to_many(env, state, &resource, &request.include)?
    {
        return translate_paged_query(env, state, &resource, table, request, limit);
    }

    let mut scope = Scope::new(TableNameAndReference {
        name: resource.name.to_string(),
        reference: TableReference::Table(table.clone()),
    });

    for path in &request.include {
        relationships::join_path(env, state, &mut scope, path, true, true)?;
    }

    let where_ = filtering::translate_where(
        env,
        state,
        &mut scope,
        &resource,
        request.id.as_ref(),
        request.filter.as_ref(),
    )?;
    let order_by = sorting::translate_order_by(env, state, &mut scope, &request.sort)?;
    let selector = fields::translate_selector(env, &scope, &request.fields)?;

    let mut select = sql::helpers::simple_select(sql::helpers::from_table(table), selector);
    select.joins = scope.join_nodes();
    select.where_ = where_;
    select.order_by = Some(order_by);
    select.limit = limit;
    Ok(select)
}

/// Page the primary resources in a subquery, then join the included resources to that page.
fn translate_paged_query(
    env: &Env,
    state: &mut State,
    resource: &Resource,
    table: sql::ast::TableNode,
    request: &QueryRequest,
    limit: sql::ast::Limit,
) -> Result<sql::ast::SelectNode, Error> {
    let mut inner_scope = Scope::new(TableNameAndReference {
        name: resource.name.to_string(),
        reference: TableReference::Table(table.clone()),
    });
    let where_ = filtering::translate_where(
        env,
        state,
        &mut inner_scope,
        resource,
        request.id.as_ref(),
        request.filter.as_ref(),
    )?;
    let order_by = sorting::translate_order_by(env, state, &mut inner_scope, &request.sort)?;
    let columns = fields::projected_columns(resource)?
        .into_iter()
        .map(|(name, column_type)| table.column(name, column_type).into())
        .collect();

    let mut inner = sql::helpers::simple_select(
        sql::helpers::from_table(table.clone()),
        sql::ast::SelectorNode::Columns(sql::ast::ColumnSelectorNode { columns }),
    );
    inner.joins = inner_scope.join_nodes();
    inner.where_ = where_;
    inner.order_by = Some(order_by);
    inner.limit = limit;
    let alias = state.make_table_alias();
    inner.alias = Some(alias.clone());

    let mut scope = Scope::new(TableNameAndReference {
        name: resource.name.to_string(),
        reference: TableReference::Subquery { table, alias },
    });
    for path in &request.include {
        relationships::join_path(env, state, &mut scope, path, true, true)?;
    }
    let order_by = sorting::translate_order_by(env, state, &mut scope, &request.sort)?;
    let selector = fields::translate_selector(env, &scope, &request.fields)?;

    let mut select = sql::helpers::simple_select(
        sql::ast::FromNode {
            source: sql::ast::TableSourceNode::Select(Box::new(inner)),
        },
        selector,
    );
    select.joins = scope.join_nodes();
    select.order_by = Some(order_by);
    Ok(select)
}

/// Translate the number of resources matching a request to sql ast.
/// Includes, sorting and pagination do not change that number.
pub fn translate_count_query(
    env: &Env,
    state: &mut State,
    request: &QueryRequest,
) -> Result<sql::ast::SelectNode, Error> {
    let resource = env.lookup_resource(&request.resource)?;
    let table = resource.aliased_table(state.make_table_alias());
    let mut scope = Scope::new(TableNameAndReference {
        name: resource.name.to_string(),
        reference: TableReference::Table(table.clone()),
    });

    let where_ = filtering::translate_where(
        env,
        state,
        &mut scope,
        &resource,
        request.id.as_ref(),
        request.filter.as_ref(),
    )?;

    let mut select = sql::helpers::simple_select(
        sql::helpers::from_table(table),
        sql::ast::SelectorNode::Count(sql::ast::CountSelectorNode),
    );
    select.joins = scope.join_nodes();
    select.where_ = where_;
    Ok(select)
}

fn translate_limit(pagination: Option<Pagination>) -> sql::ast::Limit {
    match pagination {
        Some(Pagination { limit, offset }) => sql::ast::Limit { limit, offset },
        None => sql::helpers::empty_limit(),
    }
}
