//! Join related tables into a scope, and look across to-many relationships with subqueries.

use query_engine_sql::sql;
use query_engine_sql::sql::rewrites::logical_combinator::LogicalCombinator;

use super::filtering;
use crate::translation::error::Error;
use crate::translation::foreign_key::RelationshipForeignKey;
use crate::translation::helpers::{
    Env, Resource, Scope, ScopeJoin, State, TableNameAndReference, TableReference,
};
use crate::translation::request::FilterExpression;

/// Follow a path of relationships from the root of the scope, joining every
/// table along it that was not joined yet. Returns the table at the end of the path.
pub fn join_path(
    env: &Env,
    state: &mut State,
    scope: &mut Scope,
    path: &[String],
    allow_to_many: bool,
    include: bool,
) -> Result<TableNameAndReference, Error> {
    let mut current = scope.root.clone();

    for (depth, relationship_name) in path.iter().enumerate() {
        let resource = env.lookup_resource(&current.name)?;
        let foreign_key = state.lookup_foreign_key(env, &resource, relationship_name)?;
        if !allow_to_many && !foreign_key.is_to_one() {
            return Err(foreign_key.to_one_error());
        }

        let prefix = &path[..=depth];
        // once a row may be missing, every table joined through it may be too
        let behind_outer_join = scope
            .lookup_join(&path[..depth])
            .is_some_and(|join| join.join.join_type == sql::ast::JoinType::LeftJoin);
        current = match scope.joins.iter().position(|join| join.path == prefix) {
            Some(index) => {
                let join = &mut scope.joins[index];
                join.included |= include;
                join.table.clone()
            }
            None => {
                let target = env.lookup_resource(foreign_key.target_type())?;
                let table = target.aliased_table(state.make_table_alias());
                let (outer_column, inner_column) =
                    join_columns(&resource, &current, &target, &table, &foreign_key)?;
                let joined = TableNameAndReference {
                    name: target.name.to_string(),
                    reference: TableReference::Table(table.clone()),
                };
                scope.joins.push(ScopeJoin {
                    path: prefix.to_vec(),
                    table: joined.clone(),
                    join: sql::ast::JoinNode {
                        join_type: if behind_outer_join {
                            sql::ast::JoinType::LeftJoin
                        } else {
                            foreign_key.join_type()
                        },
                        table,
                        outer_column,
                        inner_column,
                    },
                    included: include,
                });
                joined
            }
        };
    }

    Ok(current)
}

/// Whether any of the paths walks a to-many relationship.
pub fn includes_to_many(
    env: &Env,
    state: &mut State,
    resource: &Resource,
    paths: &[Vec<String>],
) -> Result<bool, Error> {
    for path in paths {
        let mut current = *resource;
        for relationship_name in path {
            let foreign_key = state.lookup_foreign_key(env, &current, relationship_name)?;
            if !foreign_key.is_to_one() {
                return Ok(true);
            }
            current = env.lookup_resource(foreign_key.target_type())?;
        }
    }
    Ok(false)
}

/// Build a subquery over the resources of the to-many relationship at the end
/// of `path`, correlated with the row of the outer query they belong to.
pub fn translate_related_select(
    env: &Env,
    state: &mut State,
    scope: &mut Scope,
    path: &[String],
    selector: sql::ast::SelectorNode,
    filter: Option<&FilterExpression>,
) -> Result<sql::ast::SelectNode, Error> {
    let (relationship_name, parent_path) = path.split_last().ok_or(Error::EmptyFieldPath)?;
    let parent = join_path(env, state, scope, parent_path, false, false)?;
    let parent_resource = env.lookup_resource(&parent.name)?;
    let foreign_key = state.lookup_foreign_key(env, &parent_resource, relationship_name)?;
    if foreign_key.is_to_one() {
        return Err(foreign_key.to_many_error());
    }

    let target = env.lookup_resource(foreign_key.target_type())?;
    let table = target.aliased_table(state.make_table_alias());
    let (outer_column, inner_column) =
        join_columns(&parent_resource, &parent, &target, &table, &foreign_key)?;

    let mut inner_scope = Scope::new(TableNameAndReference {
        name: target.name.to_string(),
        reference: TableReference::Table(table.clone()),
    });
    let mut terms = vec![sql::helpers::equals(outer_column, inner_column)];
    if let Some(filter) = filter {
        terms.push(filtering::translate_expression(
            env,
            state,
            &mut inner_scope,
            filter,
        )?);
    }

    let mut select = sql::helpers::simple_select(sql::helpers::from_table(table), selector);
    select.joins = inner_scope.join_nodes();
    select.where_ = sql::helpers::and(terms).map(|filter| sql::ast::WhereNode {
        filter: LogicalCombinator::collapse(&filter),
    });
    Ok(select)
}

/// The number of resources in the to-many relationship at the end of `path`.
pub fn translate_count(
    env: &Env,
    state: &mut State,
    scope: &mut Scope,
    path: &[String],
) -> Result<sql::ast::CountNode, Error> {
    let select = translate_related_select(
        env,
        state,
        scope,
        path,
        sql::ast::SelectorNode::Count(sql::ast::CountSelectorNode),
        None,
    )?;
    Ok(sql::ast::CountNode {
        sub_select: Box::new(select),
    })
}

/// The two columns a relationship is joined on: one of the parent table, one of the related table.
fn join_columns(
    parent_resource: &Resource,
    parent: &TableNameAndReference,
    target: &Resource,
    table: &sql::ast::TableNode,
    foreign_key: &RelationshipForeignKey,
) -> Result<(sql::ast::ColumnNode, sql::ast::ColumnInTableNode), Error> {
    if foreign_key.is_at_left_side() {
        Ok((
            parent.column(foreign_key.column_name(), sql::ast::ColumnType::ForeignKey),
            table.column(&target.primary_key()?.name, sql::ast::ColumnType::Scalar),
        ))
    } else {
        Ok((
            parent.column(
                &parent_resource.primary_key()?.name,
                sql::ast::ColumnType::Scalar,
            ),
            table.column(foreign_key.column_name(), sql::ast::ColumnType::ForeignKey),
        ))
    }
}
