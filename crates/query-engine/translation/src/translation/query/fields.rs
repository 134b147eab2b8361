//! Handle the selection of columns.

use std::collections::BTreeMap;

use query_engine_metadata::metadata::ColumnInfo;
use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::{Env, Resource, Scope};

/// Select the columns of the root table and of every included table, in join order.
pub fn translate_selector(
    env: &Env,
    scope: &Scope,
    fields: &BTreeMap<String, Vec<String>>,
) -> Result<sql::ast::SelectorNode, Error> {
    for resource_name in fields.keys() {
        env.lookup_resource(resource_name)?;
    }

    let tables = std::iter::once(&scope.root).chain(
        scope
            .joins
            .iter()
            .filter(|join| join.included)
            .map(|join| &join.table),
    );

    let mut columns = vec![];
    for table in tables {
        let resource = env.lookup_resource(&table.name)?;
        for column_info in selected_columns(&resource, fields.get(resource.name))? {
            columns.push(table.column(&column_info.name, sql::ast::ColumnType::Scalar));
        }
    }

    Ok(sql::ast::SelectorNode::Columns(
        sql::ast::ColumnSelectorNode { columns },
    ))
}

/// The primary key, followed by the attributes of a sparse fieldset or, without one, all others.
pub fn selected_columns<'a>(
    resource: &Resource<'a>,
    sparse_fieldset: Option<&Vec<String>>,
) -> Result<Vec<&'a ColumnInfo>, Error> {
    let mut columns = vec![resource.primary_key()?];
    match sparse_fieldset {
        Some(attributes) => {
            for attribute in attributes {
                let column_info = resource.lookup_column(attribute)?;
                if !columns.iter().any(|selected| selected.name == column_info.name) {
                    columns.push(column_info);
                }
            }
        }
        None => columns.extend(
            resource
                .info
                .columns
                .iter()
                .filter(|(attribute, _)| **attribute != resource.info.primary_key)
                .map(|(_, column_info)| column_info),
        ),
    }
    Ok(columns)
}

/// Every column a paged subquery must project for the outer query to read
/// and join on: all attributes, then the foreign keys held by the table.
pub fn projected_columns<'a>(
    resource: &Resource<'a>,
) -> Result<Vec<(&'a str, sql::ast::ColumnType)>, Error> {
    let mut columns: Vec<(&'a str, sql::ast::ColumnType)> = selected_columns(resource, None)?
        .into_iter()
        .map(|column_info| (column_info.name.as_str(), sql::ast::ColumnType::Scalar))
        .collect();
    for relationship in resource.info.relationships.values() {
        let column_name = relationship.foreign_key.column.as_str();
        if relationship.foreign_key.at_left_side
            && !columns.iter().any(|(name, _)| *name == column_name)
        {
            columns.push((column_name, sql::ast::ColumnType::ForeignKey));
        }
    }
    Ok(columns)
}
