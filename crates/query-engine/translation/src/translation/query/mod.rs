//! Translate a query request to a SELECT statement.

pub mod fields;
pub mod filtering;
pub mod relationships;
pub mod root;
pub mod sorting;
pub mod values;

use query_engine_metadata::metadata;
use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::{Env, State};
use crate::translation::request::QueryRequest;

/// Translate a query request to a SQL command reading the requested resources.
pub fn translate(
    metadata: &metadata::Metadata,
    dialect: sql::dialect::Dialect,
    request: &QueryRequest,
) -> Result<sql::string::SqlCommand, Error> {
    let env = Env::new(metadata, dialect);
    let mut state = State::new();
    let select = root::translate_rows_query(&env, &mut state, request)?;
    Ok(render(dialect, &sql::ast::StatementNode::Select(select)))
}

/// Translate a query request to a SQL command counting the matching resources.
pub fn translate_count(
    metadata: &metadata::Metadata,
    dialect: sql::dialect::Dialect,
    request: &QueryRequest,
) -> Result<sql::string::SqlCommand, Error> {
    let env = Env::new(metadata, dialect);
    let mut state = State::new();
    let select = root::translate_count_query(&env, &mut state, request)?;
    Ok(render(dialect, &sql::ast::StatementNode::Select(select)))
}

pub(crate) fn render(
    dialect: sql::dialect::Dialect,
    statement: &sql::ast::StatementNode,
) -> sql::string::SqlCommand {
    tracing::debug!("SQL AST: {:?}", statement);
    let command = sql::convert::SqlQueryBuilder::new(dialect).get_command(statement);
    tracing::info!("SQL: {}", command.statement());
    tracing::debug!("Parameters: {}", command.display_parameters());
    command
}
