//! Handle filtering/where clauses translation.

use query_engine_metadata::metadata::database::{ColumnInfo, ComparisonOperator, ScalarType};
use query_engine_sql::sql;
use query_engine_sql::sql::rewrites::logical_combinator::LogicalCombinator;
use query_engine_sql::sql::value::ParameterValue;

use super::relationships;
use super::values;
use crate::translation::error::Error;
use crate::translation::helpers::{Env, Resource, Scope, State};
use crate::translation::request::{FilterExpression, MatchKind, Operand};

/// One side of a comparison, before values are bound to parameters.
enum Side<'a> {
    Column(sql::ast::ColumnNode, &'a ColumnInfo),
    Count(sql::ast::CountNode),
    Value(&'a serde_json::Value),
    Null,
}

/// Translate the `id` and `filter` of a request into a WHERE clause,
/// flattening nested conjunctions.
pub fn translate_where(
    env: &Env,
    state: &mut State,
    scope: &mut Scope,
    resource: &Resource,
    id: Option<&serde_json::Value>,
    filter: Option<&FilterExpression>,
) -> Result<Option<sql::ast::WhereNode>, Error> {
    let mut terms = vec![];
    if let Some(id) = id {
        let primary_key = resource.primary_key()?;
        let parameter = values::translate_id(env, state, resource, id)?;
        terms.push(sql::helpers::equals(
            scope
                .root
                .column(&primary_key.name, sql::ast::ColumnType::Scalar),
            parameter,
        ));
    }
    if let Some(filter) = filter {
        terms.push(translate_expression(env, state, scope, filter)?);
    }
    Ok(sql::helpers::and(terms).map(|filter| sql::ast::WhereNode {
        filter: LogicalCombinator::collapse(&filter),
    }))
}

/// Translate a boolean expression to a filter node.
pub fn translate_expression(
    env: &Env,
    state: &mut State,
    scope: &mut Scope,
    expression: &FilterExpression,
) -> Result<sql::ast::FilterNode, Error> {
    match expression {
        FilterExpression::And { terms } => {
            translate_logical(env, state, scope, sql::ast::LogicalOperator::And, terms)
        }
        FilterExpression::Or { terms } => {
            translate_logical(env, state, scope, sql::ast::LogicalOperator::Or, terms)
        }
        FilterExpression::Not { filter } => Ok(sql::ast::NotNode {
            child: Box::new(translate_expression(env, state, scope, filter)?),
        }
        .into()),
        FilterExpression::Comparison {
            operator,
            left,
            right,
        } => translate_comparison(env, state, scope, *operator, left, right),
        FilterExpression::Match { kind, field, text } => {
            let (column, column_info) = translate_field(env, state, scope, field)?;
            if !column_info.r#type.supports_text_matching() {
                return Err(Error::NotSupported(format!(
                    "text matching on {} values",
                    column_info.r#type
                )));
            }
            let match_kind = translate_match_kind(*kind);
            let pattern = env.dialect().like_pattern(text, match_kind);
            Ok(sql::ast::LikeNode {
                column,
                match_kind,
                pattern: state.make_parameter(ParameterValue::String(pattern))?,
            }
            .into())
        }
        FilterExpression::Any {
            field,
            values: candidates,
        } => {
            if candidates.is_empty() {
                return Err(Error::EmptyValueList);
            }
            let (column, column_info) = translate_field(env, state, scope, field)?;
            let values = candidates
                .iter()
                .map(|value| {
                    let value = values::translate_column_value(env, value, column_info)?;
                    Ok(state.make_parameter(value)?.into())
                })
                .collect::<Result<Vec<_>, Error>>()?;
            Ok(sql::ast::InNode { column, values }.into())
        }
        FilterExpression::Has { field, filter } => {
            let select = relationships::translate_related_select(
                env,
                state,
                scope,
                field,
                sql::ast::SelectorNode::One(sql::ast::OneSelectorNode),
                filter.as_deref(),
            )?;
            Ok(sql::ast::ExistsNode {
                sub_select: Box::new(select),
            }
            .into())
        }
    }
}

fn translate_logical(
    env: &Env,
    state: &mut State,
    scope: &mut Scope,
    operator: sql::ast::LogicalOperator,
    terms: &[FilterExpression],
) -> Result<sql::ast::FilterNode, Error> {
    let terms = terms
        .iter()
        .map(|term| translate_expression(env, state, scope, term))
        .collect::<Result<Vec<_>, Error>>()?;
    sql::helpers::combine(operator, terms)
        .ok_or_else(|| Error::NotSupported("empty logical expressions".to_string()))
}

fn translate_comparison(
    env: &Env,
    state: &mut State,
    scope: &mut Scope,
    operator: ComparisonOperator,
    left: &Operand,
    right: &Operand,
) -> Result<sql::ast::FilterNode, Error> {
    let left = translate_operand(env, state, scope, left)?;
    let right = translate_operand(env, state, scope, right)?;

    // the column whose type values are bound with, counts are bigint
    let typed_column = match (&left, &right) {
        (Side::Column(_, column), _) | (_, Side::Column(_, column)) => Some(*column),
        (Side::Count(_), _) | (_, Side::Count(_)) => None,
        _ => {
            return Err(Error::NotSupported(
                "comparisons without a field or count".to_string(),
            ))
        }
    };
    let scalar_type = typed_column.map_or(ScalarType::Bigint, |column| column.r#type);

    if matches!(left, Side::Null) || matches!(right, Side::Null) {
        if operator != ComparisonOperator::Equals {
            return Err(Error::InvalidNullComparison(operator));
        }
    } else if !scalar_type.comparison_operators().contains(&operator) {
        return Err(Error::NotSupported(format!(
            "operator '{operator}' on {scalar_type} values"
        )));
    }

    Ok(sql::ast::ComparisonNode {
        operator: translate_operator(operator),
        left: bind_side(env, state, left, typed_column)?,
        right: bind_side(env, state, right, typed_column)?,
    }
    .into())
}

fn translate_operand<'a>(
    env: &Env<'a>,
    state: &mut State,
    scope: &mut Scope,
    operand: &'a Operand,
) -> Result<Side<'a>, Error> {
    match operand {
        Operand::Field { path } => {
            let (column, column_info) = translate_field(env, state, scope, path)?;
            Ok(Side::Column(column, column_info))
        }
        Operand::Count { path } => Ok(Side::Count(relationships::translate_count(
            env, state, scope, path,
        )?)),
        Operand::Value {
            value: serde_json::Value::Null,
        }
        | Operand::Null => Ok(Side::Null),
        Operand::Value { value } => Ok(Side::Value(value)),
    }
}

fn bind_side(
    env: &Env,
    state: &mut State,
    side: Side,
    typed_column: Option<&ColumnInfo>,
) -> Result<sql::ast::SqlValueNode, Error> {
    match side {
        Side::Column(column, _) => Ok(column.into()),
        Side::Count(count) => Ok(count.into()),
        Side::Null => Ok(sql::ast::NullConstantNode.into()),
        Side::Value(value) => {
            let value = match typed_column {
                Some(column) => values::translate_column_value(env, value, column)?,
                None => values::translate_json_value(value, ScalarType::Bigint)?,
            };
            Ok(state.make_parameter(value)?.into())
        }
    }
}

/// Resolve a field path to a column. Every element but the last must name a
/// to-one relationship, the last names an attribute or a to-one relationship,
/// which stands for the primary key of the related resource.
pub fn translate_field<'a>(
    env: &Env<'a>,
    state: &mut State,
    scope: &mut Scope,
    path: &[String],
) -> Result<(sql::ast::ColumnNode, &'a ColumnInfo), Error> {
    let (last, relationship_path) = path.split_last().ok_or(Error::EmptyFieldPath)?;
    let table = relationships::join_path(env, state, scope, relationship_path, false, false)?;
    let resource = env.lookup_resource(&table.name)?;

    if let Some(column_info) = resource.info.columns.get(last) {
        return Ok((
            table.column(&column_info.name, sql::ast::ColumnType::Scalar),
            column_info,
        ));
    }
    if resource.info.relationships.contains_key(last) {
        let related = relationships::join_path(env, state, scope, path, false, false)?;
        let primary_key = env.lookup_resource(&related.name)?.primary_key()?;
        return Ok((
            related.column(&primary_key.name, sql::ast::ColumnType::Scalar),
            primary_key,
        ));
    }
    Err(Error::AttributeNotFound(
        last.clone(),
        resource.name.to_string(),
    ))
}

fn translate_operator(operator: ComparisonOperator) -> sql::ast::ComparisonOperator {
    match operator {
        ComparisonOperator::Equals => sql::ast::ComparisonOperator::Equals,
        ComparisonOperator::LessThan => sql::ast::ComparisonOperator::LessThan,
        ComparisonOperator::LessOrEqual => sql::ast::ComparisonOperator::LessOrEqual,
        ComparisonOperator::GreaterThan => sql::ast::ComparisonOperator::GreaterThan,
        ComparisonOperator::GreaterOrEqual => sql::ast::ComparisonOperator::GreaterOrEqual,
    }
}

fn translate_match_kind(kind: MatchKind) -> sql::ast::TextMatchKind {
    match kind {
        MatchKind::StartsWith => sql::ast::TextMatchKind::StartsWith,
        MatchKind::EndsWith => sql::ast::TextMatchKind::EndsWith,
        MatchKind::Contains => sql::ast::TextMatchKind::Contains,
    }
}
