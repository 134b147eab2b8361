//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

// Empty clauses //

/// Empty `LIMIT` and `OFFSET` clauses.
pub fn empty_limit() -> Limit {
    Limit {
        limit: None,
        offset: None,
    }
}

// Tables and columns //

/// A table source with an alias, so its columns can be referenced from joins and filters.
pub fn aliased_table(schema: Option<&str>, name: &str, alias: String) -> TableNode {
    TableNode {
        schema: schema.map(ToString::to_string),
        name: name.to_string(),
        alias: Some(alias),
    }
}

/// An unaliased table, as used by INSERT, UPDATE and DELETE statements.
pub fn bare_table(schema: Option<&str>, name: &str) -> TableNode {
    TableNode {
        schema: schema.map(ToString::to_string),
        name: name.to_string(),
        alias: None,
    }
}

/// Read from a single table.
pub fn from_table(table: TableNode) -> FromNode {
    FromNode {
        source: TableSourceNode::Table(table),
    }
}

// SELECTs //

/// Build a simple select with a selector and a source, the rest are empty.
pub fn simple_select(from: FromNode, selector: SelectorNode) -> SelectNode {
    SelectNode {
        selector,
        from,
        joins: vec![],
        where_: None,
        order_by: None,
        limit: empty_limit(),
        alias: None,
    }
}

// Filters //

/// `left = right`
pub fn equals(left: impl Into<SqlValueNode>, right: impl Into<SqlValueNode>) -> FilterNode {
    FilterNode::Comparison(ComparisonNode {
        operator: ComparisonOperator::Equals,
        left: left.into(),
        right: right.into(),
    })
}

/// Join filters with a logical operator. No filters yield `None` and a
/// single filter is returned as is.
pub fn combine(operator: LogicalOperator, mut terms: Vec<FilterNode>) -> Option<FilterNode> {
    match terms.len() {
        0 => None,
        1 => terms.pop(),
        _ => Some(FilterNode::Logical(LogicalNode { operator, terms })),
    }
}

/// Join filters with AND, see [`combine`].
pub fn and(terms: Vec<FilterNode>) -> Option<FilterNode> {
    combine(LogicalOperator::And, terms)
}
