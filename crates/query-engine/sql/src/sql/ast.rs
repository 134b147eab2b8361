//! Type definitions of a SQL AST representation.
//!
//! Nodes only hold data. Every node kind accepts a [`SqlTreeNodeVisitor`] and
//! dispatches to the matching `visit_*` method; rendering and rewriting are
//! implemented as visitors. Nodes are never mutated after construction,
//! passes build new trees instead.

use std::fmt;

use super::value::ParameterValue;
use super::visitor::SqlTreeNodeVisitor;

/// Errors raised when constructing a node with an invalid shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    #[error("At least two terms are required. (Parameter 'terms')")]
    TooFewTerms,
    #[error("Parameter name must start with an '@' symbol and not be empty. (Parameter 'name', actual value: '{0}')")]
    InvalidParameterName(String),
}

/// Any node of the SQL tree.
pub trait SqlTreeNode: fmt::Debug {
    /// Call the `visit_*` method of `visitor` that belongs to this node kind.
    fn accept<A, R, V>(&self, visitor: &mut V, argument: A) -> R
    where
        Self: Sized,
        R: Default,
        V: SqlTreeNodeVisitor<A, R> + ?Sized;
}

macro_rules! accept_with {
    ($($node:ty => $method:ident),+ $(,)?) => {
        $(
            impl SqlTreeNode for $node {
                fn accept<A, R, V>(&self, visitor: &mut V, argument: A) -> R
                where
                    Self: Sized,
                    R: Default,
                    V: SqlTreeNodeVisitor<A, R> + ?Sized,
                {
                    visitor.$method(self, argument)
                }
            }
        )+
    };
}

macro_rules! accept_variants {
    ($($node:ident { $($variant:ident),+ $(,)? }),+ $(,)?) => {
        $(
            impl SqlTreeNode for $node {
                fn accept<A, R, V>(&self, visitor: &mut V, argument: A) -> R
                where
                    Self: Sized,
                    R: Default,
                    V: SqlTreeNodeVisitor<A, R> + ?Sized,
                {
                    match self {
                        $($node::$variant(node) => node.accept(visitor, argument),)+
                    }
                }
            }
        )+
    };
}

accept_with! {
    SelectNode => visit_select,
    InsertNode => visit_insert,
    UpdateNode => visit_update,
    DeleteNode => visit_delete,
    TableNode => visit_table,
    FromNode => visit_from,
    JoinNode => visit_join,
    ColumnInTableNode => visit_column_in_table,
    ColumnInSelectNode => visit_column_in_select,
    ColumnSelectorNode => visit_column_selector,
    OneSelectorNode => visit_one_selector,
    CountSelectorNode => visit_count_selector,
    WhereNode => visit_where,
    NotNode => visit_not,
    LogicalNode => visit_logical,
    ComparisonNode => visit_comparison,
    LikeNode => visit_like,
    InNode => visit_in,
    ExistsNode => visit_exists,
    CountNode => visit_count,
    OrderByNode => visit_order_by,
    OrderByColumnNode => visit_order_by_column,
    OrderByCountNode => visit_order_by_count,
    ColumnAssignmentNode => visit_column_assignment,
    ParameterNode => visit_parameter,
    NullConstantNode => visit_null_constant,
}

accept_variants! {
    StatementNode { Select, Insert, Update, Delete },
    TableSourceNode { Table, Select },
    ColumnNode { InTable, InSelect },
    SelectorNode { Columns, One, Count },
    FilterNode { Not, Logical, Comparison, Like, In, Exists },
    SqlValueNode { Column, Parameter, Null, Count },
    OrderByTermNode { Column, Count },
}

// Statements //

/// A complete statement that can be handed to the database.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementNode {
    Select(SelectNode),
    Insert(InsertNode),
    Update(UpdateNode),
    Delete(DeleteNode),
}

/// A SELECT statement, or a subquery when it carries an alias.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectNode {
    pub selector: SelectorNode,
    pub from: FromNode,
    pub joins: Vec<JoinNode>,
    pub where_: Option<WhereNode>,
    pub order_by: Option<OrderByNode>,
    pub limit: Limit,
    /// The alias under which this select is addressed when used as a table source.
    pub alias: Option<String>,
}

/// LIMIT and OFFSET clauses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limit {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Limit {
    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertNode {
    pub table: TableNode,
    pub assignments: Vec<ColumnAssignmentNode>,
    /// The column whose generated value is handed back after inserting.
    pub returning: Option<ColumnInTableNode>,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateNode {
    pub table: TableNode,
    pub assignments: Vec<ColumnAssignmentNode>,
    pub where_: WhereNode,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteNode {
    pub table: TableNode,
    pub where_: WhereNode,
}

// Tables and columns //

/// A database table, optionally qualified by its schema and given an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNode {
    pub schema: Option<String>,
    pub name: String,
    pub alias: Option<String>,
}

impl TableNode {
    /// A column of this table, qualified by the table alias if there is one.
    pub fn column(&self, name: impl Into<String>, column_type: ColumnType) -> ColumnInTableNode {
        ColumnInTableNode {
            name: name.into(),
            column_type,
            table_alias: self.alias.clone(),
        }
    }
}

/// The thing a FROM clause reads from.
#[derive(Debug, Clone, PartialEq)]
pub enum TableSourceNode {
    Table(TableNode),
    Select(Box<SelectNode>),
}

/// A FROM clause
#[derive(Debug, Clone, PartialEq)]
pub struct FromNode {
    pub source: TableSourceNode,
}

/// The kind of a JOIN clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    InnerJoin,
    LeftJoin,
}

/// A JOIN clause. The join predicate is `outer_column = inner_column`, where
/// the inner column belongs to the joined table.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinNode {
    pub join_type: JoinType,
    pub table: TableNode,
    pub outer_column: ColumnNode,
    pub inner_column: ColumnInTableNode,
}

/// What a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Scalar,
    ForeignKey,
}

/// A column of a database table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInTableNode {
    pub name: String,
    pub column_type: ColumnType,
    pub table_alias: Option<String>,
}

/// A column projected by a subquery, addressed through the subquery alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInSelectNode {
    /// The column as it is selected inside the subquery.
    pub selector: ColumnInTableNode,
    pub select_alias: String,
}

/// A reference to a column, either in a table or in a subquery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnNode {
    InTable(ColumnInTableNode),
    InSelect(ColumnInSelectNode),
}

impl ColumnNode {
    pub fn name(&self) -> &str {
        match self {
            ColumnNode::InTable(column) => &column.name,
            ColumnNode::InSelect(column) => &column.selector.name,
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnNode::InTable(column) => column.column_type,
            ColumnNode::InSelect(column) => column.selector.column_type,
        }
    }

    pub fn table_alias(&self) -> Option<&str> {
        match self {
            ColumnNode::InTable(column) => column.table_alias.as_deref(),
            ColumnNode::InSelect(column) => Some(&column.select_alias),
        }
    }
}

// Selectors //

/// What a SELECT projects.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorNode {
    Columns(ColumnSelectorNode),
    One(OneSelectorNode),
    Count(CountSelectorNode),
}

/// An ordered list of projected columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelectorNode {
    pub columns: Vec<ColumnNode>,
}

/// `SELECT 1`, used where only the existence of rows matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneSelectorNode;

/// `SELECT COUNT(*)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSelectorNode;

// Filters //

/// A WHERE clause
#[derive(Debug, Clone, PartialEq)]
pub struct WhereNode {
    pub filter: FilterNode,
}

/// A boolean expression.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    Not(NotNode),
    Logical(LogicalNode),
    Comparison(ComparisonNode),
    Like(LikeNode),
    In(InNode),
    Exists(ExistsNode),
}

/// NOT clause
#[derive(Debug, Clone, PartialEq)]
pub struct NotNode {
    pub child: Box<FilterNode>,
}

/// The operator combining the terms of a [`LogicalNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

/// AND or OR over two or more terms.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalNode {
    pub(crate) operator: LogicalOperator,
    pub(crate) terms: Vec<FilterNode>,
}

impl LogicalNode {
    pub fn new(operator: LogicalOperator, terms: Vec<FilterNode>) -> Result<LogicalNode, NodeError> {
        if terms.len() < 2 {
            return Err(NodeError::TooFewTerms);
        }
        Ok(LogicalNode { operator, terms })
    }

    pub fn operator(&self) -> LogicalOperator {
        self.operator
    }

    pub fn terms(&self) -> &[FilterNode] {
        &self.terms
    }
}

/// A binary comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equals,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
}

/// `left <operator> right`
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonNode {
    pub operator: ComparisonOperator,
    pub left: SqlValueNode,
    pub right: SqlValueNode,
}

/// Where the matched text must occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatchKind {
    Contains,
    StartsWith,
    EndsWith,
}

/// `column LIKE pattern`. The parameter holds the complete, escaped pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct LikeNode {
    pub column: ColumnNode,
    pub match_kind: TextMatchKind,
    pub pattern: ParameterNode,
}

/// `column IN (values)`
#[derive(Debug, Clone, PartialEq)]
pub struct InNode {
    pub column: ColumnNode,
    pub values: Vec<SqlValueNode>,
}

/// `EXISTS (subquery)`
#[derive(Debug, Clone, PartialEq)]
pub struct ExistsNode {
    pub sub_select: Box<SelectNode>,
}

// Values //

/// A scalar operand.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValueNode {
    Column(ColumnNode),
    Parameter(ParameterNode),
    Null(NullConstantNode),
    Count(CountNode),
}

/// A scalar subquery counting rows: `(SELECT COUNT(*) ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CountNode {
    pub sub_select: Box<SelectNode>,
}

/// A named placeholder with the value to bind to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterNode {
    name: String,
    value: ParameterValue,
}

impl ParameterNode {
    pub fn new(name: impl Into<String>, value: ParameterValue) -> Result<ParameterNode, NodeError> {
        let name = name.into();
        if name.len() < 2 || !name.starts_with('@') {
            return Err(NodeError::InvalidParameterName(name));
        }
        Ok(ParameterNode { name, value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ParameterValue {
        &self.value
    }
}

/// The literal `NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullConstantNode;

// Ordering //

/// An ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByNode {
    pub terms: Vec<OrderByTermNode>,
}

/// A single element in an ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub enum OrderByTermNode {
    Column(OrderByColumnNode),
    Count(OrderByCountNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByColumnNode {
    pub column: ColumnNode,
    pub is_ascending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByCountNode {
    pub count: CountNode,
    pub is_ascending: bool,
}

// Writes //

/// `column = value` inside INSERT or UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAssignmentNode {
    pub column: ColumnInTableNode,
    pub value: SqlValueNode,
}

// Conversions //

impl From<ColumnInTableNode> for ColumnNode {
    fn from(column: ColumnInTableNode) -> Self {
        ColumnNode::InTable(column)
    }
}

impl From<ColumnInSelectNode> for ColumnNode {
    fn from(column: ColumnInSelectNode) -> Self {
        ColumnNode::InSelect(column)
    }
}

impl From<ColumnNode> for SqlValueNode {
    fn from(column: ColumnNode) -> Self {
        SqlValueNode::Column(column)
    }
}

impl From<ColumnInTableNode> for SqlValueNode {
    fn from(column: ColumnInTableNode) -> Self {
        SqlValueNode::Column(ColumnNode::InTable(column))
    }
}

impl From<ParameterNode> for SqlValueNode {
    fn from(parameter: ParameterNode) -> Self {
        SqlValueNode::Parameter(parameter)
    }
}

impl From<NullConstantNode> for SqlValueNode {
    fn from(null: NullConstantNode) -> Self {
        SqlValueNode::Null(null)
    }
}

impl From<CountNode> for SqlValueNode {
    fn from(count: CountNode) -> Self {
        SqlValueNode::Count(count)
    }
}

impl From<ComparisonNode> for FilterNode {
    fn from(node: ComparisonNode) -> Self {
        FilterNode::Comparison(node)
    }
}

impl From<LogicalNode> for FilterNode {
    fn from(node: LogicalNode) -> Self {
        FilterNode::Logical(node)
    }
}

impl From<NotNode> for FilterNode {
    fn from(node: NotNode) -> Self {
        FilterNode::Not(node)
    }
}

impl From<LikeNode> for FilterNode {
    fn from(node: LikeNode) -> Self {
        FilterNode::Like(node)
    }
}

impl From<InNode> for FilterNode {
    fn from(node: InNode) -> Self {
        FilterNode::In(node)
    }
}

impl From<ExistsNode> for FilterNode {
    fn from(node: ExistsNode) -> Self {
        FilterNode::Exists(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison(name: &str) -> FilterNode {
        FilterNode::Comparison(ComparisonNode {
            operator: ComparisonOperator::Equals,
            left: SqlValueNode::Column(ColumnNode::InTable(ColumnInTableNode {
                name: name.to_string(),
                column_type: ColumnType::Scalar,
                table_alias: None,
            })),
            right: SqlValueNode::Null(NullConstantNode),
        })
    }

    #[test]
    fn logical_node_requires_two_terms() {
        let error = LogicalNode::new(LogicalOperator::And, vec![comparison("a")]).unwrap_err();

        assert_eq!(error, NodeError::TooFewTerms);
        assert!(error
            .to_string()
            .starts_with("At least two terms are required."));
    }

    #[test]
    fn logical_node_rejects_no_terms() {
        assert_eq!(
            LogicalNode::new(LogicalOperator::Or, vec![]),
            Err(NodeError::TooFewTerms)
        );
    }

    #[test]
    fn logical_node_keeps_terms_in_order() {
        let node = LogicalNode::new(LogicalOperator::Or, vec![comparison("a"), comparison("b")])
            .unwrap();

        assert_eq!(node.operator(), LogicalOperator::Or);
        assert_eq!(node.terms(), &[comparison("a"), comparison("b")]);
    }

    #[test]
    fn parameter_name_must_start_with_at_sign() {
        let error = ParameterNode::new("p1", ParameterValue::Int32(1)).unwrap_err();

        assert!(error
            .to_string()
            .starts_with("Parameter name must start with an '@' symbol and not be empty."));
    }

    #[test]
    fn parameter_name_must_not_be_empty() {
        assert!(ParameterNode::new("", ParameterValue::Null).is_err());
        assert!(ParameterNode::new("@", ParameterValue::Null).is_err());
    }

    #[test]
    fn parameter_keeps_name_and_value() {
        let parameter = ParameterNode::new("@p1", ParameterValue::from("x")).unwrap();

        assert_eq!(parameter.name(), "@p1");
        assert_eq!(parameter.value(), &ParameterValue::String("x".to_string()));
    }

    #[test]
    fn table_columns_carry_the_table_alias() {
        let table = TableNode {
            schema: None,
            name: "People".to_string(),
            alias: Some("t1".to_string()),
        };

        let column = ColumnNode::from(table.column("Name", ColumnType::Scalar));

        assert_eq!(column.name(), "Name");
        assert_eq!(column.table_alias(), Some("t1"));
        assert_eq!(column.column_type(), ColumnType::Scalar);
    }
}
