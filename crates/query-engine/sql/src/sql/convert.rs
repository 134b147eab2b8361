//! Convert a SQL AST to a low-level SQL string.

use std::fmt;

use super::ast::*;
use super::dialect::Dialect;
use super::string::{SqlCommand, SQL};
use super::visitor::SqlTreeNodeVisitor;

/// Renders a tree into SQL text for one dialect. Every parameter met along
/// the way is registered under its name.
#[derive(Debug)]
pub struct SqlQueryBuilder {
    dialect: Dialect,
    sql: SQL,
}

impl SqlQueryBuilder {
    pub fn new(dialect: Dialect) -> SqlQueryBuilder {
        SqlQueryBuilder {
            dialect,
            sql: SQL::new(),
        }
    }

    /// Render a statement into a command for the execution layer.
    pub fn get_command<N: SqlTreeNode>(&mut self, node: &N) -> SqlCommand {
        let SQL { sql, params } = self.render(node);
        SqlCommand::new(sql, params)
    }

    /// Render any node (or fragment) as text, discarding parameter values.
    pub fn get_display_string<N: SqlTreeNode>(&mut self, node: &N) -> String {
        self.render(node).sql
    }

    fn render<N: SqlTreeNode>(&mut self, node: &N) -> SQL {
        self.sql = SQL::new();
        self.append(node);
        std::mem::take(&mut self.sql)
    }

    fn append<N: SqlTreeNode>(&mut self, node: &N) {
        node.accept::<(), (), Self>(self, ());
    }

    fn append_separated<N: SqlTreeNode>(&mut self, nodes: &[N], separator: &str) {
        for (index, node) in nodes.iter().enumerate() {
            if index > 0 {
                self.sql.append_syntax(separator);
            }
            self.append(node);
        }
    }

    fn append_limit(&mut self, limit: &Limit, has_order_by: bool) {
        if limit.is_empty() {
            return;
        }
        match self.dialect {
            Dialect::PostgreSql => {
                if let Some(count) = limit.limit {
                    self.sql.append_syntax(&format!(" LIMIT {count}"));
                }
                if let Some(offset) = limit.offset {
                    self.sql.append_syntax(&format!(" OFFSET {offset}"));
                }
            }
            Dialect::MySql => {
                // MySQL has no OFFSET without LIMIT.
                let count = limit
                    .limit
                    .map_or_else(|| u64::MAX.to_string(), |count| count.to_string());
                self.sql.append_syntax(&format!(" LIMIT {count}"));
                if let Some(offset) = limit.offset {
                    self.sql.append_syntax(&format!(" OFFSET {offset}"));
                }
            }
            Dialect::SqlServer => {
                if !has_order_by {
                    self.sql.append_syntax(" ORDER BY (SELECT NULL)");
                }
                let offset = limit.offset.unwrap_or(0);
                self.sql.append_syntax(&format!(" OFFSET {offset} ROWS"));
                if let Some(count) = limit.limit {
                    self.sql
                        .append_syntax(&format!(" FETCH NEXT {count} ROWS ONLY"));
                }
            }
        }
    }

    fn append_output_inserted(&mut self, returning: Option<&ColumnInTableNode>) {
        if let (Dialect::SqlServer, Some(column)) = (self.dialect, returning) {
            self.sql.append_syntax(" OUTPUT INSERTED.");
            self.sql.append_identifier(self.dialect, &column.name);
        }
    }
}

impl SqlTreeNodeVisitor<(), ()> for SqlQueryBuilder {
    fn visit_select(&mut self, node: &SelectNode, _argument: ()) {
        self.sql.append_syntax("SELECT ");
        self.append(&node.selector);
        self.sql.append_syntax(" ");
        self.append(&node.from);

        for join in &node.joins {
            self.sql.append_syntax(" ");
            self.append(join);
        }

        if let Some(where_) = &node.where_ {
            self.sql.append_syntax(" ");
            self.append(where_);
        }

        if let Some(order_by) = &node.order_by {
            self.sql.append_syntax(" ");
            self.append(order_by);
        }

        self.append_limit(&node.limit, node.order_by.is_some());
    }

    fn visit_insert(&mut self, node: &InsertNode, _argument: ()) {
        self.sql.append_syntax("INSERT INTO ");
        self.append(&node.table);

        if node.assignments.is_empty() {
            if self.dialect == Dialect::MySql {
                self.sql.append_syntax(" () VALUES ()");
            } else {
                self.append_output_inserted(node.returning.as_ref());
                self.sql.append_syntax(" DEFAULT VALUES");
            }
        } else {
            self.sql.append_syntax(" (");
            for (index, assignment) in node.assignments.iter().enumerate() {
                if index > 0 {
                    self.sql.append_syntax(", ");
                }
                self.append(&assignment.column);
            }
            self.sql.append_syntax(")");
            self.append_output_inserted(node.returning.as_ref());
            self.sql.append_syntax(" VALUES (");
            for (index, assignment) in node.assignments.iter().enumerate() {
                if index > 0 {
                    self.sql.append_syntax(", ");
                }
                self.append(&assignment.value);
            }
            self.sql.append_syntax(")");
        }

        match (self.dialect, &node.returning) {
            (Dialect::PostgreSql, Some(column)) => {
                self.sql.append_syntax(" RETURNING ");
                self.append(column);
            }
            (Dialect::MySql, Some(_)) => self.sql.append_syntax("; SELECT LAST_INSERT_ID()"),
            _ => {}
        }
    }

    fn visit_update(&mut self, node: &UpdateNode, _argument: ()) {
        self.sql.append_syntax("UPDATE ");
        self.append(&node.table);
        self.sql.append_syntax(" SET ");
        self.append_separated(&node.assignments, ", ");
        self.sql.append_syntax(" ");
        self.append(&node.where_);
    }

    fn visit_delete(&mut self, node: &DeleteNode, _argument: ()) {
        self.sql.append_syntax("DELETE FROM ");
        self.append(&node.table);
        self.sql.append_syntax(" ");
        self.append(&node.where_);
    }

    fn visit_table(&mut self, node: &TableNode, _argument: ()) {
        if let Some(schema) = &node.schema {
            self.sql.append_identifier(self.dialect, schema);
            self.sql.append_syntax(".");
        }
        self.sql.append_identifier(self.dialect, &node.name);
        if let Some(alias) = &node.alias {
            self.sql.append_syntax(" AS ");
            self.sql.append_syntax(alias);
        }
    }

    fn visit_from(&mut self, node: &FromNode, _argument: ()) {
        self.sql.append_syntax("FROM ");
        match &node.source {
            TableSourceNode::Table(table) => self.append(table),
            TableSourceNode::Select(select) => {
                self.sql.append_syntax("(");
                self.append(select.as_ref());
                self.sql.append_syntax(")");
                if let Some(alias) = &select.alias {
                    self.sql.append_syntax(" AS ");
                    self.sql.append_syntax(alias);
                }
            }
        }
    }

    fn visit_join(&mut self, node: &JoinNode, _argument: ()) {
        match node.join_type {
            JoinType::InnerJoin => self.sql.append_syntax("INNER JOIN "),
            JoinType::LeftJoin => self.sql.append_syntax("LEFT JOIN "),
        }
        self.append(&node.table);
        self.sql.append_syntax(" ON ");
        self.append(&node.outer_column);
        self.sql.append_syntax(" = ");
        self.append(&node.inner_column);
    }

    fn visit_column_in_table(&mut self, node: &ColumnInTableNode, _argument: ()) {
        if let Some(alias) = &node.table_alias {
            self.sql.append_syntax(alias);
            self.sql.append_syntax(".");
        }
        self.sql.append_identifier(self.dialect, &node.name);
    }

    fn visit_column_in_select(&mut self, node: &ColumnInSelectNode, _argument: ()) {
        self.sql.append_syntax(&node.select_alias);
        self.sql.append_syntax(".");
        self.sql.append_identifier(self.dialect, &node.selector.name);
    }

    fn visit_column_selector(&mut self, node: &ColumnSelectorNode, _argument: ()) {
        self.append_separated(&node.columns, ", ");
    }

    fn visit_one_selector(&mut self, _node: &OneSelectorNode, _argument: ()) {
        self.sql.append_syntax("1");
    }

    fn visit_count_selector(&mut self, _node: &CountSelectorNode, _argument: ()) {
        self.sql.append_syntax("COUNT(*)");
    }

    fn visit_where(&mut self, node: &WhereNode, _argument: ()) {
        self.sql.append_syntax("WHERE ");
        self.append(&node.filter);
    }

    fn visit_not(&mut self, node: &NotNode, _argument: ()) {
        self.sql.append_syntax("NOT (");
        self.append(node.child.as_ref());
        self.sql.append_syntax(")");
    }

    fn visit_logical(&mut self, node: &LogicalNode, _argument: ()) {
        let separator = match node.operator() {
            LogicalOperator::And => " AND ",
            LogicalOperator::Or => " OR ",
        };
        for (index, term) in node.terms().iter().enumerate() {
            if index > 0 {
                self.sql.append_syntax(separator);
            }
            self.sql.append_syntax("(");
            self.append(term);
            self.sql.append_syntax(")");
        }
    }

    fn visit_comparison(&mut self, node: &ComparisonNode, _argument: ()) {
        match (node.operator, &node.left, &node.right) {
            (ComparisonOperator::Equals, value, SqlValueNode::Null(_))
            | (ComparisonOperator::Equals, SqlValueNode::Null(_), value) => {
                self.append(value);
                self.sql.append_syntax(" IS NULL");
            }
            (operator, left, right) => {
                self.append(left);
                self.sql.append_syntax(match operator {
                    ComparisonOperator::Equals => " = ",
                    ComparisonOperator::GreaterThan => " > ",
                    ComparisonOperator::GreaterOrEqual => " >= ",
                    ComparisonOperator::LessThan => " < ",
                    ComparisonOperator::LessOrEqual => " <= ",
                });
                self.append(right);
            }
        }
    }

    fn visit_like(&mut self, node: &LikeNode, _argument: ()) {
        self.append(&node.column);
        self.sql.append_syntax(" LIKE ");
        self.append(&node.pattern);
    }

    fn visit_in(&mut self, node: &InNode, _argument: ()) {
        self.append(&node.column);
        self.sql.append_syntax(" IN (");
        self.append_separated(&node.values, ", ");
        self.sql.append_syntax(")");
    }

    fn visit_exists(&mut self, node: &ExistsNode, _argument: ()) {
        self.sql.append_syntax("EXISTS (");
        self.append(node.sub_select.as_ref());
        self.sql.append_syntax(")");
    }

    fn visit_count(&mut self, node: &CountNode, _argument: ()) {
        self.sql.append_syntax("(");
        self.append(node.sub_select.as_ref());
        self.sql.append_syntax(")");
    }

    fn visit_order_by(&mut self, node: &OrderByNode, _argument: ()) {
        self.sql.append_syntax("ORDER BY ");
        self.append_separated(&node.terms, ", ");
    }

    fn visit_order_by_column(&mut self, node: &OrderByColumnNode, _argument: ()) {
        self.append(&node.column);
        if !node.is_ascending {
            self.sql.append_syntax(" DESC");
        }
    }

    fn visit_order_by_count(&mut self, node: &OrderByCountNode, _argument: ()) {
        self.append(&node.count);
        if !node.is_ascending {
            self.sql.append_syntax(" DESC");
        }
    }

    fn visit_column_assignment(&mut self, node: &ColumnAssignmentNode, _argument: ()) {
        self.append(&node.column);
        self.sql.append_syntax(" = ");
        self.append(&node.value);
    }

    fn visit_parameter(&mut self, node: &ParameterNode, _argument: ()) {
        self.sql.append_param(node);
    }

    fn visit_null_constant(&mut self, _node: &NullConstantNode, _argument: ()) {
        self.sql.append_syntax("NULL");
    }
}

macro_rules! display_as_sql {
    ($($node:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $node {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&SqlQueryBuilder::new(Dialect::PostgreSql).get_display_string(self))
                }
            }
        )+
    };
}

display_as_sql! {
    StatementNode, SelectNode, InsertNode, UpdateNode, DeleteNode,
    TableNode, TableSourceNode, FromNode, JoinNode,
    ColumnNode, ColumnInTableNode, ColumnInSelectNode,
    SelectorNode, ColumnSelectorNode, OneSelectorNode, CountSelectorNode,
    WhereNode, FilterNode, NotNode, LogicalNode, ComparisonNode, LikeNode, InNode, ExistsNode,
    SqlValueNode, CountNode, NullConstantNode,
    OrderByNode, OrderByTermNode, OrderByColumnNode, OrderByCountNode,
    ColumnAssignmentNode,
}

/// Parameters display as `name = value`, see [`super::format`].
impl fmt::Display for ParameterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::format::format_parameter(self.name(), self.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::helpers;
    use crate::sql::value::ParameterValue;

    fn people(alias: &str) -> TableNode {
        TableNode {
            schema: None,
            name: "People".to_string(),
            alias: Some(alias.to_string()),
        }
    }

    fn todo_items(alias: &str) -> TableNode {
        TableNode {
            schema: None,
            name: "TodoItems".to_string(),
            alias: Some(alias.to_string()),
        }
    }

    fn parameter(name: &str, value: impl Into<ParameterValue>) -> ParameterNode {
        ParameterNode::new(name, value.into()).unwrap()
    }

    fn select_people_with_todo_items() -> SelectNode {
        let people = people("t1");
        let todo_items = todo_items("t2");
        let mut select = helpers::simple_select(
            FromNode {
                source: TableSourceNode::Table(people.clone()),
            },
            SelectorNode::Columns(ColumnSelectorNode {
                columns: vec![
                    people.column("Id", ColumnType::Scalar).into(),
                    people.column("Name", ColumnType::Scalar).into(),
                    todo_items.column("Id", ColumnType::Scalar).into(),
                ],
            }),
        );
        select.joins.push(JoinNode {
            join_type: JoinType::LeftJoin,
            table: todo_items.clone(),
            outer_column: people.column("Id", ColumnType::Scalar).into(),
            inner_column: todo_items.column("OwnerId", ColumnType::ForeignKey),
        });
        select.where_ = Some(WhereNode {
            filter: ComparisonNode {
                operator: ComparisonOperator::GreaterThan,
                left: people.column("Age", ColumnType::Scalar).into(),
                right: parameter("@p1", 18).into(),
            }
            .into(),
        });
        select.order_by = Some(OrderByNode {
            terms: vec![OrderByTermNode::Column(OrderByColumnNode {
                column: people.column("Name", ColumnType::Scalar).into(),
                is_ascending: false,
            })],
        });
        select.limit = Limit {
            limit: Some(10),
            offset: Some(20),
        };
        select
    }

    #[test]
    fn renders_select_for_postgresql() {
        let command =
            SqlQueryBuilder::new(Dialect::PostgreSql).get_command(&select_people_with_todo_items());

        assert_eq!(
            command.statement(),
            "SELECT t1.\"Id\", t1.\"Name\", t2.\"Id\" FROM \"People\" AS t1 \
             LEFT JOIN \"TodoItems\" AS t2 ON t1.\"Id\" = t2.\"OwnerId\" \
             WHERE t1.\"Age\" > @p1 ORDER BY t1.\"Name\" DESC LIMIT 10 OFFSET 20"
        );
        assert_eq!(
            command.parameters().get("@p1"),
            Some(&ParameterValue::Int32(18))
        );
    }

    #[test]
    fn renders_select_for_mysql() {
        let command =
            SqlQueryBuilder::new(Dialect::MySql).get_command(&select_people_with_todo_items());

        assert_eq!(
            command.statement(),
            "SELECT t1.`Id`, t1.`Name`, t2.`Id` FROM `People` AS t1 \
             LEFT JOIN `TodoItems` AS t2 ON t1.`Id` = t2.`OwnerId` \
             WHERE t1.`Age` > @p1 ORDER BY t1.`Name` DESC LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn renders_select_for_sqlserver() {
        let command =
            SqlQueryBuilder::new(Dialect::SqlServer).get_command(&select_people_with_todo_items());

        assert_eq!(
            command.statement(),
            "SELECT t1.[Id], t1.[Name], t2.[Id] FROM [People] AS t1 \
             LEFT JOIN [TodoItems] AS t2 ON t1.[Id] = t2.[OwnerId] \
             WHERE t1.[Age] > @p1 ORDER BY t1.[Name] DESC OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
        );
    }

    #[test]
    fn sqlserver_paging_without_order_by_gets_a_neutral_ordering() {
        let mut select = helpers::simple_select(
            FromNode {
                source: TableSourceNode::Table(people("t1")),
            },
            SelectorNode::One(OneSelectorNode),
        );
        select.limit = Limit {
            limit: Some(5),
            offset: None,
        };

        let text = SqlQueryBuilder::new(Dialect::SqlServer).get_display_string(&select);

        assert_eq!(
            text,
            "SELECT 1 FROM [People] AS t1 ORDER BY (SELECT NULL) OFFSET 0 ROWS FETCH NEXT 5 ROWS ONLY"
        );
    }

    #[test]
    fn mysql_offset_without_limit_uses_maximum_row_count() {
        let mut select = helpers::simple_select(
            FromNode {
                source: TableSourceNode::Table(people("t1")),
            },
            SelectorNode::Count(CountSelectorNode),
        );
        select.limit = Limit {
            limit: None,
            offset: Some(3),
        };

        let text = SqlQueryBuilder::new(Dialect::MySql).get_display_string(&select);

        assert_eq!(
            text,
            "SELECT COUNT(*) FROM `People` AS t1 LIMIT 18446744073709551615 OFFSET 3"
        );
    }

    #[test]
    fn equality_with_null_renders_is_null() {
        let column: SqlValueNode = people("t1").column("Name", ColumnType::Scalar).into();
        let left_null = FilterNode::Comparison(ComparisonNode {
            operator: ComparisonOperator::Equals,
            left: NullConstantNode.into(),
            right: column.clone(),
        });
        let right_null = FilterNode::Comparison(ComparisonNode {
            operator: ComparisonOperator::Equals,
            left: column,
            right: NullConstantNode.into(),
        });

        assert_eq!(left_null.to_string(), "t1.\"Name\" IS NULL");
        assert_eq!(right_null.to_string(), "t1.\"Name\" IS NULL");
    }

    #[test]
    fn renders_logical_terms_parenthesized() {
        let people = people("t1");
        let filter = FilterNode::Logical(
            LogicalNode::new(
                LogicalOperator::Or,
                vec![
                    LikeNode {
                        column: people.column("Name", ColumnType::Scalar).into(),
                        match_kind: TextMatchKind::StartsWith,
                        pattern: parameter("@p1", "Jo%"),
                    }
                    .into(),
                    NotNode {
                        child: Box::new(
                            InNode {
                                column: people.column("Id", ColumnType::Scalar).into(),
                                values: vec![
                                    parameter("@p2", 1).into(),
                                    parameter("@p3", 2).into(),
                                ],
                            }
                            .into(),
                        ),
                    }
                    .into(),
                ],
            )
            .unwrap(),
        );

        let command = SqlQueryBuilder::new(Dialect::PostgreSql).get_command(&filter);

        assert_eq!(
            command.statement(),
            "(t1.\"Name\" LIKE @p1) OR (NOT (t1.\"Id\" IN (@p2, @p3)))"
        );
        assert_eq!(
            command.parameters().keys().collect::<Vec<_>>(),
            vec!["@p1", "@p2", "@p3"]
        );
    }

    #[test]
    fn renders_exists_and_count_subqueries() {
        let people = people("t1");
        let todo_items = todo_items("t2");
        let mut sub_select = helpers::simple_select(
            FromNode {
                source: TableSourceNode::Table(todo_items.clone()),
            },
            SelectorNode::One(OneSelectorNode),
        );
        sub_select.where_ = Some(WhereNode {
            filter: ComparisonNode {
                operator: ComparisonOperator::Equals,
                left: people.column("Id", ColumnType::Scalar).into(),
                right: todo_items.column("OwnerId", ColumnType::ForeignKey).into(),
            }
            .into(),
        });
        let exists = FilterNode::Exists(ExistsNode {
            sub_select: Box::new(sub_select.clone()),
        });
        sub_select.selector = SelectorNode::Count(CountSelectorNode);
        let count = SqlValueNode::Count(CountNode {
            sub_select: Box::new(sub_select),
        });

        assert_eq!(
            exists.to_string(),
            "EXISTS (SELECT 1 FROM \"TodoItems\" AS t2 WHERE t1.\"Id\" = t2.\"OwnerId\")"
        );
        assert_eq!(
            count.to_string(),
            "(SELECT COUNT(*) FROM \"TodoItems\" AS t2 WHERE t1.\"Id\" = t2.\"OwnerId\")"
        );
    }

    #[test]
    fn renders_subquery_sources() {
        let mut inner = helpers::simple_select(
            FromNode {
                source: TableSourceNode::Table(people("t1")),
            },
            SelectorNode::Columns(ColumnSelectorNode {
                columns: vec![people("t1").column("Id", ColumnType::Scalar).into()],
            }),
        );
        inner.limit.limit = Some(1);
        inner.alias = Some("t2".to_string());
        let outer = helpers::simple_select(
            FromNode {
                source: TableSourceNode::Select(Box::new(inner)),
            },
            SelectorNode::Columns(ColumnSelectorNode {
                columns: vec![ColumnInSelectNode {
                    selector: people("t1").column("Id", ColumnType::Scalar),
                    select_alias: "t2".to_string(),
                }
                .into()],
            }),
        );

        assert_eq!(
            outer.to_string(),
            "SELECT t2.\"Id\" FROM (SELECT t1.\"Id\" FROM \"People\" AS t1 LIMIT 1) AS t2"
        );
    }

    fn insert() -> InsertNode {
        let table = TableNode {
            schema: Some("dbo".to_string()),
            name: "People".to_string(),
            alias: None,
        };
        InsertNode {
            assignments: vec![
                ColumnAssignmentNode {
                    column: table.column("Name", ColumnType::Scalar),
                    value: parameter("@p1", "Jane").into(),
                },
                ColumnAssignmentNode {
                    column: table.column("ManagerId", ColumnType::ForeignKey),
                    value: NullConstantNode.into(),
                },
            ],
            returning: Some(table.column("Id", ColumnType::Scalar)),
            table,
        }
    }

    #[test]
    fn renders_insert_per_dialect() {
        let insert = insert();

        assert_eq!(
            SqlQueryBuilder::new(Dialect::PostgreSql).get_display_string(&insert),
            "INSERT INTO \"dbo\".\"People\" (\"Name\", \"ManagerId\") VALUES (@p1, NULL) RETURNING \"Id\""
        );
        assert_eq!(
            SqlQueryBuilder::new(Dialect::MySql).get_display_string(&insert),
            "INSERT INTO `dbo`.`People` (`Name`, `ManagerId`) VALUES (@p1, NULL); SELECT LAST_INSERT_ID()"
        );
        assert_eq!(
            SqlQueryBuilder::new(Dialect::SqlServer).get_display_string(&insert),
            "INSERT INTO [dbo].[People] ([Name], [ManagerId]) OUTPUT INSERTED.[Id] VALUES (@p1, NULL)"
        );
    }

    #[test]
    fn renders_insert_without_assignments() {
        let mut insert = insert();
        insert.assignments.clear();

        assert_eq!(
            SqlQueryBuilder::new(Dialect::PostgreSql).get_display_string(&insert),
            "INSERT INTO \"dbo\".\"People\" DEFAULT VALUES RETURNING \"Id\""
        );
        assert_eq!(
            SqlQueryBuilder::new(Dialect::MySql).get_display_string(&insert),
            "INSERT INTO `dbo`.`People` () VALUES (); SELECT LAST_INSERT_ID()"
        );
        assert_eq!(
            SqlQueryBuilder::new(Dialect::SqlServer).get_display_string(&insert),
            "INSERT INTO [dbo].[People] OUTPUT INSERTED.[Id] DEFAULT VALUES"
        );
    }

    #[test]
    fn renders_update_and_delete() {
        let table = people("t1");
        let table = TableNode {
            alias: None,
            ..table
        };
        let where_ = WhereNode {
            filter: ComparisonNode {
                operator: ComparisonOperator::Equals,
                left: table.column("Id", ColumnType::Scalar).into(),
                right: parameter("@p2", 7).into(),
            }
            .into(),
        };
        let update = StatementNode::Update(UpdateNode {
            table: table.clone(),
            assignments: vec![ColumnAssignmentNode {
                column: table.column("Name", ColumnType::Scalar),
                value: parameter("@p1", "Jane").into(),
            }],
            where_: where_.clone(),
        });
        let delete = StatementNode::Delete(DeleteNode { table, where_ });

        let command = SqlQueryBuilder::new(Dialect::PostgreSql).get_command(&update);

        assert_eq!(
            command.statement(),
            "UPDATE \"People\" SET \"Name\" = @p1 WHERE \"Id\" = @p2"
        );
        assert_eq!(command.display_parameters(), "@p1 = 'Jane', @p2 = 7");
        assert_eq!(delete.to_string(), "DELETE FROM \"People\" WHERE \"Id\" = @p2");
    }

    #[test]
    fn parameters_display_through_the_formatter() {
        assert_eq!(parameter("@p1", 'A').to_string(), "@p1 = 'A'");
    }
}
