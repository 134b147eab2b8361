//! Double-dispatch traversal over the SQL AST.
//!
//! A pass implements [`SqlTreeNodeVisitor`] and overrides the `visit_*`
//! methods for the node kinds it cares about. Everything else falls through
//! to [`SqlTreeNodeVisitor::default_visit`], which returns `R::default()`
//! unless overridden.

use super::ast::*;

/// A pass over the SQL tree, taking an argument of type `A` per node and
/// producing an `R`.
pub trait SqlTreeNodeVisitor<A, R: Default> {
    /// Dispatch `node` to the `visit_*` method matching its kind.
    fn visit<N: SqlTreeNode>(&mut self, node: &N, argument: A) -> R
    where
        Self: Sized,
    {
        node.accept(self, argument)
    }

    /// Called by every `visit_*` method that is not overridden.
    fn default_visit(&mut self, _node: &dyn SqlTreeNode, _argument: A) -> R {
        R::default()
    }

    fn visit_select(&mut self, node: &SelectNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_insert(&mut self, node: &InsertNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_update(&mut self, node: &UpdateNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_delete(&mut self, node: &DeleteNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_table(&mut self, node: &TableNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_from(&mut self, node: &FromNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_join(&mut self, node: &JoinNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_column_in_table(&mut self, node: &ColumnInTableNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_column_in_select(&mut self, node: &ColumnInSelectNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_column_selector(&mut self, node: &ColumnSelectorNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_one_selector(&mut self, node: &OneSelectorNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_count_selector(&mut self, node: &CountSelectorNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_where(&mut self, node: &WhereNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_not(&mut self, node: &NotNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_logical(&mut self, node: &LogicalNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_comparison(&mut self, node: &ComparisonNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_like(&mut self, node: &LikeNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_in(&mut self, node: &InNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_exists(&mut self, node: &ExistsNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_count(&mut self, node: &CountNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_order_by(&mut self, node: &OrderByNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_order_by_column(&mut self, node: &OrderByColumnNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_order_by_count(&mut self, node: &OrderByCountNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_column_assignment(&mut self, node: &ColumnAssignmentNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_parameter(&mut self, node: &ParameterNode, argument: A) -> R {
        self.default_visit(node, argument)
    }

    fn visit_null_constant(&mut self, node: &NullConstantNode, argument: A) -> R {
        self.default_visit(node, argument)
    }
}
