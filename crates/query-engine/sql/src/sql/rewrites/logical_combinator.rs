//! Flatten nested AND nodes into a single conjunction.

use crate::sql::ast::*;
use crate::sql::visitor::SqlTreeNodeVisitor;

/// Collects the terms of nested AND nodes, depth-first and left to right.
/// Anything that is not an AND node is a term and is kept as is.
#[derive(Debug, Default)]
pub struct LogicalCombinator;

impl LogicalCombinator {
    /// Rebuild a filter so that no AND node has an AND node as a direct term.
    ///
    /// A filter that flattens to a single term is returned as that term.
    pub fn collapse(filter: &FilterNode) -> FilterNode {
        let terms: Vec<FilterNode> = LogicalCombinator.visit(filter, ());
        match <[FilterNode; 1]>::try_from(terms) {
            Ok([term]) => term,
            Err(terms) => FilterNode::Logical(LogicalNode {
                operator: LogicalOperator::And,
                terms,
            }),
        }
    }
}

impl SqlTreeNodeVisitor<(), Vec<FilterNode>> for LogicalCombinator {
    fn visit_logical(&mut self, node: &LogicalNode, _argument: ()) -> Vec<FilterNode> {
        if node.operator() != LogicalOperator::And {
            return vec![node.clone().into()];
        }
        let mut terms = Vec::with_capacity(node.terms().len());
        for term in node.terms() {
            let flattened: Vec<FilterNode> = self.visit(term, ());
            terms.extend(flattened);
        }
        terms
    }

    fn visit_not(&mut self, node: &NotNode, _argument: ()) -> Vec<FilterNode> {
        vec![node.clone().into()]
    }

    fn visit_comparison(&mut self, node: &ComparisonNode, _argument: ()) -> Vec<FilterNode> {
        vec![node.clone().into()]
    }

    fn visit_like(&mut self, node: &LikeNode, _argument: ()) -> Vec<FilterNode> {
        vec![node.clone().into()]
    }

    fn visit_in(&mut self, node: &InNode, _argument: ()) -> Vec<FilterNode> {
        vec![node.clone().into()]
    }

    fn visit_exists(&mut self, node: &ExistsNode, _argument: ()) -> Vec<FilterNode> {
        vec![node.clone().into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::value::ParameterValue;

    fn column(name: &str) -> ColumnInTableNode {
        ColumnInTableNode {
            name: name.to_string(),
            column_type: ColumnType::Scalar,
            table_alias: Some("t1".to_string()),
        }
    }

    fn compare(name: &str, parameter: &str) -> FilterNode {
        ComparisonNode {
            operator: ComparisonOperator::Equals,
            left: column(name).into(),
            right: ParameterNode::new(parameter, ParameterValue::Int32(1))
                .unwrap()
                .into(),
        }
        .into()
    }

    fn like(name: &str, parameter: &str) -> FilterNode {
        LikeNode {
            column: column(name).into(),
            match_kind: TextMatchKind::Contains,
            pattern: ParameterNode::new(parameter, ParameterValue::from("%x%")).unwrap(),
        }
        .into()
    }

    fn logical(operator: LogicalOperator, terms: Vec<FilterNode>) -> FilterNode {
        LogicalNode::new(operator, terms).unwrap().into()
    }

    fn and(left: FilterNode, right: FilterNode) -> FilterNode {
        logical(LogicalOperator::And, vec![left, right])
    }

    #[test]
    fn flattens_nested_conjunctions_in_order() {
        let filter = and(
            and(compare("C1", "@p1"), compare("C2", "@p2")),
            and(
                and(compare("C3", "@p3"), compare("C4", "@p4")),
                and(like("L1", "@p5"), like("L2", "@p6")),
            ),
        );

        let collapsed = LogicalCombinator::collapse(&filter);

        assert_eq!(
            collapsed.to_string(),
            "(t1.\"C1\" = @p1) AND (t1.\"C2\" = @p2) AND (t1.\"C3\" = @p3) AND (t1.\"C4\" = @p4) \
             AND (t1.\"L1\" LIKE @p5) AND (t1.\"L2\" LIKE @p6)"
        );
        let FilterNode::Logical(node) = collapsed else {
            panic!("expected a logical node");
        };
        assert_eq!(node.terms().len(), 6);
    }

    #[test]
    fn keeps_disjunctions_intact() {
        let disjunction = logical(
            LogicalOperator::Or,
            vec![
                and(compare("C1", "@p1"), compare("C2", "@p2")),
                compare("C3", "@p3"),
            ],
        );
        let filter = and(disjunction.clone(), and(compare("C4", "@p4"), like("L1", "@p5")));

        let FilterNode::Logical(node) = LogicalCombinator::collapse(&filter) else {
            panic!("expected a logical node");
        };

        assert_eq!(node.operator(), LogicalOperator::And);
        assert_eq!(
            node.terms(),
            &[disjunction, compare("C4", "@p4"), like("L1", "@p5")]
        );
    }

    #[test]
    fn leaves_a_single_term_alone() {
        let filter = like("L1", "@p1");

        assert_eq!(LogicalCombinator::collapse(&filter), filter);
    }

    #[test]
    fn does_not_descend_into_negations() {
        let negated: FilterNode = NotNode {
            child: Box::new(and(compare("C1", "@p1"), compare("C2", "@p2"))),
        }
        .into();
        let filter = and(negated.clone(), compare("C3", "@p3"));

        let FilterNode::Logical(node) = LogicalCombinator::collapse(&filter) else {
            panic!("expected a logical node");
        };

        assert_eq!(node.terms(), &[negated, compare("C3", "@p3")]);
    }
}
