//! SQL AST, traversal and rendering for the query engine.

pub mod sql;
