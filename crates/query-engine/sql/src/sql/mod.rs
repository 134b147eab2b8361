//! Construct and render SQL statements.

pub mod ast;
pub mod convert;
pub mod dialect;
pub mod format;
pub mod helpers;
pub mod rewrites;
pub mod string;
pub mod value;
pub mod visitor;
