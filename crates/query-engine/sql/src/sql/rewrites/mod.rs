//! Passes that rebuild a SQL tree into an equivalent, simpler one.

pub mod logical_combinator;
