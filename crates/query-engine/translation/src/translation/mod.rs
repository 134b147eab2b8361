//! Translate incoming requests to SQL commands to be run against the database.

pub mod error;
pub mod foreign_key;
pub mod helpers;
pub mod mutation;
pub mod query;
pub mod request;
