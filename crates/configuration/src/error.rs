//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

/// The errors that can be thrown when parsing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {}:{line}:{column}: {message}", file_path.display())]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("unsupported configuration version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("I/O error: {0}")]
    IoErrorButStringified(String),
}

/// The errors that can be thrown when writing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The metadata inconsistencies that prevent translating requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("resource type '{resource}': primary key '{primary_key}' is not one of its attributes")]
    UnknownPrimaryKey {
        resource: String,
        primary_key: String,
    },
    #[error("relationship '{relationship}' of resource type '{resource}' targets unknown resource type '{target}'")]
    UnknownRelationshipTarget {
        resource: String,
        relationship: String,
        target: String,
    },
    #[error("to-many relationship '{relationship}' of resource type '{resource}' must keep its foreign key on the related table")]
    ToManyForeignKeyAtLeftSide {
        resource: String,
        relationship: String,
    },
    #[error("relationship '{relationship}' of resource type '{resource}' clears a required foreign key on delete")]
    SetNullOnRequiredForeignKey {
        resource: String,
        relationship: String,
    },
    #[error("enum attribute '{attribute}' of resource type '{resource}' does not name its enum type")]
    MissingEnumType { resource: String, attribute: String },
    #[error("attribute '{attribute}' of resource type '{resource}' refers to undeclared enum type '{enum_type}'")]
    UnknownEnumType {
        resource: String,
        attribute: String,
        enum_type: String,
    },
}
