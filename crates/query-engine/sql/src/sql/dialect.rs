//! Per-database syntax conventions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ast::TextMatchKind;

/// The relational database a statement is rendered for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    PostgreSql,
    MySql,
    SqlServer,
}

impl Dialect {
    /// Delimit an identifier, escaping any embedded closing delimiter.
    pub fn quote_identifier(self, name: &str) -> String {
        match self {
            Dialect::PostgreSql => format!("\"{}\"", name.replace('"', "\"\"")),
            Dialect::MySql => format!("`{}`", name.replace('`', "``")),
            Dialect::SqlServer => format!("[{}]", name.replace(']', "]]")),
        }
    }

    /// Build a LIKE pattern that matches `text` literally at the position
    /// given by `match_kind`.
    pub fn like_pattern(self, text: &str, match_kind: TextMatchKind) -> String {
        let escaped = self.escape_like_wildcards(text);
        match match_kind {
            TextMatchKind::StartsWith => format!("{escaped}%"),
            TextMatchKind::EndsWith => format!("%{escaped}"),
            TextMatchKind::Contains => format!("%{escaped}%"),
        }
    }

    fn escape_like_wildcards(self, text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match (self, c) {
                (Dialect::PostgreSql | Dialect::MySql, '\\' | '%' | '_') => {
                    escaped.push('\\');
                    escaped.push(c);
                }
                (Dialect::SqlServer, '[' | '%' | '_') => {
                    escaped.push('[');
                    escaped.push(c);
                    escaped.push(']');
                }
                _ => escaped.push(c),
            }
        }
        escaped
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::PostgreSql => write!(f, "PostgreSql"),
            Dialect::MySql => write!(f, "MySql"),
            Dialect::SqlServer => write!(f, "SqlServer"),
        }
    }
}
