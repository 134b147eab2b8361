//! Helpers for processing requests and building SQL.

use std::collections::BTreeMap;

use query_engine_metadata::metadata;
use query_engine_sql::sql;

use super::error::Error;
use super::foreign_key::RelationshipForeignKey;

/// Static information from the request and metadata.
#[derive(Debug, Clone, Copy)]
pub struct Env<'a> {
    metadata: &'a metadata::Metadata,
    dialect: sql::dialect::Dialect,
}

/// A resource type together with its metadata.
#[derive(Debug, Clone, Copy)]
pub struct Resource<'a> {
    pub name: &'a str,
    pub info: &'a metadata::ResourceInfo,
}

/// Stateful information changed throughout the translation process.
#[derive(Debug, Default)]
pub struct State {
    table_index: u32,
    parameter_index: u32,
    foreign_keys: BTreeMap<(String, String), RelationshipForeignKey>,
}

/// For a table in the query, we'd like to track what is its reference in the query
/// (the name we can use to address it, an alias we generate), and what is its name in the
/// metadata (so we can get its information such as which attributes are available).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNameAndReference {
    /// Resource type name for attribute lookup
    pub name: String,
    /// How the table is addressed
    pub reference: TableReference,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableReference {
    /// The table itself, under its alias.
    Table(sql::ast::TableNode),
    /// The columns of `table` as projected by a subquery in FROM, addressed through `alias`.
    Subquery {
        table: sql::ast::TableNode,
        alias: String,
    },
}

/// The tables a select reads from: its source and everything joined to it,
/// keyed by the relationship path that leads there.
#[derive(Debug, Clone)]
pub struct Scope {
    pub root: TableNameAndReference,
    pub joins: Vec<ScopeJoin>,
}

#[derive(Debug, Clone)]
pub struct ScopeJoin {
    pub path: Vec<String>,
    pub table: TableNameAndReference,
    pub join: sql::ast::JoinNode,
    /// Whether the columns of the joined table are selected.
    pub included: bool,
}

impl<'a> Env<'a> {
    /// Create a new Env by supplying the metadata and the dialect to render for.
    pub fn new(metadata: &'a metadata::Metadata, dialect: sql::dialect::Dialect) -> Env<'a> {
        Env { metadata, dialect }
    }

    pub fn dialect(&self) -> sql::dialect::Dialect {
        self.dialect
    }

    /// Lookup a resource type in the metadata.
    pub fn lookup_resource(&self, resource_name: &str) -> Result<Resource<'a>, Error> {
        self.metadata
            .resources
            .0
            .get_key_value(resource_name)
            .map(|(name, info)| Resource { name, info })
            .ok_or_else(|| Error::ResourceNotFound(resource_name.to_string()))
    }

    /// Lookup the members of an enum type.
    pub fn lookup_enum_type(&self, enum_type: &str) -> Result<&'a metadata::EnumTypeInfo, Error> {
        self.metadata
            .enum_types
            .0
            .get(enum_type)
            .ok_or_else(|| Error::NotSupported(format!("values of undeclared enum type '{enum_type}'")))
    }
}

impl<'a> Resource<'a> {
    /// Lookup an attribute of the resource.
    pub fn lookup_column(&self, attribute_name: &str) -> Result<&'a metadata::ColumnInfo, Error> {
        self.info.columns.get(attribute_name).ok_or_else(|| {
            Error::AttributeNotFound(attribute_name.to_string(), self.name.to_string())
        })
    }

    /// Lookup a relationship declared by the resource.
    pub fn lookup_relationship(
        &self,
        relationship_name: &str,
    ) -> Result<&'a metadata::RelationshipInfo, Error> {
        self.info.relationships.get(relationship_name).ok_or_else(|| {
            Error::RelationshipNotFound(relationship_name.to_string(), self.name.to_string())
        })
    }

    pub fn primary_key(&self) -> Result<&'a metadata::ColumnInfo, Error> {
        self.lookup_column(&self.info.primary_key)
    }

    /// The table of the resource, as targeted by write statements.
    pub fn table(&self) -> sql::ast::TableNode {
        sql::helpers::bare_table(self.info.schema_name.as_deref(), &self.info.table_name)
    }

    pub fn aliased_table(&self, alias: String) -> sql::ast::TableNode {
        sql::helpers::aliased_table(self.info.schema_name.as_deref(), &self.info.table_name, alias)
    }
}

impl State {
    /// Build a new state.
    pub fn new() -> State {
        State::default()
    }

    /// Make a unique alias for the next table in the query.
    pub fn make_table_alias(&mut self) -> String {
        self.table_index += 1;
        format!("t{}", self.table_index)
    }

    /// Bind a value to the next parameter of the current statement.
    pub fn make_parameter(
        &mut self,
        value: sql::value::ParameterValue,
    ) -> Result<sql::ast::ParameterNode, Error> {
        self.parameter_index += 1;
        Ok(sql::ast::ParameterNode::new(
            format!("@p{}", self.parameter_index),
            value,
        )?)
    }

    /// Parameter names restart with every statement.
    pub fn start_statement(&mut self) {
        self.parameter_index = 0;
    }

    /// Resolve the foreign key of a relationship, at most once per translation.
    pub fn lookup_foreign_key(
        &mut self,
        env: &Env,
        resource: &Resource,
        relationship_name: &str,
    ) -> Result<RelationshipForeignKey, Error> {
        let key = (resource.name.to_string(), relationship_name.to_string());
        if let Some(foreign_key) = self.foreign_keys.get(&key) {
            return Ok(foreign_key.clone());
        }
        let foreign_key = RelationshipForeignKey::resolve(env, resource, relationship_name)?;
        tracing::debug!("Foreign key: {foreign_key}");
        self.foreign_keys.insert(key, foreign_key.clone());
        Ok(foreign_key)
    }
}

impl TableNameAndReference {
    /// A column of this table, addressed the way the table is.
    pub fn column(&self, column_name: &str, column_type: sql::ast::ColumnType) -> sql::ast::ColumnNode {
        match &self.reference {
            TableReference::Table(table) => table.column(column_name, column_type).into(),
            TableReference::Subquery { table, alias } => sql::ast::ColumnInSelectNode {
                selector: table.column(column_name, column_type),
                select_alias: alias.clone(),
            }
            .into(),
        }
    }
}

impl Scope {
    pub fn new(root: TableNameAndReference) -> Scope {
        Scope {
            root,
            joins: vec![],
        }
    }

    /// The join reached by following `path` from the root, if it was joined already.
    pub fn lookup_join(&self, path: &[String]) -> Option<&ScopeJoin> {
        self.joins.iter().find(|join| join.path == path)
    }

    pub fn join_nodes(&self) -> Vec<sql::ast::JoinNode> {
        self.joins.iter().map(|join| join.join.clone()).collect()
    }
}
