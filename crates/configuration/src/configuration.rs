//! Configuration for the query engine.

use query_engine_metadata::metadata;
use query_engine_sql::sql::dialect::Dialect;
use schemars::{gen::SchemaSettings, schema::RootSchema};

use crate::error::MakeRuntimeConfigurationError;
use crate::version1::ParsedConfiguration;

/// The 'Configuration' type collects all the information necessary to translate requests.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', which rejects metadata the translation cannot rely on.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub dialect: Dialect,
    pub metadata: metadata::Metadata,
}

/// Generate the JSON schema of the configuration file.
pub fn generate_latest_schema() -> RootSchema {
    SchemaSettings::draft07()
        .into_generator()
        .into_root_schema_for::<ParsedConfiguration>()
}

/// Validate a parsed configuration and turn it into a runtime configuration.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    validate_metadata(&parsed_config.metadata)?;
    tracing::debug!(
        "Loaded {} resource types for {}",
        parsed_config.metadata.resources.0.len(),
        parsed_config.dialect
    );
    Ok(Configuration {
        dialect: parsed_config.dialect,
        metadata: parsed_config.metadata,
    })
}

fn validate_metadata(metadata: &metadata::Metadata) -> Result<(), MakeRuntimeConfigurationError> {
    for (resource_name, resource) in &metadata.resources.0 {
        if !resource.columns.contains_key(&resource.primary_key) {
            return Err(MakeRuntimeConfigurationError::UnknownPrimaryKey {
                resource: resource_name.clone(),
                primary_key: resource.primary_key.clone(),
            });
        }

        for (attribute_name, column) in &resource.columns {
            validate_enum_column(metadata, resource_name, attribute_name, column)?;
        }

        for (relationship_name, relationship) in &resource.relationships {
            if !metadata.resources.0.contains_key(&relationship.target) {
                return Err(MakeRuntimeConfigurationError::UnknownRelationshipTarget {
                    resource: resource_name.clone(),
                    relationship: relationship_name.clone(),
                    target: relationship.target.clone(),
                });
            }
            if relationship.kind == metadata::RelationshipKind::ToMany
                && relationship.foreign_key.at_left_side
            {
                return Err(MakeRuntimeConfigurationError::ToManyForeignKeyAtLeftSide {
                    resource: resource_name.clone(),
                    relationship: relationship_name.clone(),
                });
            }
            if relationship.delete_behavior == metadata::DeleteBehavior::SetNull
                && relationship.foreign_key.nullable == metadata::Nullable::NonNullable
            {
                return Err(MakeRuntimeConfigurationError::SetNullOnRequiredForeignKey {
                    resource: resource_name.clone(),
                    relationship: relationship_name.clone(),
                });
            }
        }
    }
    Ok(())
}

fn validate_enum_column(
    metadata: &metadata::Metadata,
    resource_name: &str,
    attribute_name: &str,
    column: &metadata::ColumnInfo,
) -> Result<(), MakeRuntimeConfigurationError> {
    if column.r#type != metadata::ScalarType::Enum {
        return Ok(());
    }
    match &column.enum_type {
        None => Err(MakeRuntimeConfigurationError::MissingEnumType {
            resource: resource_name.to_string(),
            attribute: attribute_name.to_string(),
        }),
        Some(enum_type) if !metadata.enum_types.0.contains_key(enum_type) => {
            Err(MakeRuntimeConfigurationError::UnknownEnumType {
                resource: resource_name.to_string(),
                attribute: attribute_name.to_string(),
                enum_type: enum_type.clone(),
            })
        }
        Some(_) => Ok(()),
    }
}
