//! The on-disk configuration format.

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};

use query_engine_metadata::metadata;
use query_engine_sql::sql::dialect::Dialect;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

/// Initial configuration, just enough to describe the database and the resources mapped onto it.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    pub version: u32,
    #[serde(default)]
    pub dialect: Dialect,
    #[serde(default)]
    pub metadata: metadata::Metadata,
}

impl ParsedConfiguration {
    pub fn empty() -> Self {
        Self {
            version: CURRENT_VERSION,
            dialect: Dialect::default(),
            metadata: metadata::Metadata::empty(),
        }
    }
}

/// Parse the configuration format from a directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents =
        fs::read_to_string(&configuration_file)
            .await
            .map_err(|err| {
                ParseConfigurationError::IoErrorButStringified(format!(
                    "{}: {}",
                    &configuration_file.display(),
                    err
                ))
            })?;

    let parsed_config: ParsedConfiguration = serde_json::from_str(&configuration_file_contents)
        .map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    if parsed_config.version != CURRENT_VERSION {
        return Err(ParseConfigurationError::UnsupportedVersion {
            found: parsed_config.version,
            expected: CURRENT_VERSION,
        });
    }

    Ok(parsed_config)
}

/// Write the parsed configuration into a directory on disk.
pub async fn write_parsed_configuration(
    parsed_config: ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().to_owned().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref()).await?;

    // create the configuration file
    fs::write(
        configuration_file,
        serde_json::to_string_pretty(&parsed_config)
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    // create the jsonschema file
    let configuration_jsonschema_file_path = out_dir
        .as_ref()
        .to_owned()
        .join(CONFIGURATION_JSONSCHEMA_FILENAME);

    let output = crate::configuration::generate_latest_schema();
    fs::write(
        &configuration_jsonschema_file_path,
        serde_json::to_string_pretty(&output)
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_configuration() -> ParsedConfiguration {
        serde_json::from_value(serde_json::json!({
            "version": 1,
            "dialect": "mysql",
            "metadata": {
                "resources": {
                    "Person": {
                        "tableName": "People",
                        "primaryKey": "id",
                        "columns": {
                            "id": { "name": "Id", "type": "integer", "nullable": "NonNullable" },
                            "firstName": { "name": "FirstName", "type": "text" }
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn writes_a_configuration_that_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let configuration = sample_configuration();

        write_parsed_configuration(configuration.clone(), dir.path())
            .await
            .unwrap();
        let parsed = parse_configuration(dir.path()).await.unwrap();

        assert_eq!(parsed, configuration);
        assert!(dir.path().join(CONFIGURATION_JSONSCHEMA_FILENAME).exists());
    }

    #[tokio::test]
    async fn written_configuration_conforms_to_the_written_schema() {
        let dir = tempfile::tempdir().unwrap();
        write_parsed_configuration(sample_configuration(), dir.path())
            .await
            .unwrap();

        let schema: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(CONFIGURATION_JSONSCHEMA_FILENAME)).unwrap(),
        )
        .unwrap();
        let instance: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(CONFIGURATION_FILENAME)).unwrap(),
        )
        .unwrap();

        let compiled = jsonschema::JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&instance));
    }

    #[tokio::test]
    async fn missing_configuration_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let error = parse_configuration(dir.path()).await.unwrap_err();

        assert!(matches!(
            error,
            ParseConfigurationError::IoErrorButStringified(_)
        ));
    }

    #[tokio::test]
    async fn reports_the_position_of_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIGURATION_FILENAME),
            "{\n  \"version\": 1,\n  \"dialect\": 7\n}\n",
        )
        .unwrap();

        let error = parse_configuration(dir.path()).await.unwrap_err();

        match error {
            ParseConfigurationError::ParseError { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn rejects_unknown_versions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIGURATION_FILENAME),
            r#"{ "version": 2 }"#,
        )
        .unwrap();

        let error = parse_configuration(dir.path()).await.unwrap_err();

        assert_eq!(
            error.to_string(),
            "unsupported configuration version 2, expected 1"
        );
    }

    #[test]
    fn empty_configuration_uses_the_current_version() {
        let configuration = ParsedConfiguration::empty();
        assert_eq!(configuration.version, CURRENT_VERSION);
        assert!(configuration.metadata.resources.0.is_empty());
    }
}
