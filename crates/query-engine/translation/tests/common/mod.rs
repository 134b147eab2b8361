use std::fs;
use std::path::PathBuf;

use query_engine_configuration::Configuration;
use query_engine_sql::sql::dialect::Dialect;
use query_engine_sql::sql::string::SqlCommand;
use query_engine_translation::translation::{self, error::Error, request};

const GOLDENFILES: &str = "tests/goldenfiles";

/// The shared test configuration, rendering for `dialect`.
pub async fn configuration(dialect: Dialect) -> anyhow::Result<Configuration> {
    let parsed_configuration = query_engine_configuration::parse_configuration(GOLDENFILES).await?;
    let mut configuration =
        query_engine_configuration::make_runtime_configuration(parsed_configuration)?;
    configuration.dialect = dialect;
    Ok(configuration)
}

fn read_request<T: serde::de::DeserializeOwned>(testname: &str) -> anyhow::Result<T> {
    let file = PathBuf::from(GOLDENFILES).join(testname).join("request.json");
    Ok(serde_json::from_str(&fs::read_to_string(file)?)?)
}

/// Translate the query request of a test directory.
pub async fn translate_query(
    testname: &str,
    dialect: Dialect,
) -> anyhow::Result<Result<SqlCommand, Error>> {
    let configuration = configuration(dialect).await?;
    let request: request::QueryRequest = read_request(testname)?;
    Ok(translation::query::translate(
        &configuration.metadata,
        configuration.dialect,
        &request,
    ))
}

/// Translate the mutation request of a test directory.
pub async fn translate_mutation(
    testname: &str,
    dialect: Dialect,
) -> anyhow::Result<Result<Vec<SqlCommand>, Error>> {
    let configuration = configuration(dialect).await?;
    let request: request::MutationRequest = read_request(testname)?;
    Ok(translation::mutation::translate(
        &configuration.metadata,
        configuration.dialect,
        &request,
    ))
}

/// Translate a query request, and render the SQL for a snapshot.
pub async fn test_query(testname: &str, dialect: Dialect) -> anyhow::Result<String> {
    Ok(describe(&translate_query(testname, dialect).await??))
}

/// Translate a query request into a count, and render the SQL for a snapshot.
pub async fn test_count(testname: &str, dialect: Dialect) -> anyhow::Result<String> {
    let configuration = configuration(dialect).await?;
    let request: request::QueryRequest = read_request(testname)?;
    let command = translation::query::translate_count(
        &configuration.metadata,
        configuration.dialect,
        &request,
    )?;
    Ok(describe(&command))
}

/// Translate a mutation request, and render the SQL of every statement for a snapshot.
pub async fn test_mutation(testname: &str, dialect: Dialect) -> anyhow::Result<String> {
    let commands = translate_mutation(testname, dialect).await??;
    Ok(commands
        .iter()
        .map(describe)
        .collect::<Vec<_>>()
        .join("\n\n"))
}

fn describe(command: &SqlCommand) -> String {
    let pretty = sqlformat::format(
        command.statement(),
        &sqlformat::QueryParams::None,
        sqlformat::FormatOptions::default(),
    );

    format!("{}\n\n{}", pretty, command.display_parameters())
}
