//! Translate resource requests into SQL from the command line.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use query_engine_configuration::{self as configuration, Configuration, ParsedConfiguration};
use query_engine_sql::sql::string::SqlCommand;
use query_engine_translation::translation::{self, request};

#[derive(Parser)]
#[command(version, about)]
struct Options {
    /// The directory holding the configuration file.
    #[arg(long, env = "QUERY_ENGINE_CONFIGURATION", default_value = ".")]
    configuration: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write an empty configuration and its JSON schema.
    Initialize,
    /// Translate a query request read from a JSON file.
    Query {
        file: PathBuf,
        /// Count the matching rows instead of selecting them.
        #[arg(long)]
        count: bool,
        /// Reformat the SQL over multiple lines.
        #[arg(long)]
        pretty: bool,
    },
    /// Translate a mutation request read from a JSON file.
    Mutation {
        file: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the JSON schema of the configuration file.
    PrintSchema,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let options = Options::parse();
    match run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(options: Options) -> anyhow::Result<()> {
    match options.command {
        Command::Initialize => {
            configuration::write_parsed_configuration(
                ParsedConfiguration::empty(),
                &options.configuration,
            )
            .await?;
            tracing::info!(
                "Wrote an empty configuration to {}",
                options.configuration.display()
            );
        }
        Command::Query {
            file,
            count,
            pretty,
        } => {
            let configuration = load_configuration(&options.configuration).await?;
            let request: request::QueryRequest = read_request(&file).await?;
            let command = if count {
                translation::query::translate_count(
                    &configuration.metadata,
                    configuration.dialect,
                    &request,
                )?
            } else {
                translation::query::translate(
                    &configuration.metadata,
                    configuration.dialect,
                    &request,
                )?
            };
            print_commands(&[command], pretty)?;
        }
        Command::Mutation { file, pretty } => {
            let configuration = load_configuration(&options.configuration).await?;
            let request: request::MutationRequest = read_request(&file).await?;
            let commands = translation::mutation::translate(
                &configuration.metadata,
                configuration.dialect,
                &request,
            )?;
            if commands.is_empty() {
                tracing::info!("Nothing to execute");
            }
            print_commands(&commands, pretty)?;
        }
        Command::PrintSchema => {
            let schema = configuration::generate_latest_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }
    Ok(())
}

async fn load_configuration(dir: &Path) -> anyhow::Result<Configuration> {
    let parsed = configuration::parse_configuration(dir).await?;
    Ok(configuration::make_runtime_configuration(parsed)?)
}

async fn read_request<T: serde::de::DeserializeOwned>(file: &Path) -> anyhow::Result<T> {
    let contents = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", file.display()))
}

/// Print commands as JSON, or as formatted SQL followed by their parameters.
fn print_commands(commands: &[SqlCommand], pretty: bool) -> anyhow::Result<()> {
    if !pretty {
        println!("{}", serde_json::to_string_pretty(commands)?);
        return Ok(());
    }
    for command in commands {
        println!(
            "{}",
            sqlformat::format(
                command.statement(),
                &sqlformat::QueryParams::None,
                sqlformat::FormatOptions::default(),
            )
        );
        if !command.parameters().is_empty() {
            println!("-- {}", command.display_parameters());
        }
    }
    Ok(())
}
