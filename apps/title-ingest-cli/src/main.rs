//! Newspaper title ingest CLI
//!
//! Ingests a directory of MODS XML files into the DOMS repository and
//! prints the resulting PID sequence.

mod config;
mod output;

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use doms_client::{Credentials, DomsClient};
use title_ingest::DirectoryIngestor;

use crate::config::IngestConfig;
use crate::output::{print_pids, OutputFormat};

#[derive(Parser)]
#[command(
    name = "title-ingest",
    version,
    about = "Ingest a directory of newspaper title XML files into DOMS",
    long_about = "Reads every .xml file in the given directory in file-name order,\n\
                  clones the newspaper template for each, uploads the transcoded\n\
                  content as the MODS datastream, chains the created objects and\n\
                  publishes them."
)]
struct Cli {
    /// Directory containing the .xml source files
    directory: PathBuf,

    /// Optional TOML configuration file overlaying the defaults
    config_file: Option<PathBuf>,

    /// Output format for the PID sequence
    #[arg(
        short,
        long,
        default_value = "text",
        value_parser = ["text", "json"]
    )]
    format: String,

    /// Enable verbose diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // A wrong argument shape exits 1 with the usage text; help and
    // version remain successful exits.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_tracing(cli.verbose);

    let verbose = cli.verbose;
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            if verbose {
                for cause in e.chain().skip(1) {
                    eprintln!("{}: {}", "Caused by".yellow(), cause);
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = IngestConfig::load(cli.config_file.as_deref())?;

    let client = DomsClient::builder()
        .base_url(&config.doms.url)
        .pid_generator_url(&config.doms.pidgenerator_url)
        .credentials(Credentials::new(
            &config.doms.username,
            &config.doms.password,
        ))
        .build()?;

    let ingestor = DirectoryIngestor::new(&config.source.charset);
    let pids = ingestor.ingest_directory(&client, &cli.directory).await?;

    let format: OutputFormat = cli.format.parse().map_err(anyhow::Error::msg)?;
    print_pids(&pids, format)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }
}
