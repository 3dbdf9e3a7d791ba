//! s2cli binary entry point.

use std::process::ExitCode;

use clap::Parser;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use s2cli::cli::{self, Cli};
use s2cli::{Config, SemanticScholarClient};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    // Logs go to stderr so stdout carries only the rendered output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let interactive = std::io::stdout().is_terminal();

    let mut config = Config::new(args.api_key.clone());
    if args.no_retry {
        config = config.without_retries();
    }

    let client = match SemanticScholarClient::new(config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(4);
        }
    };

    match cli::run(&args, &client, interactive).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
