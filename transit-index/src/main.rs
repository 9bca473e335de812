use std::io::Read;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use transit_index::api;

/// Transit network index: build once, query forever.
///
/// Both modes read a JSON request document on stdin and write any
/// responses as a JSON array on stdout.
#[derive(Parser)]
#[command(name = "transit-index", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest a network description, build the index, and persist it.
    ///
    /// Any stat_requests bundled into the build request are answered
    /// in the same process.
    MakeBase,
    /// Load a persisted index and answer a batch of stat requests.
    ProcessRequests,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), AppError> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    match command {
        Command::MakeBase => {
            if let Some(responses) = api::make_base(&input)? {
                println!("{responses}");
            }
        }
        Command::ProcessRequests => {
            let responses = api::process_requests(&input)?;
            println!("{responses}");
        }
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] api::ApiError),
}
