//! # rpcline Main Entry Point
//!
//! Parses the command line, sets up logging and hands off to the command
//! handlers.

use rpcline::cmd_args::CommandLineArgs;
use rpcline::commands;
use rpcline::config::{get_log_file, get_log_filter};
use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CommandLineArgs::parse();
    init_tracing(&args);

    tracing::debug!("Running {:?}", args.command());

    match commands::dispatch(args.into_command(), &mut std::io::stdout()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr, except in interactive mode where they would corrupt
/// the screen: there they go to a file if one is configured, or nowhere
fn init_tracing(args: &CommandLineArgs) {
    let filter = get_log_filter(args.verbose());
    let env_filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if !args.is_interactive() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init()
            .ok();
        return;
    }

    let Some(path) = get_log_file() else {
        return;
    };

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .ok();
        }
        Err(e) => eprintln!("Warning: cannot open log file '{path}': {e}"),
    }
}
