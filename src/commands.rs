//! # Command Handlers
//!
//! One function per subcommand. Handlers write to the given writer so they
//! can be exercised without a terminal; failures surface as `anyhow` errors
//! that `main` prints.

use crate::cmd_args::Command;
use crate::executor::Executor;
use crate::models::{BatchSummary, CliOverrides, RequestFile};
use crate::output::Formatter;
use crate::parser::{self, validate};
use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

/// Run a parsed command; `Ok(FAILURE)` means some request failed
pub async fn dispatch(command: Command, out: &mut impl Write) -> Result<ExitCode> {
    match command {
        Command::List {
            file,
            names,
            json,
            detailed,
        } => list(&file, &names, json, detailed, out).map(|_| ExitCode::SUCCESS),
        Command::Run {
            file,
            names,
            json,
            overrides,
        } => {
            let summary = run(&file, &names, json, overrides.as_ref(), out).await?;
            Ok(if summary.all_succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Validate { file } => validate_file(&file, out).map(|_| ExitCode::SUCCESS),
        Command::Tui { file, overrides } => {
            if !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stdin) {
                return Err(anyhow!("interactive mode requires a terminal"));
            }
            crate::tui::run(file, overrides)
                .await
                .map(|_| ExitCode::SUCCESS)
        }
        Command::Version => version(out).map(|_| ExitCode::SUCCESS),
    }
}

pub fn load(file: &Path) -> Result<RequestFile> {
    parser::parse_file(file).context("failed to parse HCL file")
}

/// Parse then validate, as every executing path does
pub fn load_validated(file: &Path) -> Result<RequestFile> {
    let request_file = load(file)?;
    validate(&request_file).context("validation failed")?;
    Ok(request_file)
}

pub fn list(
    file: &Path,
    names: &[String],
    json: bool,
    detailed: bool,
    out: &mut impl Write,
) -> Result<()> {
    let request_file = load(file)?;
    let requests = request_file.select(names).map_err(|e| anyhow!(e))?;
    let mut formatter = Formatter::new();

    if json {
        formatter.write_requests_json(out, &requests)?;
    } else if detailed {
        formatter.write_request_details(out, &request_file, &requests, None)?;
    } else {
        formatter.write_request_list(out, &requests, None)?;
    }
    Ok(())
}

pub async fn run(
    file: &Path,
    names: &[String],
    json: bool,
    overrides: Option<&CliOverrides>,
    out: &mut impl Write,
) -> Result<BatchSummary> {
    let request_file = load_validated(file)?;
    let requests = request_file.select(names).map_err(|e| anyhow!(e))?;

    let mut executor = Executor::new()?;
    let results = executor
        .execute_all(&request_file, &requests, overrides)
        .await;

    let formatter = Formatter::new();
    if json {
        formatter.write_results_json(out, &results)?;
    } else {
        formatter.write_results(out, &results)?;
    }

    Ok(BatchSummary::from_results(&results))
}

pub fn validate_file(file: &Path, out: &mut impl Write) -> Result<()> {
    let request_file = load_validated(file)?;

    writeln!(out, "✓ File '{}' is valid", file.display())?;
    writeln!(out, "  - {} config(s) found", request_file.configs.len())?;
    writeln!(out, "  - {} request(s) found", request_file.requests.len())?;
    Ok(())
}

pub fn version(out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{} version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )?;
    Ok(())
}
