use crate::models::{CliOverrides, Headers};
use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;
use clap::{Args, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "rpcline",
    version,
    about = "Execute JSON-RPC requests defined in HCL files",
    long_about = "rpcline reads JSON-RPC request definitions from HCL files and executes \
                  them with layered configuration: default profile, named profile, \
                  request fields and command-line overrides."
)]
struct ClapArgs {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: ClapCommand,
}

#[derive(Subcommand, Debug)]
enum ClapCommand {
    /// List requests from an HCL file
    Ls {
        #[arg(value_parser = expand_path)]
        file: PathBuf,
        /// Only these requests, in this order
        names: Vec<String>,
        #[arg(long, help = "Output in JSON format")]
        json: bool,
        #[arg(long, help = "Show effective configuration of each request")]
        detailed: bool,
    },
    /// Execute requests
    Run {
        #[arg(value_parser = expand_path)]
        file: PathBuf,
        /// Only these requests, in this order
        names: Vec<String>,
        #[arg(long, help = "Output in JSON format")]
        json: bool,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Check syntax, required fields and profile references
    Validate {
        #[arg(value_parser = expand_path)]
        file: PathBuf,
    },
    /// Browse and run requests interactively
    Tui {
        /// Request file; picks from the current directory when omitted
        #[arg(value_parser = expand_path)]
        file: Option<PathBuf>,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Print version information
    Version,
}

#[derive(Args, Debug, Clone, Default)]
struct OverrideArgs {
    #[arg(long, help = "Override URL for requests")]
    url: Option<String>,
    #[arg(
        long = "header",
        value_name = "KEY: VALUE",
        value_parser = parse_header,
        help = "Override a header (can be repeated)"
    )]
    headers: Vec<(String, String)>,
    #[arg(long, value_name = "NAME", help = "Use a specific config profile")]
    config: Option<String>,
    #[arg(long, value_name = "SECS", help = "Override timeout in seconds")]
    timeout: Option<u64>,
}

impl OverrideArgs {
    fn into_overrides(self) -> Option<CliOverrides> {
        let overrides = CliOverrides {
            url: self.url,
            headers: self.headers.into_iter().collect::<Headers>(),
            timeout: self.timeout,
            config: self.config,
        };
        (!overrides.is_empty()).then_some(overrides)
    }
}

/// A parsed command with paths expanded and overrides collected
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List {
        file: PathBuf,
        names: Vec<String>,
        json: bool,
        detailed: bool,
    },
    Run {
        file: PathBuf,
        names: Vec<String>,
        json: bool,
        overrides: Option<CliOverrides>,
    },
    Validate {
        file: PathBuf,
    },
    Tui {
        file: Option<PathBuf>,
        overrides: Option<CliOverrides>,
    },
    Version,
}

impl From<ClapCommand> for Command {
    fn from(command: ClapCommand) -> Self {
        match command {
            ClapCommand::Ls {
                file,
                names,
                json,
                detailed,
            } => Command::List {
                file,
                names,
                json,
                detailed,
            },
            ClapCommand::Run {
                file,
                names,
                json,
                overrides,
            } => Command::Run {
                file,
                names,
                json,
                overrides: overrides.into_overrides(),
            },
            ClapCommand::Validate { file } => Command::Validate { file },
            ClapCommand::Tui { file, overrides } => Command::Tui {
                file,
                overrides: overrides.into_overrides(),
            },
            ClapCommand::Version => Command::Version,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    verbose: bool,
    command: Command,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::try_parse_from(itr).map(Into::into)
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn into_command(self) -> Command {
        self.command
    }

    /// True for the interactive mode, which owns the terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, Command::Tui { .. })
    }
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            verbose: args.verbose,
            command: args.command.into(),
        }
    }
}

/// Parse `Key: Value`, trimming both sides
fn parse_header(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(':') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!(
            "invalid header format: {raw} (expected 'Key: Value')"
        )),
    }
}

fn expand_path(raw: &str) -> Result<PathBuf, String> {
    Ok(PathBuf::from(shellexpand::tilde(raw).into_owned()))
}
