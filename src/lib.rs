//! # rpcline - JSON-RPC Requests from HCL Files
//!
//! Reads named JSON-RPC call definitions and connection profiles from HCL
//! files, resolves each request's effective configuration from layered
//! sources and executes the calls over HTTP.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   RequestFile   ┌──────────┐  EffectiveConfig  ┌──────────┐
//! │  Parser  │────────────────▶│ Resolver │──────────────────▶│ Executor │
//! │ (HCL)    │                 │ (merge)  │                   │ (HTTP)   │
//! └──────────┘                 └──────────┘                   └────┬─────┘
//!                                                                  │ ExecutionResult
//!                                      ┌───────────────────────────┴──┐
//!                                      ▼                              ▼
//!                               ┌────────────┐                 ┌────────────┐
//!                               │   Output   │                 │    TUI     │
//!                               │ (CLI text) │                 │ (terminal) │
//!                               └────────────┘                 └────────────┘
//! ```

pub mod cmd_args;
pub mod commands;
pub mod config;
pub mod errors;
pub mod executor;
pub mod models;
pub mod output;
pub mod parser;
pub mod resolver;
pub mod tui;

pub use errors::{ErrorKind, ExecutionError};
pub use executor::Executor;
pub use models::{
    BatchSummary, CliOverrides, Config, EffectiveConfig, ExecutionResult, Request, RequestFile,
};
pub use parser::{parse_file, parse_str, validate, ParseError, ValidationError};
pub use resolver::{ConfigManager, ConfigMerger, ConfigSource};
