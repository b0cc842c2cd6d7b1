//! Configuration constants and utilities for rpcline
//!
//! Fixed defaults used by the resolution engine and the execution pipeline,
//! plus the environment lookups that tune logging.

/// Timeout applied before any source contributes one, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// JSON-RPC protocol version sent in every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// Content type sent with every request unless a header overrides it
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Lowest HTTP status treated as a failed call
pub const MIN_CLIENT_ERROR_STATUS: u16 = 400;

/// Name of the base profile in a request file
pub const DEFAULT_CONFIG_NAME: &str = "default";

/// Name reported by the command-line override source
pub const CLI_SOURCE_NAME: &str = "cli";

/// File extension offered by the interactive file picker
pub const REQUEST_FILE_EXTENSION: &str = "hcl";

// Table and box layout
pub const MAX_NAME_LENGTH: usize = 25;
pub const MAX_METHOD_LENGTH: usize = 30;
pub const MAX_CONFIG_LENGTH: usize = 15;
pub const BOX_WIDTH: usize = 78;
pub const BOX_CONTENT_WIDTH: usize = 76;

/// Environment variable holding a `tracing` filter directive
pub const LOG_FILTER_ENV_VAR: &str = "RPCLINE_LOG";

/// Environment variable naming the log file used while the TUI owns the screen
pub const LOG_FILE_ENV_VAR: &str = "RPCLINE_LOG_FILE";

/// Get the log filter, checking the environment first and falling back to
/// `debug` in verbose mode and `warn` otherwise
pub fn get_log_filter(verbose: bool) -> String {
    std::env::var_os(LOG_FILTER_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| if verbose { "debug" } else { "warn" }.to_string())
}

/// Get the TUI log file path, if one is configured
pub fn get_log_file() -> Option<String> {
    std::env::var_os(LOG_FILE_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .filter(|val| !val.trim().is_empty())
}
