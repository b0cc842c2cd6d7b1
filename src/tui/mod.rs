//! # Interactive Mode
//!
//! Browse the requests of a file, inspect their effective configuration,
//! select some and run them, all without leaving the terminal.
//!
//! ```text
//! ┌──────────────┐  Action   ┌───────────────┐  spawn   ┌──────────┐
//! │   TuiModel   │──────────▶│ TuiController │─────────▶│ Executor │
//! │ (state+keys) │◀──────────│ (event loop)  │◀─────────│  (task)  │
//! └──────┬───────┘  updates  └───────┬───────┘  mpsc    └──────────┘
//!        │                           │
//!        ▼                           ▼
//!   view::render ──── lines ──▶ RenderStream
//! ```

pub mod controller;
pub mod io;
pub mod model;
pub mod view;

pub use controller::TuiController;
pub use model::{Action, HistoryEntry, TuiModel, View};

use crate::config::REQUEST_FILE_EXTENSION;
use crate::models::{CliOverrides, RequestFile};
use crate::parser;
use anyhow::{Context, Result};
use io::{TerminalEventStream, TerminalRenderStream};
use std::path::{Path, PathBuf};

/// Run interactive mode on `file`, or on a file picked from the current
/// directory
pub async fn run(file: Option<PathBuf>, overrides: Option<CliOverrides>) -> Result<()> {
    let model = match file {
        Some(path) => {
            let mut model = TuiModel::new();
            let loaded = load_request_file(&path);
            model.file_loaded(path, loaded);
            model
        }
        None => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            TuiModel::with_files(discover_request_files(&cwd)?)
        }
    };

    let mut controller = TuiController::new(
        model,
        overrides,
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )?;
    controller.run().await
}

/// Request files directly inside `dir`, sorted by name
pub fn discover_request_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory '{}'", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext == REQUEST_FILE_EXTENSION)
        })
        .collect();
    files.sort();

    tracing::debug!("Found {} request file(s) in '{}'", files.len(), dir.display());
    Ok(files)
}

/// Parse a file for display; the error text is shown inline
fn load_request_file(path: &Path) -> Result<RequestFile, String> {
    parser::parse_file(path).map_err(|e| format!("failed to parse HCL file: {e}"))
}
