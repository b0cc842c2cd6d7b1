//! Human and machine readable output for the command line and the TUI

pub mod formatter;
pub mod masker;

pub use formatter::{result_lines, truncate, Formatter};
pub use masker::SensitiveMasker;
