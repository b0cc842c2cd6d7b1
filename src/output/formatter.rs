//! Text and JSON rendering of requests and execution results
//!
//! The line-producing functions are shared with the TUI; the `write_*`
//! functions print them to any writer.

use super::masker::SensitiveMasker;
use crate::config::{
    BOX_CONTENT_WIDTH, BOX_WIDTH, MAX_CONFIG_LENGTH, MAX_METHOD_LENGTH, MAX_NAME_LENGTH,
};
use crate::models::{BatchSummary, CliOverrides, ExecutionResult, Request, RequestFile};
use crate::resolver::{nominal_config_name, ConfigManager};
use serde_json::{json, Value};
use std::io::{self, Write};

const TABLE_RULE_WIDTH: usize = 85;
const SUMMARY_RULE_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 9;

#[derive(Debug, Clone, Default)]
pub struct Formatter {
    masker: SensitiveMasker,
    config_manager: ConfigManager,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_request_list(
        &self,
        out: &mut impl Write,
        requests: &[Request],
        overrides: Option<&CliOverrides>,
    ) -> io::Result<()> {
        writeln!(
            out,
            "{:<25} {:<30} {:<15} {:<10}",
            "NAME", "METHOD", "CONFIG", "PARAMS"
        )?;
        writeln!(out, "{}", "-".repeat(TABLE_RULE_WIDTH))?;

        for request in requests {
            writeln!(out, "{}", self.request_row(request, overrides))?;
        }
        Ok(())
    }

    /// One table row: name, method, nominal profile and parameter count
    pub fn request_row(&self, request: &Request, overrides: Option<&CliOverrides>) -> String {
        format!(
            "{:<25} {:<30} {:<15} {:<10}",
            truncate(&request.name, MAX_NAME_LENGTH),
            truncate(&request.method, MAX_METHOD_LENGTH),
            truncate(nominal_config_name(request, overrides), MAX_CONFIG_LENGTH),
            request.param_count()
        )
    }

    pub fn write_request_details(
        &mut self,
        out: &mut impl Write,
        file: &RequestFile,
        requests: &[Request],
        overrides: Option<&CliOverrides>,
    ) -> io::Result<()> {
        for (index, request) in requests.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            for line in self.request_detail_lines(file, request, overrides) {
                writeln!(out, "{line}")?;
            }
        }
        Ok(())
    }

    /// Boxed view of a request with its effective configuration
    ///
    /// Sensitive header values are masked.
    pub fn request_detail_lines(
        &mut self,
        file: &RequestFile,
        request: &Request,
        overrides: Option<&CliOverrides>,
    ) -> Vec<String> {
        let config = self
            .config_manager
            .build_for_request(file, request, overrides);
        let config_name = self
            .config_manager
            .config_name_for_request(file, request, overrides);

        let value_width = BOX_CONTENT_WIDTH - LABEL_WIDTH;
        let nested_width = BOX_CONTENT_WIDTH - 2;

        let mut lines = vec![
            format!("┌{}┐", "─".repeat(BOX_WIDTH)),
            boxed(&request.name),
            format!("├{}┤", "─".repeat(BOX_WIDTH)),
            labeled("Method:", &request.method),
            labeled("URL:", &truncate(&config.url, value_width)),
            labeled("Config:", &config_name),
            labeled("Timeout:", &format!("{}s", config.timeout)),
        ];

        if !config.headers.is_empty() {
            lines.push(boxed("Headers:"));
            for (key, value) in &config.headers {
                let value = self.masker.mask_if_sensitive(key, value);
                let header = format!("  {key}: {value}");
                lines.push(boxed(&format!("  {}", truncate(&header, nested_width))));
            }
        }

        match request.params.as_ref().filter(|params| !params.is_null()) {
            Some(params) => {
                lines.push(boxed("Params:"));
                for line in pretty_json(params).lines() {
                    let line = format!("  {line}");
                    lines.push(boxed(&format!("  {}", truncate(&line, nested_width))));
                }
            }
            None => lines.push(labeled("Params:", "[]")),
        }

        lines.push(format!("└{}┘", "─".repeat(BOX_WIDTH)));
        lines
    }

    pub fn write_requests_json(&self, out: &mut impl Write, requests: &[Request]) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, requests)?;
        writeln!(out)
    }

    pub fn write_results(&self, out: &mut impl Write, results: &[ExecutionResult]) -> io::Result<()> {
        for line in result_lines(results) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    pub fn write_results_json(
        &self,
        out: &mut impl Write,
        results: &[ExecutionResult],
    ) -> io::Result<()> {
        let entries: Vec<Value> = results.iter().map(result_json).collect();
        serde_json::to_writer_pretty(&mut *out, &entries)?;
        writeln!(out)
    }
}

/// Per-request outcome blocks followed by the batch summary
pub fn result_lines(results: &[ExecutionResult]) -> Vec<String> {
    let total = results.len();
    let mut lines = Vec::new();

    for (index, result) in results.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!(
            "[{}/{}] Executing: {}",
            index + 1,
            total,
            result.request.name
        ));

        if let Some(error) = &result.error {
            lines.push("  ✗ Failed".to_string());
            lines.push(format!("  Duration: {}ms", result.duration_ms()));
            lines.push(format!("  Error: {error}"));
            continue;
        }

        if let Some(rpc_error) = result.rpc_error() {
            lines.push("  ✗ RPC Error".to_string());
            lines.push(format!("  Duration: {}ms", result.duration_ms()));
            lines.push(format!("  Error Code: {}", rpc_error.code));
            lines.push(format!("  Error Message: {}", rpc_error.message));
            if let Some(data) = &rpc_error.data {
                lines.push("  Error Data:".to_string());
                lines.extend(indented(&pretty_json(data)));
            }
            continue;
        }

        let result_value = result
            .response
            .as_ref()
            .and_then(|response| response.result.clone())
            .unwrap_or(Value::Null);
        lines.push("  ✓ Success".to_string());
        lines.push(format!("  Duration: {}ms", result.duration_ms()));
        lines.push("  Result:".to_string());
        lines.extend(indented(&pretty_json(&result_value)));
    }

    let summary = BatchSummary::from_results(results);
    lines.push(String::new());
    lines.push("=".repeat(SUMMARY_RULE_WIDTH));
    lines.push(format!(
        "Summary: {} total, {} successful, {} failed",
        summary.total, summary.succeeded, summary.failed
    ));
    lines
}

fn result_json(result: &ExecutionResult) -> Value {
    let mut entry = json!({
        "request": result.request.name,
        "method": result.request.method,
        "duration": result.duration_ms(),
        "success": result.is_success(),
    });

    if let Some(error) = &result.error {
        entry["error"] = json!(error.to_string());
    } else if let Some(rpc_error) = result.rpc_error() {
        entry["rpc_error"] = json!({
            "code": rpc_error.code,
            "message": rpc_error.message,
            "data": rpc_error.data,
        });
    } else {
        entry["result"] = result
            .response
            .as_ref()
            .and_then(|response| response.result.clone())
            .unwrap_or(Value::Null);
    }
    entry
}

/// Cut to `max_len` characters, ending in `...` when shortened
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{kept}...")
}

fn boxed(content: &str) -> String {
    format!("│ {content:<width$} │", width = BOX_CONTENT_WIDTH)
}

fn labeled(label: &str, value: &str) -> String {
    boxed(&format!("{label:<width$}{value}", width = LABEL_WIDTH))
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn indented(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines().map(|line| format!("  {line}"))
}
