//! Shared helpers for integration tests
//!
//! - request files written to temporary paths
//! - canned JSON-RPC responses for wiremock servers

#![allow(dead_code)]

use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::ResponseTemplate;

/// Write HCL source to a temporary `.hcl` file that lives as long as the handle
pub fn request_file(source: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".hcl")
        .tempfile()
        .expect("create temp request file");
    file.write_all(source.as_bytes())
        .expect("write temp request file");
    file
}

/// A successful JSON-RPC response
pub fn rpc_result(result: Value, id: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "result": result,
        "id": id,
    }))
}

/// A JSON-RPC error response (HTTP 200)
pub fn rpc_error(code: i64, message: &str, id: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "error": {"code": code, "message": message},
        "id": id,
    }))
}

/// A profile block pointing at `url`
pub fn default_config(url: &str) -> String {
    format!("config \"default\" {{\n  url = \"{url}\"\n}}\n")
}
