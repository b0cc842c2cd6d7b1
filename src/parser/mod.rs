//! # Request File Parser
//!
//! Reads HCL request files into a [`RequestFile`]:
//!
//! ```hcl
//! config "default" {
//!   url     = "https://rpc.example.com"
//!   timeout = 30
//!   headers = { Authorization = "Bearer secret" }
//! }
//!
//! request "block_number" {
//!   method = "eth_blockNumber"
//!   params = []
//!   config = "production"
//! }
//! ```
//!
//! Attribute expressions are evaluated without variables, so literals and
//! plain templates work but references do not. An unlabeled `config` block is
//! the `default` profile.

pub mod params;
pub mod validator;

pub use validator::{validate, ValidationError};

use crate::config::DEFAULT_CONFIG_NAME;
use crate::models::{Config, Headers, Request, RequestFile};
use hcl::eval::{Context, Evaluate};
use hcl::{Attribute, Block, Body};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse HCL: {0}")]
    Syntax(#[from] hcl::Error),

    #[error("unsupported block type '{0}' (expected 'config' or 'request')")]
    UnsupportedBlock(String),

    #[error("unexpected top-level attribute '{0}'")]
    TopLevelAttribute(String),

    #[error("request block must have a name label")]
    MissingRequestName,

    #[error("duplicate {kind} '{name}'")]
    Duplicate { kind: &'static str, name: String },

    #[error("unsupported attribute '{attribute}' in {block}")]
    UnsupportedAttribute { block: String, attribute: String },

    #[error("invalid '{attribute}' in {block}: {reason}")]
    InvalidAttribute {
        block: String,
        attribute: String,
        reason: String,
    },
}

/// Read and parse a request file from disk
pub fn parse_file(path: impl AsRef<Path>) -> Result<RequestFile, ParseError> {
    let path = path.as_ref();
    tracing::debug!("Reading request file '{}'", path.display());

    let source = std::fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.display().to_string(),
        source,
    })?;

    parse_str(&source)
}

/// Parse request file contents
pub fn parse_str(source: &str) -> Result<RequestFile, ParseError> {
    let body: Body = hcl::parse(source)?;
    let mut file = RequestFile::new();

    if let Some(attr) = body.attributes().next() {
        return Err(ParseError::TopLevelAttribute(attr.key().to_string()));
    }

    // Profiles first so requests can be checked against them later
    for block in body.blocks() {
        match block.identifier() {
            "config" => {
                let name = block
                    .labels()
                    .first()
                    .map_or(DEFAULT_CONFIG_NAME, |label| label.as_str())
                    .to_string();
                let config = parse_config_block(block, &name)?;
                if file.configs.insert(name.clone(), config).is_some() {
                    return Err(ParseError::Duplicate {
                        kind: "config",
                        name,
                    });
                }
            }
            "request" => {}
            other => return Err(ParseError::UnsupportedBlock(other.to_string())),
        }
    }

    for block in body.blocks().filter(|b| b.identifier() == "request") {
        let request = parse_request_block(block)?;
        if file.request(&request.name).is_some() {
            return Err(ParseError::Duplicate {
                kind: "request",
                name: request.name,
            });
        }
        file.requests.push(request);
    }

    tracing::debug!(
        "Parsed {} config(s) and {} request(s)",
        file.configs.len(),
        file.requests.len()
    );
    Ok(file)
}

fn parse_config_block(block: &Block, name: &str) -> Result<Config, ParseError> {
    let decoder = AttributeDecoder::new(format!("config '{name}'"));
    let mut config = Config::new();

    for attr in block.body().attributes() {
        match attr.key() {
            "url" => config.url = Some(decoder.string(attr)?),
            "headers" => config.headers = decoder.headers(attr)?,
            "timeout" => config.timeout = Some(decoder.timeout(attr)?),
            _ => return Err(decoder.unsupported(attr)),
        }
    }
    decoder.reject_blocks(block.body())?;

    Ok(config)
}

fn parse_request_block(block: &Block) -> Result<Request, ParseError> {
    let name = block
        .labels()
        .first()
        .map(|label| label.as_str().to_string())
        .ok_or(ParseError::MissingRequestName)?;

    let decoder = AttributeDecoder::new(format!("request '{name}'"));
    let mut request = Request::new(name, "");

    for attr in block.body().attributes() {
        match attr.key() {
            "method" => request.method = decoder.string(attr)?,
            "params" => request.params = Some(params::to_json(decoder.value(attr)?)),
            "url" => request.url = Some(decoder.string(attr)?),
            "headers" => request.headers = decoder.headers(attr)?,
            "timeout" => request.timeout = Some(decoder.timeout(attr)?),
            "config" => request.config = Some(decoder.string(attr)?),
            _ => return Err(decoder.unsupported(attr)),
        }
    }
    decoder.reject_blocks(block.body())?;

    Ok(request)
}

/// Evaluates attributes of one block into typed values
struct AttributeDecoder {
    block: String,
    context: Context<'static>,
}

impl AttributeDecoder {
    fn new(block: String) -> Self {
        Self {
            block,
            context: Context::new(),
        }
    }

    fn value(&self, attr: &Attribute) -> Result<hcl::Value, ParseError> {
        attr.expr()
            .evaluate(&self.context)
            .map_err(|errors| self.invalid(attr, errors.to_string()))
    }

    fn string(&self, attr: &Attribute) -> Result<String, ParseError> {
        match self.value(attr)? {
            hcl::Value::String(s) => Ok(s),
            other => Err(self.invalid(attr, format!("expected string, got {}", type_name(&other)))),
        }
    }

    fn timeout(&self, attr: &Attribute) -> Result<u64, ParseError> {
        match self.value(attr)? {
            hcl::Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
                .ok_or_else(|| self.invalid(attr, format!("expected non-negative whole seconds, got {n}"))),
            other => Err(self.invalid(attr, format!("expected number, got {}", type_name(&other)))),
        }
    }

    fn headers(&self, attr: &Attribute) -> Result<Headers, ParseError> {
        match self.value(attr)? {
            hcl::Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| match value {
                    hcl::Value::String(s) => Ok((key, s)),
                    other => Err(self.invalid(
                        attr,
                        format!("header '{key}' must be a string, got {}", type_name(&other)),
                    )),
                })
                .collect(),
            other => Err(self.invalid(attr, format!("expected object, got {}", type_name(&other)))),
        }
    }

    fn reject_blocks(&self, body: &Body) -> Result<(), ParseError> {
        match body.blocks().next() {
            Some(nested) => Err(ParseError::UnsupportedAttribute {
                block: self.block.clone(),
                attribute: nested.identifier().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn unsupported(&self, attr: &Attribute) -> ParseError {
        ParseError::UnsupportedAttribute {
            block: self.block.clone(),
            attribute: attr.key().to_string(),
        }
    }

    fn invalid(&self, attr: &Attribute, reason: String) -> ParseError {
        ParseError::InvalidAttribute {
            block: self.block.clone(),
            attribute: attr.key().to_string(),
            reason,
        }
    }
}

fn type_name(value: &hcl::Value) -> &'static str {
    match value {
        hcl::Value::Null => "null",
        hcl::Value::Bool(_) => "bool",
        hcl::Value::Number(_) => "number",
        hcl::Value::String(_) => "string",
        hcl::Value::Array(_) => "list",
        hcl::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    const SAMPLE: &str = r#"
config "default" {
  url     = "https://default.example.com"
  timeout = 30
  headers = {
    "X-Api-Key" = "abc123"
  }
}

config "production" {
  url = "https://prod.example.com"
}

request "block_number" {
  method = "eth_blockNumber"
  params = []
}

request "get_balance" {
  method  = "eth_getBalance"
  params  = ["0xabc", "latest"]
  config  = "production"
  timeout = 5
  headers = { "X-Trace" = "on" }
}
"#;

    #[test]
    fn parse_str_should_read_configs_and_requests() {
        let file = parse_str(SAMPLE).unwrap();

        assert_eq!(file.configs.len(), 2);
        let default = file.config("default").unwrap();
        assert_eq!(default.url(), Some("https://default.example.com"));
        assert_eq!(default.timeout(), Some(30));
        assert_eq!(
            default.headers.get("X-Api-Key").map(String::as_str),
            Some("abc123")
        );

        // Timeout is left unset when the block does not declare one
        let production = file.config("production").unwrap();
        assert_eq!(production.timeout, None);

        let names: Vec<_> = file.requests.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["block_number", "get_balance"]);

        let balance = file.request("get_balance").unwrap();
        assert_eq!(balance.method, "eth_getBalance");
        assert_eq!(balance.params, Some(json!(["0xabc", "latest"])));
        assert_eq!(balance.config_ref(), Some("production"));
        assert_eq!(balance.timeout, Some(5));
        assert_eq!(balance.headers.get("X-Trace").map(String::as_str), Some("on"));

        let block_number = file.request("block_number").unwrap();
        assert_eq!(block_number.params, Some(json!([])));
        assert_eq!(block_number.config, None);
    }

    #[test]
    fn unlabeled_config_should_be_default() {
        let file = parse_str("config {\n  url = \"https://a.test\"\n}\n").unwrap();
        assert_eq!(
            file.config("default").and_then(Config::url),
            Some("https://a.test")
        );
    }

    #[test]
    fn missing_method_should_parse_as_empty() {
        let file = parse_str("request \"r\" {\n  url = \"https://a.test\"\n}\n").unwrap();
        assert_eq!(file.requests[0].method, "");
    }

    #[test]
    fn request_without_label_should_fail() {
        let err = parse_str("request {\n  method = \"m\"\n}\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingRequestName));
    }

    #[test]
    fn unknown_attribute_should_fail() {
        let err = parse_str("config \"c\" {\n  uri = \"x\"\n}\n").unwrap_err();
        assert_eq!(err.to_string(), "unsupported attribute 'uri' in config 'c'");
    }

    #[test]
    fn unknown_block_should_fail() {
        let err = parse_str("profile \"p\" {}\n").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedBlock(kind) if kind == "profile"));
    }

    #[test]
    fn wrong_types_should_fail() {
        let err = parse_str("request \"r\" {\n  method = 5\n}\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid 'method' in request 'r': expected string, got number"
        );

        let err = parse_str("config \"c\" {\n  timeout = \"10\"\n}\n").unwrap_err();
        assert!(err.to_string().contains("expected number"));

        let err = parse_str("config \"c\" {\n  timeout = -1\n}\n").unwrap_err();
        assert!(err.to_string().contains("non-negative"));

        let err = parse_str("config \"c\" {\n  headers = { A = 1 }\n}\n").unwrap_err();
        assert!(err.to_string().contains("header 'A' must be a string"));
    }

    #[test]
    fn duplicate_request_should_fail() {
        let source = "request \"r\" {\n  method = \"a\"\n}\nrequest \"r\" {\n  method = \"b\"\n}\n";
        let err = parse_str(source).unwrap_err();
        assert_eq!(err.to_string(), "duplicate request 'r'");
    }

    #[test]
    fn syntax_error_should_fail() {
        let err = parse_str("request \"r\" {\n  method = \n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax(_)));
    }

    #[test]
    fn parse_file_should_read_from_disk() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        temp.write_all(SAMPLE.as_bytes()).unwrap();

        let file = parse_file(temp.path()).unwrap();
        assert_eq!(file.requests.len(), 2);
    }

    #[test]
    fn parse_file_should_report_missing_file() {
        let err = parse_file("/definitely/not/here.hcl").unwrap_err();
        assert!(matches!(err, ParseError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.hcl"));
    }
}
