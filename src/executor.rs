//! # Request Executor
//!
//! Sends resolved requests as JSON-RPC 2.0 calls over HTTP.
//!
//! Each request goes through the same steps and stops at the first failure:
//! resolve its configuration, require a URL, build the envelope, POST it with
//! the request's own timeout, reject HTTP failure statuses, decode the body.
//! Failures are recorded in the request's [`ExecutionResult`]; a batch always
//! runs to the end.

use crate::config::{CONTENT_TYPE_JSON, MIN_CLIENT_ERROR_STATUS};
use crate::errors::ExecutionError;
use crate::models::{
    CliOverrides, EffectiveConfig, ExecutionResult, JsonRpcRequest, JsonRpcResponse, Request,
    RequestFile,
};
use crate::resolver::ConfigManager;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use std::time::Instant;

/// Executes requests sequentially with a reusable configuration manager
///
/// Cloning is cheap: the HTTP client shares its connection pool.
#[derive(Debug, Clone)]
pub struct Executor {
    client: reqwest::Client,
    config_manager: ConfigManager,
}

impl Executor {
    pub fn new() -> Result<Self> {
        tracing::debug!("Creating HTTP client");
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            config_manager: ConfigManager::new(),
        })
    }

    /// Execute one request; `request_id` becomes the JSON-RPC id
    pub async fn execute(
        &mut self,
        file: &RequestFile,
        request: &Request,
        overrides: Option<&CliOverrides>,
        request_id: u64,
    ) -> ExecutionResult {
        let start_time = Instant::now();

        let config = self
            .config_manager
            .build_for_request(file, request, overrides);

        if !config.has_url() {
            tracing::warn!("No URL configured for request '{}'", request.name);
            return ExecutionResult::failed(
                request.clone(),
                ExecutionError::NoUrl {
                    request: request.name.clone(),
                },
                start_time.elapsed(),
            );
        }

        match self.send(&config, request, request_id).await {
            Ok(response) => {
                if let Some(error) = &response.error {
                    tracing::info!("Request '{}' returned RPC error: {}", request.name, error);
                }
                ExecutionResult::completed(request.clone(), response, start_time.elapsed())
            }
            Err(error) => {
                tracing::warn!("Request '{}' failed: {}", request.name, error);
                ExecutionResult::failed(request.clone(), error, start_time.elapsed())
            }
        }
    }

    /// Execute requests in order; ids are their 1-based positions
    pub async fn execute_all(
        &mut self,
        file: &RequestFile,
        requests: &[Request],
        overrides: Option<&CliOverrides>,
    ) -> Vec<ExecutionResult> {
        tracing::info!("Executing {} request(s)", requests.len());
        let mut results = Vec::with_capacity(requests.len());

        for (index, request) in requests.iter().enumerate() {
            let result = self
                .execute(file, request, overrides, index as u64 + 1)
                .await;
            results.push(result);
        }

        tracing::info!(
            "Batch finished: {} succeeded, {} failed",
            results.iter().filter(|r| r.is_success()).count(),
            results.iter().filter(|r| !r.is_success()).count()
        );
        results
    }

    async fn send(
        &self,
        config: &EffectiveConfig,
        request: &Request,
        request_id: u64,
    ) -> Result<JsonRpcResponse, ExecutionError> {
        let envelope = JsonRpcRequest::new(&request.method, request.params.clone(), request_id);
        let body = serde_json::to_vec(&envelope).map_err(ExecutionError::Encode)?;
        let headers = build_headers(config)?;

        tracing::debug!(
            "POST {} method={} id={} timeout={}s",
            config.url,
            request.method,
            request_id,
            config.timeout
        );

        let response = self
            .client
            .post(&config.url)
            .headers(headers)
            .body(body)
            .timeout(config.timeout_duration())
            .send()
            .await
            .map_err(|e| transport_error(e, config))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| match transport_error(e, config) {
                ExecutionError::Transport(source) => ExecutionError::Body(source),
                other => other,
            })?;

        tracing::debug!("Response {} ({} bytes)", status.as_u16(), text.len());

        if status.as_u16() >= MIN_CLIENT_ERROR_STATUS {
            return Err(ExecutionError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(ExecutionError::Decode)
    }
}

/// Content type first, then the configured headers, which replace any
/// default with the same (case-insensitive) name
fn build_headers(config: &EffectiveConfig) -> Result<HeaderMap, ExecutionError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));

    for (key, value) in &config.headers {
        let name =
            HeaderName::from_bytes(key.as_bytes()).map_err(|e| ExecutionError::InvalidHeader {
                name: key.clone(),
                reason: e.to_string(),
            })?;
        let value = HeaderValue::from_str(value).map_err(|e| ExecutionError::InvalidHeader {
            name: key.clone(),
            reason: e.to_string(),
        })?;
        headers.insert(name, value);
    }

    Ok(headers)
}

fn transport_error(error: reqwest::Error, config: &EffectiveConfig) -> ExecutionError {
    if error.is_timeout() {
        ExecutionError::Timeout {
            seconds: config.timeout,
            source: error,
        }
    } else {
        ExecutionError::Transport(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn config_with_headers(pairs: &[(&str, &str)]) -> EffectiveConfig {
        let mut config = EffectiveConfig::new();
        config.url = "http://localhost".to_string();
        for (k, v) in pairs {
            config.headers.insert(k.to_string(), v.to_string());
        }
        config
    }

    #[test]
    fn build_headers_should_default_content_type() {
        let headers = build_headers(&config_with_headers(&[("X-Custom", "value")])).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get("x-custom").unwrap(), "value");
    }

    #[test]
    fn build_headers_should_let_config_replace_content_type() {
        let headers =
            build_headers(&config_with_headers(&[("content-type", "application/json-rpc")]))
                .unwrap();
        assert_eq!(headers.get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json-rpc");
    }

    #[test]
    fn build_headers_should_reject_invalid_names() {
        let err = build_headers(&config_with_headers(&[("Bad Header", "x")])).unwrap_err();
        assert!(matches!(err, ExecutionError::InvalidHeader { .. }));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn execute_should_fail_fast_without_url() {
        let mut executor = Executor::new().unwrap();
        let request = Request::new("ping", "ping");

        let result = executor
            .execute(&RequestFile::new(), &request, None, 1)
            .await;

        assert!(!result.is_success());
        assert!(result.response.is_none());
        let error = result.error.unwrap();
        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert_eq!(error.to_string(), "no URL configured for request 'ping'");
    }
}
