//! Execution result model
//!
//! One [`ExecutionResult`] is produced per executed request and handed to
//! whoever asked for the execution (formatter or TUI history).

use super::jsonrpc::JsonRpcResponse;
use super::request::Request;
use crate::errors::ExecutionError;
use std::time::Duration;

#[derive(Debug)]
pub struct ExecutionResult {
    pub request: Request,
    /// Decoded response; absent when the pipeline failed before decoding
    pub response: Option<JsonRpcResponse>,
    pub duration: Duration,
    /// Configuration, transport or decode failure
    pub error: Option<ExecutionError>,
}

impl ExecutionResult {
    pub fn completed(request: Request, response: JsonRpcResponse, duration: Duration) -> Self {
        Self {
            request,
            response: Some(response),
            duration,
            error: None,
        }
    }

    pub fn failed(request: Request, error: ExecutionError, duration: Duration) -> Self {
        Self {
            request,
            response: None,
            duration,
            error: Some(error),
        }
    }

    /// No pipeline error and no JSON-RPC error in the response
    pub fn is_success(&self) -> bool {
        self.error.is_none() && !self.response.as_ref().is_some_and(|r| r.is_error())
    }

    /// The JSON-RPC error object, if the server returned one
    pub fn rpc_error(&self) -> Option<&super::jsonrpc::RpcError> {
        self.response.as_ref().and_then(|r| r.error.as_ref())
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }
}

/// Success/failure counts over a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[ExecutionResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::jsonrpc::RpcError;
    use serde_json::{json, Value};

    fn response(error: Option<RpcError>) -> JsonRpcResponse {
        JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            result: error.is_none().then(|| json!("pong")),
            error,
            id: json!(1),
        }
    }

    fn request() -> Request {
        Request::new("ping", "ping")
    }

    #[test]
    fn is_success_should_be_true_without_any_error() {
        let result = ExecutionResult::completed(request(), response(None), Duration::ZERO);
        assert!(result.is_success());

        let no_response = ExecutionResult {
            request: request(),
            response: None,
            duration: Duration::ZERO,
            error: None,
        };
        assert!(no_response.is_success());
    }

    #[test]
    fn is_success_should_be_false_with_pipeline_error() {
        let result = ExecutionResult::failed(
            request(),
            ExecutionError::NoUrl {
                request: "ping".to_string(),
            },
            Duration::ZERO,
        );
        assert!(!result.is_success());
        assert!(result.response.is_none());
    }

    #[test]
    fn is_success_should_be_false_with_rpc_error() {
        let rpc_error = RpcError {
            code: -32000,
            message: "boom".to_string(),
            data: Some(Value::Null),
        };
        let result = ExecutionResult::completed(request(), response(Some(rpc_error)), Duration::ZERO);
        assert!(result.error.is_none());
        assert!(!result.is_success());
        assert_eq!(result.rpc_error().map(|e| e.code), Some(-32000));
    }

    #[test]
    fn batch_summary_should_count_outcomes() {
        let results = vec![
            ExecutionResult::completed(request(), response(None), Duration::ZERO),
            ExecutionResult::failed(
                request(),
                ExecutionError::NoUrl {
                    request: "ping".to_string(),
                },
                Duration::ZERO,
            ),
        ];
        let summary = BatchSummary::from_results(&results);
        assert_eq!(
            summary,
            BatchSummary {
                total: 2,
                succeeded: 1,
                failed: 1
            }
        );
        assert!(!summary.all_succeeded());
    }
}
