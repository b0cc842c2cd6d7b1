//! # Models
//!
//! Plain data shared by the parser, the resolution engine, the executor and
//! every presentation layer.

pub mod execution;
pub mod jsonrpc;
pub mod profile;
pub mod request;

pub use execution::{BatchSummary, ExecutionResult};
pub use jsonrpc::{JsonRpcRequest, JsonRpcResponse, RpcError};
pub use profile::{CliOverrides, Config, EffectiveConfig, Headers};
pub use request::{Request, RequestFile};
