//! Request file validation
//!
//! Runs before anything is executed. The first problem found aborts the
//! whole invocation.

use crate::models::{Request, RequestFile};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("request '{request}' is missing required 'method' field")]
    MissingMethod { request: String },

    #[error("request '{request}' references non-existent config '{config}'")]
    UnknownConfig { request: String, config: String },
}

/// Check every request in the file
pub fn validate(file: &RequestFile) -> Result<(), ValidationError> {
    file.requests
        .iter()
        .try_for_each(|request| validate_request(request, file))
}

fn validate_request(request: &Request, file: &RequestFile) -> Result<(), ValidationError> {
    if request.method.is_empty() {
        return Err(ValidationError::MissingMethod {
            request: request.name.clone(),
        });
    }

    if let Some(config) = request.config_ref() {
        if !file.has_config(config) {
            return Err(ValidationError::UnknownConfig {
                request: request.name.clone(),
                config: config.to_string(),
            });
        }
    }

    Ok(())
}
