//! Request definitions and the parsed request file

use super::profile::{Config, Headers};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// A named JSON-RPC call definition from a request file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Request {
    pub name: String,
    pub method: String,
    /// Already converted from the file's native value representation
    pub params: Option<Value>,
    pub url: Option<String>,
    pub headers: Headers,
    pub timeout: Option<u64>,
    /// Name of the profile this request is bound to
    pub config: Option<String>,
}

impl Request {
    pub fn new(name: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: method.into(),
            ..Self::default()
        }
    }

    /// Profile reference if set to a non-empty value
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref().filter(|name| !name.is_empty())
    }

    /// The request's own URL/headers/timeout as a fragment
    pub fn fragment(&self) -> Config {
        Config {
            url: self.url.clone(),
            headers: self.headers.clone(),
            timeout: self.timeout,
        }
    }

    /// Number of parameters: zero for none, the length of a list or map,
    /// and one for any scalar
    pub fn param_count(&self) -> usize {
        match &self.params {
            None | Some(Value::Null) => 0,
            Some(Value::Array(items)) => items.len(),
            Some(Value::Object(map)) => map.len(),
            Some(_) => 1,
        }
    }

    /// True when the request carries a URL of its own
    pub fn has_custom_url(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Everything read from one request file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestFile {
    pub configs: HashMap<String, Config>,
    pub requests: Vec<Request>,
}

impl RequestFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self, name: &str) -> Option<&Config> {
        self.configs.get(name)
    }

    pub fn has_config(&self, name: &str) -> bool {
        self.configs.contains_key(name)
    }

    pub fn request(&self, name: &str) -> Option<&Request> {
        self.requests.iter().find(|request| request.name == name)
    }

    /// Pick requests by name, in the order given; all requests when no names
    /// are given
    pub fn select(&self, names: &[String]) -> Result<Vec<Request>, String> {
        if names.is_empty() {
            return Ok(self.requests.clone());
        }

        names
            .iter()
            .map(|name| {
                self.request(name)
                    .cloned()
                    .ok_or_else(|| format!("request '{name}' not found in file"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_param_count() {
        let mut request = Request::new("count", "test");
        assert_eq!(request.param_count(), 0);

        request.params = Some(Value::Null);
        assert_eq!(request.param_count(), 0);

        request.params = Some(json!([]));
        assert_eq!(request.param_count(), 0);

        request.params = Some(json!(["a", "b", "c"]));
        assert_eq!(request.param_count(), 3);

        request.params = Some(json!({"key1": "value1", "key2": "value2"}));
        assert_eq!(request.param_count(), 2);

        request.params = Some(json!("single"));
        assert_eq!(request.param_count(), 1);
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let file = RequestFile {
            requests: vec![Request::new("a", "m.a"), Request::new("b", "m.b")],
            ..RequestFile::new()
        };

        let selected = file.select(&["b".to_string(), "a".to_string()]).unwrap();
        let names: Vec<_> = selected.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);

        assert_eq!(file.select(&[]).unwrap().len(), 2);
    }

    #[test]
    fn test_select_unknown_name() {
        let file = RequestFile::new();
        let err = file.select(&["nope".to_string()]).unwrap_err();
        assert_eq!(err, "request 'nope' not found in file");
    }
}
