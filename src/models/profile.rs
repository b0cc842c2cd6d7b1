//! Configuration fragments and the merged effective configuration
//!
//! A [`Config`] is what one source knows about where and how to send a
//! request. Unset fields carry no opinion. [`EffectiveConfig`] is what is
//! left after all applicable fragments have been merged.

use crate::config::DEFAULT_TIMEOUT_SECS;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Header map with case-sensitive keys
pub type Headers = BTreeMap<String, String>;

/// Partial configuration contributed by a profile, a request or the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: Headers,
    /// Seconds; zero is treated the same as unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// URL if set to a non-empty value
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// Timeout if set to a positive value
    pub fn timeout(&self) -> Option<u64> {
        self.timeout.filter(|secs| *secs > 0)
    }

    /// True when merging this fragment cannot change anything
    pub fn is_empty(&self) -> bool {
        self.url().is_none() && self.headers.is_empty() && self.timeout().is_none()
    }
}

/// Fully merged configuration for one request's execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub url: String,
    pub headers: Headers,
    /// Seconds
    pub timeout: u64,
}

impl EffectiveConfig {
    pub fn new() -> Self {
        Self {
            url: String::new(),
            headers: Headers::new(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime overrides supplied on the command line
///
/// Unset or empty fields do not override anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub headers: Headers,
    pub timeout: Option<u64>,
    /// Profile to use instead of the request's own `config` reference
    pub config: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Profile override if set to a non-empty value
    pub fn config_name(&self) -> Option<&str> {
        self.config.as_deref().filter(|name| !name.is_empty())
    }

    /// The URL/headers/timeout part of the overrides as a fragment
    pub fn fragment(&self) -> Config {
        Config {
            url: self.url.clone(),
            headers: self.headers.clone(),
            timeout: self.timeout,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragment().is_empty() && self.config_name().is_none()
    }
}
