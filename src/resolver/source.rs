//! Configuration sources
//!
//! Each source is one origin of configuration with a fixed priority. Higher
//! priorities are applied later and therefore win.

use crate::config::{CLI_SOURCE_NAME, DEFAULT_CONFIG_NAME};
use crate::models::{CliOverrides, Config, Request};
use std::borrow::Cow;

pub const DEFAULT_PRIORITY: u8 = 10;
pub const NAMED_PRIORITY: u8 = 20;
pub const REQUEST_PRIORITY: u8 = 30;
pub const CLI_PRIORITY: u8 = 40;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// The file's `default` profile
    Default(Option<Config>),
    /// A profile selected by name, by the request or on the command line
    Named { name: String, config: Option<Config> },
    /// Fields set directly on the request definition
    Request(Request),
    /// Command-line overrides
    Cli(CliOverrides),
}

impl ConfigSource {
    pub fn default_profile(config: Option<Config>) -> Self {
        Self::Default(config)
    }

    pub fn named(name: impl Into<String>, config: Option<Config>) -> Self {
        Self::Named {
            name: name.into(),
            config,
        }
    }

    pub fn request(request: &Request) -> Self {
        Self::Request(request.clone())
    }

    pub fn cli(overrides: &CliOverrides) -> Self {
        Self::Cli(overrides.clone())
    }

    /// Human-readable name of this source
    pub fn name(&self) -> &str {
        match self {
            Self::Default(_) => DEFAULT_CONFIG_NAME,
            Self::Named { name, .. } => name,
            Self::Request(request) => &request.name,
            Self::Cli(_) => CLI_SOURCE_NAME,
        }
    }

    pub fn priority(&self) -> u8 {
        match self {
            Self::Default(_) => DEFAULT_PRIORITY,
            Self::Named { .. } => NAMED_PRIORITY,
            Self::Request(_) => REQUEST_PRIORITY,
            Self::Cli(_) => CLI_PRIORITY,
        }
    }

    /// The fragment this source contributes, if any
    ///
    /// Request and command-line sources always produce a fragment, possibly
    /// an empty one.
    pub fn config(&self) -> Option<Cow<'_, Config>> {
        match self {
            Self::Default(config) | Self::Named { config, .. } => config.as_ref().map(Cow::Borrowed),
            Self::Request(request) => Some(Cow::Owned(request.fragment())),
            Self::Cli(overrides) => Some(Cow::Owned(overrides.fragment())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_source() {
        let config = Config::new().with_url("https://default.example.com");
        let source = ConfigSource::default_profile(Some(config.clone()));

        assert_eq!(source.name(), "default");
        assert_eq!(source.priority(), 10);
        assert_eq!(source.config().as_deref(), Some(&config));
    }

    #[test]
    fn test_named_source() {
        let config = Config::new().with_url("https://prod.example.com");
        let source = ConfigSource::named("production", Some(config.clone()));

        assert_eq!(source.name(), "production");
        assert_eq!(source.priority(), 20);
        assert_eq!(source.config().as_deref(), Some(&config));

        let missing = ConfigSource::named("production", None);
        assert!(missing.config().is_none());
    }

    #[test]
    fn test_request_source() {
        let mut request = Request::new("test-request", "test.method");
        request.url = Some("https://request.example.com".to_string());
        request.timeout = Some(45);
        request
            .headers
            .insert("Request-Header".to_string(), "request-value".to_string());
        request.config = Some("production".to_string());

        let source = ConfigSource::request(&request);
        assert_eq!(source.name(), "test-request");
        assert_eq!(source.priority(), 30);

        let config = source.config().unwrap();
        assert_eq!(config.url(), Some("https://request.example.com"));
        assert_eq!(config.timeout(), Some(45));
        assert_eq!(
            config.headers.get("Request-Header").map(String::as_str),
            Some("request-value")
        );
    }

    #[test]
    fn test_request_source_always_has_fragment() {
        let source = ConfigSource::request(&Request::new("bare", "bare"));
        let config = source.config().unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_cli_source() {
        let mut overrides = CliOverrides::new();
        overrides.url = Some("https://cli.example.com".to_string());
        overrides.timeout = Some(90);
        overrides
            .headers
            .insert("CLI-Header".to_string(), "cli-value".to_string());
        overrides.config = Some("staging".to_string());

        let source = ConfigSource::cli(&overrides);
        assert_eq!(source.name(), "cli");
        assert_eq!(source.priority(), 40);

        let config = source.config().unwrap();
        assert_eq!(config.url(), Some("https://cli.example.com"));
        assert_eq!(config.timeout(), Some(90));
        assert_eq!(
            config.headers.get("CLI-Header").map(String::as_str),
            Some("cli-value")
        );
    }
}
