//! Configuration manager
//!
//! Decides which sources apply to a request and produces its effective
//! configuration. One manager is reused across a whole batch; its merger is
//! cleared before every resolution so nothing leaks between requests.

use super::merger::ConfigMerger;
use super::source::ConfigSource;
use crate::config::DEFAULT_CONFIG_NAME;
use crate::models::{CliOverrides, EffectiveConfig, Request, RequestFile};

#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    merger: ConfigMerger,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the effective configuration for one request
    ///
    /// Sources: the `default` profile if present, the selected profile if it
    /// exists and is not `default`, the request itself, and the overrides if
    /// given.
    pub fn build_for_request(
        &mut self,
        file: &RequestFile,
        request: &Request,
        overrides: Option<&CliOverrides>,
    ) -> EffectiveConfig {
        self.merger.clear_sources();

        if let Some(default_config) = file.config(DEFAULT_CONFIG_NAME) {
            self.merger
                .add_source(ConfigSource::default_profile(Some(default_config.clone())));
        }

        let config_name = nominal_config_name(request, overrides);
        if config_name != DEFAULT_CONFIG_NAME {
            match file.config(config_name) {
                Some(named) => self
                    .merger
                    .add_source(ConfigSource::named(config_name, Some(named.clone()))),
                None => tracing::debug!(
                    "Profile '{}' for request '{}' not found, skipping",
                    config_name,
                    request.name
                ),
            }
        }

        self.merger.add_source(ConfigSource::request(request));

        if let Some(overrides) = overrides {
            self.merger.add_source(ConfigSource::cli(overrides));
        }

        let effective = self.merger.build_effective();
        tracing::debug!(
            "Resolved '{}' as '{}' via [{}]: url={:?} timeout={}s headers={}",
            request.name,
            self.resolved_config_name(),
            self.source_names().join(", "),
            effective.url,
            effective.timeout,
            effective.headers.len()
        );
        effective
    }

    /// Profile name to show for a request
    ///
    /// When the selected profile does not exist but a `default` profile does,
    /// `default` is shown instead. This only affects what is displayed, not
    /// what gets merged. The sources of the last build are left in place.
    pub fn config_name_for_request(
        &self,
        file: &RequestFile,
        request: &Request,
        overrides: Option<&CliOverrides>,
    ) -> String {
        let config_name = nominal_config_name(request, overrides);
        if config_name != DEFAULT_CONFIG_NAME
            && !file.has_config(config_name)
            && file.has_config(DEFAULT_CONFIG_NAME)
        {
            return DEFAULT_CONFIG_NAME.to_string();
        }

        config_name.to_string()
    }

    /// Name derived from the sources of the most recent build
    pub fn resolved_config_name(&self) -> String {
        self.merger.config_name()
    }

    fn source_names(&self) -> Vec<&str> {
        self.merger.sources().iter().map(ConfigSource::name).collect()
    }
}

/// Profile selected for a request before checking that it exists
///
/// The command-line profile wins over the request's own reference; with
/// neither, the `default` profile is selected.
pub fn nominal_config_name<'a>(request: &'a Request, overrides: Option<&'a CliOverrides>) -> &'a str {
    overrides
        .and_then(CliOverrides::config_name)
        .or_else(|| request.config_ref())
        .unwrap_or(DEFAULT_CONFIG_NAME)
}
