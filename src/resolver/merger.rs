//! Configuration merger
//!
//! Holds the sources that apply to one request and folds them, lowest
//! priority first, into an [`EffectiveConfig`].

use super::source::ConfigSource;
use crate::config::DEFAULT_CONFIG_NAME;
use crate::models::{Config, EffectiveConfig};

#[derive(Debug, Clone, Default)]
pub struct ConfigMerger {
    sources: Vec<ConfigSource>,
}

impl ConfigMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source, keeping the list sorted by ascending priority
    pub fn add_source(&mut self, source: ConfigSource) {
        self.sources.push(source);
        self.sources.sort_by_key(ConfigSource::priority);
    }

    /// Merge every source into a fresh effective configuration
    pub fn build_effective(&self) -> EffectiveConfig {
        let mut effective = EffectiveConfig::new();

        for source in &self.sources {
            if let Some(fragment) = source.config() {
                merge_into(&mut effective, &fragment);
            }
        }

        effective
    }

    /// Name of the highest-priority profile that shaped the configuration
    ///
    /// Only named profiles and requests bound to a non-default profile are
    /// considered; command-line overrides never name the configuration.
    /// Falls back to `default` when a default profile was added, and to an
    /// empty string otherwise.
    pub fn config_name(&self) -> String {
        let named = self.sources.iter().rev().find_map(|source| match source {
            ConfigSource::Named {
                name,
                config: Some(_),
            } => Some(name.as_str()),
            ConfigSource::Request(request) => request
                .config_ref()
                .filter(|name| *name != DEFAULT_CONFIG_NAME),
            _ => None,
        });

        match named {
            Some(name) => name.to_string(),
            None if self.has_default_source() => DEFAULT_CONFIG_NAME.to_string(),
            None => String::new(),
        }
    }

    /// Remove all sources so the merger can be reused for the next request
    pub fn clear_sources(&mut self) {
        self.sources.clear();
    }

    /// Sources in priority order
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    fn has_default_source(&self) -> bool {
        self.sources
            .iter()
            .any(|source| matches!(source, ConfigSource::Default(_)))
    }
}

/// Apply one fragment on top of the accumulated configuration
///
/// Set scalars replace, headers are merged key by key, unset fields are left
/// alone.
fn merge_into(effective: &mut EffectiveConfig, fragment: &Config) {
    if let Some(url) = fragment.url() {
        effective.url = url.to_string();
    }

    for (key, value) in &fragment.headers {
        effective.headers.insert(key.clone(), value.clone());
    }

    if let Some(timeout) = fragment.timeout() {
        effective.timeout = timeout;
    }
}
