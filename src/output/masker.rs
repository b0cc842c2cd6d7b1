//! Masking of credential-bearing header values for display

use regex::Regex;
use std::sync::LazyLock;

const SENSITIVE_PATTERN: &str = r"(?i)authorization|token|api-key|apikey|secret|password|bearer";
const MASK: &str = "****";
const VISIBLE_PREFIX: usize = 4;

static SENSITIVE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SENSITIVE_PATTERN).expect("sensitive header regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct SensitiveMasker;

impl SensitiveMasker {
    pub fn new() -> Self {
        Self
    }

    pub fn is_sensitive(&self, header_name: &str) -> bool {
        SENSITIVE_HEADER.is_match(header_name)
    }

    /// Keep the first four characters, hide the rest
    pub fn mask(&self, value: &str) -> String {
        if value.chars().count() <= VISIBLE_PREFIX {
            return MASK.to_string();
        }
        let prefix: String = value.chars().take(VISIBLE_PREFIX).collect();
        format!("{prefix}{MASK}")
    }

    pub fn mask_if_sensitive(&self, key: &str, value: &str) -> String {
        if self.is_sensitive(key) {
            self.mask(value)
        } else {
            value.to_string()
        }
    }
}
