//! # Configuration Resolution
//!
//! Turns a request file, a request and optional command-line overrides into
//! the one [`EffectiveConfig`](crate::models::EffectiveConfig) used to send
//! that request.
//!
//! ```text
//!  default profile (10) ─┐
//!  named profile   (20) ─┤  ConfigMerger   ┌─────────────────┐
//!  request fields  (30) ─┼───────────────▶ │ EffectiveConfig │
//!  CLI overrides   (40) ─┘  (ascending)    └─────────────────┘
//! ```
//!
//! URL and timeout are replaced by any higher-priority source that sets
//! them. Headers are merged key by key.

pub mod manager;
pub mod merger;
pub mod source;

pub use manager::{nominal_config_name, ConfigManager};
pub use merger::ConfigMerger;
pub use source::ConfigSource;
