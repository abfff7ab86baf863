//! Layered configuration
//!
//! Un-escape rules and merge switches come from three layers, lowest first:
//! 1. Built-in defaults
//! 2. Host config (~/.config/navclass/config.toml or --config)
//! 3. CLI flags

mod defaults;
mod effective;
mod merge;

pub use defaults::BuiltinDefaults;
pub use effective::{
    default_host_config_path, toml_to_json, ConfigError, ConfigOrigin, ConfigSource,
    EffectiveConfig, MergeSettings, NavclassConfig, UnescapeSettings,
};
pub use merge::{deep_merge, merge_layers};
