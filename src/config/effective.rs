//! Effective configuration with provenance
//!
//! Captures the merged configuration plus where each layer came from, and
//! turns it into a ready-to-use [`AttributeMerger`].

use navclass_core::{AttributeMerger, MergeError, Replacement, UnescapeRules};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;

/// Schema identifier
pub const SCHEMA_ID: &str = "navclass/effective_config@1";

/// Origin of a configuration source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    Host,
    Cli,
}

/// A contributing config source with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 of raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// `[unescape]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnescapeSettings {
    pub patterns: Vec<String>,
    /// A string shared by every pattern, or a list paired by position
    #[serde(default)]
    pub replacements: Replacement,
}

/// `[merge]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeSettings {
    pub legacy_link_prefix: bool,
}

/// Typed view of the merged configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavclassConfig {
    pub unescape: UnescapeSettings,
    pub merge: MergeSettings,
}

/// Effective configuration with provenance
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub schema_id: String,

    pub config: NavclassConfig,

    /// Contributing sources in precedence order
    pub sources: Vec<ConfigSource>,

    /// Compiled un-escape rules in application order
    rules: UnescapeRules,
}

impl EffectiveConfig {
    /// Built-in defaults only
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::build(None, None)
    }

    /// Build effective config from layers. A missing host file is skipped.
    pub fn build(
        host_config_path: Option<&Path>,
        cli_overrides: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = vec![BuiltinDefaults::default().to_value()];
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        }];

        if let Some(path) = host_config_path {
            if path.exists() {
                let (value, digest) = load_toml_file(path)?;
                debug!(path = %path.display(), %digest, "loaded host config");
                layers.push(value);
                sources.push(ConfigSource {
                    origin: ConfigOrigin::Host,
                    path: Some(path.to_string_lossy().to_string()),
                    digest: Some(digest),
                });
            } else {
                debug!(path = %path.display(), "host config not found, skipping");
            }
        }

        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(layers);
        let config: NavclassConfig = serde_json::from_value(merged)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        let rules = Self::validate_config(&config)?;

        Ok(Self {
            schema_id: SCHEMA_ID.to_string(),
            config,
            sources,
            rules,
        })
    }

    /// Validate settings and compile the un-escape rules
    fn validate_config(config: &NavclassConfig) -> Result<UnescapeRules, ConfigError> {
        let unescape = &config.unescape;
        Ok(UnescapeRules::from_lists(
            &unescape.patterns,
            &unescape.replacements,
        )?)
    }

    pub fn rules(&self) -> &UnescapeRules {
        &self.rules
    }

    /// Merger configured from this effective config
    pub fn merger(&self) -> AttributeMerger {
        AttributeMerger::new(self.rules.clone())
            .with_legacy_link_prefix(self.config.merge.legacy_link_prefix)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// `$HOME/.config/navclass/config.toml`, if HOME is set
pub fn default_host_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("navclass")
            .join("config.toml")
    })
}

/// Load and parse a TOML file, returning the value and digest
fn load_toml_file(path: &Path) -> Result<(Value, String), ConfigError> {
    let bytes = fs::read(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let contents = String::from_utf8(bytes)
        .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;

    let toml_value: toml::Value = toml::from_str(&contents)
        .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

    Ok((toml_to_json(toml_value), digest))
}

/// Convert TOML Value to JSON Value
pub fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid unescape rules: {0}")]
    Rules(#[from] MergeError),
}
