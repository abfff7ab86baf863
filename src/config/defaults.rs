//! Built-in defaults (layer 1)

use navclass_core::{Replacement, DEFAULT_PATTERN};
use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Un-escape patterns (default: `___`)
    pub patterns: Vec<String>,

    /// Replacement shared by all patterns (default: `:`)
    pub replacements: Replacement,

    /// Consult `link_atts*` keys for links (default: true)
    pub legacy_link_prefix: bool,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            patterns: vec![DEFAULT_PATTERN.to_string()],
            replacements: Replacement::default(),
            legacy_link_prefix: true,
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "unescape": {
                "patterns": self.patterns,
                "replacements": self.replacements
            },
            "merge": {
                "legacy_link_prefix": self.legacy_link_prefix
            }
        })
    }
}
