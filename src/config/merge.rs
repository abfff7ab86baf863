//! Configuration layer merge
//!
//! - Objects: deep-merge by key
//! - Arrays: REPLACE (last wins)
//! - Scalars: override (last wins)
//! - Null: keeps the lower layer

use serde_json::Value;

/// Deep merge two JSON values.
///
/// A `null` in the overlay means "not set at this layer", so CLI overrides
/// built from optional flags can be merged without clobbering lower layers.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (base, Value::Null) => base,

        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None if overlay_value.is_null() => continue,
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        // Pattern lists replace wholesale; concatenating would reorder rules
        (_, overlay) => overlay,
    }
}

/// Merge layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_override() {
        let base = json!({"merge": {"legacy_link_prefix": true}});
        let overlay = json!({"merge": {"legacy_link_prefix": false}});
        let result = deep_merge(base, overlay);
        assert_eq!(result["merge"]["legacy_link_prefix"], false);
    }

    #[test]
    fn test_sibling_keys_preserved() {
        let base = json!({
            "unescape": {"patterns": ["___"], "replacements": [":"]}
        });
        let overlay = json!({
            "unescape": {"replacements": ["-"]}
        });
        let result = deep_merge(base, overlay);

        assert_eq!(result["unescape"]["patterns"], json!(["___"]));
        assert_eq!(result["unescape"]["replacements"], json!(["-"]));
    }

    #[test]
    fn test_pattern_list_replaced() {
        let base = json!({"unescape": {"patterns": ["___", "--"]}});
        let overlay = json!({"unescape": {"patterns": ["~~"]}});
        let result = deep_merge(base, overlay);

        assert_eq!(result["unescape"]["patterns"], json!(["~~"]));
    }

    #[test]
    fn test_null_keeps_lower_layer() {
        let base = json!({"unescape": {"patterns": ["___"]}});
        let overlay = json!({"unescape": {"patterns": null}, "extra": null});
        let result = deep_merge(base, overlay);

        assert_eq!(result["unescape"]["patterns"], json!(["___"]));
        assert!(result.get("extra").is_none());
    }

    #[test]
    fn test_merge_layers() {
        let builtin = json!({
            "unescape": {"patterns": ["___"], "replacements": [":"]},
            "merge": {"legacy_link_prefix": true}
        });
        let host = json!({"merge": {"legacy_link_prefix": false}});
        let cli = json!({"unescape": {"patterns": ["___", "--"], "replacements": [":", "/"]}});

        let result = merge_layers(vec![builtin, host, cli]);

        assert_eq!(result["merge"]["legacy_link_prefix"], false);
        assert_eq!(result["unescape"]["patterns"], json!(["___", "--"]));
        assert_eq!(result["unescape"]["replacements"], json!([":", "/"]));
    }
}
