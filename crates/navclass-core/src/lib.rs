//! Attribute and class merging for rendered navigation menu nodes.
//!
//! A menu renderer calls the merger once per node for the link, once for the
//! item container and once for a submenu container. Each call folds the
//! renderer's default attributes together with overrides picked from an
//! option bag by key name (global, per depth, per sibling position), then
//! un-escapes the resulting class tokens.

mod attributes;
mod error;
mod keys;
mod kind;
mod options;
mod unescape;

pub use attributes::{join_tokens, split_tokens, Attributes, CLASS};
pub use error::MergeError;
pub use keys::OverrideKeys;
pub use kind::{ElementKind, NodePosition};
pub use options::{OptionsBag, RecordOptions};
pub use unescape::{Replacement, UnescapeRule, UnescapeRules, DEFAULT_PATTERN, DEFAULT_REPLACEMENT};

use serde_json::Value;
use tracing::{debug, warn};

use crate::options::value_kind;

/// Tracing target for merge events.
pub const TARGET: &str = "navclass_core::merge";

/// Merges override attributes and classes into menu node attributes.
///
/// Holds only its un-escape rules, so one instance can serve every render
/// call, from any thread.
#[derive(Debug, Clone)]
pub struct AttributeMerger {
    rules: UnescapeRules,
    legacy_link_prefix: bool,
}

impl Default for AttributeMerger {
    fn default() -> Self {
        Self::new(UnescapeRules::default())
    }
}

impl AttributeMerger {
    pub fn new(rules: UnescapeRules) -> Self {
        Self {
            rules,
            legacy_link_prefix: true,
        }
    }

    /// Toggle lookup of `link_atts*` keys for links.
    pub fn with_legacy_link_prefix(mut self, enabled: bool) -> Self {
        self.legacy_link_prefix = enabled;
        self
    }

    pub fn rules(&self) -> &UnescapeRules {
        &self.rules
    }

    /// Option keys this merger consults for a node.
    pub fn keys_for(&self, kind: ElementKind, position: NodePosition) -> OverrideKeys {
        OverrideKeys::for_node(kind, position, self.legacy_link_prefix)
    }

    /// Merge overrides from `options` into `base`.
    ///
    /// Attribute overrides replace earlier values by name, except `class`,
    /// whose tokens are appended. Class sources accumulate in this order: base,
    /// attribute overrides, then class overrides; each level ordered global,
    /// depth, order index. The result always carries a `class` attribute.
    pub fn merge<O>(
        &self,
        kind: ElementKind,
        base: Attributes,
        options: &O,
        position: NodePosition,
    ) -> Attributes
    where
        O: OptionsBag + ?Sized,
    {
        let keys = self.keys_for(kind, position);
        let mut atts = base;
        let mut tokens = atts.class_tokens();

        for key in &keys.atts {
            let Some(value) = options.lookup(key) else {
                continue;
            };
            debug!(target: TARGET, %kind, key = key.as_str(), "applying attribute override");
            apply_attribute_override(&mut atts, &mut tokens, key, value);
        }

        for key in &keys.classes {
            let Some(value) = options.lookup(key) else {
                continue;
            };
            debug!(target: TARGET, %kind, key = key.as_str(), "applying class override");
            tokens.extend(class_tokens(key, value));
        }

        let tokens = self.rules.apply_all(tokens);
        atts.insert(CLASS, join_tokens(&tokens));
        atts
    }

    /// Link hook: full attribute merge for an `<a>` element.
    pub fn link_attributes<O>(
        &self,
        atts: Attributes,
        options: &O,
        depth: u32,
        order: Option<u32>,
    ) -> Attributes
    where
        O: OptionsBag + ?Sized,
    {
        self.merge(ElementKind::Link, atts, options, NodePosition::new(depth, order))
    }

    /// Item container hook: class list in, class list out.
    ///
    /// Only class tokens survive; other attributes from `li_atts*` overrides
    /// are dropped since the caller has nowhere to put them.
    pub fn item_classes<O>(
        &self,
        classes: Vec<String>,
        options: &O,
        depth: u32,
        order: Option<u32>,
    ) -> Vec<String>
    where
        O: OptionsBag + ?Sized,
    {
        self.merge_class_list(
            ElementKind::ItemContainer,
            classes,
            options,
            NodePosition::new(depth, order),
        )
    }

    /// Submenu container hook. Submenus have no order index.
    pub fn submenu_classes<O>(&self, classes: Vec<String>, options: &O, depth: u32) -> Vec<String>
    where
        O: OptionsBag + ?Sized,
    {
        self.merge_class_list(
            ElementKind::SubmenuContainer,
            classes,
            options,
            NodePosition::at_depth(depth),
        )
    }

    fn merge_class_list<O>(
        &self,
        kind: ElementKind,
        classes: Vec<String>,
        options: &O,
        position: NodePosition,
    ) -> Vec<String>
    where
        O: OptionsBag + ?Sized,
    {
        let mut base = Attributes::new();
        base.insert(CLASS, join_tokens(&classes));
        self.merge(kind, base, options, position).class_tokens()
    }
}

/// Merge with the default un-escape rules.
pub fn merge_attributes<O>(
    kind: ElementKind,
    base: Attributes,
    options: &O,
    position: NodePosition,
) -> Attributes
where
    O: OptionsBag + ?Sized,
{
    AttributeMerger::default().merge(kind, base, options, position)
}

fn apply_attribute_override(
    atts: &mut Attributes,
    tokens: &mut Vec<String>,
    key: &str,
    value: &Value,
) {
    let map = match value {
        Value::Object(map) => map,
        Value::Null => return,
        other => {
            warn!(target: TARGET, key, found = value_kind(other), "attribute override is not a map, ignoring");
            return;
        }
    };

    for (name, v) in map {
        if name == CLASS {
            tokens.extend(class_tokens(key, v));
            continue;
        }
        match v {
            Value::String(s) => {
                atts.insert(name.as_str(), s.as_str());
            }
            Value::Number(n) => {
                atts.insert(name.as_str(), n.to_string());
            }
            Value::Bool(b) => {
                atts.insert(name.as_str(), b.to_string());
            }
            Value::Null => {
                atts.remove(name);
            }
            other => {
                warn!(
                    target: TARGET,
                    key,
                    attribute = name.as_str(),
                    found = value_kind(other),
                    "attribute value is not a scalar, ignoring"
                );
            }
        }
    }
}

/// Tokens from a class override: a whitespace-delimited string or a list of
/// tokens. Anything else contributes nothing.
fn class_tokens(key: &str, value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => split_tokens(s),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if s.is_empty() => None,
                Value::String(s) => Some(s.clone()),
                other => {
                    warn!(target: TARGET, key, found = value_kind(other), "class list entry is not a string, ignoring");
                    None
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            warn!(target: TARGET, key, found = value_kind(other), "class override is neither string nor list, ignoring");
            Vec::new()
        }
    }
}
