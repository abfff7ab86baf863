//! Element kinds and node positions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::MergeError;

/// The category of markup element being decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    /// The `<a>` of a menu item.
    Link,
    /// The `<li>` wrapping a menu item.
    ItemContainer,
    /// The `<ul>` wrapping a nested submenu.
    SubmenuContainer,
}

impl ElementKind {
    /// All kinds, in hook order.
    pub const ALL: [ElementKind; 3] = [
        ElementKind::Link,
        ElementKind::ItemContainer,
        ElementKind::SubmenuContainer,
    ];

    /// Prefix used to build option keys for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            ElementKind::Link => "a",
            ElementKind::ItemContainer => "li",
            ElementKind::SubmenuContainer => "submenu",
        }
    }

    /// Older prefix still accepted for attribute overrides.
    pub fn legacy_attr_prefix(self) -> Option<&'static str> {
        match self {
            ElementKind::Link => Some("link"),
            _ => None,
        }
    }

    /// Canonical kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Link => "link",
            ElementKind::ItemContainer => "item-container",
            ElementKind::SubmenuContainer => "submenu-container",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = MergeError;

    /// Accepts the kebab-case name or the key prefix (`a`, `li`, `submenu`, `ul`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "link" | "a" => Ok(ElementKind::Link),
            "item-container" | "li" => Ok(ElementKind::ItemContainer),
            "submenu-container" | "submenu" | "ul" => Ok(ElementKind::SubmenuContainer),
            other => Err(MergeError::UnknownKind(other.to_string())),
        }
    }
}

/// Where a node sits in the menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodePosition {
    /// Nesting level, 0 for the root level.
    pub depth: u32,

    /// Position among siblings, if the element has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl NodePosition {
    pub fn new(depth: u32, order: Option<u32>) -> Self {
        Self { depth, order }
    }

    /// Position without an order index (submenu containers).
    pub fn at_depth(depth: u32) -> Self {
        Self { depth, order: None }
    }

    /// Build from a raw order index where any negative value (conventionally
    /// `-1`) means "not applicable". Indexes past `u32::MAX` are also treated
    /// as absent, with a warning.
    pub fn from_raw(depth: u32, raw_order: i64) -> Self {
        let order = u32::try_from(raw_order).ok();
        if order.is_none() && raw_order > 0 {
            warn!(
                target: crate::TARGET,
                raw_order, "order index out of range, ignoring"
            );
        }
        Self { depth, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(ElementKind::Link.prefix(), "a");
        assert_eq!(ElementKind::ItemContainer.prefix(), "li");
        assert_eq!(ElementKind::SubmenuContainer.prefix(), "submenu");
    }

    #[test]
    fn test_parse_names_and_prefixes() {
        assert_eq!("link".parse::<ElementKind>().unwrap(), ElementKind::Link);
        assert_eq!("li".parse::<ElementKind>().unwrap(), ElementKind::ItemContainer);
        assert_eq!("ul".parse::<ElementKind>().unwrap(), ElementKind::SubmenuContainer);
        assert!(matches!(
            "nav".parse::<ElementKind>(),
            Err(MergeError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.to_string().parse::<ElementKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_raw_sentinel_order() {
        assert_eq!(NodePosition::from_raw(2, -1).order, None);
        assert_eq!(NodePosition::from_raw(2, 4).order, Some(4));
        assert_eq!(NodePosition::from_raw(2, 4).depth, 2);
    }

    #[test]
    fn test_raw_order_bounds() {
        assert_eq!(NodePosition::from_raw(0, u32::MAX as i64).order, Some(u32::MAX));
        assert_eq!(NodePosition::from_raw(0, u32::MAX as i64 + 1).order, None);
        assert_eq!(NodePosition::from_raw(0, i64::MIN).order, None);
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&ElementKind::ItemContainer).unwrap();
        assert_eq!(json, "\"item-container\"");
    }
}
